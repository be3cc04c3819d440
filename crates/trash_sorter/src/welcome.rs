use arcade_helpers::input::just_pressed_screen_position;
use arcade_helpers::{FONT, WINDOW_HEIGHT};
use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::bins::WasteCategory;
use crate::core::{Difficulty, GameState};

/// Component marker for menu screen entities.
#[derive(Component)]
pub struct MenuScreen;

/// Marker for the hard mode button.
#[derive(Component)]
pub struct HardModeButton;

pub fn spawn_menu(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        MenuScreen,
        Text2d::new("Trash Sorter"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 40.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, WINDOW_HEIGHT / 4.0, 0.0),
    ));

    commands.spawn((
        MenuScreen,
        Text2d::new("Swap the bins to catch\nfalling trash in the right one"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 18.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::srgb(0.8, 0.8, 0.8)),
        Transform::from_xyz(0.0, 90.0, 0.0),
    ));

    // One swatch per category so the palette is known before play starts.
    for (index, category) in WasteCategory::iter().enumerate() {
        let x = -120.0 + 80.0 * index as f32;
        commands
            .spawn((
                MenuScreen,
                Sprite::from_color(category.color(), Vec2::new(64.0, 64.0)),
                Transform::from_xyz(x, 0.0, 0.0),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(category.label()),
                    TextFont {
                        font: asset_server.load(FONT),
                        font_size: 11.0,
                        ..default()
                    },
                    TextLayout::new_with_justify(JustifyText::Center),
                    TextColor(Color::WHITE),
                    Transform::from_xyz(0.0, 0.0, 1.0),
                ));
            });
    }

    commands.spawn((
        MenuScreen,
        Text2d::new("Tap to Start"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 32.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, -WINDOW_HEIGHT / 4.0, 0.0),
    ));

    commands
        .spawn((
            MenuScreen,
            HardModeButton,
            Button,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(140.0),
                height: Val::Px(44.0),
                left: Val::Px(110.0),
                bottom: Val::Px(60.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.5, 0.15, 0.15)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Hard Mode"),
                TextFont {
                    font: asset_server.load(FONT),
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Starts a round. The hard mode button takes precedence over the
/// tap-anywhere start, since a tap on the button raises both.
pub fn handle_menu_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    hard_button: Query<&Interaction, With<HardModeButton>>,
    mut difficulty: ResMut<Difficulty>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if hard_button
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
    {
        *difficulty = Difficulty::Hard;
        next_state.set(GameState::Playing);
        return;
    }

    if just_pressed_screen_position(&mouse_input, &touch_input, &windows).is_some() {
        *difficulty = Difficulty::Easy;
        next_state.set(GameState::Playing);
    }
}

pub fn despawn_menu(mut commands: Commands, query: Query<Entity, With<MenuScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
