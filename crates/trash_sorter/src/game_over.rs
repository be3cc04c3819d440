use arcade_helpers::input::just_pressed_screen_position;
use arcade_helpers::{FONT, WINDOW_HEIGHT, WINDOW_WIDTH};
use bevy::prelude::*;

use crate::core::GameState;
use crate::scoring::Score;

/// Component marker for round over screen entities
#[derive(Component)]
pub struct RoundOverScreen;

/// Marker for the back-to-menu button.
#[derive(Component)]
pub struct MainMenuButton;

pub fn spawn_round_over_screen(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    score: Res<Score>,
) {
    // Semi-transparent overlay over the leftovers of the play field
    commands.spawn((
        RoundOverScreen,
        Sprite::from_color(
            Color::srgba(0.0, 0.0, 0.0, 0.8),
            Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        ),
        Transform::from_xyz(0.0, 0.0, 5.0),
    ));

    commands.spawn((
        RoundOverScreen,
        Text2d::new("Time's Up!"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 48.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, WINDOW_HEIGHT / 4.0, 6.0),
    ));

    commands.spawn((
        RoundOverScreen,
        Text2d::new(format!("Final Score: {}", score.value())),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 32.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, 0.0, 6.0),
    ));

    commands.spawn((
        RoundOverScreen,
        Text2d::new("Tap to Play Again"),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, -WINDOW_HEIGHT / 4.0, 6.0),
    ));

    commands
        .spawn((
            RoundOverScreen,
            MainMenuButton,
            Button,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(140.0),
                height: Val::Px(44.0),
                left: Val::Px(110.0),
                bottom: Val::Px(40.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.25, 0.25, 0.3)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Main Menu"),
                TextFont {
                    font: asset_server.load(FONT),
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Replays with the same difficulty on a tap, or returns to the menu via the
/// button. The button takes precedence over the tap-anywhere replay.
pub fn handle_round_over_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    menu_button: Query<&Interaction, With<MainMenuButton>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if menu_button
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
    {
        next_state.set(GameState::Menu);
        return;
    }

    if just_pressed_screen_position(&mouse_input, &touch_input, &windows).is_some() {
        next_state.set(GameState::Playing);
    }
}

pub fn cleanup_round_over(mut commands: Commands, query: Query<Entity, With<RoundOverScreen>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
