use core::time::Duration;

use bevy::prelude::*;

use crate::FONT;

/// How long a score cue stays on screen before despawning.
const CUE_LIFETIME: Duration = Duration::from_millis(800);
const CUE_RISE: f32 = 60.0;

#[derive(Component)]
pub struct FloatingScore {
    timer: Timer,
    start: Vec2,
}

/// Spawns a short-lived score text ("+5", "-3", ...) that rises and fades out.
pub fn spawn_floating_score(
    commands: &mut Commands,
    position: Vec2,
    text: &str,
    color: Srgba,
    asset_server: &Res<AssetServer>,
) {
    commands.spawn((
        Text2d::new(text),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::Srgba(color)),
        TextLayout::new_with_justify(JustifyText::Center),
        Transform::from_xyz(position.x, position.y, 10.0),
        FloatingScore {
            timer: Timer::new(CUE_LIFETIME, TimerMode::Once),
            start: position,
        },
    ));
}

pub fn animate_floating_scores(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut TextColor, &mut FloatingScore)>,
) {
    for (entity, mut transform, mut color, mut cue) in &mut query {
        cue.timer.tick(time.delta());
        let progress = cue.timer.fraction();

        transform.translation.y = CUE_RISE.mul_add(progress, cue.start.y);
        color.0.set_alpha(1.0 - progress);

        if cue.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}
