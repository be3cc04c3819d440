use arcade_helpers::floating_score::FloatingScore;
use arcade_helpers::{FONT, WINDOW_HEIGHT, WINDOW_WIDTH};
use bevy::prelude::*;
use serde::Serialize;

use crate::bins::{Bin, BinArrangement, SwapButton};
use crate::core::{Countdown, Difficulty, GameState};
use crate::falling::TrashPiece;
use crate::scoring::Score;
use crate::spawner::SpawnScheduler;

/// Handed to the leaderboard pipeline when a round ends. Everything past this
/// event (persistence, friend sync) lives outside this crate.
#[derive(Event, Clone, Copy, Debug, Serialize)]
pub struct RoundSummary {
    pub final_score: i32,
    pub difficulty: Difficulty,
}

/// Component tag for the score display
#[derive(Component)]
pub struct ScoreDisplay;

/// Component tag for the countdown display
#[derive(Component)]
pub struct TimerDisplay;

/// Marker for everything spawned for the Playing state HUD.
#[derive(Component)]
pub struct HudElement;

/// Resets all round state on entry into Playing.
///
/// The order matters: score and countdown first, then the bin layout, then
/// clearing leftover pieces, and only then the spawn schedule. Anything else
/// lets stale pieces or a stale arrangement leak into the new round.
pub fn enter_playing(
    mut commands: Commands,
    mut score: ResMut<Score>,
    mut countdown: ResMut<Countdown>,
    difficulty: Res<Difficulty>,
    mut arrangement: ResMut<BinArrangement>,
    mut scheduler: ResMut<SpawnScheduler>,
    pieces: Query<Entity, With<TrashPiece>>,
) {
    score.reset();
    countdown.start(difficulty.round_seconds());
    arrangement.canonicalize();
    for entity in &pieces {
        commands.entity(entity).despawn_recursive();
    }
    scheduler.stop();
    scheduler.reset_round();
    scheduler.start(difficulty.spawn_interval());
    info!("round started, difficulty {:?}", *difficulty);
}

/// Advances the countdown and fires the single transition to RoundOver.
pub fn tick_countdown(
    time: Res<Time>,
    mut countdown: ResMut<Countdown>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if countdown.tick(time.delta_secs()) {
        next_state.set(GameState::RoundOver);
    }
}

fn score_label(value: i32) -> String {
    format!("Score: {value}")
}

fn timer_label(remaining: f32) -> String {
    format!("Time: {}", remaining.ceil() as i32)
}

/// Spawns the in-round HUD: score, countdown, mode label, swap buttons.
pub fn spawn_hud(
    mut commands: Commands,
    difficulty: Res<Difficulty>,
    asset_server: Res<AssetServer>,
) {
    commands.spawn((
        Text2d::new(score_label(0)),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Left),
        Transform::from_xyz(-WINDOW_WIDTH / 2.0 + 60.0, WINDOW_HEIGHT / 2.0 - 30.0, 0.0),
        ScoreDisplay,
        HudElement,
    ));

    commands.spawn((
        Text2d::new(timer_label(difficulty.round_seconds())),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 24.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Right),
        Transform::from_xyz(WINDOW_WIDTH / 2.0 - 60.0, WINDOW_HEIGHT / 2.0 - 30.0, 0.0),
        TimerDisplay,
        HudElement,
    ));

    commands.spawn((
        Text2d::new(difficulty.label()),
        TextFont {
            font: asset_server.load(FONT),
            font_size: 16.0,
            ..default()
        },
        TextLayout::new_with_justify(JustifyText::Center),
        TextColor(Color::srgb(0.7, 0.7, 0.7)),
        Transform::from_xyz(0.0, WINDOW_HEIGHT / 2.0 - 30.0, 0.0),
        HudElement,
    ));

    // One swap button under each gap between adjacent bins.
    for (pair, label) in ["1", "2", "3"].into_iter().enumerate() {
        commands
            .spawn((
                Button,
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(70.0),
                    height: Val::Px(36.0),
                    left: Val::Px(40.0 + 95.0 * pair as f32),
                    bottom: Val::Px(12.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(Color::srgb(0.25, 0.25, 0.3)),
                SwapButton { pair },
                HudElement,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new(label),
                    TextFont {
                        font: asset_server.load(FONT),
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
    }
}

/// Refreshes the score and countdown labels.
pub fn update_hud(
    score: Res<Score>,
    countdown: Res<Countdown>,
    mut score_query: Query<&mut Text2d, (With<ScoreDisplay>, Without<TimerDisplay>)>,
    mut timer_query: Query<&mut Text2d, With<TimerDisplay>>,
) {
    if let Some(mut text) = score_query.iter_mut().next() {
        *text = Text2d::new(score_label(score.value()));
    }
    if let Some(mut text) = timer_query.iter_mut().next() {
        *text = Text2d::new(timer_label(countdown.remaining()));
    }
}

/// Tears the round down on any path out of Playing. Stopping the spawn
/// schedule here covers both the round-over and back-to-menu paths.
pub fn exit_playing(
    mut commands: Commands,
    mut countdown: ResMut<Countdown>,
    mut scheduler: ResMut<SpawnScheduler>,
    query: Query<
        Entity,
        Or<(
            With<Bin>,
            With<TrashPiece>,
            With<FloatingScore>,
            With<HudElement>,
        )>,
    >,
) {
    scheduler.stop();
    countdown.stop();
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Emits the round result for the leaderboard pipeline.
pub fn publish_round_summary(
    score: Res<Score>,
    difficulty: Res<Difficulty>,
    mut summaries: EventWriter<RoundSummary>,
) {
    let summary = RoundSummary {
        final_score: score.value(),
        difficulty: *difficulty,
    };
    info!("round over: {summary:?}");
    summaries.send(summary);
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::bins::{BinSlot, WasteCategory};

    fn session_world() -> World {
        let mut world = World::new();
        world.init_resource::<Score>();
        world.init_resource::<Countdown>();
        world.init_resource::<Difficulty>();
        world.init_resource::<BinArrangement>();
        world.init_resource::<SpawnScheduler>();
        world
    }

    fn stale_piece(world: &mut World) {
        world.spawn(TrashPiece {
            category: WasteCategory::Other,
            velocity: -100.0,
            acceleration: -450.0,
        });
    }

    #[test]
    fn hud_labels_follow_the_configured_round_length() {
        // The first frame shows the full round length, not a hardcoded value.
        assert_eq!(timer_label(Difficulty::Easy.round_seconds()), "Time: 60");
        assert_eq!(timer_label(Difficulty::Hard.round_seconds()), "Time: 60");
        // Partial seconds round up so the display never shows 0 early.
        assert_eq!(timer_label(0.2), "Time: 1");
        assert_eq!(timer_label(0.0), "Time: 0");
        assert_eq!(score_label(-3), "Score: -3");
    }

    #[test]
    fn entering_playing_resets_the_whole_session() {
        let mut world = session_world();
        stale_piece(&mut world);
        stale_piece(&mut world);
        world.resource_mut::<Score>().on_wrong();
        world
            .resource_mut::<BinArrangement>()
            .swap(BinSlot::Left, BinSlot::CenterLeft);

        world
            .run_system_once(enter_playing)
            .expect("system must run");

        assert_eq!(world.resource::<Score>().value(), 0);
        let countdown = world.resource::<Countdown>();
        assert!(countdown.is_running());
        assert_eq!(countdown.remaining(), 60.0);
        let arrangement = world.resource::<BinArrangement>();
        let expected: Vec<_> = WasteCategory::iter().collect();
        let found: Vec<_> = BinSlot::ALL
            .into_iter()
            .map(|slot| arrangement.category_at(slot))
            .collect();
        assert_eq!(found, expected, "bins must be canonical at round start");
        assert!(world.resource::<SpawnScheduler>().is_active());
        assert_eq!(
            world.query::<&TrashPiece>().iter(&world).count(),
            0,
            "stale pieces must not leak into a new round"
        );
    }

    #[test]
    fn leaving_playing_cancels_the_spawn_schedule() {
        let mut world = session_world();
        stale_piece(&mut world);
        world
            .run_system_once(enter_playing)
            .expect("system must run");
        world.run_system_once(exit_playing).expect("system must run");

        assert!(!world.resource::<SpawnScheduler>().is_active());
        assert!(!world.resource::<Countdown>().is_running());
        assert_eq!(world.query::<&TrashPiece>().iter(&world).count(), 0);
    }

    #[test]
    fn play_again_gives_a_fresh_round() {
        let mut world = session_world();
        world
            .run_system_once(enter_playing)
            .expect("system must run");
        world.resource_mut::<Score>().on_correct();
        world.resource_mut::<Countdown>().tick(100.0);
        stale_piece(&mut world);
        world.run_system_once(exit_playing).expect("system must run");

        world
            .run_system_once(enter_playing)
            .expect("system must run");
        assert_eq!(world.resource::<Countdown>().remaining(), 60.0);
        assert_eq!(world.resource::<Score>().value(), 0);
        assert_eq!(world.query::<&TrashPiece>().iter(&world).count(), 0);
    }
}
