use bevy::prelude::*;

use crate::bins::{BinArrangement, BinSlot, WasteCategory};
use crate::core::config::{
    BIN_LINE_Y, CROSSING_TOLERANCE, SPAWN_SCALE_DOWN_SECS, SPAWN_SCALE_UP_SECS,
};

/// A live falling trash piece.
#[derive(Component)]
pub struct TrashPiece {
    pub category: WasteCategory,
    /// Vertical velocity, negative while falling.
    pub velocity: f32,
    /// Per-piece acceleration, fixed at spawn.
    pub acceleration: f32,
}

impl TrashPiece {
    /// Advances the piece by one tick and returns the vertical displacement.
    pub fn step(&mut self, dt: f32) -> f32 {
        self.velocity += self.acceleration * dt;
        self.velocity * dt
    }
}

/// Spawn pop animation. While present the piece does not fall.
#[derive(Component)]
pub struct SpawnPop {
    timer: Timer,
}

impl SpawnPop {
    pub fn new(seconds: f32) -> Self {
        Self {
            timer: Timer::from_seconds(seconds, TimerMode::Once),
        }
    }
}

/// Result of a piece crossing the collection line over some bin.
#[derive(Event)]
pub struct CrossingOutcome {
    pub slot: BinSlot,
    pub correct: bool,
}

/// First slot whose x coordinate lies within the tolerance of `x`, scanning
/// left to right. `None` when the piece crossed between bins.
pub fn resolve_crossing(x: f32) -> Option<BinSlot> {
    BinSlot::ALL
        .into_iter()
        .find(|slot| (x - slot.x()).abs() < CROSSING_TOLERANCE)
}

/// Plays the scale-up / scale-down pop on freshly spawned pieces, then
/// releases them into free fall by removing the component.
pub fn animate_spawn_pop(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut SpawnPop)>,
) {
    for (entity, mut transform, mut pop) in &mut query {
        pop.timer.tick(time.delta());
        if pop.timer.finished() {
            transform.scale = Vec3::ONE;
            commands.entity(entity).remove::<SpawnPop>();
        } else {
            transform.scale = Vec3::splat(pop_scale(pop.timer.elapsed_secs()));
        }
    }
}

// 0.5 -> 1.1 (quad out), then 1.1 -> 1.0 (quad in)
fn pop_scale(elapsed: f32) -> f32 {
    if elapsed < SPAWN_SCALE_UP_SECS {
        let t = elapsed / SPAWN_SCALE_UP_SECS;
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        0.6f32.mul_add(eased, 0.5)
    } else {
        let t = ((elapsed - SPAWN_SCALE_UP_SECS) / SPAWN_SCALE_DOWN_SECS).min(1.0);
        (-0.1f32).mul_add(t * t, 1.1)
    }
}

/// Integrates all falling pieces and resolves collection-line crossings.
///
/// A piece that crosses without lining up with any bin is dropped silently;
/// spawn origins are bin-aligned, but a swap animation or future layout change
/// must not turn that into an error.
pub fn advance_trash(
    mut commands: Commands,
    time: Res<Time>,
    arrangement: Res<BinArrangement>,
    mut outcomes: EventWriter<CrossingOutcome>,
    mut query: Query<(Entity, &mut Transform, &mut TrashPiece), Without<SpawnPop>>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut piece) in &mut query {
        transform.translation.y += piece.step(dt);

        if transform.translation.y >= BIN_LINE_Y {
            continue;
        }
        if let Some(slot) = resolve_crossing(transform.translation.x) {
            outcomes.send(CrossingOutcome {
                slot,
                correct: arrangement.category_at(slot) == piece.category,
            });
        }
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::bins::BinArrangement;

    fn falling_world() -> World {
        let mut world = World::new();
        world.init_resource::<Time>();
        world.init_resource::<BinArrangement>();
        world.init_resource::<Events<CrossingOutcome>>();
        world
    }

    fn drop_piece(world: &mut World, x: f32, y: f32, category: WasteCategory) {
        world.spawn((
            Transform::from_xyz(x, y, 1.0),
            TrashPiece {
                category,
                velocity: -100.0,
                acceleration: -450.0,
            },
        ));
    }

    fn live_pieces(world: &mut World) -> usize {
        world.query::<&TrashPiece>().iter(world).count()
    }

    fn drained_outcomes(world: &mut World) -> Vec<CrossingOutcome> {
        world
            .resource_mut::<Events<CrossingOutcome>>()
            .drain()
            .collect()
    }

    #[test]
    fn step_integrates_velocity_then_position() {
        let mut piece = TrashPiece {
            category: WasteCategory::Other,
            velocity: 0.0,
            acceleration: -450.0,
        };
        let dy = piece.step(0.1);
        assert!((piece.velocity - -45.0).abs() < 1e-4);
        assert!((dy - -4.5).abs() < 1e-4);

        // velocity keeps building tick over tick
        piece.step(0.1);
        assert!((piece.velocity - -90.0).abs() < 1e-4);
    }

    #[test]
    fn crossing_resolves_to_first_slot_within_tolerance() {
        assert_eq!(resolve_crossing(-135.0), Some(BinSlot::Left));
        assert_eq!(resolve_crossing(-128.0), Some(BinSlot::Left));
        assert_eq!(resolve_crossing(44.0), Some(BinSlot::CenterRight));
        assert_eq!(resolve_crossing(140.0), Some(BinSlot::Right));
    }

    #[test]
    fn crossing_between_bins_matches_nothing() {
        assert_eq!(resolve_crossing(0.0), None);
        assert_eq!(resolve_crossing(-90.0), None);
        assert_eq!(resolve_crossing(500.0), None);
    }

    #[test]
    fn tolerance_is_exclusive_at_the_boundary() {
        assert_eq!(resolve_crossing(-125.0), None);
        assert_eq!(resolve_crossing(-125.1), Some(BinSlot::Left));
    }

    #[test]
    fn aligned_crossing_with_matching_bin_is_correct() {
        let arrangement = BinArrangement::default();
        // canonical layout puts Kitchen on CenterLeft
        let slot = resolve_crossing(BinSlot::CenterLeft.x()).expect("aligned x must match");
        assert_eq!(slot, BinSlot::CenterLeft);
        assert_eq!(arrangement.category_at(slot), WasteCategory::Kitchen);
    }

    #[test]
    fn aligned_crossing_with_other_bin_is_wrong() {
        let mut arrangement = BinArrangement::default();
        arrangement.swap(BinSlot::Left, BinSlot::CenterLeft);
        let slot = resolve_crossing(BinSlot::CenterLeft.x()).expect("aligned x must match");
        assert_ne!(arrangement.category_at(slot), WasteCategory::Kitchen);
    }

    #[test]
    fn crossing_a_matching_bin_consumes_the_piece() {
        let mut world = falling_world();
        // canonical layout puts Kitchen on CenterLeft
        drop_piece(
            &mut world,
            BinSlot::CenterLeft.x(),
            BIN_LINE_Y - 1.0,
            WasteCategory::Kitchen,
        );

        world.run_system_once(advance_trash).expect("system must run");

        assert_eq!(live_pieces(&mut world), 0, "crossed piece must be removed");
        let outcomes = drained_outcomes(&mut world);
        assert_eq!(outcomes.len(), 1, "exactly one outcome per crossing");
        assert_eq!(outcomes[0].slot, BinSlot::CenterLeft);
        assert!(outcomes[0].correct);
    }

    #[test]
    fn crossing_the_wrong_bin_reports_a_miss() {
        let mut world = falling_world();
        drop_piece(
            &mut world,
            BinSlot::CenterLeft.x(),
            BIN_LINE_Y - 1.0,
            WasteCategory::Harmful,
        );

        world.run_system_once(advance_trash).expect("system must run");

        assert_eq!(live_pieces(&mut world), 0);
        let outcomes = drained_outcomes(&mut world);
        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].correct);
    }

    #[test]
    fn crossing_between_bins_destroys_silently() {
        let mut world = falling_world();
        drop_piece(&mut world, 0.0, BIN_LINE_Y - 1.0, WasteCategory::Other);

        world.run_system_once(advance_trash).expect("system must run");

        assert_eq!(live_pieces(&mut world), 0, "unmatched piece still despawns");
        assert!(drained_outcomes(&mut world).is_empty(), "no outcome on a miss");
    }

    #[test]
    fn pieces_above_the_line_keep_falling() {
        let mut world = falling_world();
        drop_piece(
            &mut world,
            BinSlot::Left.x(),
            BIN_LINE_Y + 50.0,
            WasteCategory::Recyclable,
        );

        world.run_system_once(advance_trash).expect("system must run");

        assert_eq!(live_pieces(&mut world), 1);
        assert!(drained_outcomes(&mut world).is_empty());
    }

    #[test]
    fn pop_scale_hits_the_keyframes() {
        assert!((pop_scale(0.0) - 0.5).abs() < 1e-4);
        assert!((pop_scale(SPAWN_SCALE_UP_SECS) - 1.1).abs() < 1e-4);
        let total = SPAWN_SCALE_UP_SECS + SPAWN_SCALE_DOWN_SECS;
        assert!((pop_scale(total) - 1.0).abs() < 1e-4);
        assert!((pop_scale(total + 1.0) - 1.0).abs() < 1e-4);
    }
}
