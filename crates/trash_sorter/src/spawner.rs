use bevy::prelude::*;

use crate::bins::{BinSlot, WasteCategory};
use crate::catalog::{TrashCatalog, TrashDefinition};
use crate::core::config::{
    DROP_ACCELERATION, EASY_ACCELERATIONS, SPAWN_SCALE_DOWN_SECS, SPAWN_SCALE_UP_SECS, SPAWN_Y,
};
use crate::core::{Countdown, Difficulty};
use crate::falling::{SpawnPop, TrashPiece};
use crate::scoring::Score;

const TRASH_SIZE: Vec2 = Vec2::new(56.0, 56.0);

/// Drives the repeating spawn schedule and the catalog-coverage draw.
///
/// Selection policy: draw without replacement from the whole catalog until
/// every entry has been spawned once, then reset the drawn set and repeat.
/// Within a single batch no two picks share a category.
#[derive(Resource)]
pub struct SpawnScheduler {
    timer: Timer,
    active: bool,
    drawn: Vec<usize>,
    spawned_count: usize,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
            active: false,
            drawn: Vec::new(),
            spawned_count: 0,
        }
    }
}

impl SpawnScheduler {
    /// Starts the repeating schedule. No-op when already running.
    pub fn start(&mut self, interval: f32) {
        if self.active {
            return;
        }
        self.timer = Timer::from_seconds(interval, TimerMode::Repeating);
        self.active = true;
    }

    /// Stops the schedule. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Clears per-round draw state so a new round covers the catalog afresh.
    pub fn reset_round(&mut self) {
        self.drawn.clear();
        self.spawned_count = 0;
    }

    pub fn tick(&mut self, delta: core::time::Duration) -> bool {
        if !self.active {
            return false;
        }
        self.timer.tick(delta);
        self.timer.just_finished()
    }

    /// Draws up to `batch_size` catalog indices under the coverage policy.
    /// May return fewer when the undrawn remainder cannot supply another
    /// distinct category.
    pub fn next_batch(&mut self, catalog: &TrashCatalog, batch_size: usize) -> Vec<usize> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut batch_categories: Vec<WasteCategory> = Vec::with_capacity(batch_size);

        for _ in 0..batch_size {
            if self.drawn.len() == catalog.len() {
                self.drawn.clear();
            }
            let candidates: Vec<usize> = (0..catalog.len())
                .filter(|index| !self.drawn.contains(index))
                .filter(|&index| {
                    catalog
                        .get(index)
                        .is_some_and(|entry| !batch_categories.contains(&entry.category))
                })
                .collect();
            let Some(&index) = candidates.get(fastrand::usize(0..candidates.len().max(1))) else {
                break;
            };
            self.drawn.push(index);
            if let Some(entry) = catalog.get(index) {
                batch_categories.push(entry.category);
            }
            batch.push(index);
        }
        batch
    }

    /// Acceleration for the next spawned piece. Easy mode cycles the lookup
    /// table by spawn order; hard mode is a constant.
    pub fn next_acceleration(&mut self, difficulty: Difficulty) -> f32 {
        let acceleration = match difficulty {
            Difficulty::Hard => DROP_ACCELERATION,
            Difficulty::Easy => {
                EASY_ACCELERATIONS[self.spawned_count % EASY_ACCELERATIONS.len()]
            }
        };
        self.spawned_count += 1;
        acceleration
    }
}

/// Spawn batch sizing from the combo counter. Disabled by default: the
/// escalation was cut from the shipped balance but kept testable.
#[derive(Resource, Default)]
pub struct ComboEscalation {
    pub enabled: bool,
}

impl ComboEscalation {
    pub const fn batch_size_for(&self, combo: u32) -> usize {
        if !self.enabled {
            return 1;
        }
        match combo {
            0..=4 => 1,
            5..=9 => 2,
            10..=19 => 3,
            _ => 4,
        }
    }
}

/// Ticks the spawn schedule and emits a batch whenever it fires.
pub fn run_spawn_schedule(
    mut commands: Commands,
    time: Res<Time>,
    mut scheduler: ResMut<SpawnScheduler>,
    catalog: Res<TrashCatalog>,
    difficulty: Res<Difficulty>,
    escalation: Res<ComboEscalation>,
    score: Res<Score>,
    asset_server: Res<AssetServer>,
) {
    if !scheduler.tick(time.delta()) {
        return;
    }
    spawn_batch(
        &mut commands,
        &mut scheduler,
        &catalog,
        *difficulty,
        escalation.batch_size_for(score.combo()),
        &asset_server,
    );
}

/// Debug helper: Space drops an extra batch while the round is running.
pub fn handle_manual_spawn(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    countdown: Res<Countdown>,
    mut scheduler: ResMut<SpawnScheduler>,
    catalog: Res<TrashCatalog>,
    difficulty: Res<Difficulty>,
    asset_server: Res<AssetServer>,
) {
    if !keyboard.just_pressed(KeyCode::Space) || !countdown.is_running() {
        return;
    }
    spawn_batch(
        &mut commands,
        &mut scheduler,
        &catalog,
        *difficulty,
        1,
        &asset_server,
    );
}

fn spawn_batch(
    commands: &mut Commands,
    scheduler: &mut SpawnScheduler,
    catalog: &TrashCatalog,
    difficulty: Difficulty,
    batch_size: usize,
    asset_server: &Res<AssetServer>,
) {
    if catalog.is_empty() {
        return;
    }
    for index in scheduler.next_batch(catalog, batch_size) {
        let Some(entry) = catalog.get(index) else {
            continue;
        };
        let acceleration = scheduler.next_acceleration(difficulty);
        spawn_trash_piece(commands, entry, acceleration, asset_server);
    }
}

fn spawn_trash_piece(
    commands: &mut Commands,
    entry: &TrashDefinition,
    acceleration: f32,
    asset_server: &Res<AssetServer>,
) {
    let slot = BinSlot::ALL[fastrand::usize(0..BinSlot::ALL.len())];
    commands
        .spawn((
            Sprite::from_color(entry.category.color(), TRASH_SIZE),
            Transform::from_xyz(slot.x(), SPAWN_Y, 1.0).with_scale(Vec3::splat(0.5)),
            TrashPiece {
                category: entry.category,
                velocity: 0.0,
                acceleration,
            },
            SpawnPop::new(SPAWN_SCALE_UP_SECS + SPAWN_SCALE_DOWN_SECS),
        ))
        .with_children(|parent| {
            parent.spawn((
                Sprite {
                    image: asset_server.load(entry.icon),
                    custom_size: Some(TRASH_SIZE * 0.6),
                    ..default()
                },
                Transform::from_xyz(0.0, 8.0, 1.0),
            ));
            parent.spawn((
                Text2d::new(entry.name),
                TextFont {
                    font: asset_server.load(arcade_helpers::FONT),
                    font_size: 11.0,
                    ..default()
                },
                TextLayout::new_with_justify(JustifyText::Center),
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, -18.0, 1.0),
            ));
        });
}
