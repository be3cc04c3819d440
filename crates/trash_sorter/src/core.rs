use bevy::prelude::*;
use serde::Serialize;

/// Game states that control the flow of the application
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    RoundOver,
}

/// Difficulty selected on the main menu, fixed for the whole round.
#[derive(Resource, Default, Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub const fn round_seconds(self) -> f32 {
        match self {
            Self::Easy => config::ROUND_SECONDS,
            Self::Hard => config::HARD_ROUND_SECONDS,
        }
    }

    pub const fn spawn_interval(self) -> f32 {
        match self {
            Self::Easy => config::SPAWN_INTERVAL,
            Self::Hard => config::HARD_SPAWN_INTERVAL,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Hard => "Hard",
        }
    }
}

/// Round countdown. Only ticks while `running`; never goes below zero.
#[derive(Resource, Default)]
pub struct Countdown {
    remaining: f32,
    running: bool,
}

impl Countdown {
    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advances the countdown. Returns `true` exactly once, on the tick
    /// where the remaining time reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.running = false;
            return true;
        }
        false
    }

    pub const fn remaining(&self) -> f32 {
        self.remaining
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }
}

/// Game configuration constants
pub mod config {
    use arcade_helpers::WINDOW_HEIGHT;

    // Round timing
    pub const ROUND_SECONDS: f32 = 60.0;
    pub const HARD_ROUND_SECONDS: f32 = 60.0;

    // Spawn cadence
    pub const SPAWN_INTERVAL: f32 = 2.85;
    pub const HARD_SPAWN_INTERVAL: f32 = 2.85;

    // Hard mode uses a single drop acceleration, units/s^2
    pub const DROP_ACCELERATION: f32 = -450.0;

    // Easy mode cycles through this table by spawn order, for varied pacing.
    // Tuned by hand, not derived from anything.
    pub const EASY_ACCELERATIONS: [f32; 20] = [
        -175.0, -235.0, -295.0, -235.0, -205.0, -235.0, -265.0, -265.0, -235.0, -265.0, -325.0,
        -325.0, -295.0, -265.0, -295.0, -355.0, -385.0, -325.0, -265.0, -205.0,
    ];

    // Spawn pop animation
    pub const SPAWN_SCALE_UP_SECS: f32 = 0.2;
    pub const SPAWN_SCALE_DOWN_SECS: f32 = 0.1;

    // Scoring
    pub const CORRECT_REWARD: i32 = 5;
    pub const WRONG_PENALTY: i32 = 3;

    // Geometry
    pub const CROSSING_TOLERANCE: f32 = 10.0;
    pub const BIN_LINE_Y: f32 = -WINDOW_HEIGHT / 2.0 + 80.0;
    pub const SPAWN_Y: f32 = WINDOW_HEIGHT / 2.0 + 40.0;
}
