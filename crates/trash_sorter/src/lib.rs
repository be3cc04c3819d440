use arcade_helpers::floating_score::animate_floating_scores;
use bevy::prelude::*;

mod bins;
mod catalog;
mod core;
mod falling;
mod game_over;
mod scoring;
mod session;
mod spawner;
mod welcome;

use bins::{BinArrangement, animate_bin_reactions, handle_swap_input, spawn_bins, sync_bin_visuals};
use catalog::setup_catalog;
use core::{Countdown, Difficulty, GameState};
use falling::{CrossingOutcome, advance_trash, animate_spawn_pop};
use game_over::{cleanup_round_over, handle_round_over_input, spawn_round_over_screen};
use scoring::{Score, apply_crossing_outcomes};
use session::{
    RoundSummary, enter_playing, exit_playing, publish_round_summary, spawn_hud, tick_countdown,
    update_hud,
};
use spawner::{ComboEscalation, SpawnScheduler, handle_manual_spawn, run_spawn_schedule};
use welcome::{despawn_menu, handle_menu_input, spawn_menu};

/// Entry point for the game
pub fn run() {
    let mut app = arcade_helpers::get_default_app(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    app.init_state::<GameState>()
        // Core session resources
        .init_resource::<Difficulty>()
        .init_resource::<Countdown>()
        .init_resource::<Score>()
        .init_resource::<BinArrangement>()
        .init_resource::<SpawnScheduler>()
        .init_resource::<ComboEscalation>()
        .add_event::<CrossingOutcome>()
        .add_event::<RoundSummary>()
        .add_systems(Startup, (setup_camera, setup_catalog))
        // Menu state
        .add_systems(OnEnter(GameState::Menu), spawn_menu)
        .add_systems(Update, handle_menu_input.run_if(in_state(GameState::Menu)))
        .add_systems(OnExit(GameState::Menu), despawn_menu)
        // Playing state
        .add_systems(
            OnEnter(GameState::Playing),
            (enter_playing, spawn_bins, spawn_hud).chain(),
        )
        .add_systems(
            Update,
            (
                tick_countdown,
                run_spawn_schedule,
                handle_manual_spawn,
                handle_swap_input,
                animate_spawn_pop,
                (advance_trash, apply_crossing_outcomes).chain(),
                sync_bin_visuals,
                animate_bin_reactions,
                update_hud,
                animate_floating_scores,
            )
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(OnExit(GameState::Playing), exit_playing)
        // Round over state
        .add_systems(
            OnEnter(GameState::RoundOver),
            (publish_round_summary, spawn_round_over_screen),
        )
        .add_systems(
            Update,
            handle_round_over_input.run_if(in_state(GameState::RoundOver)),
        )
        .add_systems(OnExit(GameState::RoundOver), cleanup_round_over);

    app.run();
}

/// Sets up the main 2D camera
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
