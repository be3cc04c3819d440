use arcade_helpers::floating_score::spawn_floating_score;
use bevy::color::palettes::css::{GREEN, RED};
use bevy::prelude::*;

use crate::bins::{Bin, BinReaction, ReactionKind};
use crate::core::config::{CORRECT_REWARD, WRONG_PENALTY};
use crate::falling::CrossingOutcome;

/// Session score and combo counter.
///
/// The penalty is deliberately not floored at zero; going negative is part of
/// the balance. The combo counter always runs but only affects spawning when
/// `ComboEscalation` is enabled.
#[derive(Resource, Default)]
pub struct Score {
    value: i32,
    combo: u32,
}

impl Score {
    pub fn on_correct(&mut self) {
        self.value += CORRECT_REWARD;
        self.combo += 1;
    }

    pub fn on_wrong(&mut self) {
        self.value -= WRONG_PENALTY;
        self.combo = 0;
    }

    pub fn reset(&mut self) {
        self.value = 0;
        self.combo = 0;
    }

    pub const fn value(&self) -> i32 {
        self.value
    }

    pub const fn combo(&self) -> u32 {
        self.combo
    }
}

/// Applies each crossing outcome: score delta, floating score cue, and the
/// pulse / shake reaction on the bin that received the piece.
pub fn apply_crossing_outcomes(
    mut commands: Commands,
    mut outcomes: EventReader<CrossingOutcome>,
    mut score: ResMut<Score>,
    bins: Query<(Entity, &Bin, &Transform)>,
    asset_server: Res<AssetServer>,
) {
    for outcome in outcomes.read() {
        let bin = bins
            .iter()
            .find(|(_, bin, _)| bin.slot == outcome.slot);
        let Some((bin_entity, bin, transform)) = bin else {
            continue;
        };
        let cue_position = transform.translation.truncate() + Vec2::new(0.0, 60.0);

        if outcome.correct {
            score.on_correct();
            spawn_floating_score(
                &mut commands,
                cue_position,
                &format!("+{CORRECT_REWARD}"),
                GREEN,
                &asset_server,
            );
            commands
                .entity(bin_entity)
                .insert(BinReaction::new(ReactionKind::Pulse, bin.slot.x()));
        } else {
            score.on_wrong();
            spawn_floating_score(
                &mut commands,
                cue_position,
                &format!("-{WRONG_PENALTY}"),
                RED,
                &asset_server,
            );
            commands
                .entity(bin_entity)
                .insert(BinReaction::new(ReactionKind::Shake, bin.slot.x()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_sort_rewards_five() {
        let mut score = Score::default();
        score.on_correct();
        assert_eq!(score.value(), 5);
        assert_eq!(score.combo(), 1);
    }

    #[test]
    fn wrong_sort_deducts_three_without_floor() {
        let mut score = Score::default();
        score.on_wrong();
        assert_eq!(score.value(), -3, "penalty is not clamped at zero");
    }

    #[test]
    fn wrong_sort_resets_combo() {
        let mut score = Score::default();
        score.on_correct();
        score.on_correct();
        assert_eq!(score.combo(), 2);
        score.on_wrong();
        assert_eq!(score.combo(), 0);
        assert_eq!(score.value(), 7);
    }

    #[test]
    fn reset_clears_everything() {
        let mut score = Score::default();
        score.on_correct();
        score.on_wrong();
        score.reset();
        assert_eq!(score.value(), 0);
        assert_eq!(score.combo(), 0);
    }
}
