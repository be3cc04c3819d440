use bevy::prelude::*;
use strum::{EnumIter, IntoEnumIterator};

/// Waste categories, in canonical bin order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter)]
pub enum WasteCategory {
    Recyclable,
    Kitchen,
    Harmful,
    Other,
}

impl WasteCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recyclable => "Recyclable",
            Self::Kitchen => "Kitchen",
            Self::Harmful => "Harmful",
            Self::Other => "Other",
        }
    }

    /// Signature color used for both bins and trash pieces of this category.
    pub fn color(self) -> Color {
        match self {
            Self::Recyclable => Color::srgb_u8(38, 92, 138),
            Self::Kitchen => Color::srgb_u8(17, 112, 56),
            Self::Harmful => Color::srgb_u8(204, 39, 33),
            Self::Other => Color::srgb_u8(60, 56, 53),
        }
    }
}

/// The four fixed bin positions along the bottom of the play field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinSlot {
    Left,
    CenterLeft,
    CenterRight,
    Right,
}

impl BinSlot {
    pub const ALL: [Self; 4] = [Self::Left, Self::CenterLeft, Self::CenterRight, Self::Right];

    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::CenterLeft => 1,
            Self::CenterRight => 2,
            Self::Right => 3,
        }
    }

    pub const fn x(self) -> f32 {
        match self {
            Self::Left => -135.0,
            Self::CenterLeft => -45.0,
            Self::CenterRight => 45.0,
            Self::Right => 135.0,
        }
    }
}

/// The three adjacent slot pairs the swap controls operate on. Adjacency is
/// a contract of the input layer; `BinArrangement::swap` itself takes any pair.
pub const SWAP_PAIRS: [(BinSlot, BinSlot); 3] = [
    (BinSlot::Left, BinSlot::CenterLeft),
    (BinSlot::CenterLeft, BinSlot::CenterRight),
    (BinSlot::CenterRight, BinSlot::Right),
];

/// Which waste category each bin slot currently accepts.
///
/// Invariant: the slot -> category mapping is a bijection. It starts canonical
/// (ascending category order) and is only ever mutated by `swap`, which
/// preserves bijectivity.
#[derive(Resource)]
pub struct BinArrangement {
    categories: [WasteCategory; 4],
}

impl Default for BinArrangement {
    fn default() -> Self {
        let mut arrangement = Self {
            categories: [WasteCategory::Recyclable; 4],
        };
        arrangement.canonicalize();
        arrangement
    }
}

impl BinArrangement {
    /// Restores the canonical layout: categories ascending, left to right.
    pub fn canonicalize(&mut self) {
        for (slot, category) in self.categories.iter_mut().zip(WasteCategory::iter()) {
            *slot = category;
        }
    }

    pub fn swap(&mut self, a: BinSlot, b: BinSlot) {
        self.categories.swap(a.index(), b.index());
    }

    pub const fn category_at(&self, slot: BinSlot) -> WasteCategory {
        self.categories[slot.index()]
    }
}

const BIN_SIZE: Vec2 = Vec2::new(80.0, 90.0);
const SHAKE_OFFSET: f32 = 5.0;
const REACTION_SECS: f32 = 0.3;

/// Component for a bin sprite bound to one slot.
#[derive(Component)]
pub struct Bin {
    pub slot: BinSlot,
}

/// Marker for the category label child of a bin.
#[derive(Component)]
pub struct BinLabel;

/// Short feedback animation played on a bin after a crossing.
#[derive(Component)]
pub struct BinReaction {
    timer: Timer,
    kind: ReactionKind,
    base_x: f32,
}

#[derive(Clone, Copy)]
pub enum ReactionKind {
    Pulse,
    Shake,
}

impl BinReaction {
    pub fn new(kind: ReactionKind, base_x: f32) -> Self {
        Self {
            timer: Timer::from_seconds(REACTION_SECS, TimerMode::Once),
            kind,
            base_x,
        }
    }
}

/// Spawns the four bins above the collection line.
pub fn spawn_bins(
    mut commands: Commands,
    arrangement: Res<BinArrangement>,
    asset_server: Res<AssetServer>,
) {
    for slot in BinSlot::ALL {
        let category = arrangement.category_at(slot);
        commands
            .spawn((
                Sprite::from_color(category.color(), BIN_SIZE),
                Transform::from_xyz(slot.x(), crate::core::config::BIN_LINE_Y, 0.0),
                Bin { slot },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(category.label()),
                    TextFont {
                        font: asset_server.load(arcade_helpers::FONT),
                        font_size: 13.0,
                        ..default()
                    },
                    TextLayout::new_with_justify(JustifyText::Center),
                    TextColor(Color::WHITE),
                    Transform::from_xyz(0.0, 0.0, 1.0),
                    BinLabel,
                ));
            });
    }
}

/// Recolors and relabels bins whenever the arrangement changes (swaps,
/// round-start canonicalization).
pub fn sync_bin_visuals(
    arrangement: Res<BinArrangement>,
    mut bins: Query<(&Bin, &mut Sprite, &Children)>,
    mut labels: Query<&mut Text2d, With<BinLabel>>,
) {
    if !arrangement.is_changed() {
        return;
    }
    for (bin, mut sprite, children) in &mut bins {
        let category = arrangement.category_at(bin.slot);
        sprite.color = category.color();
        for child in children {
            if let Ok(mut text) = labels.get_mut(*child) {
                *text = Text2d::new(category.label());
            }
        }
    }
}

/// Marker for the three on-screen swap buttons.
#[derive(Component)]
pub struct SwapButton {
    pub pair: usize,
}

/// Applies swap inputs from the on-screen buttons and the 1/2/3 keys.
pub fn handle_swap_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    interactions: Query<(&Interaction, &SwapButton), Changed<Interaction>>,
    mut arrangement: ResMut<BinArrangement>,
    mut bins: Query<(Entity, &Bin, &mut Transform)>,
    mut commands: Commands,
) {
    let mut pairs: Vec<usize> = Vec::new();
    for (interaction, button) in &interactions {
        if *interaction == Interaction::Pressed {
            pairs.push(button.pair);
        }
    }
    for (pair, key) in [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3]
        .into_iter()
        .enumerate()
    {
        if keyboard.just_pressed(key) {
            pairs.push(pair);
        }
    }

    for pair in pairs {
        let Some(&(a, b)) = SWAP_PAIRS.get(pair) else {
            continue;
        };
        // A pending reaction would leave the bin mid-animation after the swap.
        for (entity, bin, mut transform) in &mut bins {
            if bin.slot == a || bin.slot == b {
                commands.entity(entity).remove::<BinReaction>();
                transform.translation.x = bin.slot.x();
                transform.scale = Vec3::ONE;
            }
        }
        arrangement.swap(a, b);
    }
}

/// Plays the pulse / shake reaction on bins and restores their resting pose.
pub fn animate_bin_reactions(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut BinReaction)>,
) {
    for (entity, mut transform, mut reaction) in &mut query {
        reaction.timer.tick(time.delta());
        let progress = reaction.timer.fraction();
        match reaction.kind {
            ReactionKind::Pulse => {
                // dip, overshoot, settle
                let scale = 1.0 + 0.1 * (progress * core::f32::consts::TAU).sin();
                transform.scale = Vec3::new(scale, scale, 1.0);
            }
            ReactionKind::Shake => {
                let offset = SHAKE_OFFSET * (progress * 4.0 * core::f32::consts::TAU).sin();
                transform.translation.x = reaction.base_x + offset * (1.0 - progress);
            }
        }
        if reaction.timer.finished() {
            transform.scale = Vec3::ONE;
            transform.translation.x = reaction.base_x;
            commands.entity(entity).remove::<BinReaction>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(arrangement: &BinArrangement) -> Vec<WasteCategory> {
        BinSlot::ALL
            .into_iter()
            .map(|slot| arrangement.category_at(slot))
            .collect()
    }

    #[test]
    fn default_arrangement_is_canonical_bijection() {
        let arrangement = BinArrangement::default();
        let found = categories(&arrangement);
        let expected: Vec<_> = WasteCategory::iter().collect();
        assert_eq!(found, expected, "fresh arrangement must be canonical");
    }

    #[test]
    fn swap_exchanges_exactly_two_slots() {
        let mut arrangement = BinArrangement::default();
        arrangement.swap(BinSlot::Left, BinSlot::CenterLeft);
        assert_eq!(
            arrangement.category_at(BinSlot::Left),
            WasteCategory::Kitchen
        );
        assert_eq!(
            arrangement.category_at(BinSlot::CenterLeft),
            WasteCategory::Recyclable
        );
        assert_eq!(
            arrangement.category_at(BinSlot::CenterRight),
            WasteCategory::Harmful
        );
        assert_eq!(arrangement.category_at(BinSlot::Right), WasteCategory::Other);
    }

    #[test]
    fn swap_twice_is_identity() {
        let mut arrangement = BinArrangement::default();
        arrangement.swap(BinSlot::CenterLeft, BinSlot::CenterRight);
        arrangement.swap(BinSlot::CenterLeft, BinSlot::CenterRight);
        let expected: Vec<_> = WasteCategory::iter().collect();
        assert_eq!(categories(&arrangement), expected);
    }

    #[test]
    fn arrangement_stays_bijective_after_many_swaps() {
        let mut arrangement = BinArrangement::default();
        for &(a, b) in SWAP_PAIRS.iter().cycle().take(17) {
            arrangement.swap(a, b);
        }
        let mut found = categories(&arrangement);
        found.sort();
        let expected: Vec<_> = WasteCategory::iter().collect();
        assert_eq!(found, expected, "swaps must never duplicate a category");
    }

    #[test]
    fn canonicalize_resets_any_layout() {
        let mut arrangement = BinArrangement::default();
        arrangement.swap(BinSlot::Left, BinSlot::Right);
        arrangement.canonicalize();
        let expected: Vec<_> = WasteCategory::iter().collect();
        assert_eq!(categories(&arrangement), expected);
    }

    #[test]
    fn swap_pairs_are_adjacent() {
        for (a, b) in SWAP_PAIRS {
            assert_eq!(b.index() - a.index(), 1, "swap controls only expose adjacent pairs");
        }
    }
}
