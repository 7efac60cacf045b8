use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::collections::{HashMap, HashSet},
};

pub struct AbilityComponentsPlugin;

impl Plugin for AbilityComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ProgressionState>()
            .register_type::<AbilitySlots>()
            .register_type::<CurrentCharacter>()
            .register_type::<ChestTier>()
            .init_resource::<ProgressionState>()
            .init_resource::<AbilitySlots>()
            .init_resource::<CurrentCharacter>();
    }
}

/// Per-run record of which abilities the player holds and at what level.
///
/// Only the acquisition path mutates this. Invariants:
/// - every id in `acquired` has an entry in `level_by_type`
/// - an id in `removed_by_evolution` never returns to `acquired` during the run
#[derive(Resource, Reflect, Default, Debug, Clone, PartialEq)]
#[reflect(Resource, Default)]
pub struct ProgressionState {
    /// Current level per ability id (absent = never acquired)
    pub level_by_type: HashMap<String, u32>,
    /// Abilities with a live runtime instance
    pub acquired: HashSet<String>,
    /// Abilities consumed by an evolution this run
    pub removed_by_evolution: HashSet<String>,
}

impl ProgressionState {
    /// Stored level, or 0 when the ability was never acquired.
    ///
    /// Use [`Self::stored_level`] or [`Self::has_reached`] when "never held"
    /// has to stay distinct from "held at level 0".
    pub fn level_of(&self, id: &str) -> u32 {
        self.level_by_type.get(id).copied().unwrap_or(0)
    }

    pub fn stored_level(&self, id: &str) -> Option<u32> {
        self.level_by_type.get(id).copied()
    }

    /// Held at `level` or above. An ability that was never acquired has no level.
    pub fn has_reached(&self, id: &str, level: u32) -> bool {
        self.stored_level(id).is_some_and(|stored| stored >= level)
    }

    pub fn is_acquired(&self, id: &str) -> bool {
        self.acquired.contains(id)
    }

    pub fn is_removed(&self, id: &str) -> bool {
        self.removed_by_evolution.contains(id)
    }

    /// Records `id` as held at `level`. Removed abilities stay removed.
    pub fn set_level(&mut self, id: &str, level: u32) -> bool {
        if self.is_removed(id) {
            return false;
        }

        self.level_by_type.insert(id.to_string(), level);
        self.acquired.insert(id.to_string());
        true
    }

    /// Drops `id` for the rest of the run. Returns false if it was not held.
    pub fn consume(&mut self, id: &str) -> bool {
        if !self.acquired.remove(id) {
            return false;
        }

        self.level_by_type.remove(id);
        self.removed_by_evolution.insert(id.to_string());
        true
    }

    pub fn reset(&mut self) {
        self.level_by_type.clear();
        self.acquired.clear();
        self.removed_by_evolution.clear();
    }
}

/// How many active and passive abilities a player may hold at once.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[reflect(Resource, Default)]
pub struct AbilitySlots {
    pub active_capacity: usize,
    pub passive_capacity: usize,
}

impl Default for AbilitySlots {
    fn default() -> Self {
        Self {
            active_capacity: 6,
            passive_capacity: 6,
        }
    }
}

/// Size class of a reward chest.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[reflect(Default)]
pub enum ChestTier {
    #[default]
    Single,
    Triple,
    Quintuple,
}

impl ChestTier {
    pub fn index(self) -> u8 {
        match self {
            ChestTier::Single => 0,
            ChestTier::Triple => 1,
            ChestTier::Quintuple => 2,
        }
    }

    /// Number of rewards the tier promises.
    pub fn target_count(self) -> usize {
        match self {
            ChestTier::Single => 1,
            ChestTier::Triple => 3,
            ChestTier::Quintuple => 5,
        }
    }

    /// Next smaller tier, `None` below `Single`.
    pub fn degrade(self) -> Option<ChestTier> {
        match self {
            ChestTier::Single => None,
            ChestTier::Triple => Some(ChestTier::Single),
            ChestTier::Quintuple => Some(ChestTier::Triple),
        }
    }
}

/// Character the current run is played with, used for character-locked abilities.
#[derive(Resource, Reflect, Default, Debug, Clone, PartialEq, Eq, Deref, DerefMut)]
#[reflect(Resource, Default)]
pub struct CurrentCharacter(pub Option<String>);
