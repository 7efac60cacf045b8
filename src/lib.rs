//! Level-up offers, reward chests and evolutions for a run-based game.
//!
//! Add [`ProgressionPlugin`] and drive it with the events in [`ability_events`].

pub use {abilities, abilities_assets, ability_components, ability_events, save_load};

use {abilities::AbilitiesPlugin, bevy::prelude::*, save_load::SaveLoadPlugin};

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((AbilitiesPlugin, SaveLoadPlugin));
    }
}
