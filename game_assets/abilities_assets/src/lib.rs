mod catalog;

pub use catalog::*;

use {
    bevy::{asset::LoadedFolder, prelude::*},
    bevy_common_assets::ron::RonAssetPlugin,
    serde::{Deserialize, Serialize},
};

pub struct AbilitiesAssetsPlugin;

impl Plugin for AbilitiesAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<AbilityDefinition>::new(&["ability.ron"]))
            .init_resource::<AbilityCatalog>()
            .register_type::<AbilityKind>()
            .register_type::<EvolutionRequirement>()
            .add_systems(Startup, load_ability_definitions)
            .add_systems(Update, rebuild_catalog);
    }
}

/// Keeps every loaded `.ability.ron` alive for the lifetime of the app.
#[derive(Resource)]
pub struct AbilitiesFolderHandle(pub Handle<LoadedFolder>);

/// Folder under `assets/` scanned for ability definitions.
pub const ABILITIES_FOLDER: &str = "abilities";

fn load_ability_definitions(mut cmd: Commands, asset_server: Res<AssetServer>) {
    info!(folder = ABILITIES_FOLDER, "started loading ability definitions");
    let handle = asset_server.load_folder(ABILITIES_FOLDER);
    cmd.insert_resource(AbilitiesFolderHandle(handle));
}

/// Upgrade definition loaded from `.ability.ron`.
///
/// Definitions never change after loading. Everything that changes during a
/// run lives in `ProgressionState`.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    /// Unique identifier (e.g., "whip", "hollow_heart")
    pub id: String,
    /// Display name shown in UI
    #[serde(default)]
    pub display_name: String,
    /// Category flags
    #[serde(default)]
    pub kind: AbilityKind,
    /// Number of levels, indexed `0..max_level_count`
    pub max_level_count: u32,
    /// Prerequisites consumed or checked when this evolution is offered/taken
    #[serde(default)]
    pub evolution_requirements: Vec<EvolutionRequirement>,
    /// Characters allowed to receive this ability (empty = everyone)
    #[serde(default)]
    pub characters: Vec<String>,
}

impl AbilityDefinition {
    pub fn is_weapon(&self) -> bool {
        self.kind.is_weapon
    }

    pub fn is_active(&self) -> bool {
        self.kind.is_active
    }

    pub fn is_evolution(&self) -> bool {
        self.kind.is_evolution
    }

    pub fn is_endgame(&self) -> bool {
        self.kind.is_endgame
    }

    /// Highest level index this ability can reach.
    pub fn last_level(&self) -> u32 {
        self.max_level_count.saturating_sub(1)
    }

    /// Prerequisites removed from the player when this evolution is taken.
    pub fn consumed_requirements(&self) -> impl Iterator<Item = &EvolutionRequirement> {
        self.evolution_requirements
            .iter()
            .filter(|requirement| requirement.remove_on_evolve)
    }

    /// Default character restriction: empty list means unrestricted.
    pub fn allows_character(&self, character: Option<&str>) -> bool {
        if self.characters.is_empty() {
            return true;
        }

        character.is_some_and(|character| self.characters.iter().any(|c| c == character))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
pub struct AbilityKind {
    #[serde(default)]
    pub is_weapon: bool,
    /// Active abilities occupy active slots, everything else is passive
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_evolution: bool,
    /// Only offered once nothing else is left
    #[serde(default)]
    pub is_endgame: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
pub struct EvolutionRequirement {
    pub ability_id: String,
    pub required_level: u32,
    #[serde(default)]
    pub remove_on_evolve: bool,
}
