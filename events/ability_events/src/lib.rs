use {ability_components::ChestTier, bevy::prelude::*};

pub struct AbilityEventsPlugin;

impl Plugin for AbilityEventsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<RequestLevelUpOffer>()
            .register_type::<OfferPresented>()
            .register_type::<ChooseOffer>()
            .register_type::<OpenChest>()
            .register_type::<ChestPresented>()
            .register_type::<GrantAbility>()
            .register_type::<AbilityInstantiated>()
            .register_type::<AbilityTornDown>();
    }
}

// === Requests ===

/// Player reached a new level and should be shown up to three upgrades
#[derive(Event, Debug, Clone, Default, Reflect)]
#[reflect(Default)]
pub struct RequestLevelUpOffer {
    pub player_level: u32,
}

/// Player picked one of the offered upgrades
#[derive(Event, Debug, Clone, Default, Reflect)]
#[reflect(Default)]
pub struct ChooseOffer {
    pub ability_id: String,
}

/// Player opened a reward chest.
///
/// Chances left as `None` fall back to the configured defaults.
#[derive(Event, Debug, Clone, Default, Reflect)]
#[reflect(Default)]
pub struct OpenChest {
    pub triple_chance: Option<f64>,
    pub quintuple_chance: Option<f64>,
}

/// Grants an ability outside of the offer flow (e.g. a character's starting weapon)
#[derive(Event, Debug, Clone, Default, Reflect)]
#[reflect(Default)]
pub struct GrantAbility {
    pub ability_id: String,
}

/// Starts a run, either fresh or from the persisted progress
#[derive(Event, Debug, Clone, Default)]
pub struct StartRun {
    pub restore: bool,
}

// === Presentation ===

/// Upgrades to show on the level-up screen, in draw order.
/// An empty list means there is nothing to offer.
#[derive(Event, Debug, Clone, Default, Reflect)]
#[reflect(Default)]
pub struct OfferPresented {
    pub abilities: Vec<String>,
}

/// Rewards granted by a chest, already applied to the progression state
#[derive(Event, Debug, Clone, Default, Reflect)]
#[reflect(Default)]
pub struct ChestPresented {
    pub tier: ChestTier,
    pub abilities: Vec<String>,
}

// === Runtime hooks ===

/// Gameplay should spawn (or re-level) the live instance of an ability
#[derive(Event, Debug, Clone, Default, Reflect)]
#[reflect(Default)]
pub struct AbilityInstantiated {
    pub ability_id: String,
    pub level: u32,
}

/// Gameplay should despawn the live instance of an ability
#[derive(Event, Debug, Clone, Default, Reflect)]
#[reflect(Default)]
pub struct AbilityTornDown {
    pub ability_id: String,
}

/// Progression state changed and should be flushed to storage
#[derive(Event, Debug, Clone, Default)]
pub struct ProgressionChanged;
