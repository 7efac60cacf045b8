use {
    crate::weights::OfferWeights,
    bevy::prelude::*,
    rand::SeedableRng,
    rand_chacha::ChaCha8Rng,
    serde::{Deserialize, Serialize},
};

/// Tuning for level-up offers and chests, loadable from RON.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferConfig {
    /// Maximum number of upgrades shown on a level-up
    pub offer_size: usize,
    pub weights: OfferWeights,
    /// Chance a chest rolls the 3-item tier (checked after the 5-item tier)
    pub triple_chance: f64,
    /// Chance a chest rolls the 5-item tier
    pub quintuple_chance: f64,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            offer_size: 3,
            weights: OfferWeights::default(),
            triple_chance: 0.1,
            quintuple_chance: 0.03,
            seed: None,
        }
    }
}

impl OfferConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }
}

/// Random source shared by every offer and chest roll of a run.
#[derive(Resource, Deref, DerefMut)]
pub struct OfferRng(pub ChaCha8Rng);

impl OfferRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_config(config: &OfferConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self(ChaCha8Rng::from_rng(&mut rand::rng())),
        }
    }
}

impl FromWorld for OfferRng {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<OfferConfig>()
            .map(OfferRng::from_config)
            .unwrap_or_else(|| OfferRng::from_config(&OfferConfig::default()))
    }
}
