use {
    crate::SlotUsage,
    abilities_assets::{AbilityCatalog, AbilityDefinition},
    ability_components::ProgressionState,
    serde::{Deserialize, Serialize},
};

/// Multipliers applied on top of a base weight of 1.0.
/// Only their product matters; the defaults are tuning, not rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferWeights {
    /// Ability is already held (upgrades are favoured over new picks)
    pub acquired_bonus: f64,
    /// Active ability while the player is below `early_level_threshold`
    pub early_active_bonus: f64,
    pub early_level_threshold: u32,
    /// Category with fewer held abilities than the other one
    pub scarcity_bonus: f64,
    /// Active evolution
    pub evolution_bonus: f64,
    /// Passive that a held active ability needs for its evolution
    pub required_for_evolution_bonus: f64,
}

impl Default for OfferWeights {
    fn default() -> Self {
        Self {
            acquired_bonus: 2.0,
            early_active_bonus: 1.5,
            early_level_threshold: 10,
            scarcity_bonus: 1.25,
            evolution_bonus: 3.0,
            required_for_evolution_bonus: 2.0,
        }
    }
}

/// A definition paired with its weight for one sampling pass.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub definition: &'a AbilityDefinition,
    pub weight: f64,
}

pub fn candidate_weight(
    definition: &AbilityDefinition,
    catalog: &AbilityCatalog,
    state: &ProgressionState,
    player_level: u32,
    usage: SlotUsage,
    weights: &OfferWeights,
) -> f64 {
    let mut weight = 1.0;

    if state.is_acquired(&definition.id) {
        weight *= weights.acquired_bonus;
    }

    if definition.is_active() {
        if player_level < weights.early_level_threshold {
            weight *= weights.early_active_bonus;
        }
        if usage.passive > usage.active {
            weight *= weights.scarcity_bonus;
        }
        if definition.is_evolution() {
            weight *= weights.evolution_bonus;
        }
    } else {
        if is_required_for_evolution(definition, catalog, state) {
            weight *= weights.required_for_evolution_bonus;
        }
        if usage.active > usage.passive {
            weight *= weights.scarcity_bonus;
        }
    }

    weight
}

/// True when a held, non-evolution active ability lists `passive` as a
/// prerequisite its evolution will consume.
fn is_required_for_evolution(
    passive: &AbilityDefinition,
    catalog: &AbilityCatalog,
    state: &ProgressionState,
) -> bool {
    state
        .acquired
        .iter()
        .filter_map(|id| catalog.get(id))
        .filter(|held| held.is_active() && !held.is_evolution())
        .any(|held| {
            held.consumed_requirements()
                .any(|requirement| requirement.ability_id == passive.id)
        })
}

pub fn weigh_pool<'a>(
    pool: &[&'a AbilityDefinition],
    catalog: &AbilityCatalog,
    state: &ProgressionState,
    player_level: u32,
    usage: SlotUsage,
    weights: &OfferWeights,
) -> Vec<Candidate<'a>> {
    pool.iter()
        .map(|&definition| Candidate {
            definition,
            weight: candidate_weight(definition, catalog, state, player_level, usage, weights),
        })
        .collect()
}
