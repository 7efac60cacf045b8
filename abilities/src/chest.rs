//! Reward chests.
//!
//! Every eligible ability is weighted by how many levels it has left, and that
//! same number caps how often a single chest may draw it. The chest first
//! rolls its tier (rarest first), draws until the tier is filled, and falls
//! back to smaller tiers when the pool runs dry.

use {
    crate::{SlotUsage, acquisition::grant, runtime::AbilityRuntime},
    abilities_assets::AbilityDefinition,
    ability_components::{AbilitySlots, ChestTier, ProgressionState},
    bevy::prelude::*,
    rand::Rng,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChestChances {
    pub triple: f64,
    pub quintuple: f64,
}

/// Outcome of a chest draw. The same ability may appear more than once,
/// each entry is one level granted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChestResult<'a> {
    pub tier: ChestTier,
    pub abilities: Vec<&'a AbilityDefinition>,
}

impl ChestResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.abilities.iter().map(|d| d.id.clone()).collect()
    }
}

/// A pool entry still drawable by this chest.
struct Remaining<'a> {
    definition: &'a AbilityDefinition,
    levels_left: u32,
}

/// Grants still available for `definition`: every level for an ability that
/// was never acquired, the steps above the current level otherwise.
pub fn levels_left(definition: &AbilityDefinition, state: &ProgressionState) -> u32 {
    match state.stored_level(&definition.id) {
        None => definition.max_level_count,
        // endgame levels never advance
        Some(_) if definition.is_endgame() => definition.max_level_count,
        Some(level) => definition
            .max_level_count
            .saturating_sub(level)
            .saturating_sub(1),
    }
}

pub fn open_chest<'a, R: Rng + ?Sized>(
    pool: &[&'a AbilityDefinition],
    state: &ProgressionState,
    usage: SlotUsage,
    slots: &AbilitySlots,
    chances: ChestChances,
    rng: &mut R,
) -> ChestResult<'a> {
    let mut remaining: Vec<Remaining<'a>> = pool
        .iter()
        .filter(|definition| !state.is_removed(&definition.id))
        .map(|&definition| Remaining {
            definition,
            levels_left: levels_left(definition, state),
        })
        .filter(|entry| entry.levels_left > 0)
        .collect();

    let sum: u32 = remaining.iter().map(|entry| entry.levels_left).sum();
    let mut tier = roll_tier(sum, chances, rng);
    let mut results: Vec<&'a AbilityDefinition> = Vec::with_capacity(tier.target_count());
    let mut projected = usage;

    debug!(?tier, sum, candidates = remaining.len(), "chest tier rolled");

    while results.len() < tier.target_count() && !remaining.is_empty() {
        let index = draw_index(&remaining, rng);
        let definition = remaining[index].definition;
        let repeat = results.iter().any(|picked| picked.id == definition.id);

        results.push(definition);

        remaining[index].levels_left -= 1;
        if remaining[index].levels_left == 0 {
            remaining.remove(index);
        }

        if definition.is_evolution() || repeat || state.is_acquired(&definition.id) {
            continue;
        }

        // a new ability takes a slot; once its category is full no other
        // new ability of that category can be granted by this chest
        let active = definition.is_active();
        let was_full = projected.is_full(slots, active);
        if active {
            projected.active += 1;
        } else {
            projected.passive += 1;
        }

        if !was_full && projected.is_full(slots, active) {
            remaining.retain(|entry| {
                let other = entry.definition;
                other.id == definition.id
                    || other.is_active() != active
                    || state.is_acquired(&other.id)
            });
            trace!(ability_id = %definition.id, active, "chest filled a slot category");
        }
    }

    while results.len() < tier.target_count() && remaining.is_empty() {
        let Some(smaller) = tier.degrade() else {
            break;
        };

        debug!(from = ?tier, to = ?smaller, drawn = results.len(), "chest pool ran dry, degrading tier");
        tier = smaller;
        results.truncate(tier.target_count());
    }

    ChestResult {
        tier,
        abilities: results,
    }
}

fn roll_tier<R: Rng + ?Sized>(sum: u32, chances: ChestChances, rng: &mut R) -> ChestTier {
    if sum >= 5 && rng.random_bool(chances.quintuple.clamp(0.0, 1.0)) {
        ChestTier::Quintuple
    } else if sum >= 3 && rng.random_bool(chances.triple.clamp(0.0, 1.0)) {
        ChestTier::Triple
    } else {
        ChestTier::Single
    }
}

/// Picks an entry with probability proportional to its current levels left.
fn draw_index<R: Rng + ?Sized>(remaining: &[Remaining], rng: &mut R) -> usize {
    let total: u32 = remaining.iter().map(|entry| entry.levels_left).sum();
    let mut roll = rng.random_range(0..total);

    for (index, entry) in remaining.iter().enumerate() {
        if roll < entry.levels_left {
            return index;
        }
        roll -= entry.levels_left;
    }

    remaining.len() - 1
}

/// Grants every drawn ability in order. Returns `(ability_id, level)` for each
/// grant that went through; entries removed by an evolution drawn earlier
/// in the same chest are skipped.
pub fn apply_chest(
    result: &ChestResult,
    state: &mut ProgressionState,
    runtime: &mut impl AbilityRuntime,
) -> Vec<(String, u32)> {
    result
        .abilities
        .iter()
        .filter_map(|&definition| {
            grant(definition, state, runtime).map(|level| (definition.id.clone(), level))
        })
        .collect()
}
