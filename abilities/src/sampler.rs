use {
    crate::{
        SlotUsage,
        weights::{Candidate, OfferWeights, weigh_pool},
    },
    abilities_assets::{AbilityCatalog, AbilityDefinition},
    ability_components::ProgressionState,
    bevy::prelude::*,
    rand::Rng,
};

/// Draws up to `offer_size` distinct abilities from `pool` for a level-up.
///
/// Each round renormalizes the remaining weights, walks the candidates in
/// pool order and takes the first whose cumulative probability reaches the
/// roll. Picked candidates leave the pool, so the batch never repeats.
#[allow(clippy::too_many_arguments)]
pub fn sample_offer<'a, R: Rng + ?Sized>(
    pool: &[&'a AbilityDefinition],
    catalog: &AbilityCatalog,
    state: &ProgressionState,
    player_level: u32,
    usage: SlotUsage,
    weights: &OfferWeights,
    offer_size: usize,
    rng: &mut R,
) -> Vec<&'a AbilityDefinition> {
    let mut remaining: Vec<_> = weigh_pool(pool, catalog, state, player_level, usage, weights)
        .into_iter()
        .filter(|candidate| !state.is_removed(&candidate.definition.id))
        .collect();
    let mut batch = Vec::with_capacity(offer_size.min(remaining.len()));

    while batch.len() < offer_size && !remaining.is_empty() {
        let picked = draw_index(&remaining, rng);
        let candidate = remaining.remove(picked);

        trace!(ability_id = %candidate.definition.id, weight = candidate.weight, "offer pick");
        batch.push(candidate.definition);
    }

    batch
}

fn draw_index<R: Rng + ?Sized>(candidates: &[Candidate], rng: &mut R) -> usize {
    let total_weight: f64 = candidates.iter().map(|c| c.weight).sum();
    let roll: f64 = rng.random();

    if total_weight > 0.0 {
        let mut cumulative = 0.0;
        for (index, candidate) in candidates.iter().enumerate() {
            cumulative += candidate.weight / total_weight;
            if cumulative >= roll {
                return index;
            }
        }
    }

    // rounding kept the cumulative probability below the roll
    debug!(
        candidates = candidates.len(),
        roll, "weighted pick fell through, picking uniformly"
    );
    rng.random_range(0..candidates.len())
}
