use {
    crate::{
        SlotUsage,
        chest::{ChestChances, ChestResult, open_chest},
        config::OfferConfig,
        eligibility::eligible_pool,
        runtime::AbilityRuntime,
        sampler::sample_offer,
    },
    abilities_assets::{AbilityCatalog, AbilityDefinition},
    ability_components::{AbilitySlots, ProgressionState},
    rand::Rng,
};

/// Everything an offer or chest computation reads.
///
/// Results only borrow from the catalog, so the state can be mutated
/// (e.g. by applying a chest) while they are still alive.
pub struct OfferContext<'c, 's> {
    pub catalog: &'c AbilityCatalog,
    pub state: &'s ProgressionState,
    pub slots: &'s AbilitySlots,
    pub config: &'s OfferConfig,
}

impl<'c> OfferContext<'c, '_> {
    pub fn usage(&self) -> SlotUsage {
        SlotUsage::measure(self.catalog, self.state)
    }

    pub fn pool(&self, allowed: impl Fn(&AbilityDefinition) -> bool) -> Vec<&'c AbilityDefinition> {
        eligible_pool(self.catalog, self.state, self.usage(), self.slots, allowed)
    }

    /// Up to `offer_size` distinct abilities for a level-up screen.
    pub fn level_up_offer<R: Rng + ?Sized>(
        &self,
        player_level: u32,
        allowed: impl Fn(&AbilityDefinition) -> bool,
        rng: &mut R,
    ) -> Vec<&'c AbilityDefinition> {
        let pool = self.pool(allowed);
        sample_offer(
            &pool,
            self.catalog,
            self.state,
            player_level,
            self.usage(),
            &self.config.weights,
            self.config.offer_size,
            rng,
        )
    }

    pub fn chest<R: Rng + ?Sized>(
        &self,
        chances: ChestChances,
        allowed: impl Fn(&AbilityDefinition) -> bool,
        rng: &mut R,
    ) -> ChestResult<'c> {
        let pool = self.pool(allowed);
        open_chest(&pool, self.state, self.usage(), self.slots, chances, rng)
    }

    pub fn default_chances(&self) -> ChestChances {
        ChestChances {
            triple: self.config.triple_chance,
            quintuple: self.config.quintuple_chance,
        }
    }
}

/// Re-creates the runtime instance of every held ability, e.g. after
/// restoring a saved run. Abilities missing from the catalog are skipped.
pub fn rehydrate(
    catalog: &AbilityCatalog,
    state: &ProgressionState,
    runtime: &mut impl AbilityRuntime,
) -> usize {
    let mut held: Vec<_> = state
        .acquired
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect();
    held.sort_by(|a, b| a.id.cmp(&b.id));

    for definition in &held {
        runtime.instantiate(definition, state.level_of(&definition.id));
    }

    held.len()
}
