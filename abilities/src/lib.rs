pub mod acquisition;
pub mod chest;
pub mod config;
pub mod eligibility;
pub mod offers;
pub mod runtime;
pub mod sampler;
pub mod systems;
pub mod weights;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use {
    acquisition::{accept, grant, next_level},
    chest::{ChestChances, ChestResult, apply_chest, open_chest},
    config::{OfferConfig, OfferRng},
    eligibility::{SlotUsage, eligible_pool},
    offers::{OfferContext, rehydrate},
    runtime::AbilityRuntime,
    sampler::sample_offer,
    systems::PendingOffer,
    weights::OfferWeights,
};

use {
    abilities_assets::AbilitiesAssetsPlugin, ability_components::AbilityComponentsPlugin,
    ability_events::AbilityEventsPlugin, bevy::prelude::*,
};

pub struct AbilitiesPlugin;

impl Plugin for AbilitiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            AbilitiesAssetsPlugin,
            AbilityComponentsPlugin,
            AbilityEventsPlugin,
        ))
        .init_resource::<OfferConfig>()
        .init_resource::<OfferRng>()
        .init_resource::<PendingOffer>()
        .add_observer(systems::offer_on_level_up)
        .add_observer(systems::accept_chosen_offer)
        .add_observer(systems::open_reward_chest)
        .add_observer(systems::grant_ability);
    }
}
