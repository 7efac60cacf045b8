use {
    abilities_assets::AbilityDefinition,
    ability_events::{AbilityInstantiated, AbilityTornDown},
    bevy::prelude::*,
};

/// What "having" an ability means is owned by gameplay; the offer engine
/// only tells it when an instance should appear, level up or go away.
pub trait AbilityRuntime {
    fn instantiate(&mut self, definition: &AbilityDefinition, level: u32);
    fn teardown(&mut self, ability_id: &str);
}

impl AbilityRuntime for Commands<'_, '_> {
    fn instantiate(&mut self, definition: &AbilityDefinition, level: u32) {
        self.trigger(AbilityInstantiated {
            ability_id: definition.id.clone(),
            level,
        });
    }

    fn teardown(&mut self, ability_id: &str) {
        self.trigger(AbilityTornDown {
            ability_id: ability_id.to_string(),
        });
    }
}
