use {
    crate::runtime::AbilityRuntime,
    abilities_assets::AbilityDefinition,
    ability_components::ProgressionState,
    bevy::prelude::*,
};

/// Makes the player hold `definition` at `level`.
///
/// Taking an evolution first tears down and permanently removes every held
/// prerequisite flagged `remove_on_evolve`. Returns false when `definition`
/// itself was removed by an earlier evolution and nothing was granted.
pub fn accept(
    definition: &AbilityDefinition,
    level: u32,
    state: &mut ProgressionState,
    runtime: &mut impl AbilityRuntime,
) -> bool {
    if definition.is_evolution() {
        for requirement in definition.consumed_requirements() {
            if !state.is_acquired(&requirement.ability_id) {
                continue;
            }

            runtime.teardown(&requirement.ability_id);
            state.consume(&requirement.ability_id);
            info!(
                evolution = %definition.id,
                consumed = %requirement.ability_id,
                "ability consumed by evolution"
            );
        }
    }

    if !state.set_level(&definition.id, level) {
        warn!(ability_id = %definition.id, "refusing to grant an ability removed by evolution");
        return false;
    }

    debug!(ability_id = %definition.id, level, "ability accepted");
    runtime.instantiate(definition, level);
    true
}

/// Level the next grant of `definition` lands on: 0 for a new ability,
/// one above the current level otherwise. Endgame abilities stay where they are.
pub fn next_level(definition: &AbilityDefinition, state: &ProgressionState) -> u32 {
    if !state.is_acquired(&definition.id) {
        return 0;
    }

    let current = state.level_of(&definition.id);
    if definition.is_endgame() {
        current
    } else {
        current + 1
    }
}

/// Accepts `definition` at its next level and returns that level.
pub fn grant(
    definition: &AbilityDefinition,
    state: &mut ProgressionState,
    runtime: &mut impl AbilityRuntime,
) -> Option<u32> {
    let level = next_level(definition, state);
    accept(definition, level, state, runtime).then_some(level)
}
