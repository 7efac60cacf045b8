use {
    abilities_assets::{AbilityCatalog, AbilityDefinition},
    ability_components::{AbilitySlots, ProgressionState},
};

/// Number of held abilities per slot category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotUsage {
    pub active: usize,
    pub passive: usize,
}

impl SlotUsage {
    pub fn measure(catalog: &AbilityCatalog, state: &ProgressionState) -> Self {
        state
            .acquired
            .iter()
            .filter_map(|id| catalog.get(id))
            .fold(Self::default(), |mut usage, definition| {
                if definition.is_active() {
                    usage.active += 1;
                } else {
                    usage.passive += 1;
                }
                usage
            })
    }

    pub fn is_full(&self, slots: &AbilitySlots, active: bool) -> bool {
        if active {
            self.active >= slots.active_capacity
        } else {
            self.passive >= slots.passive_capacity
        }
    }
}

/// Abilities that may currently be offered, in catalog order.
///
/// Falls back to every endgame ability when nothing else qualifies.
pub fn eligible_pool<'a>(
    catalog: &'a AbilityCatalog,
    state: &ProgressionState,
    usage: SlotUsage,
    slots: &AbilitySlots,
    allowed: impl Fn(&AbilityDefinition) -> bool,
) -> Vec<&'a AbilityDefinition> {
    let pool: Vec<_> = catalog
        .iter()
        .filter(|definition| allowed(definition))
        .filter(|definition| is_offerable(definition, state, usage, slots))
        .collect();

    if pool.is_empty() {
        return catalog.endgame().collect();
    }

    pool
}

fn is_offerable(
    definition: &AbilityDefinition,
    state: &ProgressionState,
    usage: SlotUsage,
    slots: &AbilitySlots,
) -> bool {
    if definition.is_endgame() {
        return false;
    }

    if state.has_reached(&definition.id, definition.last_level()) {
        return false;
    }

    if state.is_removed(&definition.id) {
        return false;
    }

    if definition.is_evolution() {
        return requirements_met(definition, state);
    }

    let held = state.is_acquired(&definition.id);

    // weapons are first granted elsewhere, offers only level them up
    if definition.is_weapon() && !held {
        return false;
    }

    held || !usage.is_full(slots, definition.is_active())
}

/// Every prerequisite is held at or above its required level.
pub fn requirements_met(evolution: &AbilityDefinition, state: &ProgressionState) -> bool {
    evolution.evolution_requirements.iter().all(|requirement| {
        state.is_acquired(&requirement.ability_id)
            && state.has_reached(&requirement.ability_id, requirement.required_level)
    })
}
