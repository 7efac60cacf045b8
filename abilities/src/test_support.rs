use {
    crate::runtime::AbilityRuntime,
    abilities_assets::{AbilityCatalog, AbilityDefinition, AbilityKind, EvolutionRequirement},
};

fn definition(id: &str, kind: AbilityKind) -> AbilityDefinition {
    AbilityDefinition {
        id: id.to_string(),
        display_name: id.to_string(),
        kind,
        max_level_count: 8,
        evolution_requirements: Vec::new(),
        characters: Vec::new(),
    }
}

pub fn active(id: &str) -> AbilityDefinition {
    definition(
        id,
        AbilityKind {
            is_active: true,
            ..Default::default()
        },
    )
}

pub fn passive(id: &str) -> AbilityDefinition {
    definition(id, AbilityKind::default())
}

pub fn weapon(id: &str) -> AbilityDefinition {
    definition(
        id,
        AbilityKind {
            is_weapon: true,
            is_active: true,
            ..Default::default()
        },
    )
}

pub fn endgame(id: &str) -> AbilityDefinition {
    definition(
        id,
        AbilityKind {
            is_endgame: true,
            ..Default::default()
        },
    )
}

/// Active weapon evolution with `(prerequisite, required_level, remove_on_evolve)` requirements.
pub fn evolution(id: &str, requirements: &[(&str, u32, bool)]) -> AbilityDefinition {
    let mut evolution = definition(
        id,
        AbilityKind {
            is_weapon: true,
            is_active: true,
            is_evolution: true,
            ..Default::default()
        },
    );
    evolution.evolution_requirements = requirements
        .iter()
        .map(|&(ability_id, required_level, remove_on_evolve)| EvolutionRequirement {
            ability_id: ability_id.to_string(),
            required_level,
            remove_on_evolve,
        })
        .collect();
    evolution
}

pub fn with_levels(mut definition: AbilityDefinition, max_level_count: u32) -> AbilityDefinition {
    definition.max_level_count = max_level_count;
    definition
}

pub fn catalog_of(definitions: Vec<AbilityDefinition>) -> AbilityCatalog {
    AbilityCatalog::from_definitions(definitions)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    Instantiate(String, u32),
    Teardown(String),
}

#[derive(Default)]
pub struct RecordingRuntime {
    pub calls: Vec<RuntimeCall>,
}

impl AbilityRuntime for RecordingRuntime {
    fn instantiate(&mut self, definition: &AbilityDefinition, level: u32) {
        self.calls
            .push(RuntimeCall::Instantiate(definition.id.clone(), level));
    }

    fn teardown(&mut self, ability_id: &str) {
        self.calls.push(RuntimeCall::Teardown(ability_id.to_string()));
    }
}
