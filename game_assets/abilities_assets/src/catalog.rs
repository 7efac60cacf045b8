use {
    crate::AbilityDefinition,
    bevy::{platform::collections::HashMap, prelude::*},
    thiserror::Error,
};

/// Read-only lookup of every loaded ability definition.
///
/// Definitions are kept sorted by id so that every pass over the catalog
/// (and therefore every pool built from it) has a stable order.
#[derive(Resource, Default, Debug, Clone)]
pub struct AbilityCatalog {
    definitions: Vec<AbilityDefinition>,
    index: HashMap<String, usize>,
}

impl AbilityCatalog {
    pub fn from_definitions(definitions: impl IntoIterator<Item = AbilityDefinition>) -> Self {
        let mut definitions: Vec<_> = definitions.into_iter().collect();
        definitions.sort_by(|a, b| a.id.cmp(&b.id));
        definitions.dedup_by(|a, b| a.id == b.id);

        let index = definitions
            .iter()
            .enumerate()
            .map(|(position, definition)| (definition.id.clone(), position))
            .collect();

        Self { definitions, index }
    }

    pub fn get(&self, id: &str) -> Option<&AbilityDefinition> {
        self.index.get(id).map(|&position| &self.definitions[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.definitions.iter()
    }

    pub fn endgame(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.definitions.iter().filter(|d| d.is_endgame())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Reports data errors the offer engine does not guard against.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for definition in &self.definitions {
            if definition.max_level_count == 0 {
                issues.push(CatalogIssue::NoLevels {
                    ability_id: definition.id.clone(),
                });
            }

            if definition.is_evolution() && definition.evolution_requirements.is_empty() {
                issues.push(CatalogIssue::EvolutionWithoutRequirements {
                    ability_id: definition.id.clone(),
                });
            }

            for requirement in &definition.evolution_requirements {
                if !self.contains(&requirement.ability_id) {
                    issues.push(CatalogIssue::UnknownPrerequisite {
                        ability_id: definition.id.clone(),
                        prerequisite: requirement.ability_id.clone(),
                    });
                }
            }
        }

        issues
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("ability '{ability_id}' has max_level_count 0")]
    NoLevels { ability_id: String },
    #[error("evolution '{ability_id}' lists no requirements")]
    EvolutionWithoutRequirements { ability_id: String },
    #[error("ability '{ability_id}' requires unknown ability '{prerequisite}'")]
    UnknownPrerequisite {
        ability_id: String,
        prerequisite: String,
    },
}

/// Rebuilds the catalog whenever ability assets are added, modified or removed.
pub fn rebuild_catalog(
    definitions: Res<Assets<AbilityDefinition>>,
    mut catalog: ResMut<AbilityCatalog>,
) {
    if !definitions.is_changed() {
        return;
    }

    *catalog = AbilityCatalog::from_definitions(definitions.iter().map(|(_, d)| d.clone()));

    for issue in catalog.validate() {
        warn!(%issue, "ability catalog issue");
    }

    debug!(abilities = catalog.len(), "ability catalog rebuilt");
}
