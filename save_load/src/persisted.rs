use {
    crate::store::{ProgressStore, ProgressStoreError},
    ability_components::ProgressionState,
    serde::{Deserialize, Serialize},
    std::collections::{BTreeMap, BTreeSet},
};

/// On-disk form of [`ProgressionState`]. Ordered collections keep save files stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedProgression {
    pub levels: BTreeMap<String, u32>,
    pub acquired: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

impl PersistedProgression {
    pub fn capture(state: &ProgressionState) -> Self {
        Self {
            levels: state
                .level_by_type
                .iter()
                .map(|(id, level)| (id.clone(), *level))
                .collect(),
            acquired: state.acquired.iter().cloned().collect(),
            removed: state.removed_by_evolution.iter().cloned().collect(),
        }
    }

    /// Replaces `state` with the saved progression.
    ///
    /// Entries that break the state's invariants (held without a level, or
    /// held after being consumed) are dropped.
    pub fn apply(&self, state: &mut ProgressionState) {
        state.reset();
        state
            .removed_by_evolution
            .extend(self.removed.iter().cloned());

        for (id, level) in &self.levels {
            if self.acquired.contains(id) {
                state.set_level(id, *level);
            } else if !state.is_removed(id) {
                state.level_by_type.insert(id.clone(), *level);
            }
        }
    }
}

/// Loads the saved progression into `state`. Returns false when there was
/// nothing to restore, leaving `state` untouched.
pub fn restore_state(
    store: &dyn ProgressStore,
    state: &mut ProgressionState,
) -> Result<bool, ProgressStoreError> {
    let Some(saved) = store.load()? else {
        return Ok(false);
    };

    saved.apply(state);
    Ok(true)
}

pub fn flush_state(
    store: &dyn ProgressStore,
    state: &ProgressionState,
) -> Result<(), ProgressStoreError> {
    store.save(&PersistedProgression::capture(state))
}
