//! Keeps a run's ability progression across sessions.
//!
//! - `StartRun { restore: false }` starts clean and overwrites the saved run
//! - `StartRun { restore: true }` reloads the saved run
//! - every `ProgressionChanged` flushes the state to the store
//!
//! After a start or restore every held ability is announced again with
//! `AbilityInstantiated` so gameplay can rebuild its runtime instances.

mod persisted;
mod store;

pub use {
    persisted::{PersistedProgression, flush_state, restore_state},
    store::{MemoryProgressStore, ProgressStore, ProgressStoreError, RonProgressStore},
};

use {
    abilities::{PendingOffer, rehydrate},
    abilities_assets::AbilityCatalog,
    ability_components::ProgressionState,
    ability_events::{ProgressionChanged, StartRun},
    bevy::prelude::*,
};

/// The store progression is saved to. Defaults to [`RonProgressStore`].
#[derive(Resource, Deref)]
pub struct ProgressStorage(pub Box<dyn ProgressStore>);

impl ProgressStorage {
    pub fn new(store: impl ProgressStore + 'static) -> Self {
        Self(Box::new(store))
    }
}

impl Default for ProgressStorage {
    fn default() -> Self {
        Self::new(RonProgressStore::default())
    }
}

pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProgressStorage>()
            .add_observer(start_run)
            .add_observer(save_on_change);
    }
}

fn start_run(
    trigger: On<StartRun>,
    mut commands: Commands,
    storage: Res<ProgressStorage>,
    catalog: Res<AbilityCatalog>,
    mut state: ResMut<ProgressionState>,
    mut pending: ResMut<PendingOffer>,
) {
    let restore = trigger.event().restore;
    pending.clear();
    state.reset();

    if restore {
        match restore_state(storage.0.as_ref(), &mut state) {
            Ok(true) => info!(held = state.acquired.len(), "progression restored"),
            Ok(false) => info!("no saved progression, starting fresh"),
            Err(e) => {
                error!("Failed to restore progression: {}", e);
                state.reset();
            }
        }
    } else if let Err(e) = flush_state(storage.0.as_ref(), &state) {
        error!("Failed to clear saved progression: {}", e);
    }

    let rebuilt = rehydrate(&catalog, &state, &mut commands);
    debug!(rebuilt, restore, "run started");
}

fn save_on_change(
    _trigger: On<ProgressionChanged>,
    storage: Res<ProgressStorage>,
    state: Res<ProgressionState>,
) {
    match flush_state(storage.0.as_ref(), &state) {
        Ok(()) => trace!(held = state.acquired.len(), "progression saved"),
        Err(e) => error!("Failed to save progression: {}", e),
    }
}
