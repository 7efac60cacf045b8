use {
    ability_draft::{
        ProgressionPlugin,
        abilities_assets::{AbilitiesFolderHandle, AbilityCatalog, rebuild_catalog},
        ability_components::ProgressionState,
        ability_events::{
            ChestPresented, ChooseOffer, GrantAbility, OfferPresented, OpenChest,
            RequestLevelUpOffer, StartRun,
        },
    },
    bevy::{log::LogPlugin, prelude::*},
};

const STARTING_WEAPON: &str = "whip";
const LAST_LEVEL: u32 = 40;
const CHEST_EVERY: u32 = 5;

/// Headless run that always takes the first offered ability.
#[derive(Resource, Default)]
struct AutoRun {
    started: bool,
    player_level: u32,
}

fn main() {
    App::new()
        .add_plugins((
            MinimalPlugins,
            AssetPlugin::default(),
            LogPlugin {
                filter: "error,abilities=debug,\
                    abilities_assets=debug,\
                    save_load=trace,\
                    ability_draft=info"
                    .into(),
                level: bevy::log::Level::TRACE,
                ..Default::default()
            },
        ))
        .add_plugins(ProgressionPlugin)
        .init_resource::<AutoRun>()
        .add_observer(take_first_offer)
        .add_observer(report_chest)
        .add_systems(Update, advance_run.after(rebuild_catalog))
        .run();
}

fn advance_run(
    mut commands: Commands,
    mut run: ResMut<AutoRun>,
    asset_server: Res<AssetServer>,
    folder: Option<Res<AbilitiesFolderHandle>>,
    catalog: Res<AbilityCatalog>,
    state: Res<ProgressionState>,
    mut exit: MessageWriter<AppExit>,
) {
    let loaded = folder
        .is_some_and(|folder| asset_server.is_loaded_with_dependencies(folder.0.id()));
    if !loaded || catalog.is_empty() {
        return;
    }

    if !run.started {
        run.started = true;
        commands.trigger(StartRun { restore: false });
        commands.trigger(GrantAbility {
            ability_id: STARTING_WEAPON.to_string(),
        });
        return;
    }

    if run.player_level >= LAST_LEVEL {
        let mut held: Vec<_> = state
            .acquired
            .iter()
            .map(|id| format!("{id}:{}", state.level_of(id)))
            .collect();
        held.sort();
        info!(?held, removed = ?state.removed_by_evolution, "run finished");
        exit.write(AppExit::Success);
        return;
    }

    run.player_level += 1;
    if run.player_level % CHEST_EVERY == 0 {
        commands.trigger(OpenChest::default());
    } else {
        commands.trigger(RequestLevelUpOffer {
            player_level: run.player_level,
        });
    }
}

fn take_first_offer(trigger: On<OfferPresented>, mut commands: Commands) {
    let Some(first) = trigger.event().abilities.first() else {
        info!("no offer this level");
        return;
    };

    commands.trigger(ChooseOffer {
        ability_id: first.clone(),
    });
}

fn report_chest(trigger: On<ChestPresented>) {
    let event = trigger.event();
    info!(tier = ?event.tier, abilities = ?event.abilities, "chest");
}
