use {
    crate::{
        acquisition::grant,
        chest::{ChestChances, apply_chest},
        config::{OfferConfig, OfferRng},
        offers::OfferContext,
    },
    abilities_assets::AbilityCatalog,
    ability_components::{AbilitySlots, CurrentCharacter, ProgressionState},
    ability_events::{
        ChestPresented, ChooseOffer, GrantAbility, OfferPresented, OpenChest, ProgressionChanged,
        RequestLevelUpOffer,
    },
    bevy::prelude::*,
};

/// Abilities currently shown on the level-up screen
#[derive(Resource, Default, Debug, Clone, Deref, DerefMut)]
pub struct PendingOffer(pub Vec<String>);

/// Computes the level-up offer and hands it to the presentation layer
pub fn offer_on_level_up(
    trigger: On<RequestLevelUpOffer>,
    mut commands: Commands,
    catalog: Res<AbilityCatalog>,
    state: Res<ProgressionState>,
    slots: Res<AbilitySlots>,
    character: Res<CurrentCharacter>,
    config: Res<OfferConfig>,
    mut rng: ResMut<OfferRng>,
    mut pending: ResMut<PendingOffer>,
) {
    let event = trigger.event();
    let context = OfferContext {
        catalog: &catalog,
        state: &state,
        slots: &slots,
        config: &config,
    };

    let abilities: Vec<String> = context
        .level_up_offer(
            event.player_level,
            |definition| definition.allows_character(character.0.as_deref()),
            &mut rng.0,
        )
        .into_iter()
        .map(|definition| definition.id.clone())
        .collect();

    if abilities.is_empty() {
        info!(player_level = event.player_level, "nothing left to offer");
    } else {
        debug!(player_level = event.player_level, ?abilities, "level up offer");
    }

    pending.0 = abilities.clone();
    commands.trigger(OfferPresented { abilities });
}

/// Grants the ability the player picked from the pending offer
pub fn accept_chosen_offer(
    trigger: On<ChooseOffer>,
    mut commands: Commands,
    catalog: Res<AbilityCatalog>,
    mut state: ResMut<ProgressionState>,
    mut pending: ResMut<PendingOffer>,
) {
    let event = trigger.event();

    if !pending.contains(&event.ability_id) {
        warn!(ability_id = %event.ability_id, offered = ?pending.0, "choice is not part of the current offer");
        return;
    }

    let Some(definition) = catalog.get(&event.ability_id) else {
        warn!(ability_id = %event.ability_id, "chosen ability is missing from the catalog");
        return;
    };

    pending.clear();

    if let Some(level) = grant(definition, &mut state, &mut commands) {
        info!(ability_id = %definition.id, level, "offer accepted");
        commands.trigger(ProgressionChanged);
    }
}

/// Rolls, fills and applies a reward chest
pub fn open_reward_chest(
    trigger: On<OpenChest>,
    mut commands: Commands,
    catalog: Res<AbilityCatalog>,
    mut state: ResMut<ProgressionState>,
    slots: Res<AbilitySlots>,
    character: Res<CurrentCharacter>,
    config: Res<OfferConfig>,
    mut rng: ResMut<OfferRng>,
) {
    let event = trigger.event();
    let context = OfferContext {
        catalog: &catalog,
        state: &state,
        slots: &slots,
        config: &config,
    };

    let defaults = context.default_chances();
    let chances = ChestChances {
        triple: event.triple_chance.unwrap_or(defaults.triple),
        quintuple: event.quintuple_chance.unwrap_or(defaults.quintuple),
    };

    let result = context.chest(
        chances,
        |definition| definition.allows_character(character.0.as_deref()),
        &mut rng.0,
    );

    let granted = apply_chest(&result, &mut state, &mut commands);

    if granted.is_empty() {
        info!(tier = ?result.tier, "chest had nothing to give");
    } else {
        info!(tier = ?result.tier, ?granted, "chest opened");
        commands.trigger(ProgressionChanged);
    }

    commands.trigger(ChestPresented {
        tier: result.tier,
        abilities: granted.into_iter().map(|(id, _)| id).collect(),
    });
}

/// Grants an ability directly, bypassing eligibility (starting weapons)
pub fn grant_ability(
    trigger: On<GrantAbility>,
    mut commands: Commands,
    catalog: Res<AbilityCatalog>,
    mut state: ResMut<ProgressionState>,
) {
    let event = trigger.event();

    let Some(definition) = catalog.get(&event.ability_id) else {
        warn!(ability_id = %event.ability_id, "cannot grant unknown ability");
        return;
    };

    if let Some(level) = grant(definition, &mut state, &mut commands) {
        info!(ability_id = %definition.id, level, "ability granted");
        commands.trigger(ProgressionChanged);
    }
}
