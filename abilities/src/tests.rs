use {
    crate::{
        config::{OfferConfig, OfferRng},
        systems::{self, PendingOffer},
        test_support::{active, endgame, evolution, passive, weapon, with_levels},
    },
    abilities_assets::{AbilityCatalog, AbilityDefinition},
    ability_components::{
        AbilityComponentsPlugin, AbilitySlots, ChestTier, CurrentCharacter, ProgressionState,
    },
    ability_events::*,
    bevy::prelude::*,
};

/// Collects everything the engine tells the presentation and gameplay layers.
#[derive(Resource, Default)]
struct Tracker {
    offers: Vec<Vec<String>>,
    chests: Vec<(ChestTier, Vec<String>)>,
    instantiated: Vec<(String, u32)>,
    torn_down: Vec<String>,
    changes: usize,
}

fn test_app(definitions: Vec<AbilityDefinition>) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins((AbilityComponentsPlugin, AbilityEventsPlugin))
        .insert_resource(AbilityCatalog::from_definitions(definitions))
        .insert_resource(OfferConfig {
            seed: Some(7),
            ..Default::default()
        })
        .insert_resource(OfferRng::seeded(7))
        .init_resource::<PendingOffer>()
        .init_resource::<Tracker>()
        .add_observer(systems::offer_on_level_up)
        .add_observer(systems::accept_chosen_offer)
        .add_observer(systems::open_reward_chest)
        .add_observer(systems::grant_ability)
        .add_observer(|trigger: On<OfferPresented>, mut tracker: ResMut<Tracker>| {
            tracker.offers.push(trigger.event().abilities.clone());
        })
        .add_observer(|trigger: On<ChestPresented>, mut tracker: ResMut<Tracker>| {
            let event = trigger.event();
            tracker.chests.push((event.tier, event.abilities.clone()));
        })
        .add_observer(
            |trigger: On<AbilityInstantiated>, mut tracker: ResMut<Tracker>| {
                let event = trigger.event();
                tracker
                    .instantiated
                    .push((event.ability_id.clone(), event.level));
            },
        )
        .add_observer(|trigger: On<AbilityTornDown>, mut tracker: ResMut<Tracker>| {
            tracker.torn_down.push(trigger.event().ability_id.clone());
        })
        .add_observer(|_: On<ProgressionChanged>, mut tracker: ResMut<Tracker>| {
            tracker.changes += 1;
        });
    app.update();
    app
}

fn fresh_catalog() -> Vec<AbilityDefinition> {
    vec![
        active("garlic"),
        active("santa_water"),
        passive("armor"),
        passive("wings"),
        passive("spinach"),
    ]
}

fn request_offer(app: &mut App, player_level: u32) -> Vec<String> {
    app.world_mut().trigger(RequestLevelUpOffer { player_level });
    app.update();
    app.world()
        .resource::<Tracker>()
        .offers
        .last()
        .cloned()
        .expect("an offer should have been presented")
}

#[test]
fn test_level_up_offers_three_distinct_abilities() {
    let mut app = test_app(fresh_catalog());
    app.insert_resource(AbilitySlots {
        active_capacity: 2,
        passive_capacity: 2,
    });

    let offer = request_offer(&mut app, 1);

    assert_eq!(offer.len(), 3);
    let mut unique = offer.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 3);

    let pending = app.world().resource::<PendingOffer>();
    assert_eq!(pending.0, offer);
}

#[test]
fn test_choosing_an_offer_grants_it() {
    let mut app = test_app(fresh_catalog());
    let offer = request_offer(&mut app, 1);
    let chosen = offer[0].clone();

    app.world_mut().trigger(ChooseOffer {
        ability_id: chosen.clone(),
    });
    app.update();

    let state = app.world().resource::<ProgressionState>();
    assert!(state.is_acquired(&chosen));
    assert_eq!(state.stored_level(&chosen), Some(0));

    let tracker = app.world().resource::<Tracker>();
    assert_eq!(tracker.instantiated, vec![(chosen, 0)]);
    assert_eq!(tracker.changes, 1);
    assert!(app.world().resource::<PendingOffer>().is_empty());
}

#[test]
fn test_choice_outside_the_offer_is_rejected() {
    let mut app = test_app(fresh_catalog());
    let offer = request_offer(&mut app, 1);

    let outsider = fresh_catalog()
        .into_iter()
        .map(|d| d.id)
        .find(|id| !offer.contains(id))
        .unwrap();

    app.world_mut().trigger(ChooseOffer {
        ability_id: outsider.clone(),
    });
    app.update();

    assert!(!app.world().resource::<ProgressionState>().is_acquired(&outsider));
    assert_eq!(app.world().resource::<Tracker>().changes, 0);
    // the offer is still open
    assert_eq!(app.world().resource::<PendingOffer>().0, offer);
}

#[test]
fn test_evolution_offer_consumes_prerequisites() {
    let mut app = test_app(vec![
        weapon("whip"),
        passive("hollow_heart"),
        evolution("bloody_tear", &[("whip", 7, true), ("hollow_heart", 0, true)]),
    ]);

    {
        let mut state = app.world_mut().resource_mut::<ProgressionState>();
        state.set_level("whip", 7);
        state.set_level("hollow_heart", 7);
    }

    // both prerequisites are maxed, the evolution is the only thing left
    let offer = request_offer(&mut app, 30);
    assert_eq!(offer, vec!["bloody_tear".to_string()]);

    app.world_mut().trigger(ChooseOffer {
        ability_id: "bloody_tear".to_string(),
    });
    app.update();

    let state = app.world().resource::<ProgressionState>();
    assert!(state.is_acquired("bloody_tear"));
    for consumed in ["whip", "hollow_heart"] {
        assert!(!state.is_acquired(consumed));
        assert!(state.is_removed(consumed));
    }

    let tracker = app.world().resource::<Tracker>();
    assert_eq!(tracker.torn_down, vec!["whip", "hollow_heart"]);
    assert_eq!(tracker.instantiated, vec![("bloody_tear".to_string(), 0)]);

    // the prerequisites are gone for good, so the evolution can't be offered again
    let offer = request_offer(&mut app, 31);
    assert!(offer.is_empty());
}

#[test]
fn test_starting_weapon_is_granted_directly() {
    let mut app = test_app(vec![weapon("whip"), passive("armor")]);

    let offer = request_offer(&mut app, 1);
    assert_eq!(offer, vec!["armor".to_string()]);

    app.world_mut().trigger(GrantAbility {
        ability_id: "whip".to_string(),
    });
    app.update();

    assert!(app.world().resource::<ProgressionState>().is_acquired("whip"));

    let mut offer = request_offer(&mut app, 2);
    offer.sort();
    assert_eq!(offer, vec!["armor".to_string(), "whip".to_string()]);
}

#[test]
fn test_chest_applies_rewards() {
    let mut app = test_app(fresh_catalog());

    app.world_mut().trigger(OpenChest {
        triple_chance: Some(1.0),
        quintuple_chance: Some(0.0),
    });
    app.update();

    let tracker = app.world().resource::<Tracker>();
    let (tier, rewards) = tracker.chests.last().cloned().unwrap();
    assert_eq!(tier, ChestTier::Triple);
    assert_eq!(rewards.len(), 3);
    assert_eq!(tracker.instantiated.len(), 3);
    assert_eq!(tracker.changes, 1);

    let state = app.world().resource::<ProgressionState>();
    for id in &rewards {
        assert!(state.is_acquired(id));
    }
}

#[test]
fn test_exhausted_chest_reports_nothing() {
    let mut app = test_app(vec![passive("armor")]);
    app.world_mut()
        .resource_mut::<ProgressionState>()
        .set_level("armor", 7);

    app.world_mut().trigger(OpenChest::default());
    app.update();

    let tracker = app.world().resource::<Tracker>();
    assert_eq!(tracker.chests, vec![(ChestTier::Single, Vec::new())]);
    assert_eq!(tracker.changes, 0);
}

#[test]
fn test_endgame_chest_keeps_giving() {
    let mut app = test_app(vec![
        passive("armor"),
        with_levels(endgame("gold_coin"), 1),
    ]);
    app.world_mut()
        .resource_mut::<ProgressionState>()
        .set_level("armor", 7);

    for _ in 0..3 {
        app.world_mut().trigger(OpenChest::default());
        app.update();
    }

    let tracker = app.world().resource::<Tracker>();
    let expected = (ChestTier::Single, vec!["gold_coin".to_string()]);
    assert_eq!(tracker.chests, vec![expected.clone(), expected.clone(), expected]);
    assert_eq!(tracker.changes, 3);
}

#[test]
fn test_single_level_evolution_is_offered() {
    let mut app = test_app(vec![
        weapon("whip"),
        passive("hollow_heart"),
        with_levels(
            evolution("bloody_tear", &[("whip", 7, true), ("hollow_heart", 0, true)]),
            1,
        ),
    ]);
    {
        let mut state = app.world_mut().resource_mut::<ProgressionState>();
        state.set_level("whip", 7);
        state.set_level("hollow_heart", 7);
    }

    let offer = request_offer(&mut app, 20);
    assert_eq!(offer, vec!["bloody_tear".to_string()]);
}

#[test]
fn test_character_locked_ability_is_hidden() {
    let mut locked = passive("laurel");
    locked.characters.push("pasqualina".to_string());
    let mut app = test_app(vec![locked, passive("armor")]);

    for level in 1..10 {
        let offer = request_offer(&mut app, level);
        assert_eq!(offer, vec!["armor".to_string()]);
    }

    app.insert_resource(CurrentCharacter(Some("pasqualina".to_string())));
    let mut offer = request_offer(&mut app, 10);
    offer.sort();
    assert_eq!(offer, vec!["armor".to_string(), "laurel".to_string()]);
}
