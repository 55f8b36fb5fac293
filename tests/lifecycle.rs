mod common;

use common::GameBuilder;
use salamandra_lib::model::genetics::generate_initial_traits;
use salamandra_lib::model::lifecycle::{
    create_new_game_plus_state, kill_player, lay_eggs_in_cracks, respawn_as_sibling,
    start_new_cycle,
};
use salamandra_lib::model::state::{DeathCause, LifePhase, Relationship, StatKey};

#[test]
fn test_fresh_game() {
    let (state, config, _) = GameBuilder::new().build();

    assert_eq!(state.current_phase, LifePhase::Egg);
    assert_eq!(state.siblings.len(), 8);
    assert_eq!(state.living_siblings(), 8);
    assert_eq!(state.siblings_survived, 8);
    assert!(state.can_respawn_as_sibling);
    assert_eq!(state.pond.size_percent, 100.0);
    assert_eq!(state.pond.cycle, 1);
    assert_eq!(state.pond.era, 1);
    assert_eq!(state.pond.plant_positions.len(), 15);
    assert!((5..=9).contains(&state.pond.rock_positions.len()));
    assert_eq!(state.pond.predator_density, 1.0);
    assert_eq!(state.pond.aerial_predator_bonus, 0.0);
    assert_eq!(state.player.x, config.pond.spawn_x);
    assert_eq!(state.player.y, config.pond.spawn_y);
    assert_eq!(state.player.hunger, 100.0);
    assert_eq!(state.player.health, 100.0);
    assert_eq!(state.player.egg_energy, 100.0);
    assert_eq!(state.player.traits.generation, 1);
    assert!(state.relationships.is_empty());
    assert_eq!(state.difficulty_multiplier, 1.0);
    assert_eq!(state.cycles_completed, 0);
}

#[test]
fn test_respawn_is_one_shot() {
    let (mut state, config, mut rng) = GameBuilder::new()
        .with_config(|c| c.genetics.brother_respawn_chance = 1.0)
        .in_phase(LifePhase::Larva)
        .build();
    state.player.hunger = 12.0;
    state.player.target_x = Some(10.0);
    state.player.target_y = Some(10.0);
    let former = state.player.traits.clone();

    kill_player(&mut state, DeathCause::Predator);
    let mut next = respawn_as_sibling(&state, &config, &mut rng).expect("respawn granted");

    assert!(!next.player.is_dead);
    assert_eq!(next.player.death_cause, None);
    assert_eq!(next.player.hunger, 100.0);
    assert_eq!(next.player.health, 100.0);
    assert_eq!(next.player.egg_energy, 100.0);
    assert_eq!(next.player.target_x, None);
    assert_eq!(next.player.traits.lineage_id, former.lineage_id);
    assert_eq!(next.player.traits.albinism_genotype, former.albinism_genotype);
    assert_eq!(next.siblings.len(), 7);
    assert_eq!(next.siblings_survived, 7);
    assert_eq!(next.living_siblings(), next.siblings_survived as usize);
    assert!(!next.can_respawn_as_sibling);
    assert!((next.difficulty_multiplier - 0.85).abs() < 1e-12);
    assert_eq!(next.consecutive_deaths, 1);
    assert_eq!(next.current_phase, LifePhase::Larva);

    let taken_over = state
        .siblings
        .iter()
        .find(|s| !next.siblings.iter().any(|n| n.id == s.id))
        .expect("one sibling removed");
    assert_eq!((next.player.x, next.player.y), (taken_over.x, taken_over.y));

    kill_player(&mut next, DeathCause::Predator);
    assert!(respawn_as_sibling(&next, &config, &mut rng).is_none());
}

#[test]
fn test_respawn_roll_can_fail() {
    let (mut state, config, mut rng) = GameBuilder::new()
        .with_config(|c| c.genetics.brother_respawn_chance = 0.0)
        .build();
    kill_player(&mut state, DeathCause::Predator);
    for _ in 0..100 {
        assert!(respawn_as_sibling(&state, &config, &mut rng).is_none());
    }
}

#[test]
fn test_respawn_needs_a_living_sibling() {
    let (mut state, config, mut rng) = GameBuilder::new()
        .with_config(|c| c.genetics.brother_respawn_chance = 1.0)
        .build();
    for sibling in &mut state.siblings {
        sibling.is_alive = false;
    }
    kill_player(&mut state, DeathCause::Predator);
    assert!(respawn_as_sibling(&state, &config, &mut rng).is_none());
}

#[test]
fn test_respawn_needs_a_dead_player() {
    let (state, config, mut rng) = GameBuilder::new()
        .with_config(|c| c.genetics.brother_respawn_chance = 1.0)
        .build();
    assert!(respawn_as_sibling(&state, &config, &mut rng).is_none());
}

#[test]
fn test_shrink_threshold() {
    let (state, config, mut rng) = GameBuilder::new().at_cycle(4).build();
    let partner = generate_initial_traits(&config.genetics, &mut rng);
    let next = start_new_cycle(&state, &partner, &[], &config, &mut rng, 0);
    assert_eq!(next.pond.cycle, 5);
    assert_eq!(next.pond.size_percent, 80.0);
    assert!((next.pond.predator_density - 1.2).abs() < 1e-12);
    assert_eq!(next.pond.aerial_predator_bonus, 1.5);

    let (state, config, mut rng) = GameBuilder::new().at_cycle(3).build();
    let next = start_new_cycle(&state, &partner, &[], &config, &mut rng, 0);
    assert_eq!(next.pond.cycle, 4);
    assert_eq!(next.pond.size_percent, 100.0);
}

#[test]
fn test_pond_never_dries_below_floor() {
    let (mut state, config, mut rng) = GameBuilder::new().build();
    let era = state.pond.era;
    let mut previous_size = state.pond.size_percent;

    for _ in 0..60 {
        let partner = generate_initial_traits(&config.genetics, &mut rng);
        state = start_new_cycle(&state, &partner, &[StatKey::Size], &config, &mut rng, 0);
        assert!(state.pond.size_percent >= config.pond.min_size);
        assert!(state.pond.size_percent <= previous_size);
        assert_eq!(state.pond.era, era);
        previous_size = state.pond.size_percent;
    }
    assert_eq!(state.pond.cycle, 61);
    assert_eq!(state.pond.size_percent, 5.0);
    assert_eq!(state.cycles_completed, 60);
}

#[test]
fn test_layout_only_changes_on_boundaries() {
    let (state, config, mut rng) = GameBuilder::new().at_cycle(3).build();
    let partner = generate_initial_traits(&config.genetics, &mut rng);
    let kept = start_new_cycle(&state, &partner, &[], &config, &mut rng, 0);
    assert_eq!(kept.pond.plant_positions, state.pond.plant_positions);
    assert_eq!(kept.pond.rock_positions, state.pond.rock_positions);

    let (state, config, mut rng) = GameBuilder::new().at_cycle(5).build();
    let regenerated = start_new_cycle(&state, &partner, &[], &config, &mut rng, 0);
    assert_eq!(regenerated.pond.cycle, 6);
    assert_ne!(regenerated.pond.plant_positions, state.pond.plant_positions);
}

#[test]
fn test_cycle_carries_progress_forward() {
    let (mut state, config, mut rng) = GameBuilder::new().in_phase(LifePhase::Adult).build();
    state.difficulty_multiplier = 0.85;
    state.total_play_time = 1_500_000.0;
    state.consecutive_deaths = 1;
    state.cycles_completed = 7;
    state.relationships = vec![
        Relationship {
            salamander_id: "friend".to_string(),
            friendship_level: 9.0,
            last_interaction_cycle: 1,
            interaction_count: 9,
        },
        Relationship {
            salamander_id: "acquaintance".to_string(),
            friendship_level: 4.0,
            last_interaction_cycle: 1,
            interaction_count: 4,
        },
    ];

    let partner = generate_initial_traits(&config.genetics, &mut rng);
    let next = start_new_cycle(&state, &partner, &[], &config, &mut rng, 99);

    assert_eq!(next.current_phase, LifePhase::Egg);
    assert_eq!(next.phase_start_time, 99);
    assert_eq!(next.difficulty_multiplier, 0.85);
    assert_eq!(next.total_play_time, 1_500_000.0);
    assert_eq!(next.consecutive_deaths, 0);
    assert_eq!(next.cycles_completed, 8);
    assert_eq!(next.relationships.len(), 1);
    assert_eq!(next.relationships[0].friendship_level, 4.5);
    assert_eq!(next.living_siblings(), 8);
    assert!(next.can_respawn_as_sibling);
    assert_eq!(next.player.traits.generation, 2);
    assert_eq!(next.player.traits.lineage_id, state.player.traits.lineage_id);
}

#[test]
fn test_new_game_plus_starts_a_new_era() {
    let (state, config, mut rng) = GameBuilder::new()
        .in_phase(LifePhase::Adult)
        .at_cycle(25)
        .with_pond_size(5.0)
        .build();
    let record = lay_eggs_in_cracks(&state, &config.pond).expect("pond is cracked");
    assert_eq!(record.cycle, 25);
    assert_eq!(record.era, 1);

    let next = create_new_game_plus_state(&record, &config, &mut rng, 0);
    assert_eq!(next.pond.size_percent, 100.0);
    assert_eq!(next.pond.cycle, 25);
    assert_eq!(next.pond.era, 2);
    assert_eq!(next.pond.plant_positions.len(), 15);
    assert_eq!(next.current_phase, LifePhase::Egg);
    assert_eq!(
        next.player.traits.generation,
        state.player.traits.generation + 1
    );
    assert_eq!(next.player.traits.lineage_id, state.player.traits.lineage_id);
}

#[test]
fn test_dead_adult_cannot_lay_eggs() {
    let (mut state, config, _) = GameBuilder::new()
        .in_phase(LifePhase::Adult)
        .with_pond_size(10.0)
        .build();
    kill_player(&mut state, DeathCause::OldAge);
    assert!(lay_eggs_in_cracks(&state, &config.pond).is_none());
}
