//! Game state transitions: a fresh game, the phase chain, death and
//! respawn, breeding into the next cycle, and New Game+.
//!
//! Every transition that rebuilds the world returns a new [`GameState`]
//! instead of patching the old one, so a half-applied transition is never
//! observable.

use crate::config::{AppConfig, PondConfig};
use crate::genetics::{generate_initial_traits, generate_sibling_traits, inherit_traits};
use crate::population::{
    calculate_aerial_bonus, calculate_predator_density, generate_initial_siblings,
    generate_plant_positions, generate_rock_positions, should_regenerate_layout,
};
use crate::social::prune_relationships;
use rand::Rng;
use salamandra_data::{
    DeathCause, GameState, LifePhase, NewGamePlusRecord, PondState, SalamanderState,
    SalamanderTraits, StatKey,
};

fn fresh_pond<R: Rng + ?Sized>(
    size_percent: f64,
    cycle: u32,
    era: u32,
    config: &AppConfig,
    rng: &mut R,
) -> PondState {
    PondState {
        size_percent,
        cycle,
        era,
        plant_positions: generate_plant_positions(size_percent, &config.pond, rng),
        rock_positions: generate_rock_positions(&config.pond, rng),
        predator_density: calculate_predator_density(size_percent),
        aerial_predator_bonus: calculate_aerial_bonus(size_percent, &config.predators),
    }
}

/// A new clutch in `pond`: the player hatches at the spawn point with full
/// vitals and a complete set of siblings.
fn hatch<R: Rng + ?Sized>(
    traits: SalamanderTraits,
    pond: PondState,
    config: &AppConfig,
    rng: &mut R,
    now: i64,
) -> GameState {
    let siblings = generate_initial_siblings(&traits, config, rng);
    let siblings_survived = siblings.len() as u32;

    GameState {
        current_phase: LifePhase::Egg,
        phase_start_time: now,
        player: SalamanderState::spawn(traits, config.pond.spawn_x, config.pond.spawn_y),
        siblings,
        siblings_survived,
        can_respawn_as_sibling: true,
        pond,
        relationships: Vec::new(),
        difficulty_multiplier: 1.0,
        consecutive_deaths: 0,
        total_play_time: 0.0,
        cycles_completed: 0,
        last_save_time: now,
    }
}

/// The very first egg of a new lineage.
pub fn create_initial_game_state<R: Rng + ?Sized>(
    config: &AppConfig,
    rng: &mut R,
    now: i64,
) -> GameState {
    let traits = generate_initial_traits(&config.genetics, rng);
    let pond = fresh_pond(config.pond.initial_size, 1, 1, config, rng);
    let state = hatch(traits, pond, config, rng, now);
    tracing::info!(lineage = %state.player.traits.lineage_id, "New lineage started");
    state
}

/// Moves the player into the next life phase and returns it.
///
/// Returns `None` for an adult: breeding is the only way out of adulthood.
pub fn complete_phase(state: &mut GameState, now: i64) -> Option<LifePhase> {
    let next = state.current_phase.next()?;
    tracing::info!(from = state.current_phase.name(), to = next.name(), "Phase complete");
    state.current_phase = next;
    state.phase_start_time = now;
    state.player.growth_progress = 0.0;
    Some(next)
}

/// Marks the player dead. Returns `false` if it already was.
pub fn kill_player(state: &mut GameState, cause: DeathCause) -> bool {
    if state.player.is_dead {
        return false;
    }
    state.player.is_dead = true;
    state.player.death_cause = Some(cause);
    tracing::info!(
        ?cause,
        phase = state.current_phase.name(),
        cycle = state.pond.cycle,
        "Player died"
    );
    true
}

/// Tries to carry on in the body of a surviving clutch-mate.
///
/// Only a predator death qualifies, only once per cycle, and only when the
/// roll succeeds and someone is left alive to take over. The returned state
/// has the chosen sibling removed from the roster.
pub fn respawn_as_sibling<R: Rng + ?Sized>(
    state: &GameState,
    config: &AppConfig,
    rng: &mut R,
) -> Option<GameState> {
    if !state.can_respawn_as_sibling
        || !state.player.is_dead
        || state.player.death_cause != Some(DeathCause::Predator)
    {
        return None;
    }

    let living: Vec<usize> = state
        .siblings
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_alive)
        .map(|(i, _)| i)
        .collect();
    if living.is_empty() {
        tracing::debug!("No sibling left to respawn as");
        return None;
    }

    if rng.gen::<f64>() >= config.genetics.brother_respawn_chance {
        tracing::debug!("Respawn roll failed");
        return None;
    }

    let chosen = living[rng.gen_range(0..living.len())];
    let mut next = state.clone();
    let sibling = next.siblings.remove(chosen);
    let traits = generate_sibling_traits(&state.player.traits, &config.genetics, rng);

    next.player = SalamanderState {
        rotation: state.player.rotation,
        development_progress: state.player.development_progress,
        growth_progress: state.player.growth_progress,
        ..SalamanderState::spawn(traits, sibling.x, sibling.y)
    };
    next.siblings_survived = next.siblings_survived.saturating_sub(1);
    next.can_respawn_as_sibling = false;
    next.difficulty_multiplier *= 1.0 - config.predators.death_difficulty_reduction;
    next.consecutive_deaths += 1;

    tracing::info!(
        sibling = %sibling.id,
        difficulty = next.difficulty_multiplier,
        "Respawned as sibling"
    );
    Some(next)
}

/// Pond size for `new_cycle`: drier every `shrink_per_cycles` cycles, never
/// below the floor.
#[must_use]
pub fn next_pond_size(current: f64, new_cycle: u32, config: &PondConfig) -> f64 {
    if new_cycle % config.shrink_per_cycles.max(1) == 0 {
        (current - config.shrink_amount).max(config.min_size)
    } else {
        current
    }
}

/// Breeds the adult player with `partner_traits` and lays the next
/// generation's egg.
pub fn start_new_cycle<R: Rng + ?Sized>(
    previous: &GameState,
    partner_traits: &SalamanderTraits,
    favored: &[StatKey],
    config: &AppConfig,
    rng: &mut R,
    now: i64,
) -> GameState {
    let child = inherit_traits(
        &previous.player.traits,
        partner_traits,
        favored,
        &config.genetics,
        rng,
    );

    let new_cycle = previous.pond.cycle + 1;
    let size_percent = next_pond_size(previous.pond.size_percent, new_cycle, &config.pond);
    let pond = if should_regenerate_layout(new_cycle, &config.pond) {
        fresh_pond(size_percent, new_cycle, previous.pond.era, config, rng)
    } else {
        PondState {
            size_percent,
            cycle: new_cycle,
            predator_density: calculate_predator_density(size_percent),
            aerial_predator_bonus: calculate_aerial_bonus(size_percent, &config.predators),
            ..previous.pond.clone()
        }
    };

    let mut state = hatch(child, pond, config, rng, now);
    state.relationships = prune_relationships(
        &previous.relationships,
        previous.pond.cycle,
        &config.friendship,
    );
    state.difficulty_multiplier = previous.difficulty_multiplier;
    state.total_play_time = previous.total_play_time;
    state.cycles_completed = previous.cycles_completed + 1;

    tracing::info!(
        cycle = new_cycle,
        pond = size_percent,
        generation = state.player.traits.generation,
        albino = state.player.traits.is_albino(),
        "New cycle"
    );
    state
}

#[must_use]
pub fn is_pond_cracked(pond: &PondState, config: &PondConfig) -> bool {
    pond.size_percent <= config.cracks_appear_at
}

/// An adult in a cracked pond can leave eggs in the damp mud. The returned
/// record unlocks New Game+ once persisted.
#[must_use]
pub fn lay_eggs_in_cracks(state: &GameState, config: &PondConfig) -> Option<NewGamePlusRecord> {
    if !is_pond_cracked(&state.pond, config)
        || state.current_phase != LifePhase::Adult
        || state.player.is_dead
    {
        return None;
    }
    tracing::info!(
        cycle = state.pond.cycle,
        era = state.pond.era,
        "Eggs laid in the cracks"
    );
    Some(NewGamePlusRecord {
        unlocked: true,
        last_traits: state.player.traits.clone(),
        cycle: state.pond.cycle,
        era: state.pond.era,
    })
}

/// The pond refills: a new era starts from the eggs left in the cracks.
pub fn create_new_game_plus_state<R: Rng + ?Sized>(
    record: &NewGamePlusRecord,
    config: &AppConfig,
    rng: &mut R,
    now: i64,
) -> GameState {
    let mut traits = generate_sibling_traits(&record.last_traits, &config.genetics, rng);
    traits.generation = record.last_traits.generation + 1;

    let pond = fresh_pond(
        config.pond.initial_size,
        record.cycle,
        record.era + 1,
        config,
        rng,
    );
    let state = hatch(traits, pond, config, rng, now);
    tracing::info!(cycle = record.cycle, era = record.era + 1, "New Game+ started");
    state
}
