//! Pond contents: the clutch of siblings, plants, rocks and predator
//! pressure.

use crate::config::{AppConfig, PondConfig, PredatorConfig};
use crate::genetics::generate_sibling_traits;
use rand::Rng;
use salamandra_data::{PlantPosition, PlantType, RockPosition, SalamanderTraits, SiblingState};
use std::f64::consts::TAU;
use uuid::Uuid;

const SIBLING_MIN_DISTANCE: f64 = 30.0;
const SIBLING_DISTANCE_SPREAD: f64 = 20.0;

/// Lays the player's clutch-mates in a ring around the spawn point.
pub fn generate_initial_siblings<R: Rng + ?Sized>(
    player_traits: &SalamanderTraits,
    config: &AppConfig,
    rng: &mut R,
) -> Vec<SiblingState> {
    let count = config.egg.initial_siblings;
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            let distance = SIBLING_MIN_DISTANCE + rng.gen::<f64>() * SIBLING_DISTANCE_SPREAD;
            let traits = generate_sibling_traits(player_traits, &config.genetics, rng);
            SiblingState {
                id: format!("sibling_{i}_{}", Uuid::from_u128(rng.gen::<u128>()).simple()),
                x: config.pond.spawn_x + angle.cos() * distance,
                y: config.pond.spawn_y + angle.sin() * distance,
                is_alive: true,
                traits,
            }
        })
        .collect()
}

/// Vegetation scales with the amount of water left.
pub fn generate_plant_positions<R: Rng + ?Sized>(
    pond_size_percent: f64,
    config: &PondConfig,
    rng: &mut R,
) -> Vec<PlantPosition> {
    let count = (config.plant_base_count * config.plant_density * pond_size_percent / 100.0)
        .floor()
        .max(0.0) as usize;

    (0..count)
        .map(|_| PlantPosition {
            x: rng.gen::<f64>() * config.width,
            y: rng.gen::<f64>() * config.height,
            kind: PlantType::ALL[rng.gen_range(0..PlantType::ALL.len())],
        })
        .collect()
}

pub fn generate_rock_positions<R: Rng + ?Sized>(
    config: &PondConfig,
    rng: &mut R,
) -> Vec<RockPosition> {
    let extra = if config.rock_extra > 0 {
        rng.gen_range(0..config.rock_extra)
    } else {
        0
    };
    (0..config.rock_min + extra)
        .map(|_| RockPosition {
            x: rng.gen::<f64>() * config.width,
            y: rng.gen::<f64>() * config.height,
        })
        .collect()
}

#[must_use]
pub fn should_regenerate_layout(cycle: u32, config: &PondConfig) -> bool {
    cycle % config.layout_change_frequency.max(1) == 0
}

/// Less water, more predators: 1.0 at a full pond, 2.0 at a dry one.
#[must_use]
pub fn calculate_predator_density(pond_size_percent: f64) -> f64 {
    1.0 + (100.0 - pond_size_percent) / 100.0
}

/// Birds show up once a fifth of the pond is gone, more with every fifth.
#[must_use]
pub fn calculate_aerial_bonus(pond_size_percent: f64, config: &PredatorConfig) -> f64 {
    ((100.0 - pond_size_percent) / 20.0).floor() * config.bird_frequency_multiplier
}
