//! # Salamandra Core
//!
//! The game engine behind Salamandra Cycles, a generational salamander life
//! simulation set in a pond that slowly dries up.
//!
//! This crate contains the deterministic game logic, including:
//! - Mendelian genetics with albinism, spontaneous mutations and camouflage
//! - Clutch, vegetation and predator generation for each pond
//! - The life cycle: phases, death, respawn, breeding and New Game+
//! - Tick-driven phase systems (egg shaking, feeding, clutch predation)
//! - Friendships between salamanders
//! - Metrics collection and structured logging
//!
//! Every random operation takes its random source as a parameter, so a
//! seeded `ChaCha8Rng` reproduces a whole playthrough.
//!
//! ## Example
//!
//! ```
//! use salamandra_core::config::AppConfig;
//! use salamandra_core::lifecycle::{complete_phase, create_initial_game_state};
//! use salamandra_data::LifePhase;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = AppConfig::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut state = create_initial_game_state(&config, &mut rng, 0);
//!
//! assert_eq!(state.living_siblings(), 8);
//! assert_eq!(complete_phase(&mut state, 1_000), Some(LifePhase::Larva));
//! ```

/// Configuration management for game balance
pub mod config;
/// Notifications returned to the host
pub mod events;
/// Trait generation, inheritance, mutation and camouflage
pub mod genetics;
/// Life cycle transitions (phases, death, breeding, New Game+)
pub mod lifecycle;
/// Session metrics and structured logging
pub mod metrics;
/// Siblings, plants, rocks and predator pressure
pub mod population;
/// Friendships between salamanders
pub mod social;
/// Per-phase gameplay systems
pub mod systems;

pub use config::AppConfig;
pub use events::GameEvent;
pub use metrics::{init_logging, Metrics};
pub use systems::PhaseRuntime;
