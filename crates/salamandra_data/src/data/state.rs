use super::entity::{LifePhase, SalamanderState, SiblingState};
use super::environment::PondState;
use super::traits::SalamanderTraits;
use serde::{Deserialize, Serialize};

/// A social bond with another salamander.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub salamander_id: String,
    /// -10 to +10
    pub friendship_level: f64,
    pub last_interaction_cycle: u32,
    pub interaction_count: u32,
}

/// The complete snapshot of a playthrough.
///
/// This is both the unit of persistence and the value handed from one phase
/// to the next. Field names serialize in camelCase and form the save format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub current_phase: LifePhase,
    /// Unix milliseconds.
    pub phase_start_time: i64,

    pub player: SalamanderState,

    pub siblings: Vec<SiblingState>,
    pub siblings_survived: u32,
    pub can_respawn_as_sibling: bool,

    pub pond: PondState,

    pub relationships: Vec<Relationship>,

    pub difficulty_multiplier: f64,
    pub consecutive_deaths: u32,

    /// Milliseconds of simulated play.
    pub total_play_time: f64,
    pub cycles_completed: u32,

    /// Unix milliseconds.
    pub last_save_time: i64,
}

impl GameState {
    #[must_use]
    pub fn living_siblings(&self) -> usize {
        self.siblings.iter().filter(|s| s.is_alive).count()
    }
}

/// Record written when the player lays eggs in the cracks of a dried pond.
/// It outlives the main save and unlocks New Game+.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGamePlusRecord {
    pub unlocked: bool,
    pub last_traits: SalamanderTraits,
    pub cycle: u32,
    pub era: u32,
}
