use super::traits::SalamanderTraits;
use serde::{Deserialize, Serialize};

/// Life phase of the player within one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifePhase {
    #[default]
    Egg,
    Larva,
    Juvenile,
    Adult,
}

impl LifePhase {
    /// The phase that follows this one inside a cycle. Adults only leave
    /// adulthood by breeding, so `Adult` has no successor.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            LifePhase::Egg => Some(LifePhase::Larva),
            LifePhase::Larva => Some(LifePhase::Juvenile),
            LifePhase::Juvenile => Some(LifePhase::Adult),
            LifePhase::Adult => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LifePhase::Egg => "egg",
            LifePhase::Larva => "larva",
            LifePhase::Juvenile => "juvenile",
            LifePhase::Adult => "adult",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Predator,
    Starvation,
    OldAge,
}

/// The player's body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalamanderState {
    pub traits: SalamanderTraits,

    pub x: f64,
    pub y: f64,
    pub target_x: Option<f64>,
    pub target_y: Option<f64>,
    pub rotation: f64,

    /// 0-100, the player starves at 0.
    pub hunger: f64,
    /// 0-100
    pub health: f64,

    /// Shake budget during the egg phase.
    pub egg_energy: f64,
    /// 0-100
    pub development_progress: f64,
    /// Progress within the current phase, driven by feeding.
    pub growth_progress: f64,

    pub is_dead: bool,
    pub death_cause: Option<DeathCause>,
}

impl SalamanderState {
    /// A healthy body at `(x, y)` carrying `traits`.
    #[must_use]
    pub fn spawn(traits: SalamanderTraits, x: f64, y: f64) -> Self {
        Self {
            traits,
            x,
            y,
            target_x: None,
            target_y: None,
            rotation: 0.0,
            hunger: 100.0,
            health: 100.0,
            egg_energy: 100.0,
            development_progress: 0.0,
            growth_progress: 0.0,
            is_dead: false,
            death_cause: None,
        }
    }
}

/// A clutch-mate of the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingState {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub is_alive: bool,
    pub traits: SalamanderTraits,
}
