use salamandra_data::{DeathCause, LifePhase};
use serde::{Deserialize, Serialize};

/// Notification returned to the host by every gameplay call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum GameEvent {
    PhaseChanged {
        from: LifePhase,
        to: LifePhase,
    },
    /// The current phase has lasted its configured duration. Emitted once.
    PhaseTimerElapsed {
        phase: LifePhase,
    },
    GrowthMilestone {
        percent: f64,
    },
    PlayerDied {
        cause: DeathCause,
    },
    Respawned {
        sibling_id: String,
    },
    SiblingLost {
        sibling_id: String,
        remaining: u32,
    },
    PredatorRepelled,
    GameOver {
        cycle: u32,
        generation: u32,
    },
    CycleAdvanced {
        cycle: u32,
        pond_size: f64,
        generation: u32,
    },
    NewGamePlusUnlocked {
        cycle: u32,
        era: u32,
    },
    Saved {
        at: i64,
    },
}

impl GameEvent {
    /// One-line description for logs and the CLI.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            GameEvent::PhaseChanged { from, to } => {
                format!("{} -> {}", from.name(), to.name())
            }
            GameEvent::PhaseTimerElapsed { phase } => {
                format!("The {} phase is over", phase.name())
            }
            GameEvent::GrowthMilestone { percent } => format!("Growth spurt ({percent:.0}%)"),
            GameEvent::PlayerDied { cause } => match cause {
                DeathCause::Predator => "Eaten by a predator".to_string(),
                DeathCause::Starvation => "Starved".to_string(),
                DeathCause::OldAge => "Died of old age".to_string(),
            },
            GameEvent::Respawned { sibling_id } => format!("Life goes on as {sibling_id}"),
            GameEvent::SiblingLost {
                sibling_id,
                remaining,
            } => format!("{sibling_id} was taken, {remaining} left"),
            GameEvent::PredatorRepelled => "Predator repelled".to_string(),
            GameEvent::GameOver { cycle, generation } => {
                format!("Game over in cycle {cycle} (generation {generation})")
            }
            GameEvent::CycleAdvanced {
                cycle,
                pond_size,
                generation,
            } => format!("Cycle {cycle}: pond at {pond_size:.0}%, generation {generation}"),
            GameEvent::NewGamePlusUnlocked { cycle, era } => {
                format!("Eggs rest in the cracks (cycle {cycle}, era {era})")
            }
            GameEvent::Saved { at } => format!("Saved at {at}"),
        }
    }
}
