use super::PhaseRuntime;
use crate::config::{FoodValues, HungerConfig};
use crate::events::GameEvent;
use crate::lifecycle::kill_player;
use salamandra_data::{DeathCause, GameState, LifePhase};

const MAX_GROWTH: f64 = 100.0;

/// Prey, from the smallest to the largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Microorganism,
    SmallInsect,
    LargeInsect,
    SmallFish,
}

impl FoodKind {
    #[must_use]
    pub fn value(self, values: &FoodValues) -> f64 {
        match self {
            FoodKind::Microorganism => values.microorganism,
            FoodKind::SmallInsect => values.small_insect,
            FoodKind::LargeInsect => values.large_insect,
            FoodKind::SmallFish => values.small_fish,
        }
    }

    /// The largest prey a salamander in `phase` can swallow.
    #[must_use]
    pub fn typical_for(phase: LifePhase) -> Self {
        match phase {
            LifePhase::Egg | LifePhase::Larva => FoodKind::Microorganism,
            LifePhase::Juvenile => FoodKind::SmallInsect,
            LifePhase::Adult => FoodKind::LargeInsect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HungerLevel {
    Fed,
    Hungry,
    Critical,
}

#[must_use]
pub fn hunger_level(hunger: f64, config: &HungerConfig) -> HungerLevel {
    if hunger <= config.critical_threshold {
        HungerLevel::Critical
    } else if hunger <= config.warning_threshold {
        HungerLevel::Hungry
    } else {
        HungerLevel::Fed
    }
}

/// Drains hunger for `seconds` of `phase`. A critically hungry salamander
/// also loses health. Returns the cause if this killed the player.
pub(super) fn drain_hunger(
    state: &mut GameState,
    phase: LifePhase,
    seconds: f64,
    config: &HungerConfig,
) -> Option<DeathCause> {
    let player = &mut state.player;
    player.hunger = (player.hunger - config.drain_for(phase) * seconds).max(0.0);
    if hunger_level(player.hunger, config) == HungerLevel::Critical {
        player.health = (player.health - config.starvation_damage * seconds).max(0.0);
    }

    if player.hunger <= 0.0 || player.health <= 0.0 {
        kill_player(state, DeathCause::Starvation).then_some(DeathCause::Starvation)
    } else {
        None
    }
}

/// The player eats `food`. Growth milestones crossed by this meal are
/// announced in order.
pub fn consume_food(
    state: &mut GameState,
    runtime: &mut PhaseRuntime,
    food: FoodKind,
    config: &HungerConfig,
) -> Vec<GameEvent> {
    if state.player.is_dead || runtime.phase == LifePhase::Egg {
        return Vec::new();
    }

    let value = food.value(&config.food_values);
    let player = &mut state.player;
    player.hunger = (player.hunger + value).min(config.max_hunger);
    player.growth_progress = (player.growth_progress + value / 10.0).min(MAX_GROWTH);

    let mut events = Vec::new();
    while let Some(&milestone) = config.growth_milestones.get(runtime.milestones_reached) {
        if player.growth_progress < milestone {
            break;
        }
        runtime.milestones_reached += 1;
        tracing::debug!(milestone, "Growth milestone");
        events.push(GameEvent::GrowthMilestone { percent: milestone });
    }
    events
}

/// Contact with a predator outside the egg is always fatal.
pub fn report_predator_contact(state: &mut GameState) -> Vec<GameEvent> {
    if kill_player(state, DeathCause::Predator) {
        vec![GameEvent::PlayerDied {
            cause: DeathCause::Predator,
        }]
    } else {
        Vec::new()
    }
}
