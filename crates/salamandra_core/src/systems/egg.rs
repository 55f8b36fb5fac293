use super::PhaseRuntime;
use crate::config::EggConfig;
use crate::events::GameEvent;
use salamandra_data::{GameState, LifePhase};

/// Result of the player trying to shake the egg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeOutcome {
    Shaken,
    /// Shaken while a predator was circling; it gives up.
    Repelled,
    CoolingDown,
    /// Not enough energy left.
    Exhausted,
    /// Only eggs can shake.
    Ignored,
}

/// Per-second energy bookkeeping. Energy holds still while a predator is
/// near.
pub(super) fn update_energy(
    state: &mut GameState,
    runtime: &PhaseRuntime,
    seconds: f64,
    config: &EggConfig,
) {
    if runtime.predator_nearby {
        return;
    }
    let player = &mut state.player;
    player.egg_energy -= config.energy_drain_rate * seconds;
    if player.egg_energy <= config.auto_shake_threshold {
        player.egg_energy = config.auto_shake_energy;
    }
    player.egg_energy = (player.egg_energy + config.energy_recharge_rate * seconds)
        .min(config.max_energy);
}

pub fn shake_egg(
    state: &mut GameState,
    runtime: &mut PhaseRuntime,
    config: &EggConfig,
) -> ShakeOutcome {
    if runtime.phase != LifePhase::Egg || state.player.is_dead {
        return ShakeOutcome::Ignored;
    }
    if let Some(last) = runtime.last_shake_ms {
        if runtime.elapsed_ms - last < config.shake_cooldown_ms {
            return ShakeOutcome::CoolingDown;
        }
    }
    if state.player.egg_energy < config.shake_energy_cost {
        return ShakeOutcome::Exhausted;
    }

    runtime.last_shake_ms = Some(runtime.elapsed_ms);
    state.player.egg_energy -= config.shake_energy_cost;

    if runtime.predator_nearby {
        runtime.predator_nearby = false;
        tracing::debug!(energy = state.player.egg_energy, "Predator repelled");
        ShakeOutcome::Repelled
    } else {
        ShakeOutcome::Shaken
    }
}

/// A predator starts circling the clutch. Returns `false` if one already
/// is, or if the player has hatched.
pub fn predator_approaches(runtime: &mut PhaseRuntime) -> bool {
    if runtime.phase != LifePhase::Egg || runtime.predator_nearby {
        return false;
    }
    runtime.predator_nearby = true;
    true
}

/// The circling predator eats the first living sibling, then leaves.
///
/// The clutch is never taken below `min_surviving_siblings`.
pub fn predator_strikes(
    state: &mut GameState,
    runtime: &mut PhaseRuntime,
    config: &EggConfig,
) -> Vec<GameEvent> {
    if !runtime.predator_nearby {
        return Vec::new();
    }
    runtime.predator_nearby = false;

    if state.living_siblings() <= config.min_surviving_siblings {
        return Vec::new();
    }
    let Some(sibling) = state.siblings.iter_mut().find(|s| s.is_alive) else {
        return Vec::new();
    };
    sibling.is_alive = false;
    state.siblings_survived = state.siblings_survived.saturating_sub(1);

    tracing::info!(
        sibling = %sibling.id,
        remaining = state.siblings_survived,
        "Sibling egg eaten"
    );
    vec![GameEvent::SiblingLost {
        sibling_id: sibling.id.clone(),
        remaining: state.siblings_survived,
    }]
}
