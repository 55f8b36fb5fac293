//! Tick-driven gameplay inside a single life phase.
//!
//! Systems operate on the persisted [`GameState`] plus a [`PhaseRuntime`]
//! that only lives as long as the current phase. Transitions throw the
//! runtime away, so nothing scheduled in one phase can touch the next.

/// Egg energy, shaking and clutch predation
pub mod egg;
/// Hunger, food and growth
pub mod feeding;

use crate::config::AppConfig;
use crate::events::GameEvent;
use salamandra_data::{GameState, LifePhase};

/// Transient per-phase bookkeeping. Never saved.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseRuntime {
    pub phase: LifePhase,
    /// Milliseconds spent in this phase.
    pub elapsed_ms: f64,
    pub last_shake_ms: Option<f64>,
    pub predator_nearby: bool,
    /// Number of growth milestones already announced.
    pub milestones_reached: usize,
    pub timer_elapsed: bool,
}

impl PhaseRuntime {
    #[must_use]
    pub fn new(phase: LifePhase) -> Self {
        Self {
            phase,
            elapsed_ms: 0.0,
            last_shake_ms: None,
            predator_nearby: false,
            milestones_reached: 0,
            timer_elapsed: false,
        }
    }

    /// Runtime for a state that is already mid-phase, e.g. after loading a
    /// save.
    #[must_use]
    pub fn resume(state: &GameState, config: &AppConfig) -> Self {
        let mut runtime = Self::new(state.current_phase);
        runtime.milestones_reached = config
            .hunger
            .growth_milestones
            .iter()
            .take_while(|m| state.player.growth_progress >= **m)
            .count();
        runtime
    }
}

/// Advances the simulation by `delta_ms`.
pub fn tick(
    state: &mut GameState,
    runtime: &mut PhaseRuntime,
    delta_ms: f64,
    config: &AppConfig,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.player.is_dead || delta_ms <= 0.0 {
        return events;
    }

    state.total_play_time += delta_ms;
    runtime.elapsed_ms += delta_ms;
    let seconds = delta_ms / 1000.0;
    let duration_ms = config.phase_duration_ms(runtime.phase);

    match runtime.phase {
        LifePhase::Egg => {
            egg::update_energy(state, runtime, seconds, &config.egg);
            state.player.development_progress =
                (runtime.elapsed_ms / duration_ms * 100.0).min(100.0);
        }
        phase => {
            if let Some(cause) = feeding::drain_hunger(state, phase, seconds, &config.hunger) {
                events.push(GameEvent::PlayerDied { cause });
                return events;
            }
        }
    }

    if !runtime.timer_elapsed && runtime.elapsed_ms >= duration_ms {
        runtime.timer_elapsed = true;
        tracing::debug!(phase = runtime.phase.name(), "Phase timer elapsed");
        events.push(GameEvent::PhaseTimerElapsed {
            phase: runtime.phase,
        });
    }

    events
}

/// Points the player towards `(x, y)`.
pub fn set_target(state: &mut GameState, x: f64, y: f64) {
    let player = &mut state.player;
    player.target_x = Some(x);
    player.target_y = Some(y);
    player.rotation = (y - player.y).atan2(x - player.x);
}

pub fn clear_target(state: &mut GameState) {
    state.player.target_x = None;
    state.player.target_y = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{complete_phase, create_initial_game_state};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use salamandra_data::DeathCause;

    fn larva() -> (GameState, PhaseRuntime) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut state = create_initial_game_state(&AppConfig::default(), &mut rng, 0);
        complete_phase(&mut state, 0);
        (state, PhaseRuntime::new(LifePhase::Larva))
    }

    #[test]
    fn test_timer_elapses_once() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = create_initial_game_state(&config, &mut rng, 0);
        let mut runtime = PhaseRuntime::new(LifePhase::Egg);
        let egg_ms = config.phase_duration_ms(LifePhase::Egg);

        let mut elapsed = 0;
        for _ in 0..((egg_ms / 1000.0) as usize + 10) {
            elapsed += tick(&mut state, &mut runtime, 1000.0, &config)
                .iter()
                .filter(|e| matches!(e, GameEvent::PhaseTimerElapsed { .. }))
                .count();
        }
        assert_eq!(elapsed, 1);
        assert_eq!(state.player.development_progress, 100.0);
        assert!(state.total_play_time > egg_ms);
    }

    #[test]
    fn test_starvation_via_tick() {
        let config = AppConfig::default();
        let (mut state, mut runtime) = larva();
        state.player.hunger = 3.0;

        let events = tick(&mut state, &mut runtime, 1000.0, &config);
        assert!(events.is_empty());
        assert_eq!(state.player.hunger, 1.5);

        let events = tick(&mut state, &mut runtime, 1000.0, &config);
        assert_eq!(
            events,
            vec![GameEvent::PlayerDied {
                cause: DeathCause::Starvation
            }]
        );
        assert!(state.player.is_dead);

        // Dead players do not tick.
        let before = state.total_play_time;
        assert!(tick(&mut state, &mut runtime, 1000.0, &config).is_empty());
        assert_eq!(state.total_play_time, before);
    }

    #[test]
    fn test_resume_skips_announced_milestones() {
        let config = AppConfig::default();
        let (mut state, _) = larva();
        state.player.growth_progress = 55.0;
        let runtime = PhaseRuntime::resume(&state, &config);
        assert_eq!(runtime.milestones_reached, 2);
        assert_eq!(runtime.phase, LifePhase::Larva);
    }

    #[test]
    fn test_target_sets_heading() {
        let (mut state, _) = larva();
        let (x, y) = (state.player.x, state.player.y);
        set_target(&mut state, x, y + 10.0);
        assert_eq!(state.player.target_y, Some(y + 10.0));
        assert!((state.player.rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        clear_target(&mut state);
        assert!(state.player.target_x.is_none());
    }
}
