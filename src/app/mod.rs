//! The host-facing game session.
//!
//! A [`Session`] owns the current [`GameState`], the runtime of the phase
//! being played, the random source and the save gateway. Hosts drive it
//! with one call per frame or input and receive [`GameEvent`]s back.

pub mod autoplay;

use crate::model::config::AppConfig;
use crate::model::genetics::generate_initial_traits;
use crate::model::lifecycle::{
    self, create_initial_game_state, create_new_game_plus_state, respawn_as_sibling,
    start_new_cycle,
};
use crate::model::persistence::{KeyValueStore, SaveGateway};
use crate::model::social::{disposition, record_interaction, Disposition, InteractionKind};
use crate::model::state::{GameState, LifePhase, SalamanderTraits, StatKey};
use crate::model::systems::{self, FoodKind, ShakeOutcome};
use crate::model::{GameEvent, PhaseRuntime};
use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use salamandra_core::Metrics;

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// One player's game: the live aggregate plus everything needed to advance
/// and persist it.
///
/// Once the player is dead and no sibling took over, the session is frozen:
/// gameplay calls return no events and nothing is saved until `new_game`,
/// `continue_game` or `new_game_plus` starts another run.
pub struct Session<S: KeyValueStore> {
    state: GameState,
    runtime: PhaseRuntime,
    config: AppConfig,
    rng: ChaCha8Rng,
    gateway: SaveGateway<S>,
    metrics: Metrics,
}

impl<S: KeyValueStore> Session<S> {
    /// Starts a brand new lineage. Nothing is written until the first save.
    pub fn new(config: AppConfig, store: S, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = create_initial_game_state(&config, &mut rng, now_ms());
        tracing::info!(seed, config = %config.fingerprint(), "Session started");
        Self {
            runtime: PhaseRuntime::new(state.current_phase),
            state,
            config,
            rng,
            gateway: SaveGateway::new(store),
            metrics: Metrics::new(),
        }
    }

    /// Snapshot of every entity, for rendering.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Timers and flags of the phase being played.
    pub fn runtime(&self) -> &PhaseRuntime {
        &self.runtime
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn gateway(&self) -> &SaveGateway<S> {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut SaveGateway<S> {
        &mut self.gateway
    }

    /// The player is dead and no sibling took over.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.player.is_dead
    }

    fn enter(&mut self, state: GameState) {
        self.runtime = PhaseRuntime::resume(&state, &self.config);
        self.state = state;
    }

    /// Throws the current game away, including its save, and starts a new
    /// lineage.
    pub fn new_game(&mut self) {
        self.gateway.delete_save();
        let state = create_initial_game_state(&self.config, &mut self.rng, now_ms());
        self.enter(state);
    }

    /// Resumes the saved game. Returns `false` if there is none.
    pub fn continue_game(&mut self) -> bool {
        match self.gateway.load_game() {
            Some(state) => {
                tracing::info!(
                    cycle = state.pond.cycle,
                    phase = state.current_phase.name(),
                    "Continuing saved game"
                );
                self.enter(state);
                true
            }
            None => false,
        }
    }

    /// Starts a new era from the eggs left in the cracks. Returns `false` if
    /// New Game+ is still locked.
    pub fn new_game_plus(&mut self) -> bool {
        let Some(record) = self.gateway.load_new_game_plus().filter(|r| r.unlocked) else {
            return false;
        };
        let state = create_new_game_plus_state(&record, &self.config, &mut self.rng, now_ms());
        self.enter(state);
        self.save();
        true
    }

    /// Advances the current phase by `delta_ms` of play.
    pub fn tick(&mut self, delta_ms: f64) -> Vec<GameEvent> {
        self.metrics
            .record_tick(delta_ms, self.state.current_phase.name());
        let events = systems::tick(&mut self.state, &mut self.runtime, delta_ms, &self.config);
        self.finish(events)
    }

    /// The player caught `food`. Eggs cannot eat.
    pub fn eat(&mut self, food: FoodKind) -> Vec<GameEvent> {
        let events =
            systems::consume_food(&mut self.state, &mut self.runtime, food, &self.config.hunger);
        self.finish(events)
    }

    /// A predator caught the player.
    pub fn predator_contact(&mut self) -> Vec<GameEvent> {
        let events = systems::report_predator_contact(&mut self.state);
        self.finish(events)
    }

    /// The player shakes the egg, repelling a circling predator if there is
    /// enough energy.
    pub fn shake(&mut self) -> ShakeOutcome {
        let outcome = systems::shake_egg(&mut self.state, &mut self.runtime, &self.config.egg);
        if outcome == ShakeOutcome::Repelled {
            self.finish(vec![GameEvent::PredatorRepelled]);
        }
        outcome
    }

    /// A predator starts circling the clutch. The host should give the
    /// player a chance to [`shake`](Self::shake) before calling
    /// [`predator_strikes`](Self::predator_strikes).
    pub fn predator_approaches(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        systems::predator_approaches(&mut self.runtime)
    }

    /// The circling predator was not repelled in time.
    pub fn predator_strikes(&mut self) -> Vec<GameEvent> {
        let events =
            systems::predator_strikes(&mut self.state, &mut self.runtime, &self.config.egg);
        self.finish(events)
    }

    /// Movement intent towards a point in the pond.
    pub fn set_target(&mut self, x: f64, y: f64) {
        if !self.is_game_over() {
            systems::set_target(&mut self.state, x, y);
        }
    }

    pub fn clear_target(&mut self) {
        if !self.is_game_over() {
            systems::clear_target(&mut self.state);
        }
    }

    /// Moves to the next life phase and saves. Adults must breed instead.
    pub fn complete_phase(&mut self) -> Vec<GameEvent> {
        if self.state.player.is_dead {
            return Vec::new();
        }
        let from = self.state.current_phase;
        let Some(to) = lifecycle::complete_phase(&mut self.state, now_ms()) else {
            return Vec::new();
        };
        self.runtime = PhaseRuntime::new(to);

        let mut events = vec![GameEvent::PhaseChanged { from, to }];
        events.extend(self.save());
        self.finish(events)
    }

    /// A wild salamander to breed with.
    pub fn wild_partner(&mut self) -> SalamanderTraits {
        generate_initial_traits(&self.config.genetics, &mut self.rng)
    }

    /// Breeds the adult player and starts the next cycle.
    pub fn breed(&mut self, partner: &SalamanderTraits, favored: &[StatKey]) -> Vec<GameEvent> {
        if self.state.player.is_dead || self.state.current_phase != LifePhase::Adult {
            return Vec::new();
        }
        let next = start_new_cycle(
            &self.state,
            partner,
            favored,
            &self.config,
            &mut self.rng,
            now_ms(),
        );
        self.enter(next);

        let mut events = vec![
            GameEvent::CycleAdvanced {
                cycle: self.state.pond.cycle,
                pond_size: self.state.pond.size_percent,
                generation: self.state.player.traits.generation,
            },
            GameEvent::PhaseChanged {
                from: LifePhase::Adult,
                to: LifePhase::Egg,
            },
        ];
        events.extend(self.save());
        self.finish(events)
    }

    /// Leaves eggs in a cracked pond, unlocking New Game+.
    pub fn lay_eggs_in_cracks(&mut self) -> Vec<GameEvent> {
        let Some(record) = lifecycle::lay_eggs_in_cracks(&self.state, &self.config.pond) else {
            return Vec::new();
        };
        if !self.gateway.unlock_new_game_plus(&record) {
            return Vec::new();
        }
        self.finish(vec![GameEvent::NewGamePlusUnlocked {
            cycle: record.cycle,
            era: record.era,
        }])
    }

    /// Writes the current game to the save slot. A finished game is never
    /// saved.
    pub fn save(&mut self) -> Vec<GameEvent> {
        if self.is_game_over() {
            return Vec::new();
        }
        let now = now_ms();
        if self.gateway.save_game(&mut self.state, now) {
            vec![GameEvent::Saved { at: now }]
        } else {
            Vec::new()
        }
    }

    /// Records a friendly or hostile encounter with another salamander and
    /// returns how it now feels about the player.
    pub fn interact(&mut self, other_id: &str, kind: InteractionKind) -> Disposition {
        if self.is_game_over() {
            return Disposition::Neutral;
        }
        let relationship =
            record_interaction(&mut self.state, other_id, kind, &self.config.friendship);
        disposition(relationship, &self.config.friendship)
    }

    /// Resolves any death among `events` and updates the metrics.
    fn finish(&mut self, mut events: Vec<GameEvent>) -> Vec<GameEvent> {
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerDied { .. }))
        {
            events.push(self.resolve_death());
        }
        self.metrics.record_events(&events);
        events
    }

    fn resolve_death(&mut self) -> GameEvent {
        match respawn_as_sibling(&self.state, &self.config, &mut self.rng) {
            Some(next) => {
                let sibling_id = self
                    .state
                    .siblings
                    .iter()
                    .find(|s| !next.siblings.iter().any(|n| n.id == s.id))
                    .map(|s| s.id.clone())
                    .unwrap_or_default();
                self.state = next;
                self.runtime.predator_nearby = false;
                GameEvent::Respawned { sibling_id }
            }
            None => {
                tracing::info!(
                    cycle = self.state.pond.cycle,
                    generation = self.state.player.traits.generation,
                    "Game over"
                );
                self.gateway.delete_save();
                GameEvent::GameOver {
                    cycle: self.state.pond.cycle,
                    generation: self.state.player.traits.generation,
                }
            }
        }
    }
}
