//! Headless autopilot: plays a session without a human, for balancing runs
//! and smoke tests.

use super::Session;
use crate::model::lifecycle::is_pond_cracked;
use crate::model::persistence::KeyValueStore;
use crate::model::state::{LifePhase, StatKey};
use crate::model::systems::{hunger_level, FoodKind, HungerLevel, ShakeOutcome};
use crate::model::GameEvent;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Chance that the egg notices a circling predator in time to shake.
const REACTION_CHANCE: f64 = 0.6;
/// Base chance of meeting a predator per check once hatched.
const CONTACT_CHANCE: f64 = 0.002;
const AERIAL_CONTACT_CHANCE: f64 = 0.001;

#[derive(Debug, Default, Clone, Serialize)]
pub struct AutoplayReport {
    pub ticks: u64,
    pub cycles_advanced: u32,
    pub deaths: u64,
    pub respawns: u64,
    pub siblings_lost: u32,
    pub predators_repelled: u32,
    pub albino_births: u32,
    pub new_game_plus_unlocks: u32,
    pub game_over: bool,
    pub final_cycle: u32,
    pub final_era: u32,
    pub final_generation: u32,
    pub final_pond_size: f64,
    pub lineage_id: String,
}

pub struct Autopilot {
    rng: ChaCha8Rng,
    tick_ms: f64,
    /// Simulated time between predator checks.
    check_interval_ms: f64,
}

impl Autopilot {
    pub fn new(seed: u64, tick_ms: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick_ms: tick_ms.max(1.0),
            check_interval_ms: 10_000.0,
        }
    }

    /// Plays until `cycles` new cycles have started, the game is over, or
    /// `max_ticks` ticks have passed.
    pub fn run<S: KeyValueStore>(
        &mut self,
        session: &mut Session<S>,
        cycles: u32,
        max_ticks: u64,
    ) -> AutoplayReport {
        let mut report = AutoplayReport::default();
        let mut since_check = 0.0;

        while report.cycles_advanced < cycles && report.ticks < max_ticks {
            report.ticks += 1;
            let mut events = session.tick(self.tick_ms);

            since_check += self.tick_ms;
            if since_check >= self.check_interval_ms {
                since_check = 0.0;
                events.extend(self.threaten(session, &mut report));
            }

            let phase = session.state().current_phase;
            if phase != LifePhase::Egg
                && !session.is_game_over()
                && hunger_level(session.state().player.hunger, &session.config().hunger)
                    != HungerLevel::Fed
            {
                events.extend(session.eat(FoodKind::typical_for(phase)));
            }

            if !session.is_game_over() && session.runtime().timer_elapsed {
                events.extend(self.advance(session));
            }

            self.observe(session, &events, &mut report);
            if report.game_over {
                break;
            }
        }

        let state = session.state();
        report.deaths = session.metrics().deaths();
        report.respawns = session.metrics().respawns();
        report.final_cycle = state.pond.cycle;
        report.final_era = state.pond.era;
        report.final_generation = state.player.traits.generation;
        report.final_pond_size = state.pond.size_percent;
        report.lineage_id = state.player.traits.lineage_id.clone();
        report
    }

    fn threaten<S: KeyValueStore>(
        &mut self,
        session: &mut Session<S>,
        report: &mut AutoplayReport,
    ) -> Vec<GameEvent> {
        if session.is_game_over() {
            return Vec::new();
        }
        let state = session.state();
        if state.current_phase == LifePhase::Egg {
            let attack_chance = session.config().egg.predator_attack_chance;
            if !self.rng.gen_bool(attack_chance) || !session.predator_approaches() {
                return Vec::new();
            }
            if self.rng.gen_bool(REACTION_CHANCE) && session.shake() == ShakeOutcome::Repelled {
                report.predators_repelled += 1;
                return Vec::new();
            }
            return session.predator_strikes();
        }

        let chance = (CONTACT_CHANCE * state.pond.predator_density * state.difficulty_multiplier
            + AERIAL_CONTACT_CHANCE * state.pond.aerial_predator_bonus)
            .clamp(0.0, 1.0);
        if self.rng.gen_bool(chance) {
            session.predator_contact()
        } else {
            Vec::new()
        }
    }

    /// The phase timer ran out: grow up, or breed as an adult.
    fn advance<S: KeyValueStore>(&mut self, session: &mut Session<S>) -> Vec<GameEvent> {
        if session.state().current_phase != LifePhase::Adult {
            return session.complete_phase();
        }

        if is_pond_cracked(&session.state().pond, &session.config().pond) {
            let events = session.lay_eggs_in_cracks();
            if !events.is_empty() && session.new_game_plus() {
                return events;
            }
        }

        let partner = session.wild_partner();
        let favored = StatKey::ALL[self.rng.gen_range(0..StatKey::ALL.len())];
        session.breed(&partner, &[favored])
    }

    fn observe<S: KeyValueStore>(
        &self,
        session: &Session<S>,
        events: &[GameEvent],
        report: &mut AutoplayReport,
    ) {
        for event in events {
            tracing::debug!(event = %event.message(), "Autoplay");
            match event {
                GameEvent::CycleAdvanced { .. } => {
                    report.cycles_advanced += 1;
                    if session.state().player.traits.is_albino() {
                        report.albino_births += 1;
                    }
                }
                GameEvent::SiblingLost { .. } => report.siblings_lost += 1,
                GameEvent::NewGamePlusUnlocked { .. } => report.new_game_plus_unlocks += 1,
                GameEvent::GameOver { .. } => report.game_over = true,
                _ => {}
            }
        }
    }
}
