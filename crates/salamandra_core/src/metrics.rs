//! Session statistics and structured logging setup.

use crate::events::GameEvent;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Counters collected over a play session.
pub struct Metrics {
    tick_count: AtomicU64,
    deaths: AtomicU64,
    respawns: AtomicU64,
    cycles: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            respawns: AtomicU64::new(0),
            cycles: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a simulation tick of `delta_ms`.
    pub fn record_tick(&self, delta_ms: f64, phase: &str) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);

        let tick = self.tick_count.load(Ordering::Relaxed);
        if tick % 1000 == 0 {
            tracing::debug!(tick, phase, delta_ms, "Simulation tick");
        }
    }

    /// Folds the outcome of a gameplay call into the counters.
    pub fn record_events(&self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::PlayerDied { .. } => {
                    self.deaths.fetch_add(1, Ordering::Relaxed);
                }
                GameEvent::Respawned { .. } => {
                    self.respawns.fetch_add(1, Ordering::Relaxed);
                }
                GameEvent::CycleAdvanced { .. } => {
                    self.cycles.fetch_add(1, Ordering::Relaxed);
                }
                GameEvent::SiblingLost { .. } => self.increment_counter("siblings_lost"),
                GameEvent::PredatorRepelled => self.increment_counter("predators_repelled"),
                GameEvent::GrowthMilestone { .. } => self.increment_counter("growth_milestones"),
                _ => {}
            }
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn respawns(&self) -> u64 {
        self.respawns.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Wall-clock time since the session started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs a one-line session summary.
    pub fn log_summary(&self) {
        tracing::info!(
            ticks = self.tick_count(),
            cycles = self.cycles(),
            deaths = self.deaths(),
            respawns = self.respawns(),
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Session summary"
        );
    }
}

/// Initialize tracing subscriber for logging. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use salamandra_data::DeathCause;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.tick_count(), 0);
        assert_eq!(metrics.deaths(), 0);
    }

    #[test]
    fn test_record_events() {
        let metrics = Metrics::new();
        metrics.record_tick(16.0, "egg");
        metrics.record_events(&[
            GameEvent::PlayerDied {
                cause: DeathCause::Predator,
            },
            GameEvent::Respawned {
                sibling_id: "sibling_0".to_string(),
            },
            GameEvent::PredatorRepelled,
            GameEvent::PredatorRepelled,
        ]);
        assert_eq!(metrics.tick_count(), 1);
        assert_eq!(metrics.deaths(), 1);
        assert_eq!(metrics.respawns(), 1);
        assert_eq!(metrics.counter("predators_repelled"), 2);
        assert_eq!(metrics.counter("siblings_lost"), 0);
    }
}
