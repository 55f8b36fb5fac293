//! The save slots: the current game and the New Game+ unlock record.
//!
//! The gateway never fails the caller. Storage and format problems are
//! logged and reported as `false`/`None` so the game can keep running in
//! memory.

use crate::serialization::{from_json, to_json};
use crate::storage::KeyValueStore;
use salamandra_data::{GameState, NewGamePlusRecord};

pub const SAVE_KEY: &str = "salamandra_cycles_save";
pub const NEW_GAME_PLUS_KEY: &str = "salamandra_newgameplus";

pub struct SaveGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SaveGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Stamps `state` with `now` and overwrites the save slot.
    pub fn save_game(&mut self, state: &mut GameState, now: i64) -> bool {
        state.last_save_time = now;
        let result = to_json(&*state).and_then(|json| self.store.set(SAVE_KEY, &json));
        match result {
            Ok(()) => {
                tracing::debug!(
                    cycle = state.pond.cycle,
                    phase = state.current_phase.name(),
                    "Game saved"
                );
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save game");
                false
            }
        }
    }

    /// The saved game, if there is a readable one.
    pub fn load_game(&self) -> Option<GameState> {
        let json = match self.store.get(SAVE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read save slot");
                return None;
            }
        };
        match from_json(&json) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring corrupt save");
                None
            }
        }
    }

    pub fn delete_save(&mut self) {
        if let Err(e) = self.store.delete(SAVE_KEY) {
            tracing::error!(error = %e, "Failed to delete save");
        }
    }

    #[must_use]
    pub fn has_save(&self) -> bool {
        self.load_game().is_some()
    }

    pub fn unlock_new_game_plus(&mut self, record: &NewGamePlusRecord) -> bool {
        let result = to_json(record).and_then(|json| self.store.set(NEW_GAME_PLUS_KEY, &json));
        match result {
            Ok(()) => {
                tracing::info!(cycle = record.cycle, era = record.era, "New Game+ unlocked");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to store New Game+ record");
                false
            }
        }
    }

    pub fn load_new_game_plus(&self) -> Option<NewGamePlusRecord> {
        match self.store.get(NEW_GAME_PLUS_KEY) {
            Ok(Some(json)) => from_json(&json)
                .map_err(|e| tracing::warn!(error = %e, "Ignoring corrupt New Game+ record"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read New Game+ record");
                None
            }
        }
    }

    #[must_use]
    pub fn is_new_game_plus_unlocked(&self) -> bool {
        self.load_new_game_plus().is_some_and(|r| r.unlocked)
    }

    /// Forgets the New Game+ record as well as the save.
    pub fn reset(&mut self) {
        self.delete_save();
        if let Err(e) = self.store.delete(NEW_GAME_PLUS_KEY) {
            tracing::error!(error = %e, "Failed to delete New Game+ record");
        }
    }
}
