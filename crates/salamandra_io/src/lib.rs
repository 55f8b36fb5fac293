//! # Salamandra IO
//!
//! Persistence layer for Salamandra Cycles.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - Validated JSON serialization and atomic file writes
//! - Key-value storage backends (in-memory and one file per key)
//! - The save gateway for the current game and the New Game+ record

/// Error types and result aliases for I/O operations
pub mod error;
/// Save and New Game+ slots on top of a key-value store
pub mod persistence;
/// Validated serialization helpers for JSON
pub mod serialization;
/// Key-value storage backends
pub mod storage;

pub use error::{IoError, Result};
pub use persistence::{SaveGateway, NEW_GAME_PLUS_KEY, SAVE_KEY};
pub use serialization::{from_json, to_json, to_json_pretty, write_atomic};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
