//! Core data structures for the Salamandra simulation.

pub mod entity;
pub mod environment;
pub mod state;
pub mod traits;
