//! Plain data types shared by every Salamandra crate.
//!
//! Nothing in here draws random numbers or touches storage; the logic that
//! creates and mutates these values lives in `salamandra_core`.

pub mod data;

pub use data::entity::{DeathCause, LifePhase, SalamanderState, SiblingState};
pub use data::environment::{PlantPosition, PlantType, PondState, RockPosition};
pub use data::state::{GameState, NewGamePlusRecord, Relationship};
pub use data::traits::{
    AlbinismGenotype, Allele, EnvironmentType, Hsl, PatternType, SalamanderColors,
    SalamanderTraits, SpecialMutations, StatKey,
};
