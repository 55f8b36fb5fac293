pub use salamandra_core::{AppConfig, GameEvent, PhaseRuntime};
pub mod config {
    pub use salamandra_core::config::*;
}
pub mod events {
    pub use salamandra_core::events::*;
}
pub mod genetics {
    pub use salamandra_core::genetics::*;
}
pub mod lifecycle {
    pub use salamandra_core::lifecycle::*;
}
pub mod population {
    pub use salamandra_core::population::*;
}
pub mod social {
    pub use salamandra_core::social::*;
}
pub mod systems {
    pub use salamandra_core::systems::egg::*;
    pub use salamandra_core::systems::feeding::*;
    pub use salamandra_core::systems::*;
}
pub mod persistence {
    pub use salamandra_io::*;
}

pub mod state {
    pub use salamandra_data::*;
}
