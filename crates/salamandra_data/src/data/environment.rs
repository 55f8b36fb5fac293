use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantType {
    Algae,
    Reed,
    Lily,
    Moss,
}

impl PlantType {
    pub const ALL: [PlantType; 4] = [
        PlantType::Algae,
        PlantType::Reed,
        PlantType::Lily,
        PlantType::Moss,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantPosition {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: PlantType,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RockPosition {
    pub x: f64,
    pub y: f64,
}

/// The pond the lineage lives in. It dries up over the cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PondState {
    /// 100 = full.
    pub size_percent: f64,
    pub cycle: u32,
    /// Number of times the pond has been fully regenerated.
    pub era: u32,

    pub plant_positions: Vec<PlantPosition>,
    pub rock_positions: Vec<RockPosition>,

    pub predator_density: f64,
    pub aerial_predator_bonus: f64,
}
