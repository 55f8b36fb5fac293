//! Configuration management for every tunable constant of the game.
//!
//! The structures map one-to-one onto `config.toml`. Any section or field
//! left out of the file falls back to the balancing values shipped with the
//! game.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (`Default` impls)
//! 2. `config.toml` (overrides defaults)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! game_mode = "trial"
//!
//! [pond]
//! shrink_per_cycles = 5
//! shrink_amount = 20.0
//! min_size = 5.0
//!
//! [genetics]
//! brother_respawn_chance = 0.3
//! ```

use anyhow::Context;
use salamandra_data::LifePhase;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which set of phase durations is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Normal,
    /// Shortened phases for demos.
    Trial,
}

/// Duration of each life phase, in minutes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PhaseDurations {
    pub egg: f64,
    pub larva: f64,
    pub juvenile: f64,
    pub adult: f64,
}

impl PhaseDurations {
    #[must_use]
    pub fn minutes(&self, phase: LifePhase) -> f64 {
        match phase {
            LifePhase::Egg => self.egg,
            LifePhase::Larva => self.larva,
            LifePhase::Juvenile => self.juvenile,
            LifePhase::Adult => self.adult,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PhaseDurationConfig {
    pub normal: PhaseDurations,
    pub trial: PhaseDurations,
}

impl Default for PhaseDurationConfig {
    fn default() -> Self {
        Self {
            normal: PhaseDurations {
                egg: 4.0,
                larva: 6.0,
                juvenile: 7.0,
                adult: 8.0,
            },
            trial: PhaseDurations {
                egg: 1.5,
                larva: 2.5,
                juvenile: 3.0,
                adult: 3.0,
            },
        }
    }
}

/// Egg phase: shaking, clutch predation, sibling counts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EggConfig {
    pub max_energy: f64,
    pub shake_energy_cost: f64,
    /// Per second.
    pub energy_recharge_rate: f64,
    /// Per second, only while no predator is near.
    pub energy_drain_rate: f64,
    pub shake_cooldown_ms: f64,
    /// The egg twitches on its own when energy falls this low.
    pub auto_shake_threshold: f64,
    pub auto_shake_energy: f64,
    pub initial_siblings: usize,
    /// Clutch predation never takes the clutch below this.
    pub min_surviving_siblings: usize,
    pub predator_attack_chance: f64,
}

impl Default for EggConfig {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            shake_energy_cost: 25.0,
            energy_recharge_rate: 5.0,
            energy_drain_rate: 2.0,
            shake_cooldown_ms: 1500.0,
            auto_shake_threshold: 10.0,
            auto_shake_energy: 30.0,
            initial_siblings: 8,
            min_surviving_siblings: 2,
            predator_attack_chance: 0.3,
        }
    }
}

/// Per-second hunger drain for the phases that eat.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HungerDrain {
    pub larva: f64,
    pub juvenile: f64,
    pub adult: f64,
}

/// Nutrition of each prey kind.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FoodValues {
    pub microorganism: f64,
    pub small_insect: f64,
    pub large_insect: f64,
    pub small_fish: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HungerConfig {
    pub max_hunger: f64,
    pub drain_rate: HungerDrain,
    pub warning_threshold: f64,
    pub critical_threshold: f64,
    pub starvation_damage: f64,
    pub food_values: FoodValues,
    /// Growth percentages that trigger a visible growth spurt.
    pub growth_milestones: Vec<f64>,
}

impl Default for HungerConfig {
    fn default() -> Self {
        Self {
            max_hunger: 100.0,
            drain_rate: HungerDrain {
                larva: 1.5,
                juvenile: 2.0,
                adult: 2.5,
            },
            warning_threshold: 30.0,
            critical_threshold: 15.0,
            starvation_damage: 5.0,
            food_values: FoodValues {
                microorganism: 10.0,
                small_insect: 20.0,
                large_insect: 35.0,
                small_fish: 50.0,
            },
            growth_milestones: vec![25.0, 50.0, 75.0, 100.0],
        }
    }
}

impl HungerConfig {
    /// Drain per second in `phase`. Eggs do not eat.
    #[must_use]
    pub fn drain_for(&self, phase: LifePhase) -> f64 {
        match phase {
            LifePhase::Egg => 0.0,
            LifePhase::Larva => self.drain_rate.larva,
            LifePhase::Juvenile => self.drain_rate.juvenile,
            LifePhase::Adult => self.drain_rate.adult,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PredatorConfig {
    /// Fraction removed from the difficulty multiplier after a predator death.
    pub death_difficulty_reduction: f64,
    /// Added per 20% of lost pond.
    pub bird_frequency_multiplier: f64,
}

impl Default for PredatorConfig {
    fn default() -> Self {
        Self {
            death_difficulty_reduction: 0.15,
            bird_frequency_multiplier: 1.5,
        }
    }
}

/// Pond geometry, drying and layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PondConfig {
    pub initial_size: f64,
    pub shrink_per_cycles: u32,
    pub shrink_amount: f64,
    /// The damp cracks never dry out completely.
    pub min_size: f64,
    pub cracks_appear_at: f64,
    pub layout_change_frequency: u32,
    pub plant_density: f64,
    pub plant_base_count: f64,
    pub rock_min: usize,
    pub rock_extra: usize,
    pub width: f64,
    pub height: f64,
    pub spawn_x: f64,
    pub spawn_y: f64,
}

impl Default for PondConfig {
    fn default() -> Self {
        Self {
            initial_size: 100.0,
            shrink_per_cycles: 5,
            shrink_amount: 20.0,
            min_size: 5.0,
            cracks_appear_at: 15.0,
            layout_change_frequency: 3,
            plant_density: 0.3,
            plant_base_count: 50.0,
            rock_min: 5,
            rock_extra: 5,
            width: 400.0,
            height: 600.0,
            spawn_x: 200.0,
            spawn_y: 300.0,
        }
    }
}

/// Probabilities and magnitudes of the inheritance system.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneticsConfig {
    /// Only possible for carriers.
    pub albinism_spontaneous_mutation: f64,
    pub gigantism_chance: f64,
    pub iridescent_chance: f64,
    pub neoteny_chance: f64,
    /// Multiplicative jitter on inherited stats (0.1 = +-10%).
    pub stat_variation: f64,
    pub brother_respawn_chance: f64,
    /// Chance that a first-generation salamander is `Aa`.
    pub initial_carrier_chance: f64,
    /// Additive jitter on sibling stats.
    pub sibling_stat_variation: f64,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            albinism_spontaneous_mutation: 0.005,
            gigantism_chance: 0.02,
            iridescent_chance: 0.02,
            neoteny_chance: 0.02,
            stat_variation: 0.1,
            brother_respawn_chance: 0.3,
            initial_carrier_chance: 0.1,
            sibling_stat_variation: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FriendshipConfig {
    pub min_friendship: f64,
    pub max_friendship: f64,
    pub positive_interaction: f64,
    pub negative_interaction: f64,
    pub approach_threshold: f64,
    pub avoid_threshold: f64,
    /// Fade per cycle without an interaction.
    pub decay_rate: f64,
    /// Bonds strictly above this survive into the next cycle.
    pub survival_threshold: f64,
    /// Factor applied to surviving bonds at a cycle boundary.
    pub carry_over_decay: f64,
}

impl Default for FriendshipConfig {
    fn default() -> Self {
        Self {
            min_friendship: -10.0,
            max_friendship: 10.0,
            positive_interaction: 1.0,
            negative_interaction: -2.0,
            approach_threshold: 3.0,
            avoid_threshold: -3.0,
            decay_rate: 0.1,
            survival_threshold: 5.0,
            carry_over_decay: 0.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub game_mode: GameMode,
    pub phase_duration: PhaseDurationConfig,
    pub egg: EggConfig,
    pub hunger: HungerConfig,
    pub predators: PredatorConfig,
    pub pond: PondConfig,
    pub genetics: GeneticsConfig,
    pub friendship: FriendshipConfig,
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

impl AppConfig {
    /// Phase durations for the active game mode.
    #[must_use]
    pub fn durations(&self) -> &PhaseDurations {
        match self.game_mode {
            GameMode::Normal => &self.phase_duration.normal,
            GameMode::Trial => &self.phase_duration.trial,
        }
    }

    /// Length of `phase` in milliseconds for the active game mode.
    #[must_use]
    pub fn phase_duration_ms(&self, phase: LifePhase) -> f64 {
        self.durations().minutes(phase) * 60_000.0
    }

    /// Validates all configuration parameters.
    ///
    /// Returns `Err` describing the first violated rule.
    pub fn validate(&self) -> anyhow::Result<()> {
        for durations in [&self.phase_duration.normal, &self.phase_duration.trial] {
            for phase in [
                LifePhase::Egg,
                LifePhase::Larva,
                LifePhase::Juvenile,
                LifePhase::Adult,
            ] {
                anyhow::ensure!(
                    durations.minutes(phase) > 0.0,
                    "Phase duration for {} must be positive",
                    phase.name()
                );
            }
        }

        // Egg
        anyhow::ensure!(self.egg.max_energy > 0.0, "Egg max energy must be positive");
        anyhow::ensure!(
            self.egg.shake_energy_cost >= 0.0 && self.egg.shake_energy_cost <= self.egg.max_energy,
            "Shake energy cost must be in [0, max_energy]"
        );
        anyhow::ensure!(
            self.egg.initial_siblings >= self.egg.min_surviving_siblings,
            "Initial siblings must be at least the minimum surviving siblings"
        );
        anyhow::ensure!(
            is_probability(self.egg.predator_attack_chance),
            "Predator attack chance must be in [0.0, 1.0]"
        );

        // Hunger
        anyhow::ensure!(self.hunger.max_hunger > 0.0, "Max hunger must be positive");
        anyhow::ensure!(
            self.hunger.drain_rate.larva >= 0.0
                && self.hunger.drain_rate.juvenile >= 0.0
                && self.hunger.drain_rate.adult >= 0.0,
            "Hunger drain rates must be non-negative"
        );
        anyhow::ensure!(
            self.hunger
                .growth_milestones
                .windows(2)
                .all(|pair| pair[0] < pair[1]),
            "Growth milestones must be strictly increasing"
        );

        // Predators
        anyhow::ensure!(
            (0.0..1.0).contains(&self.predators.death_difficulty_reduction),
            "Death difficulty reduction must be in [0.0, 1.0)"
        );

        // Pond
        anyhow::ensure!(
            self.pond.shrink_per_cycles > 0,
            "Pond shrink frequency must be positive"
        );
        anyhow::ensure!(
            self.pond.layout_change_frequency > 0,
            "Layout change frequency must be positive"
        );
        anyhow::ensure!(
            self.pond.min_size >= 0.0 && self.pond.min_size <= self.pond.initial_size,
            "Pond floor must be in [0, initial_size]"
        );
        anyhow::ensure!(
            self.pond.initial_size <= 100.0,
            "Pond initial size is a percentage (max 100)"
        );
        anyhow::ensure!(self.pond.shrink_amount >= 0.0, "Shrink amount must be non-negative");
        anyhow::ensure!(
            self.pond.width > 0.0 && self.pond.height > 0.0,
            "Pond dimensions must be positive"
        );

        // Genetics
        let g = &self.genetics;
        for (name, p) in [
            ("Albinism mutation", g.albinism_spontaneous_mutation),
            ("Gigantism chance", g.gigantism_chance),
            ("Iridescent chance", g.iridescent_chance),
            ("Neoteny chance", g.neoteny_chance),
            ("Brother respawn chance", g.brother_respawn_chance),
            ("Initial carrier chance", g.initial_carrier_chance),
        ] {
            anyhow::ensure!(is_probability(p), "{name} must be in [0.0, 1.0]");
        }
        anyhow::ensure!(
            g.stat_variation >= 0.0,
            "Stat variation must be non-negative"
        );

        // Friendship
        anyhow::ensure!(
            self.friendship.min_friendship < self.friendship.max_friendship,
            "Friendship range is empty"
        );
        anyhow::ensure!(
            is_probability(self.friendship.carry_over_decay),
            "Friendship carry-over decay must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.friendship.decay_rate >= 0.0,
            "Friendship decay rate must be non-negative"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.game_mode).as_bytes());
        hasher.update(format!("{:?}", self.phase_duration).as_bytes());
        hasher.update(format!("{:?}", self.egg).as_bytes());
        hasher.update(format!("{:?}", self.hunger).as_bytes());
        hasher.update(format!("{:?}", self.predators).as_bytes());
        hasher.update(format!("{:?}", self.pond).as_bytes());
        hasher.update(format!("{:?}", self.genetics).as_bytes());
        hasher.update(format!("{:?}", self.friendship).as_bytes());
        hex::encode(hasher.finalize())
    }
}
