use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use salamandra_lib::app::Session;
use salamandra_lib::model::config::AppConfig;
use salamandra_lib::model::genetics::set_albinism_genotype;
use salamandra_lib::model::lifecycle;
use salamandra_lib::model::persistence::MemoryStore;
use salamandra_lib::model::state::{
    AlbinismGenotype, GameState, LifePhase, PatternType, SalamanderColors, SalamanderTraits,
    SpecialMutations,
};

/// Hand-made traits with every stat at `stat`.
#[allow(dead_code)]
pub fn traits_with(stat: u8, genotype: AlbinismGenotype) -> SalamanderTraits {
    let mut traits = SalamanderTraits {
        speed: stat,
        size: stat,
        stamina: stat,
        perception: stat,
        colors: SalamanderColors::albino(),
        pattern: PatternType::Plain,
        albinism_genotype: AlbinismGenotype::HOMOZYGOUS_DOMINANT,
        mutations: SpecialMutations::default(),
        generation: 1,
        lineage_id: "lineage_test".to_string(),
    };
    traits.colors.primary.h = 100.0;
    traits.colors.primary.s = 40.0;
    set_albinism_genotype(&mut traits, genotype);
    traits
}

#[allow(dead_code)]
pub struct GameBuilder {
    config: AppConfig,
    seed: u64,
    phase: LifePhase,
    cycle: Option<u32>,
    pond_size: Option<f64>,
}

#[allow(dead_code)]
impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            seed: 42,
            phase: LifePhase::Egg,
            cycle: None,
            pond_size: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn in_phase(mut self, phase: LifePhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn at_cycle(mut self, cycle: u32) -> Self {
        self.cycle = Some(cycle);
        self
    }

    pub fn with_pond_size(mut self, size: f64) -> Self {
        self.pond_size = Some(size);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(self) -> (GameState, AppConfig, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut state = lifecycle::create_initial_game_state(&self.config, &mut rng, 0);
        state.current_phase = self.phase;
        if let Some(cycle) = self.cycle {
            state.pond.cycle = cycle;
        }
        if let Some(size) = self.pond_size {
            state.pond.size_percent = size;
        }
        (state, self.config, rng)
    }

    pub fn build_session(self) -> Session<MemoryStore> {
        Session::new(self.config, MemoryStore::new(), self.seed)
    }
}
