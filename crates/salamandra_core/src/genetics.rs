//! Heritable traits: generation, Mendelian inheritance, mutation and
//! camouflage scoring.
//!
//! Every random operation takes the random source as a parameter so seeded
//! runs (and tests) are reproducible.

use crate::config::GeneticsConfig;
use rand::Rng;
use salamandra_data::{
    AlbinismGenotype, Allele, EnvironmentType, Hsl, PatternType, SalamanderColors,
    SalamanderTraits, SpecialMutations, StatKey,
};
use uuid::Uuid;

pub const STAT_MIN: u8 = 1;
pub const STAT_MAX: u8 = 10;

const GIGANTISM_SIZE_BONUS: u8 = 3;
const GIGANTISM_SPEED_PENALTY: u8 = 2;

// Camouflage scoring.
const CAMOUFLAGE_BASE: i32 = 5;
const GREEN_HUES: std::ops::RangeInclusive<f64> = 60.0..=150.0;
const BROWN_HUES: std::ops::RangeInclusive<f64> = 20.0..=50.0;
const DULL_SATURATION: f64 = 30.0;
const VIVID_SATURATION: f64 = 70.0;
const HABITAT_MATCH_BONUS: i32 = 2;
const VIVID_PENALTY: i32 = 2;
const PATTERN_BONUS: i32 = 1;
const ALBINO_PENALTY: i32 = 4;
const IRIDESCENT_PENALTY: i32 = 1;

fn clamp_stat(value: f64) -> u8 {
    value
        .round()
        .clamp(f64::from(STAT_MIN), f64::from(STAT_MAX)) as u8
}

fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn clamp_percent(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

/// Symmetric noise in `[-amplitude, amplitude)`.
fn jitter<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * 2.0 * amplitude
}

/// Roughly bell-shaped stat centred on 5: the mean of three uniform draws.
fn random_stat<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    let mean = (rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>()) / 3.0;
    clamp_stat(5.0 + (mean - 0.5) * 4.0)
}

fn random_pattern<R: Rng + ?Sized>(rng: &mut R) -> PatternType {
    PatternType::ALL[rng.gen_range(0..PatternType::ALL.len())]
}

/// Wild salamander colors: greens and browns, fairly dark, belly lighter.
fn generate_natural_colors<R: Rng + ?Sized>(rng: &mut R) -> SalamanderColors {
    SalamanderColors {
        primary: Hsl::new(
            rng.gen_range(80.0..120.0),
            rng.gen_range(30.0..60.0),
            rng.gen_range(25.0..45.0),
        ),
        secondary: Hsl::new(
            rng.gen_range(90.0..120.0),
            rng.gen_range(20.0..40.0),
            rng.gen_range(30.0..50.0),
        ),
        belly: Hsl::new(
            rng.gen_range(60.0..100.0),
            rng.gen_range(20.0..50.0),
            rng.gen_range(50.0..70.0),
        ),
    }
}

/// A lineage id drawn from `rng`, so seeded games get stable ids.
pub fn generate_lineage_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("lineage_{}", Uuid::from_u128(rng.gen::<u128>()).simple())
}

/// First-generation traits for a brand new lineage.
pub fn generate_initial_traits<R: Rng + ?Sized>(
    config: &GeneticsConfig,
    rng: &mut R,
) -> SalamanderTraits {
    let albinism_genotype = if rng.gen_bool(config.initial_carrier_chance) {
        AlbinismGenotype::CARRIER
    } else {
        AlbinismGenotype::HOMOZYGOUS_DOMINANT
    };

    SalamanderTraits {
        speed: random_stat(rng),
        size: random_stat(rng),
        stamina: random_stat(rng),
        perception: random_stat(rng),
        colors: generate_natural_colors(rng),
        pattern: random_pattern(rng),
        albinism_genotype,
        mutations: SpecialMutations::default(),
        generation: 1,
        lineage_id: generate_lineage_id(rng),
    }
}

/// Replaces the genotype and keeps the albino flag and palette consistent
/// with it.
pub fn set_albinism_genotype(traits: &mut SalamanderTraits, genotype: AlbinismGenotype) {
    traits.albinism_genotype = genotype;
    traits.mutations.albino = genotype.is_albino();
    if traits.mutations.albino {
        traits.colors = SalamanderColors::albino();
    }
}

/// Each parent passes one of its two alleles, chosen independently.
pub fn inherit_albinism<R: Rng + ?Sized>(
    g1: &AlbinismGenotype,
    g2: &AlbinismGenotype,
    rng: &mut R,
) -> AlbinismGenotype {
    let allele1: Allele = g1.alleles[rng.gen_range(0..2)];
    let allele2: Allele = g2.alleles[rng.gen_range(0..2)];
    AlbinismGenotype::new(allele1, allele2)
}

fn mix_colors<R: Rng + ?Sized>(
    c1: &SalamanderColors,
    c2: &SalamanderColors,
    rng: &mut R,
) -> SalamanderColors {
    let mut mix = |a: &Hsl, b: &Hsl| {
        Hsl::new(
            wrap_hue((a.h + b.h) / 2.0 + jitter(rng, 10.0)),
            clamp_percent((a.s + b.s) / 2.0 + jitter(rng, 5.0)),
            clamp_percent((a.l + b.l) / 2.0 + jitter(rng, 5.0)),
        )
    };
    SalamanderColors {
        primary: mix(&c1.primary, &c2.primary),
        secondary: mix(&c1.secondary, &c2.secondary),
        belly: mix(&c1.belly, &c2.belly),
    }
}

fn inherit_stat<R: Rng + ?Sized>(
    key: StatKey,
    p1: &SalamanderTraits,
    p2: &SalamanderTraits,
    favored: &[StatKey],
    variation: f64,
    rng: &mut R,
) -> u8 {
    let value = if favored.contains(&key) {
        p1.stat(key).max(p2.stat(key))
    } else if rng.gen_bool(0.5) {
        p1.stat(key)
    } else {
        p2.stat(key)
    };
    let value = f64::from(value);
    clamp_stat(value + jitter(rng, variation * value))
}

fn inherit_mutations<R: Rng + ?Sized>(
    m1: &SpecialMutations,
    m2: &SpecialMutations,
    rng: &mut R,
) -> SpecialMutations {
    SpecialMutations {
        // Derived from the genotype by the caller.
        albino: false,
        gigantism: m1.gigantism || m2.gigantism,
        neoteny: if rng.gen_bool(0.5) { m1.neoteny } else { m2.neoteny },
        iridescent: if rng.gen_bool(0.5) {
            m1.iridescent
        } else {
            m2.iridescent
        },
    }
}

fn apply_gigantism(traits: &mut SalamanderTraits) {
    traits.size = traits.size.saturating_add(GIGANTISM_SIZE_BONUS).min(STAT_MAX);
    traits.speed = traits
        .speed
        .saturating_sub(GIGANTISM_SPEED_PENALTY)
        .max(STAT_MIN);
}

/// Spontaneous mutations rolled once per newborn.
fn apply_random_mutations<R: Rng + ?Sized>(
    traits: &mut SalamanderTraits,
    config: &GeneticsConfig,
    rng: &mut R,
) {
    if traits.albinism_genotype.is_carrier() && rng.gen_bool(config.albinism_spontaneous_mutation)
    {
        set_albinism_genotype(traits, AlbinismGenotype::HOMOZYGOUS_RECESSIVE);
        tracing::debug!(lineage = %traits.lineage_id, "Spontaneous albinism");
    }

    if !traits.mutations.gigantism && rng.gen_bool(config.gigantism_chance) {
        traits.mutations.gigantism = true;
        apply_gigantism(traits);
        tracing::debug!(lineage = %traits.lineage_id, "Spontaneous gigantism");
    }

    if !traits.mutations.iridescent && rng.gen_bool(config.iridescent_chance) {
        traits.mutations.iridescent = true;
        tracing::debug!(lineage = %traits.lineage_id, "Spontaneous iridescence");
    }

    if !traits.mutations.neoteny && rng.gen_bool(config.neoteny_chance) {
        traits.mutations.neoteny = true;
        tracing::debug!(lineage = %traits.lineage_id, "Spontaneous neoteny");
    }
}

/// Breeds `parent1` (the player's line) with `parent2`.
///
/// Stats listed in `favored` come from whichever parent has the higher value;
/// the others come from a random parent. Every stat then gets a small
/// multiplicative jitter and is clamped to `[1, 10]`.
pub fn inherit_traits<R: Rng + ?Sized>(
    parent1: &SalamanderTraits,
    parent2: &SalamanderTraits,
    favored: &[StatKey],
    config: &GeneticsConfig,
    rng: &mut R,
) -> SalamanderTraits {
    let albinism_genotype =
        inherit_albinism(&parent1.albinism_genotype, &parent2.albinism_genotype, rng);
    let child_is_albino = albinism_genotype.is_albino();

    let colors = if child_is_albino {
        SalamanderColors::albino()
    } else {
        mix_colors(&parent1.colors, &parent2.colors, rng)
    };

    let mut child = SalamanderTraits {
        speed: inherit_stat(StatKey::Speed, parent1, parent2, favored, config.stat_variation, rng),
        size: inherit_stat(StatKey::Size, parent1, parent2, favored, config.stat_variation, rng),
        stamina: inherit_stat(
            StatKey::Stamina,
            parent1,
            parent2,
            favored,
            config.stat_variation,
            rng,
        ),
        perception: inherit_stat(
            StatKey::Perception,
            parent1,
            parent2,
            favored,
            config.stat_variation,
            rng,
        ),
        colors,
        pattern: if rng.gen_bool(0.5) {
            parent1.pattern
        } else {
            parent2.pattern
        },
        albinism_genotype,
        mutations: inherit_mutations(&parent1.mutations, &parent2.mutations, rng),
        generation: parent1.generation.max(parent2.generation) + 1,
        lineage_id: parent1.lineage_id.clone(),
    };
    child.mutations.albino = child_is_albino;

    apply_random_mutations(&mut child, config, rng);
    child
}

/// A clutch-mate of `original`: same genotype and mutations, slightly
/// different stats and colors.
pub fn generate_sibling_traits<R: Rng + ?Sized>(
    original: &SalamanderTraits,
    config: &GeneticsConfig,
    rng: &mut R,
) -> SalamanderTraits {
    let mut vary_stat =
        |stat: u8| clamp_stat(f64::from(stat) + jitter(rng, config.sibling_stat_variation));
    let speed = vary_stat(original.speed);
    let size = vary_stat(original.size);
    let stamina = vary_stat(original.stamina);
    let perception = vary_stat(original.perception);

    let mut vary_hsl = |hsl: &Hsl| {
        Hsl::new(
            wrap_hue(hsl.h + jitter(rng, 5.0)),
            clamp_percent(hsl.s + jitter(rng, 2.5)),
            clamp_percent(hsl.l + jitter(rng, 2.5)),
        )
    };
    let colors = SalamanderColors {
        primary: vary_hsl(&original.colors.primary),
        secondary: vary_hsl(&original.colors.secondary),
        belly: vary_hsl(&original.colors.belly),
    };

    SalamanderTraits {
        speed,
        size,
        stamina,
        perception,
        colors,
        ..original.clone()
    }
}

/// How well `traits` blend into `environment`, from 1 (obvious) to 10.
#[must_use]
pub fn calculate_camouflage(traits: &SalamanderTraits, environment: EnvironmentType) -> u8 {
    let mut score = CAMOUFLAGE_BASE;
    let primary = &traits.colors.primary;

    match environment {
        EnvironmentType::Plants if GREEN_HUES.contains(&primary.h) => {
            score += HABITAT_MATCH_BONUS;
        }
        EnvironmentType::Mud if BROWN_HUES.contains(&primary.h) => {
            score += HABITAT_MATCH_BONUS;
        }
        EnvironmentType::Rocks if primary.s < DULL_SATURATION => {
            score += HABITAT_MATCH_BONUS;
        }
        _ => {}
    }

    if primary.s > VIVID_SATURATION {
        score -= VIVID_PENALTY;
    }

    match (traits.pattern, environment) {
        (PatternType::Mottled, _) | (PatternType::Spots, EnvironmentType::Plants) => {
            score += PATTERN_BONUS;
        }
        _ => {}
    }

    if traits.is_albino() {
        score -= ALBINO_PENALTY;
    }
    if traits.mutations.iridescent {
        score -= IRIDESCENT_PENALTY;
    }

    score.clamp(i32::from(STAT_MIN), i32::from(STAT_MAX)) as u8
}
