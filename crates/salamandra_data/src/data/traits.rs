use serde::{Deserialize, Serialize};

/// A color in hue/saturation/lightness space.
///
/// Hue is in degrees `[0, 360)`, saturation and lightness are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// The three body regions that carry color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalamanderColors {
    pub primary: Hsl,
    pub secondary: Hsl,
    pub belly: Hsl,
}

impl SalamanderColors {
    /// The fixed pale palette every albino salamander wears.
    #[must_use]
    pub const fn albino() -> Self {
        Self {
            primary: Hsl::new(0.0, 5.0, 90.0),
            secondary: Hsl::new(30.0, 10.0, 85.0),
            belly: Hsl::new(0.0, 0.0, 95.0),
        }
    }
}

/// Skin pattern category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    Spots,
    Stripes,
    Plain,
    Mottled,
}

impl PatternType {
    pub const ALL: [PatternType; 4] = [
        PatternType::Spots,
        PatternType::Stripes,
        PatternType::Plain,
        PatternType::Mottled,
    ];
}

/// One allele of the albinism gene. Albinism is autosomal recessive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Allele {
    /// `A`: normal pigmentation.
    #[serde(rename = "A")]
    Dominant,
    /// `a`: albino.
    #[serde(rename = "a")]
    Recessive,
}

/// Diploid albinism genotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlbinismGenotype {
    pub alleles: [Allele; 2],
}

impl AlbinismGenotype {
    /// `AA`
    pub const HOMOZYGOUS_DOMINANT: Self = Self {
        alleles: [Allele::Dominant, Allele::Dominant],
    };
    /// `Aa`
    pub const CARRIER: Self = Self {
        alleles: [Allele::Dominant, Allele::Recessive],
    };
    /// `aa`
    pub const HOMOZYGOUS_RECESSIVE: Self = Self {
        alleles: [Allele::Recessive, Allele::Recessive],
    };

    #[must_use]
    pub const fn new(first: Allele, second: Allele) -> Self {
        Self {
            alleles: [first, second],
        }
    }

    /// Both alleles recessive.
    #[must_use]
    pub fn is_albino(&self) -> bool {
        self.alleles
            .iter()
            .all(|allele| *allele == Allele::Recessive)
    }

    /// Exactly one recessive allele.
    #[must_use]
    pub fn is_carrier(&self) -> bool {
        self.alleles.contains(&Allele::Recessive) && !self.is_albino()
    }
}

/// Rare heritable mutations.
///
/// `albino` mirrors the genotype and is only written by breeding and
/// mutation logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecialMutations {
    pub albino: bool,
    /// +3 size, -2 speed.
    pub gigantism: bool,
    /// Keeps larval gills into adulthood.
    pub neoteny: bool,
    /// Shimmering skin; helps courtship, hurts camouflage.
    pub iridescent: bool,
}

/// The four gameplay stats a player can favor when choosing a mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Speed,
    Size,
    Stamina,
    Perception,
}

impl StatKey {
    pub const ALL: [StatKey; 4] = [
        StatKey::Speed,
        StatKey::Size,
        StatKey::Stamina,
        StatKey::Perception,
    ];
}

/// Everything a salamander inherits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalamanderTraits {
    pub speed: u8,
    pub size: u8,
    pub stamina: u8,
    pub perception: u8,

    pub colors: SalamanderColors,
    pub pattern: PatternType,

    pub albinism_genotype: AlbinismGenotype,
    pub mutations: SpecialMutations,

    pub generation: u32,
    pub lineage_id: String,
}

impl SalamanderTraits {
    #[must_use]
    pub fn stat(&self, key: StatKey) -> u8 {
        match key {
            StatKey::Speed => self.speed,
            StatKey::Size => self.size,
            StatKey::Stamina => self.stamina,
            StatKey::Perception => self.perception,
        }
    }

    pub fn set_stat(&mut self, key: StatKey, value: u8) {
        match key {
            StatKey::Speed => self.speed = value,
            StatKey::Size => self.size = value,
            StatKey::Stamina => self.stamina = value,
            StatKey::Perception => self.perception = value,
        }
    }

    #[must_use]
    pub fn is_albino(&self) -> bool {
        self.albinism_genotype.is_albino()
    }
}

/// Where a salamander is hiding, for camouflage purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentType {
    Plants,
    Mud,
    Rocks,
    Open,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genotype_predicates() {
        assert!(!AlbinismGenotype::HOMOZYGOUS_DOMINANT.is_albino());
        assert!(!AlbinismGenotype::HOMOZYGOUS_DOMINANT.is_carrier());
        assert!(AlbinismGenotype::CARRIER.is_carrier());
        assert!(AlbinismGenotype::new(Allele::Recessive, Allele::Dominant).is_carrier());
        assert!(AlbinismGenotype::HOMOZYGOUS_RECESSIVE.is_albino());
        assert!(!AlbinismGenotype::HOMOZYGOUS_RECESSIVE.is_carrier());
    }

    #[test]
    fn test_allele_wire_format() {
        let json = serde_json::to_string(&AlbinismGenotype::CARRIER).unwrap();
        assert_eq!(json, r#"{"alleles":["A","a"]}"#);
    }

    #[test]
    fn test_stat_accessors() {
        let mut traits = SalamanderTraits {
            speed: 1,
            size: 2,
            stamina: 3,
            perception: 4,
            colors: SalamanderColors::albino(),
            pattern: PatternType::Plain,
            albinism_genotype: AlbinismGenotype::HOMOZYGOUS_DOMINANT,
            mutations: SpecialMutations::default(),
            generation: 1,
            lineage_id: "lineage_test".to_string(),
        };
        for (i, key) in StatKey::ALL.iter().enumerate() {
            assert_eq!(traits.stat(*key) as usize, i + 1);
        }
        traits.set_stat(StatKey::Perception, 9);
        assert_eq!(traits.perception, 9);

        let json = serde_json::to_value(&traits).unwrap();
        assert!(json.get("albinismGenotype").is_some());
        assert!(json.get("lineageId").is_some());
        assert_eq!(json["pattern"], "plain");
    }
}
