//! Government generation

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::core::types::{score, CityId, GovernmentId, LeaderId, SpeciesId, CURRENT_YEAR};
use crate::galaxy::species::Species;
use crate::naming::{generate_name, NameKind, PhonemeSet};

/// Chance that a planet is unified under one government regardless of size
pub const UNIFIED_GOVERNMENT_CHANCE: f64 = 0.3;

/// Oldest government founding, in years before the snapshot
pub const MAX_GOVERNMENT_AGE: i64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum GovernmentType {
    Democracy,
    Republic,
    Monarchy,
    Empire,
    Theocracy,
    Oligarchy,
    Technocracy,
    Corporate,
    #[display(fmt = "Hive Collective")]
    HiveCollective,
    Anarchy,
}

impl GovernmentType {
    pub const ALL: [GovernmentType; 10] = [
        GovernmentType::Democracy,
        GovernmentType::Republic,
        GovernmentType::Monarchy,
        GovernmentType::Empire,
        GovernmentType::Theocracy,
        GovernmentType::Oligarchy,
        GovernmentType::Technocracy,
        GovernmentType::Corporate,
        GovernmentType::HiveCollective,
        GovernmentType::Anarchy,
    ];

    /// Fixed leadership positions, in order of rank
    pub fn leadership_titles(&self) -> &'static [&'static str] {
        match self {
            GovernmentType::Democracy => &[
                "President",
                "Vice President",
                "Speaker of the Assembly",
            ],
            GovernmentType::Republic => &["First Consul", "Second Consul", "Tribune"],
            GovernmentType::Monarchy => &["Monarch", "Heir Apparent", "Chancellor"],
            GovernmentType::Empire => &["Emperor", "Grand Vizier", "Warlord"],
            GovernmentType::Theocracy => &["High Priest", "Oracle", "Inquisitor"],
            GovernmentType::Oligarchy => &["Chief Magnate", "Treasurer", "Guildmaster"],
            GovernmentType::Technocracy => &[
                "Chief Scientist",
                "Director of Engineering",
                "Archivist",
            ],
            GovernmentType::Corporate => &[
                "Chief Executive",
                "Chairman of the Board",
                "Chief Financial Officer",
            ],
            GovernmentType::HiveCollective => &["Overmind", "Brood Regent"],
            GovernmentType::Anarchy => &["Spokesperson"],
        }
    }

    /// Formal name built around a place name
    pub fn formal_name(&self, root: &str) -> String {
        match self {
            GovernmentType::Democracy => format!("{} Democracy", root),
            GovernmentType::Republic => format!("Republic of {}", root),
            GovernmentType::Monarchy => format!("Kingdom of {}", root),
            GovernmentType::Empire => format!("{} Empire", root),
            GovernmentType::Theocracy => format!("Holy See of {}", root),
            GovernmentType::Oligarchy => format!("{} Syndicate", root),
            GovernmentType::Technocracy => format!("{} Technate", root),
            GovernmentType::Corporate => format!("{} Incorporated", root),
            GovernmentType::HiveCollective => format!("{} Hive", root),
            GovernmentType::Anarchy => format!("Free Communes of {}", root),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Ideology {
    Expansionist,
    Isolationist,
    Militarist,
    Pacifist,
    Mercantile,
    Spiritualist,
    Materialist,
    Xenophile,
    Xenophobe,
    Egalitarian,
}

impl Ideology {
    pub const ALL: [Ideology; 10] = [
        Ideology::Expansionist,
        Ideology::Isolationist,
        Ideology::Militarist,
        Ideology::Pacifist,
        Ideology::Mercantile,
        Ideology::Spiritualist,
        Ideology::Materialist,
        Ideology::Xenophile,
        Ideology::Xenophobe,
        Ideology::Egalitarian,
    ];
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub id: LeaderId,
    pub title: String,
    pub name: String,
    pub species: Option<SpeciesId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Government {
    pub id: GovernmentId,
    pub name: String,
    pub government_type: GovernmentType,
    /// Cities this government owns
    pub territory: Vec<CityId>,
    pub population: u64,
    /// None only when the galaxy has no species at all
    pub dominant_species: Option<SpeciesId>,
    pub minority_species: Vec<SpeciesId>,
    pub ideology: Ideology,
    pub leadership: Vec<Leader>,
    pub military_strength: u8,
    pub economic_strength: u8,
    pub technology_level: u8,
    pub stability: u8,
    pub founded_year: i32,
    /// First owned city; government[0] always holds the planet's capital
    pub capital: Option<CityId>,
}

/// Inclusive government-count range for a population
pub fn government_count_range(population: u64) -> (usize, usize) {
    if population > 100_000_000 {
        (2, 8)
    } else if population > 10_000_000 {
        (1, 4)
    } else if population > 1_000_000 {
        (1, 2)
    } else {
        (1, 1)
    }
}

/// Split `total` into `count` descending shares that sum exactly to `total`
pub fn split_population(total: u64, count: usize, rng: &mut RandomSource) -> Vec<u64> {
    if count == 0 {
        return Vec::new();
    }

    let mut weights: Vec<f64> = (0..count).map(|_| rng.range_f64(1.0, 10.0)).collect();
    weights.sort_by(|a, b| b.total_cmp(a));
    let weight_sum: f64 = weights.iter().sum();

    let mut shares: Vec<u64> = weights
        .iter()
        .map(|w| (total as f64 * w / weight_sum).floor() as u64)
        .collect();
    let others: u64 = shares[1..].iter().sum();
    shares[0] = total.saturating_sub(others);
    shares
}

#[derive(Clone, Debug)]
pub struct GovernmentGenerator {
    political_complexity: f64,
}

impl GovernmentGenerator {
    pub fn new(political_complexity: f64) -> Self {
        Self {
            political_complexity,
        }
    }

    /// Governments for an inhabited body, largest first
    ///
    /// Territory and capitals are filled in once cities exist.
    pub fn generate(
        &self,
        population: u64,
        settlers: &[&Species],
        rng: &mut RandomSource,
    ) -> Vec<Government> {
        let (min, max) = government_count_range(population);
        let mut count = rng.range_usize(min, max);
        if rng.chance(UNIFIED_GOVERNMENT_CHANCE) {
            count = 1;
        }

        let shares = split_population(population, count, rng);
        shares
            .into_iter()
            .map(|share| self.generate_one(share, settlers, rng))
            .collect()
    }

    fn generate_one(
        &self,
        population: u64,
        settlers: &[&Species],
        rng: &mut RandomSource,
    ) -> Government {
        let id = GovernmentId(rng.uuid());

        let dominant: Option<&Species> = if settlers.is_empty() {
            None
        } else {
            Some(*rng.pick(settlers))
        };
        let minority_species: Vec<SpeciesId> = settlers
            .iter()
            .filter(|s| Some(s.id) != dominant.map(|d| d.id))
            .map(|s| s.id)
            .collect();

        let government_type = match dominant {
            Some(species) if species.mental.collective_mind && rng.chance(0.5) => {
                GovernmentType::HiveCollective
            }
            _ => *rng.pick(&GovernmentType::ALL),
        };
        let ideology = *rng.pick(&Ideology::ALL);

        let default_phonemes = PhonemeSet::default_alphabet();
        let phonemes = dominant
            .map(|s| &s.language.phonemes)
            .unwrap_or(&default_phonemes);
        let root = generate_name(phonemes, NameKind::Location, rng);
        let name = government_type.formal_name(&root);

        let councilors = (2.0 * self.political_complexity).round() as usize;
        let titles = government_type
            .leadership_titles()
            .iter()
            .copied()
            .chain(std::iter::repeat("Councilor").take(councilors));
        let leadership = titles
            .map(|title| Leader {
                id: LeaderId(rng.uuid()),
                title: title.to_string(),
                name: format!(
                    "{} {}",
                    generate_name(phonemes, NameKind::Personal, rng),
                    generate_name(phonemes, NameKind::Family, rng)
                ),
                species: dominant.map(|s| s.id),
            })
            .collect();

        Government {
            id,
            name,
            government_type,
            territory: Vec::new(),
            population,
            dominant_species: dominant.map(|s| s.id),
            minority_species,
            ideology,
            leadership,
            military_strength: score(rng.range(1, 10) as i32),
            economic_strength: score(rng.range(1, 10) as i32),
            technology_level: score(rng.range(1, 10) as i32),
            stability: score(rng.range(2, 10) as i32),
            founded_year: CURRENT_YEAR - rng.range(0, MAX_GOVERNMENT_AGE) as i32,
            capital: None,
        }
    }
}
