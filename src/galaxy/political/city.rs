//! Cities and their infrastructure

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::core::types::{score, CityId, GovernmentId, SpeciesId, CURRENT_YEAR};
use crate::galaxy::political::district::{District, DistrictGenerator};
use crate::galaxy::political::government::Government;
use crate::galaxy::species::Species;
use crate::naming::{generate_name, NameKind, PhonemeSet};

/// Population fractions for the first cities; later cities repeat the last
pub const CITY_WEIGHTS: [f64; 7] = [0.4, 0.2, 0.15, 0.1, 0.08, 0.05, 0.02];

/// Oldest city founding, in years before the snapshot
pub const MAX_CITY_AGE: i64 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum CityType {
    Capital,
    Industrial,
    Commercial,
    Agricultural,
    Mining,
    Research,
    Military,
    Spaceport,
    Cultural,
    Religious,
    Residential,
    Resort,
}

impl CityType {
    pub const ALL: [CityType; 12] = [
        CityType::Capital,
        CityType::Industrial,
        CityType::Commercial,
        CityType::Agricultural,
        CityType::Mining,
        CityType::Research,
        CityType::Military,
        CityType::Spaceport,
        CityType::Cultural,
        CityType::Religious,
        CityType::Residential,
        CityType::Resort,
    ];

    pub fn specializations(&self) -> &'static [&'static str] {
        match self {
            CityType::Capital => &["Governance", "Diplomacy", "Finance", "Administration"],
            CityType::Industrial => &[
                "Heavy Manufacturing",
                "Shipbuilding",
                "Robotics",
                "Refining",
            ],
            CityType::Commercial => &["Trade", "Banking", "Logistics", "Retail"],
            CityType::Agricultural => &["Hydroponics", "Livestock", "Grain Export", "Aquaculture"],
            CityType::Mining => &[
                "Ore Extraction",
                "Gas Harvesting",
                "Crystal Cutting",
                "Deep Drilling",
            ],
            CityType::Research => &["Xenobiology", "Physics", "Computing", "Medicine"],
            CityType::Military => &[
                "Fleet Command",
                "Weapons Testing",
                "Training",
                "Fortification",
            ],
            CityType::Spaceport => &["Orbital Traffic", "Ship Repair", "Cargo Transfer", "Customs"],
            CityType::Cultural => &["Arts", "Education", "Archives", "Performance"],
            CityType::Religious => &["Pilgrimage", "Scripture", "Monastic Orders", "Healing"],
            CityType::Residential => &["Housing", "Services", "Education", "Recreation"],
            CityType::Resort => &["Tourism", "Hospitality", "Recreation", "Wellness"],
        }
    }

    /// Infrastructure bonus per category, in `Infrastructure` field order
    fn infrastructure_bonus(&self) -> [i32; 6] {
        match self {
            CityType::Capital => [2, 1, 1, 2, 2, 2],
            CityType::Industrial => [1, 2, 0, 0, 0, -1],
            CityType::Commercial => [2, 0, 1, 0, 2, 0],
            CityType::Agricultural => [0, 0, 0, -1, -1, 0],
            CityType::Mining => [1, 1, -1, 0, -1, -1],
            CityType::Research => [0, 2, 0, 0, 2, 1],
            CityType::Military => [1, 1, 0, 3, 1, 0],
            CityType::Spaceport => [3, 1, 0, 1, 1, 0],
            CityType::Cultural => [0, 0, 1, -1, 1, 1],
            CityType::Religious => [0, 0, 1, 0, 0, 1],
            CityType::Residential => [1, 0, 2, 0, 0, 1],
            CityType::Resort => [1, 0, 1, -1, 0, 2],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infrastructure {
    pub transport: u8,
    pub energy: u8,
    pub housing: u8,
    pub defense: u8,
    pub communications: u8,
    pub healthcare: u8,
}

impl Infrastructure {
    fn generate(city_type: CityType, rng: &mut RandomSource) -> Self {
        let bonus = city_type.infrastructure_bonus();
        let mut next = |i: usize| score(rng.range(3, 7) as i32 + bonus[i]);
        Self {
            transport: next(0),
            energy: next(1),
            housing: next(2),
            defense: next(3),
            communications: next(4),
            healthcare: next(5),
        }
    }

    pub fn average(&self) -> f64 {
        let sum = self.transport as u32
            + self.energy as u32
            + self.housing as u32
            + self.defense as u32
            + self.communications as u32
            + self.healthcare as u32;
        sum as f64 / 6.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesShare {
    pub species: SpeciesId,
    pub share: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub city_type: CityType,
    pub population: u64,
    pub government: GovernmentId,
    /// Largest first; empty when the owner has no species
    pub species_shares: Vec<SpeciesShare>,
    pub specializations: Vec<String>,
    pub infrastructure: Infrastructure,
    pub latitude: f64,
    pub longitude: f64,
    pub founded_year: i32,
    pub districts: Vec<District>,
}

impl City {
    pub fn is_capital(&self) -> bool {
        self.city_type == CityType::Capital
    }
}

/// Inclusive city-count range for a planet population
pub fn city_count_range(population: u64) -> (usize, usize) {
    if population > 1_000_000_000 {
        (12, 25)
    } else if population > 100_000_000 {
        (8, 20)
    } else if population > 10_000_000 {
        (4, 10)
    } else if population > 1_000_000 {
        (2, 5)
    } else {
        (1, 2)
    }
}

pub fn city_weight(index: usize) -> f64 {
    CITY_WEIGHTS[index.min(CITY_WEIGHTS.len() - 1)]
}

/// Dominant species takes 60-90%, each minority half of what is left
pub fn species_shares(
    dominant: Option<SpeciesId>,
    minorities: &[SpeciesId],
    rng: &mut RandomSource,
) -> Vec<SpeciesShare> {
    let Some(dominant) = dominant else {
        return Vec::new();
    };
    let Some((last, rest)) = minorities.split_last() else {
        return vec![SpeciesShare {
            species: dominant,
            share: 1.0,
        }];
    };

    let dominant_share = rng.range_f64(0.6, 0.9);
    let mut shares = vec![SpeciesShare {
        species: dominant,
        share: dominant_share,
    }];
    let mut remaining = 1.0 - dominant_share;
    for &species in rest {
        let share = remaining / 2.0;
        remaining -= share;
        shares.push(SpeciesShare { species, share });
    }
    shares.push(SpeciesShare {
        species: *last,
        share: remaining,
    });
    shares
}

#[derive(Clone, Debug, Default)]
pub struct CityGenerator {
    districts: DistrictGenerator,
}

impl CityGenerator {
    pub fn new() -> Self {
        Self {
            districts: DistrictGenerator::new(),
        }
    }

    /// Cities for an inhabited body; `governments` must be non-empty
    ///
    /// City 0 is the capital and belongs to government 0. The first cities
    /// go one per government so every government owns at least one when
    /// there are enough cities.
    pub fn generate(
        &self,
        population: u64,
        governments: &[Government],
        settlers: &[&Species],
        rng: &mut RandomSource,
    ) -> Vec<City> {
        if governments.is_empty() {
            return Vec::new();
        }

        let (min, max) = city_count_range(population);
        let count = rng.range_usize(min, max);
        let default_phonemes = PhonemeSet::default_alphabet();

        (0..count)
            .map(|i| {
                let owner = if i < governments.len() {
                    &governments[i]
                } else {
                    rng.pick(governments)
                };
                let phonemes = owner
                    .dominant_species
                    .and_then(|id| settlers.iter().find(|s| s.id == id))
                    .map(|s| &s.language.phonemes)
                    .unwrap_or(&default_phonemes);

                let city_population = (population as f64 * city_weight(i)).floor() as u64;
                let city_type = if i == 0 {
                    CityType::Capital
                } else {
                    *rng.pick(&CityType::ALL[1..])
                };
                let species_shares =
                    species_shares(owner.dominant_species, &owner.minority_species, rng);

                let specialization_count = rng.range_usize(1, 3);
                let specializations = rng
                    .subset(city_type.specializations(), specialization_count)
                    .into_iter()
                    .map(str::to_string)
                    .collect();

                let id = CityId(rng.uuid());
                let name = generate_name(phonemes, NameKind::Location, rng);
                let infrastructure = Infrastructure::generate(city_type, rng);
                let latitude = rng.range_f64(-90.0, 90.0);
                let longitude = rng.range_f64(-180.0, 180.0);
                let founded_year = CURRENT_YEAR - rng.range(0, MAX_CITY_AGE) as i32;
                let districts =
                    self.districts
                        .generate(city_population, &species_shares, phonemes, rng);

                City {
                    id,
                    name,
                    city_type,
                    population: city_population,
                    government: owner.id,
                    species_shares,
                    specializations,
                    infrastructure,
                    latitude,
                    longitude,
                    founded_year,
                    districts,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::political::government::GovernmentGenerator;
    use uuid::Uuid;

    #[test]
    fn test_weights_repeat_tail() {
        assert_eq!(city_weight(0), 0.4);
        assert_eq!(city_weight(6), 0.02);
        assert_eq!(city_weight(24), 0.02);
    }

    #[test]
    fn test_species_shares_sum_to_one() {
        let mut rng = RandomSource::seeded(4);
        let dominant = SpeciesId(Uuid::from_u128(1));
        let minorities: Vec<SpeciesId> = (2..5).map(|n| SpeciesId(Uuid::from_u128(n))).collect();

        let shares = species_shares(Some(dominant), &minorities, &mut rng);
        assert_eq!(shares.len(), 4);
        assert_eq!(shares[0].species, dominant);
        assert!(shares[0].share >= 0.6 && shares[0].share < 0.9);
        let total: f64 = shares.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-9);

        let alone = species_shares(Some(dominant), &[], &mut rng);
        assert_eq!(alone, vec![SpeciesShare { species: dominant, share: 1.0 }]);
        assert!(species_shares(None, &minorities, &mut rng).is_empty());
    }

    #[test]
    fn test_capital_owned_by_first_government() {
        let governments_gen = GovernmentGenerator::new(0.5);
        let cities_gen = CityGenerator::new();
        for seed in 0..30 {
            let mut rng = RandomSource::seeded(seed);
            let governments = governments_gen.generate(3_000_000_000, &[], &mut rng);
            let cities = cities_gen.generate(3_000_000_000, &governments, &[], &mut rng);

            assert!(cities.len() >= 12 && cities.len() <= 25);
            assert!(cities[0].is_capital());
            assert_eq!(cities[0].government, governments[0].id);
            assert!(cities[1..].iter().all(|c| !c.is_capital()));
            for (city, government) in cities.iter().zip(&governments) {
                assert_eq!(city.government, government.id);
            }
        }
    }

    #[test]
    fn test_city_population_not_renormalized() {
        let governments_gen = GovernmentGenerator::new(0.5);
        let mut rng = RandomSource::seeded(8);
        let governments = governments_gen.generate(500_000, &[], &mut rng);
        let cities = CityGenerator::new().generate(500_000, &governments, &[], &mut rng);

        // Capital weight 0.4 of 500k, with no renormalization over the city count
        assert_eq!(cities[0].population, 200_000);
        let total: u64 = cities.iter().map(|c| c.population).sum();
        assert!(total <= 500_000);
    }

    #[test]
    fn test_infrastructure_in_bounds() {
        let mut rng = RandomSource::seeded(2);
        for city_type in CityType::ALL {
            let infra = Infrastructure::generate(city_type, &mut rng);
            for value in [
                infra.transport,
                infra.energy,
                infra.housing,
                infra.defense,
                infra.communications,
                infra.healthcare,
            ] {
                assert!((1..=10).contains(&value));
            }
        }
    }
}
