//! City districts

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::core::types::{DistrictId, SpeciesId};
use crate::galaxy::political::city::SpeciesShare;
use crate::naming::{generate_name, NameKind, PhonemeSet};

/// Chance a district is dominated by the city's largest species
pub const MAJORITY_DISTRICT_CHANCE: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DistrictType {
    Residential,
    Commercial,
    Industrial,
    Administrative,
    Cultural,
    Religious,
    Military,
    Entertainment,
    Scientific,
    Port,
}

impl DistrictType {
    pub const ALL: [DistrictType; 10] = [
        DistrictType::Residential,
        DistrictType::Commercial,
        DistrictType::Industrial,
        DistrictType::Administrative,
        DistrictType::Cultural,
        DistrictType::Religious,
        DistrictType::Military,
        DistrictType::Entertainment,
        DistrictType::Scientific,
        DistrictType::Port,
    ];

    pub fn features(&self) -> &'static [&'static str] {
        match self {
            DistrictType::Residential => &[
                "Arcology Blocks",
                "Garden Terraces",
                "Tenement Stacks",
                "Quiet Canals",
            ],
            DistrictType::Commercial => &[
                "Grand Bazaar",
                "Exchange Tower",
                "Night Markets",
                "Credit Vaults",
            ],
            DistrictType::Industrial => &[
                "Fusion Foundry",
                "Assembly Yards",
                "Smelting Works",
                "Freight Lines",
            ],
            DistrictType::Administrative => &["Council Hall", "Records Archive", "Census Office"],
            DistrictType::Cultural => &[
                "Grand Theater",
                "Holo-Gallery",
                "Memory Museum",
                "Amphitheater",
            ],
            DistrictType::Religious => &[
                "Great Temple",
                "Pilgrim Road",
                "Reliquary",
                "Meditation Gardens",
            ],
            DistrictType::Military => &[
                "Barracks",
                "Orbital Defense Battery",
                "Training Grounds",
                "Armory",
            ],
            DistrictType::Entertainment => &[
                "Gravity Arena",
                "Pleasure Domes",
                "Gaming Halls",
                "Racing Circuit",
            ],
            DistrictType::Scientific => &[
                "Research Campus",
                "Particle Collider",
                "Xenobiology Labs",
                "Observatory",
            ],
            DistrictType::Port => &[
                "Shuttle Docks",
                "Cargo Lifts",
                "Customs House",
                "Space Elevator",
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: DistrictId,
    pub name: String,
    pub district_type: DistrictType,
    /// Fraction of the city's population; shares within a city sum to 1
    pub population_share: f64,
    pub dominant_species: Option<SpeciesId>,
    pub features: Vec<String>,
}

/// Inclusive district-count range for a city population
pub fn district_count_range(population: u64) -> (usize, usize) {
    if population > 10_000_000 {
        (8, 15)
    } else if population > 1_000_000 {
        (5, 10)
    } else if population > 100_000 {
        (3, 6)
    } else if population > 10_000 {
        (2, 4)
    } else {
        (1, 2)
    }
}

#[derive(Clone, Debug, Default)]
pub struct DistrictGenerator;

impl DistrictGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Districts for a city; `species_shares` is ordered largest first
    pub fn generate(
        &self,
        city_population: u64,
        species_shares: &[SpeciesShare],
        phonemes: &PhonemeSet,
        rng: &mut RandomSource,
    ) -> Vec<District> {
        let (min, max) = district_count_range(city_population);
        let count = rng.range_usize(min, max);

        let weights: Vec<f64> = (0..count).map(|_| rng.range_f64(0.1, 1.0)).collect();
        let weight_sum: f64 = weights.iter().sum();

        weights
            .into_iter()
            .map(|weight| {
                let district_type = *rng.pick(&DistrictType::ALL);
                let dominant_species = if species_shares.is_empty() {
                    None
                } else if rng.chance(MAJORITY_DISTRICT_CHANCE) {
                    Some(species_shares[0].species)
                } else {
                    Some(rng.pick(species_shares).species)
                };

                let feature_count = rng.range_usize(1, 3);
                let features = rng
                    .subset(district_type.features(), feature_count)
                    .into_iter()
                    .map(str::to_string)
                    .collect();

                District {
                    id: DistrictId(rng.uuid()),
                    name: format!(
                        "{} {}",
                        generate_name(phonemes, NameKind::Location, rng),
                        district_type
                    ),
                    district_type,
                    population_share: weight / weight_sum,
                    dominant_species,
                    features,
                }
            })
            .collect()
    }
}
