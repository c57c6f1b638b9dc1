//! Civilizations assembled from species and the systems they dominate

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::config::GalaxyGenerationConfig;
use crate::core::random::RandomSource;
use crate::core::types::{
    clamp, CityId, CivilizationId, GovernmentId, PlanetId, SpeciesId, SystemId,
};
use crate::galaxy::political::{Government, GovernmentType, Ideology};
use crate::galaxy::species::{SocialStructure, Species, TechField};
use crate::galaxy::star::StarSystem;
use crate::naming::{generate_name, NameKind};

/// Jitter applied to the galaxy conflict level per civilization
const STANCE_JITTER: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DiplomaticStance {
    Peaceful,
    Neutral,
    Guarded,
    Hostile,
}

impl DiplomaticStance {
    pub fn from_tension(tension: f64) -> Self {
        if tension < 0.25 {
            DiplomaticStance::Peaceful
        } else if tension < 0.5 {
            DiplomaticStance::Neutral
        } else if tension < 0.75 {
            DiplomaticStance::Guarded
        } else {
            DiplomaticStance::Hostile
        }
    }
}

/// Where a civilization is governed from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalRef {
    pub system: SystemId,
    /// Planet or moon
    pub planet: PlanetId,
    pub government: GovernmentId,
    pub city: Option<CityId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GovernmentSummary {
    pub dominant_type: Option<GovernmentType>,
    pub government_count: usize,
    pub average_stability: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CultureSummary {
    pub social_structure: SocialStructure,
    pub values: Vec<String>,
    pub dominant_ideology: Option<Ideology>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TechnologySummary {
    pub level: u8,
    pub unique_technologies: Vec<String>,
    pub strongest_field: Option<TechField>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiplomacySummary {
    pub stance: DiplomaticStance,
    pub trade_partners: Vec<CivilizationId>,
    pub rivals: Vec<CivilizationId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Civilization {
    pub id: CivilizationId,
    pub name: String,
    pub founding_species: SpeciesId,
    /// Systems listing the founder among their dominant species
    pub territory: Vec<SystemId>,
    pub population: u64,
    /// None when the founder governs nothing
    pub capital: Option<CapitalRef>,
    pub government: GovernmentSummary,
    pub culture: CultureSummary,
    pub technology: TechnologySummary,
    pub diplomacy: DiplomacySummary,
}

/// First value with the highest count, in encounter order
fn most_common<T: Copy + PartialEq>(items: impl IntoIterator<Item = T>) -> Option<T> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(value, _)| *value == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// A government together with where it sits
struct Seat<'a> {
    system: &'a StarSystem,
    planet: PlanetId,
    government: &'a Government,
}

#[derive(Clone, Debug)]
pub struct CivilizationAssembler {
    conflict_level: f64,
    trade_network_density: f64,
}

impl CivilizationAssembler {
    pub fn new(config: &GalaxyGenerationConfig) -> Self {
        Self {
            conflict_level: config.conflict_level,
            trade_network_density: config.trade_network_density,
        }
    }

    /// Bind the first `count` species (clamped to those available) to a
    /// civilization each
    pub fn assemble(
        &self,
        species: &[Species],
        systems: &[StarSystem],
        count: usize,
        rng: &mut RandomSource,
    ) -> Vec<Civilization> {
        let count = count.min(species.len());
        let mut civilizations: Vec<Civilization> = species[..count]
            .iter()
            .map(|founder| self.assemble_one(founder, systems, rng))
            .collect();
        self.link_diplomacy(&mut civilizations, rng);

        for civilization in &civilizations {
            tracing::debug!(
                civilization = %civilization.name,
                systems = civilization.territory.len(),
                population = civilization.population,
                stance = %civilization.diplomacy.stance,
                "Assembled civilization"
            );
        }
        civilizations
    }

    fn assemble_one(
        &self,
        founder: &Species,
        systems: &[StarSystem],
        rng: &mut RandomSource,
    ) -> Civilization {
        let id = CivilizationId(rng.uuid());
        let name = generate_name(&founder.language.phonemes, NameKind::Organization, rng);

        let territory: Vec<SystemId> = systems
            .iter()
            .filter(|s| s.dominant_species.contains(&founder.id))
            .map(|s| s.id)
            .collect();

        let seats: Vec<Seat> = systems
            .iter()
            .flat_map(|system| {
                system.bodies().flat_map(move |body| {
                    body.governments.iter().map(move |government| Seat {
                        system,
                        planet: body.id,
                        government,
                    })
                })
            })
            .filter(|seat| seat.government.dominant_species == Some(founder.id))
            .collect();

        let population = seats
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.government.population));

        let mut largest: Option<&Seat> = None;
        for seat in &seats {
            if largest.map_or(true, |l| seat.government.population > l.government.population) {
                largest = Some(seat);
            }
        }
        let capital = largest.map(|seat| CapitalRef {
            system: seat.system.id,
            planet: seat.planet,
            government: seat.government.id,
            city: seat.government.capital,
        });

        let government = GovernmentSummary {
            dominant_type: most_common(seats.iter().map(|s| s.government.government_type)),
            government_count: seats.len(),
            average_stability: if seats.is_empty() {
                0.0
            } else {
                seats.iter().map(|s| s.government.stability as f64).sum::<f64>()
                    / seats.len() as f64
            },
        };

        let culture = CultureSummary {
            social_structure: founder.cultural.social_structure,
            values: founder.cultural.values.clone(),
            dominant_ideology: most_common(seats.iter().map(|s| s.government.ideology)),
        };

        let technology = TechnologySummary {
            level: founder.technology.level,
            unique_technologies: founder.technology.unique_technologies.clone(),
            strongest_field: founder.technology.strongest_field(),
        };

        let tension = clamp(
            self.conflict_level + rng.range_f64(-STANCE_JITTER, STANCE_JITTER),
            0.0,
            1.0,
        );

        Civilization {
            id,
            name,
            founding_species: founder.id,
            territory,
            population,
            capital,
            government,
            culture,
            technology,
            diplomacy: DiplomacySummary {
                stance: DiplomaticStance::from_tension(tension),
                trade_partners: Vec::new(),
                rivals: Vec::new(),
            },
        }
    }

    /// Each pair trades with probability `trade_network_density`; pairs
    /// that do not trade become rivals with probability `conflict_level`.
    /// Relations are symmetric.
    fn link_diplomacy(&self, civilizations: &mut [Civilization], rng: &mut RandomSource) {
        let ids: Vec<CivilizationId> = civilizations.iter().map(|c| c.id).collect();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                if rng.chance(self.trade_network_density) {
                    civilizations[i].diplomacy.trade_partners.push(ids[j]);
                    civilizations[j].diplomacy.trade_partners.push(ids[i]);
                } else if rng.chance(self.conflict_level) {
                    civilizations[i].diplomacy.rivals.push(ids[j]);
                    civilizations[j].diplomacy.rivals.push(ids[i]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::species::SpeciesGenerator;
    use crate::galaxy::star::StarSystemGenerator;

    fn small_galaxy(config: &GalaxyGenerationConfig) -> (Vec<Species>, Vec<StarSystem>) {
        let species: Vec<Species> = (0..3)
            .map(|i| SpeciesGenerator::new(config).generate(&mut RandomSource::seeded(i)))
            .collect();
        let generator = StarSystemGenerator::new(config);
        let systems = (0..8)
            .map(|i| generator.generate(&mut RandomSource::seeded(100 + i), &species))
            .collect();
        (species, systems)
    }

    #[test]
    fn test_most_common_prefers_first_on_tie() {
        assert_eq!(most_common([2, 1, 1, 2]), Some(2));
        assert_eq!(most_common([3, 1, 1]), Some(1));
        assert_eq!(most_common(Vec::<u8>::new()), None);
    }

    #[test]
    fn test_count_clamped_to_species() {
        let config = GalaxyGenerationConfig::default();
        let (species, systems) = small_galaxy(&config);
        let assembler = CivilizationAssembler::new(&config);
        let civs = assembler.assemble(&species, &systems, 10, &mut RandomSource::seeded(1));
        assert_eq!(civs.len(), species.len());
        for (civ, founder) in civs.iter().zip(&species) {
            assert_eq!(civ.founding_species, founder.id);
        }
    }

    #[test]
    fn test_territory_and_capital() {
        let config = GalaxyGenerationConfig::default();
        let (species, systems) = small_galaxy(&config);
        let assembler = CivilizationAssembler::new(&config);
        let civs = assembler.assemble(&species, &systems, 3, &mut RandomSource::seeded(2));

        for civ in &civs {
            for system_id in &civ.territory {
                let system = systems.iter().find(|s| s.id == *system_id).unwrap();
                assert!(system.dominant_species.contains(&civ.founding_species));
            }
            if let Some(capital) = civ.capital {
                assert!(civ.territory.contains(&capital.system));
                let system = systems.iter().find(|s| s.id == capital.system).unwrap();
                let body = system.bodies().find(|b| b.id == capital.planet).unwrap();
                let seat = body.governments.iter().find(|g| g.id == capital.government).unwrap();
                assert_eq!(seat.dominant_species, Some(civ.founding_species));
                assert_eq!(seat.capital, capital.city);
                assert!(seat.population <= civ.population);
            } else {
                assert_eq!(civ.population, 0);
            }
        }
    }

    #[test]
    fn test_diplomacy_is_symmetric() {
        let mut config = GalaxyGenerationConfig::default();
        config.trade_network_density = 0.5;
        config.conflict_level = 1.0;
        let (species, systems) = small_galaxy(&config);
        let civs = CivilizationAssembler::new(&config).assemble(
            &species,
            &systems,
            3,
            &mut RandomSource::seeded(3),
        );

        for civ in &civs {
            assert_eq!(civ.diplomacy.stance, DiplomaticStance::Hostile);
            assert_eq!(
                civ.diplomacy.trade_partners.len() + civ.diplomacy.rivals.len(),
                civs.len() - 1
            );
            for partner in &civ.diplomacy.trade_partners {
                let other = civs.iter().find(|c| c.id == *partner).unwrap();
                assert!(other.diplomacy.trade_partners.contains(&civ.id));
            }
            for rival in &civ.diplomacy.rivals {
                let other = civs.iter().find(|c| c.id == *rival).unwrap();
                assert!(other.diplomacy.rivals.contains(&civ.id));
            }
        }
    }
}
