//! Political layer: governments, cities and districts of inhabited bodies

pub mod city;
pub mod district;
pub mod government;

pub use city::{City, CityGenerator, CityType, Infrastructure, SpeciesShare};
pub use district::{District, DistrictGenerator, DistrictType};
pub use government::{Government, GovernmentGenerator, GovernmentType, Ideology, Leader};

use crate::core::random::RandomSource;
use crate::galaxy::planet::Planet;
use crate::galaxy::species::Species;

#[derive(Clone, Debug)]
pub struct PoliticalGenerator {
    governments: GovernmentGenerator,
    cities: CityGenerator,
}

impl PoliticalGenerator {
    pub fn new(political_complexity: f64) -> Self {
        Self {
            governments: GovernmentGenerator::new(political_complexity),
            cities: CityGenerator::new(),
        }
    }

    /// Fill in governments and cities of a planet or moon
    ///
    /// Uninhabited bodies are left untouched. `settlers` is the system's
    /// dominant species set.
    pub fn populate(&self, body: &mut Planet, settlers: &[&Species], rng: &mut RandomSource) {
        if !body.is_inhabited() {
            return;
        }

        let mut governments = self.governments.generate(body.population, settlers, rng);
        let cities = self
            .cities
            .generate(body.population, &governments, settlers, rng);

        for government in governments.iter_mut() {
            government.territory = cities
                .iter()
                .filter(|c| c.government == government.id)
                .map(|c| c.id)
                .collect();
            government.capital = government.territory.first().copied();
        }

        body.governments = governments;
        body.cities = cities;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GalaxyGenerationConfig;
    use crate::galaxy::planet::{OrbitContext, PlanetGenerator};
    use crate::galaxy::species::SpeciesGenerator;
    use crate::galaxy::star::StarClass;

    fn inhabited_planet(rng: &mut RandomSource) -> Planet {
        let generator = PlanetGenerator::new(1.0);
        let ctx = OrbitContext {
            star_class: StarClass::G,
            system_name: "Test",
        };
        loop {
            let planet = generator.generate_planet(&ctx, 1, rng);
            if planet.population > 1_000_000 {
                return planet;
            }
        }
    }

    #[test]
    fn test_every_government_has_territory() {
        let config = GalaxyGenerationConfig::default();
        let species: Vec<Species> = (0..3)
            .map(|i| SpeciesGenerator::new(&config).generate(&mut RandomSource::seeded(i)))
            .collect();
        let settlers: Vec<&Species> = species.iter().collect();
        let political = PoliticalGenerator::new(0.5);

        for seed in 0..20 {
            let mut rng = RandomSource::seeded(seed);
            let mut planet = inhabited_planet(&mut rng);
            political.populate(&mut planet, &settlers, &mut rng);

            let total: u64 = planet.governments.iter().map(|g| g.population).sum();
            assert_eq!(total, planet.population);
            assert_eq!(planet.governments[0].capital, Some(planet.cities[0].id));
            for government in &planet.governments {
                assert!(!government.territory.is_empty());
                assert!(government.dominant_species.is_some());
            }
            for city in &planet.cities {
                let owner = planet
                    .governments
                    .iter()
                    .find(|g| g.id == city.government)
                    .unwrap();
                assert!(owner.territory.contains(&city.id));
            }
        }
    }

    #[test]
    fn test_uninhabited_body_untouched() {
        let mut rng = RandomSource::seeded(1);
        let mut planet = inhabited_planet(&mut rng);
        planet.population = 0;
        planet.governments.clear();
        planet.cities.clear();

        PoliticalGenerator::new(0.5).populate(&mut planet, &[], &mut rng);
        assert!(planet.governments.is_empty());
        assert!(planet.cities.is_empty());
    }
}
