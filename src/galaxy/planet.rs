//! Planet and moon generation
//!
//! Temperature, gravity, habitability and population are pure functions of
//! the sampled fields plus explicit noise terms, so each formula is testable
//! on its own. Moons run through the same pipeline one level deep.

use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::core::types::{clamp, roman_numeral, PlanetId, SCORE_MAX, SCORE_MIN};
use crate::galaxy::atmosphere::{Atmosphere, Gas};
use crate::galaxy::political::{City, Government};
use crate::galaxy::star::{ResourceKind, StarClass};

/// Temperature every habitability tier is measured against, degrees Celsius
pub const BASELINE_TEMPERATURE: f64 = 15.0;

/// Gravity every habitability tier is measured against, in G
pub const BASELINE_GRAVITY: f64 = 1.0;

/// Cooling per orbital step outward, degrees Celsius
pub const ORBITAL_COOLING: f64 = 30.0;

/// Half-width of the temperature noise band
pub const TEMPERATURE_NOISE: f64 = 20.0;

/// Extra cooling applied to moons relative to their parent's orbit
pub const MOON_TEMPERATURE_BIAS: f64 = -25.0;

/// Moons have half the gravity the planet pipeline would produce
pub const MOON_GRAVITY_FACTOR: f64 = 0.5;

/// Below this habitability a world is usually left uninhabited
pub const UNINHABITED_THRESHOLD: u8 = 3;

/// Chance that a world below the threshold is forced to zero population
pub const UNINHABITED_CHANCE: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum PlanetType {
    Terrestrial,
    Ocean,
    Desert,
    Jungle,
    Arctic,
    Volcanic,
    Barren,
    #[display(fmt = "Gas Giant")]
    GasGiant,
    #[display(fmt = "Ice Giant")]
    IceGiant,
}

impl PlanetType {
    /// Sampling weights for planets
    const PLANET_WEIGHTS: [(PlanetType, f64); 9] = [
        (PlanetType::Terrestrial, 0.12),
        (PlanetType::Ocean, 0.08),
        (PlanetType::Desert, 0.12),
        (PlanetType::Jungle, 0.05),
        (PlanetType::Arctic, 0.12),
        (PlanetType::Volcanic, 0.08),
        (PlanetType::Barren, 0.18),
        (PlanetType::GasGiant, 0.15),
        (PlanetType::IceGiant, 0.10),
    ];

    /// Sampling weights for moons (rocky bodies only)
    const MOON_WEIGHTS: [(PlanetType, f64); 7] = [
        (PlanetType::Barren, 0.35),
        (PlanetType::Arctic, 0.25),
        (PlanetType::Volcanic, 0.10),
        (PlanetType::Desert, 0.10),
        (PlanetType::Terrestrial, 0.08),
        (PlanetType::Ocean, 0.07),
        (PlanetType::Jungle, 0.05),
    ];

    pub fn is_giant(&self) -> bool {
        matches!(self, PlanetType::GasGiant | PlanetType::IceGiant)
    }

    /// Additive temperature term, degrees Celsius
    pub fn temperature_offset(&self) -> f64 {
        match self {
            PlanetType::Terrestrial => -45.0,
            PlanetType::Ocean => -50.0,
            PlanetType::Desert => -20.0,
            PlanetType::Jungle => -35.0,
            PlanetType::Arctic => -90.0,
            PlanetType::Volcanic => 150.0,
            PlanetType::Barren => -60.0,
            PlanetType::GasGiant => -120.0,
            PlanetType::IceGiant => -170.0,
        }
    }

    /// Multiplicative gravity term
    pub fn density_factor(&self) -> f64 {
        match self {
            PlanetType::Terrestrial => 1.0,
            PlanetType::Ocean => 0.9,
            PlanetType::Desert => 0.95,
            PlanetType::Jungle => 1.0,
            PlanetType::Arctic => 0.9,
            PlanetType::Volcanic => 1.2,
            PlanetType::Barren => 0.8,
            PlanetType::GasGiant => 1.0,
            PlanetType::IceGiant => 0.8,
        }
    }

    fn sizes(&self) -> &'static [PlanetSize] {
        use PlanetSize::*;
        match self {
            PlanetType::GasGiant | PlanetType::IceGiant => &[Large, Massive],
            PlanetType::Terrestrial
            | PlanetType::Ocean
            | PlanetType::Jungle
            | PlanetType::Desert => &[Small, Medium, Large],
            PlanetType::Arctic | PlanetType::Volcanic | PlanetType::Barren => {
                &[Tiny, Small, Medium, Large]
            }
        }
    }

    /// Curated atmosphere options; planets never combine gases freely
    pub fn atmosphere_options(&self) -> &'static [&'static [Gas]] {
        use Gas::*;
        match self {
            PlanetType::Terrestrial => &[
                &[Nitrogen, Oxygen],
                &[Nitrogen, Oxygen, Argon],
                &[Nitrogen, CarbonDioxide],
                &[CarbonDioxide],
            ],
            PlanetType::Ocean => &[
                &[Nitrogen, Oxygen, WaterVapor],
                &[Nitrogen, Oxygen],
                &[Nitrogen, CarbonDioxide, WaterVapor],
            ],
            PlanetType::Desert => &[
                &[CarbonDioxide],
                &[Nitrogen, CarbonDioxide],
                &[Nitrogen, Oxygen],
                &[],
            ],
            PlanetType::Jungle => &[
                &[Nitrogen, Oxygen, WaterVapor],
                &[Nitrogen, Oxygen, CarbonDioxide],
            ],
            PlanetType::Arctic => &[&[Nitrogen], &[Nitrogen, Oxygen], &[CarbonDioxide], &[]],
            PlanetType::Volcanic => &[
                &[SulfurDioxide, CarbonDioxide],
                &[CarbonDioxide, WaterVapor, SulfurDioxide],
                &[CarbonDioxide],
            ],
            PlanetType::Barren => &[&[], &[CarbonDioxide], &[Argon]],
            PlanetType::GasGiant => &[
                &[Hydrogen, Helium],
                &[Hydrogen, Helium, Methane],
                &[Hydrogen, Helium, Ammonia],
            ],
            PlanetType::IceGiant => &[
                &[Hydrogen, Helium, Methane],
                &[Hydrogen, Helium, Methane, Ammonia],
            ],
        }
    }

    /// Resources this world type adds to its system
    pub fn resource_contributions(&self) -> &'static [ResourceKind] {
        use ResourceKind::*;
        match self {
            PlanetType::Terrestrial => &[Metals, Water, Organics, Silicates],
            PlanetType::Ocean => &[Water, Organics],
            PlanetType::Desert => &[Silicates, Metals, RareElements],
            PlanetType::Jungle => &[Organics, Water],
            PlanetType::Arctic => &[Water, RareElements],
            PlanetType::Volcanic => &[Metals, Radioactives, Crystals],
            PlanetType::Barren => &[Metals, Silicates, RareElements],
            PlanetType::GasGiant => &[Hydrogen, Helium],
            PlanetType::IceGiant => &[Hydrogen, Helium, Water],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum PlanetSize {
    Tiny,
    Small,
    Medium,
    Large,
    Massive,
}

impl PlanetSize {
    const MOON_SIZES: [PlanetSize; 3] = [PlanetSize::Tiny, PlanetSize::Small, PlanetSize::Medium];

    /// Multiplicative gravity term
    pub fn gravity_factor(&self) -> f64 {
        match self {
            PlanetSize::Tiny => 0.3,
            PlanetSize::Small => 0.6,
            PlanetSize::Medium => 1.0,
            PlanetSize::Large => 1.5,
            PlanetSize::Massive => 2.5,
        }
    }

    /// Population a perfectly habitable world of this size supports
    pub fn capacity(&self) -> f64 {
        match self {
            PlanetSize::Tiny => 10_000_000.0,
            PlanetSize::Small => 100_000_000.0,
            PlanetSize::Medium => 1_000_000_000.0,
            PlanetSize::Large => 5_000_000_000.0,
            PlanetSize::Massive => 10_000_000_000.0,
        }
    }

    /// Inclusive moon-count range for a world of this size
    pub fn moon_range(&self) -> (usize, usize) {
        match self {
            PlanetSize::Tiny => (0, 0),
            PlanetSize::Small => (0, 1),
            PlanetSize::Medium => (0, 2),
            PlanetSize::Large => (1, 4),
            PlanetSize::Massive => (2, 8),
        }
    }
}

/// Moon-count range for giants, regardless of size
pub const GIANT_MOON_RANGE: (usize, usize) = (3, 12);

/// A planet or a moon
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub planet_type: PlanetType,
    pub size: PlanetSize,
    pub atmosphere: Atmosphere,
    /// Mean surface temperature, degrees Celsius
    pub temperature: f64,
    /// Surface gravity, G
    pub gravity: f64,
    pub habitability: u8,
    pub population: u64,
    pub governments: Vec<Government>,
    pub cities: Vec<City>,
    /// Always empty on moons
    pub moons: Vec<Planet>,
    /// 1-based position around the star (planets) or the parent (moons)
    pub orbital_index: u32,
    pub day_length_hours: f64,
    pub year_length_days: f64,
    pub resources: BTreeMap<ResourceKind, u32>,
    pub is_moon: bool,
}

impl Planet {
    /// Own population plus that of every moon
    pub fn total_population(&self) -> u64 {
        self.population + self.moons.iter().map(|m| m.population).sum::<u64>()
    }

    /// This body followed by its moons
    pub fn bodies(&self) -> impl Iterator<Item = &Planet> {
        std::iter::once(self).chain(self.moons.iter())
    }

    pub fn is_inhabited(&self) -> bool {
        self.population > 0
    }
}

/// `classOffset(star) - 30*(orbitalIndex-1) + typeOffset(type) + noise`
pub fn calculate_temperature(
    star_class: StarClass,
    orbital_index: u32,
    planet_type: PlanetType,
    noise: f64,
) -> f64 {
    star_class.temperature_offset() - ORBITAL_COOLING * (orbital_index as f64 - 1.0)
        + planet_type.temperature_offset()
        + noise
}

/// `1.0 * sizeFactor * densityFactor * noise`
pub fn calculate_gravity(size: PlanetSize, planet_type: PlanetType, noise: f64) -> f64 {
    BASELINE_GRAVITY * size.gravity_factor() * planet_type.density_factor() * noise
}

/// Five-tier term on the distance from 15 degrees Celsius
pub fn temperature_term(temperature: f64) -> i32 {
    let d = (temperature - BASELINE_TEMPERATURE).abs();
    if d <= 10.0 {
        2
    } else if d <= 30.0 {
        1
    } else if d <= 50.0 {
        -1
    } else if d <= 100.0 {
        -3
    } else {
        -5
    }
}

/// Five-tier term on the distance from 1 G
pub fn gravity_term(gravity: f64) -> i32 {
    let d = (gravity - BASELINE_GRAVITY).abs();
    if d <= 0.2 {
        2
    } else if d <= 0.5 {
        1
    } else if d <= 1.0 {
        -1
    } else if d <= 2.0 {
        -3
    } else {
        -5
    }
}

/// Base 5 plus atmosphere, temperature and gravity terms, clamped to 1-10
pub fn calculate_habitability(atmosphere: &Atmosphere, temperature: f64, gravity: f64) -> u8 {
    let raw = 5
        + atmosphere.habitability_term()
        + temperature_term(temperature)
        + gravity_term(gravity);
    clamp(raw, SCORE_MIN, SCORE_MAX) as u8
}

/// `floor(capacity * scale * (h/10)^2 * factor)`
pub fn calculate_population(size: PlanetSize, habitability: u8, scale: f64, factor: f64) -> u64 {
    let h = habitability as f64 / 10.0;
    (size.capacity() * scale * h * h * factor).floor().max(0.0) as u64
}

/// Naming and stellar context handed down from the system generator
#[derive(Clone, Debug)]
pub struct OrbitContext<'a> {
    pub star_class: StarClass,
    pub system_name: &'a str,
}

#[derive(Clone, Debug)]
pub struct PlanetGenerator {
    population_scale: f64,
}

impl PlanetGenerator {
    pub fn new(population_scale: f64) -> Self {
        Self { population_scale }
    }

    /// Generate the planet at `orbital_index` (1-based) with its moons
    pub fn generate_planet(
        &self,
        context: &OrbitContext,
        orbital_index: u32,
        rng: &mut RandomSource,
    ) -> Planet {
        let planet_type = *rng.weighted(&PlanetType::PLANET_WEIGHTS);
        let size = *rng.pick(planet_type.sizes());
        let name = format!("{} {}", context.system_name, roman_numeral(orbital_index));

        let mut planet = self.generate_body(
            context.star_class,
            orbital_index,
            planet_type,
            size,
            name,
            false,
            rng,
        );
        planet.year_length_days =
            365.0 * (orbital_index as f64).powf(1.5) * rng.range_f64(0.8, 1.2);

        let (min, max) = if planet_type.is_giant() {
            GIANT_MOON_RANGE
        } else {
            size.moon_range()
        };
        let moon_count = rng.range_usize(min, max);
        planet.moons = (0..moon_count)
            .map(|i| self.generate_moon(context, &planet, i as u32 + 1, rng))
            .collect();

        planet
    }

    /// Moons reuse the planet pipeline: colder, half gravity, never nested
    pub fn generate_moon(
        &self,
        context: &OrbitContext,
        parent: &Planet,
        moon_index: u32,
        rng: &mut RandomSource,
    ) -> Planet {
        let planet_type = *rng.weighted(&PlanetType::MOON_WEIGHTS);
        let size = *rng.pick(&PlanetSize::MOON_SIZES);
        let name = format!("{} {}", parent.name, moon_letter(moon_index));

        let mut moon = self.generate_body(
            context.star_class,
            parent.orbital_index,
            planet_type,
            size,
            name,
            true,
            rng,
        );
        moon.orbital_index = moon_index;
        moon.year_length_days = parent.year_length_days;
        moon
    }

    #[allow(clippy::too_many_arguments)]
    fn generate_body(
        &self,
        star_class: StarClass,
        orbital_index: u32,
        planet_type: PlanetType,
        size: PlanetSize,
        name: String,
        is_moon: bool,
        rng: &mut RandomSource,
    ) -> Planet {
        let id = PlanetId(rng.uuid());
        let atmosphere = Atmosphere::new(*rng.pick(planet_type.atmosphere_options()));

        let noise = rng.range_f64(-TEMPERATURE_NOISE, TEMPERATURE_NOISE);
        let mut temperature = calculate_temperature(star_class, orbital_index, planet_type, noise);
        if is_moon {
            temperature += MOON_TEMPERATURE_BIAS;
        }

        let mut gravity = calculate_gravity(size, planet_type, rng.range_f64(0.8, 1.2));
        if is_moon {
            gravity *= MOON_GRAVITY_FACTOR;
        }

        let habitability = calculate_habitability(&atmosphere, temperature, gravity);

        let factor = rng.range_f64(0.1, 1.0);
        let mut population =
            calculate_population(size, habitability, self.population_scale, factor);
        if habitability < UNINHABITED_THRESHOLD && rng.chance(UNINHABITED_CHANCE) {
            population = 0;
        }

        let day_length_hours = rng.range_f64(6.0, 120.0);

        let mut resources = BTreeMap::new();
        for &kind in planet_type.resource_contributions() {
            resources.insert(kind, rng.range(1, 5) as u32);
        }

        Planet {
            id,
            name,
            planet_type,
            size,
            atmosphere,
            temperature,
            gravity,
            habitability,
            population,
            governments: Vec::new(),
            cities: Vec::new(),
            moons: Vec::new(),
            orbital_index,
            day_length_hours,
            year_length_days: 0.0,
            resources,
            is_moon,
        }
    }
}

fn moon_letter(index: u32) -> String {
    let offset = (index.saturating_sub(1) % 26) as u8;
    ((b'a' + offset) as char).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> OrbitContext<'static> {
        OrbitContext {
            star_class: StarClass::G,
            system_name: "Sol",
        }
    }

    #[test]
    fn test_reference_world_is_perfect() {
        let atmosphere = Atmosphere::new(&[Gas::Oxygen, Gas::Nitrogen]);
        assert_eq!(calculate_habitability(&atmosphere, 15.0, 1.0), 10);
    }

    #[test]
    fn test_habitability_tiers() {
        let inert = Atmosphere::new(&[Gas::CarbonDioxide]);
        // 5 + 0 + 1 (25 deg off) + 1 (0.4 G off)
        assert_eq!(calculate_habitability(&inert, 40.0, 1.4), 7);
        // 5 - 4 - 5 - 5 clamps to 1
        assert_eq!(calculate_habitability(&Atmosphere::none(), -200.0, 4.0), 1);
    }

    #[test]
    fn test_temperature_term_boundaries() {
        assert_eq!(temperature_term(25.0), 2);
        assert_eq!(temperature_term(-15.0), 1);
        assert_eq!(temperature_term(65.0), -1);
        assert_eq!(temperature_term(115.0), -3);
        assert_eq!(temperature_term(-86.0), -5);
    }

    #[test]
    fn test_gravity_term_boundaries() {
        assert_eq!(gravity_term(1.2), 2);
        assert_eq!(gravity_term(0.5), 1);
        assert_eq!(gravity_term(2.0), -1);
        assert_eq!(gravity_term(3.0), -3);
        assert_eq!(gravity_term(3.5), -5);
    }

    #[test]
    fn test_temperature_formula_terms() {
        // G offset 60, third orbit cools by 60, terrestrial -45, noise 5
        let t = calculate_temperature(StarClass::G, 3, PlanetType::Terrestrial, 5.0);
        assert!((t - (60.0 - 60.0 - 45.0 + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_hostile_worlds_mostly_empty() {
        // Outer G orbits are far below freezing, so habitability bottoms out.
        // Even habitability 1 on a tiny world floors to 10,000 people, so a
        // zero population can only come from the override.
        let generator = PlanetGenerator::new(1.0);
        let (mut hostile, mut empty) = (0u32, 0u32);
        for seed in 0..400 {
            for orbit in 6..=10 {
                let mut rng = RandomSource::seeded(seed);
                let planet = generator.generate_planet(&context(), orbit, &mut rng);
                for body in planet.bodies().filter(|b| b.habitability < UNINHABITED_THRESHOLD) {
                    hostile += 1;
                    if body.population == 0 {
                        empty += 1;
                    }
                }
            }
        }
        assert!(hostile >= 500, "only {} hostile bodies", hostile);
        let rate = empty as f64 / hostile as f64;
        assert!((0.62..=0.78).contains(&rate), "empty rate {}", rate);
    }

    #[test]
    fn test_population_formula() {
        assert_eq!(calculate_population(PlanetSize::Medium, 10, 1.0, 1.0), 1_000_000_000);
        // 1e9 * 0.5^2 * 0.5
        assert_eq!(calculate_population(PlanetSize::Medium, 5, 1.0, 0.5), 125_000_000);
        assert_eq!(calculate_population(PlanetSize::Tiny, 10, 0.0, 1.0), 0);
    }

    #[test]
    fn test_moons_never_nest_and_bounded() {
        let generator = PlanetGenerator::new(1.0);
        for seed in 0..200 {
            let mut rng = RandomSource::seeded(seed);
            let planet = generator.generate_planet(&context(), 2, &mut rng);
            let (min, max) = if planet.planet_type.is_giant() {
                GIANT_MOON_RANGE
            } else {
                planet.size.moon_range()
            };
            assert!(planet.moons.len() >= min && planet.moons.len() <= max);
            for moon in &planet.moons {
                assert!(moon.moons.is_empty());
                assert!(moon.is_moon);
                assert!(!moon.planet_type.is_giant());
                assert!(moon.size <= PlanetSize::Medium);
            }
        }
    }

    #[test]
    fn test_habitability_and_population_consistent() {
        let generator = PlanetGenerator::new(1.0);
        for seed in 0..200 {
            let planet = generator.generate_planet(&context(), 1, &mut RandomSource::seeded(seed));
            for body in planet.bodies() {
                assert!((1..=10).contains(&body.habitability));
                assert_eq!(
                    body.habitability,
                    calculate_habitability(&body.atmosphere, body.temperature, body.gravity)
                );
                let ceiling = calculate_population(body.size, body.habitability, 1.0, 1.0);
                assert!(body.population <= ceiling);
            }
        }
    }

    #[test]
    fn test_atmosphere_from_curated_options() {
        let generator = PlanetGenerator::new(1.0);
        for seed in 0..100 {
            let planet = generator.generate_planet(&context(), 4, &mut RandomSource::seeded(seed));
            let options = planet.planet_type.atmosphere_options();
            assert!(options.iter().any(|o| *o == planet.atmosphere.gases.as_slice()));
        }
    }

    #[test]
    fn test_names_follow_designation() {
        let generator = PlanetGenerator::new(1.0);
        let planet = generator.generate_planet(&context(), 3, &mut RandomSource::seeded(8));
        assert_eq!(planet.name, "Sol III");
        if let Some(moon) = planet.moons.first() {
            assert_eq!(moon.name, "Sol III a");
            assert_eq!(moon.orbital_index, 1);
        }
    }

    #[test]
    fn test_total_population_includes_moons() {
        let generator = PlanetGenerator::new(1.0);
        let planet = generator.generate_planet(&context(), 1, &mut RandomSource::seeded(21));
        let expected: u64 = planet.bodies().map(|b| b.population).sum();
        assert_eq!(planet.total_population(), expected);
    }
}
