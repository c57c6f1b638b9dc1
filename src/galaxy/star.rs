//! Star system generation

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::config::GalaxyGenerationConfig;
use crate::core::random::RandomSource;
use crate::core::types::{SpeciesId, SystemId, Vec3};
use crate::galaxy::planet::{OrbitContext, Planet, PlanetGenerator};
use crate::galaxy::political::PoliticalGenerator;
use crate::galaxy::species::Species;
use crate::naming::{generate_name, NameKind, PhonemeSet};

/// Most dominant species a single system can list
pub const MAX_DOMINANT_SPECIES: usize = 3;

/// Disk half-height as a fraction of the galaxy radius
pub const DISK_HEIGHT_FRACTION: f64 = 0.05;

/// Younger systems (Gyr) still carry formation debris
pub const YOUNG_SYSTEM_AGE: f64 = 1.0;

/// Older systems (Gyr) suffer from stellar aging
pub const OLD_SYSTEM_AGE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum StarClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    #[display(fmt = "White Dwarf")]
    WhiteDwarf,
    #[display(fmt = "Brown Dwarf")]
    BrownDwarf,
    #[display(fmt = "Neutron Star")]
    NeutronStar,
    #[display(fmt = "Black Hole")]
    BlackHole,
}

impl StarClass {
    pub const ALL: [StarClass; 11] = [
        StarClass::O,
        StarClass::B,
        StarClass::A,
        StarClass::F,
        StarClass::G,
        StarClass::K,
        StarClass::M,
        StarClass::WhiteDwarf,
        StarClass::BrownDwarf,
        StarClass::NeutronStar,
        StarClass::BlackHole,
    ];

    /// Relative abundance in the galaxy
    pub fn weight(&self) -> f64 {
        match self {
            StarClass::O => 0.01,
            StarClass::B => 0.03,
            StarClass::A => 0.06,
            StarClass::F => 0.10,
            StarClass::G => 0.15,
            StarClass::K => 0.18,
            StarClass::M => 0.30,
            StarClass::WhiteDwarf => 0.07,
            StarClass::BrownDwarf => 0.06,
            StarClass::NeutronStar => 0.02,
            StarClass::BlackHole => 0.02,
        }
    }

    /// Age range in billions of years
    pub fn age_range(&self) -> (f64, f64) {
        match self {
            StarClass::O => (0.001, 0.1),
            StarClass::B => (0.01, 0.5),
            StarClass::A => (0.1, 2.0),
            StarClass::F => (1.0, 7.0),
            StarClass::G => (1.0, 10.0),
            StarClass::K => (1.0, 15.0),
            StarClass::M => (1.0, 13.0),
            StarClass::WhiteDwarf => (1.0, 13.0),
            StarClass::BrownDwarf => (0.5, 13.0),
            StarClass::NeutronStar => (0.001, 10.0),
            StarClass::BlackHole => (0.001, 13.0),
        }
    }

    /// Inclusive planet-count range
    pub fn planet_range(&self) -> (usize, usize) {
        match self {
            StarClass::O => (0, 3),
            StarClass::B => (0, 5),
            StarClass::A => (1, 8),
            StarClass::F => (2, 10),
            StarClass::G => (3, 12),
            StarClass::K => (2, 10),
            StarClass::M => (1, 8),
            StarClass::WhiteDwarf => (0, 4),
            StarClass::BrownDwarf => (0, 3),
            StarClass::NeutronStar => (0, 2),
            StarClass::BlackHole => (0, 2),
        }
    }

    /// Additive temperature term for every orbiting body, degrees Celsius
    pub fn temperature_offset(&self) -> f64 {
        match self {
            StarClass::O => 400.0,
            StarClass::B => 280.0,
            StarClass::A => 180.0,
            StarClass::F => 110.0,
            StarClass::G => 60.0,
            StarClass::K => 20.0,
            StarClass::M => -30.0,
            StarClass::WhiteDwarf => -70.0,
            StarClass::BrownDwarf => -110.0,
            StarClass::NeutronStar => -130.0,
            StarClass::BlackHole => -180.0,
        }
    }

    pub fn hazards(&self) -> &'static [&'static str] {
        match self {
            StarClass::O => &["Intense UV Radiation", "Stellar Winds"],
            StarClass::B => &["Intense UV Radiation", "Violent Flares"],
            StarClass::A => &["High Radiation"],
            StarClass::F => &["Radiation Bursts"],
            StarClass::G => &["Solar Flares"],
            StarClass::K => &["Starspots"],
            StarClass::M => &["Flare Activity", "Tidal Locking"],
            StarClass::WhiteDwarf => &["Stellar Remnant Debris"],
            StarClass::BrownDwarf => &["Low Luminosity"],
            StarClass::NeutronStar => &["Extreme Radiation", "Intense Magnetic Fields"],
            StarClass::BlackHole => &[
                "Gravitational Tides",
                "Accretion Disk Radiation",
                "Event Horizon",
            ],
        }
    }

    fn weights() -> Vec<(StarClass, f64)> {
        Self::ALL.iter().map(|c| (*c, c.weight())).collect()
    }
}

const GENERIC_HAZARDS: &[&str] = &[
    "Asteroid Fields",
    "Cosmic Rays",
    "Ion Storms",
    "Rogue Planets",
    "Nebula Interference",
    "Comet Showers",
    "Pirate Activity",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum ResourceKind {
    Hydrogen,
    Helium,
    Metals,
    #[display(fmt = "Rare Elements")]
    RareElements,
    Water,
    Organics,
    Silicates,
    Radioactives,
    Crystals,
}

/// A generated star system
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    pub coordinates: Vec3,
    pub star_class: StarClass,
    /// Billions of years
    pub age: f64,
    /// In orbital order
    pub planets: Vec<Planet>,
    /// Sum over every planet and moon
    pub total_population: u64,
    pub dominant_species: Vec<SpeciesId>,
    pub resources: BTreeMap<ResourceKind, u32>,
    pub hazards: Vec<String>,
}

impl StarSystem {
    /// Every planet and moon in orbital order, moons after their parent
    pub fn bodies(&self) -> impl Iterator<Item = &Planet> {
        self.planets.iter().flat_map(Planet::bodies)
    }
}

#[derive(Clone, Debug)]
pub struct StarSystemGenerator {
    galaxy_radius: f64,
    phonemes: PhonemeSet,
    planets: PlanetGenerator,
    political: PoliticalGenerator,
}

impl StarSystemGenerator {
    pub fn new(config: &GalaxyGenerationConfig) -> Self {
        Self {
            galaxy_radius: config.galaxy_radius,
            phonemes: PhonemeSet::default_alphabet(),
            planets: PlanetGenerator::new(config.population_scale()),
            political: PoliticalGenerator::new(config.political_complexity),
        }
    }

    pub fn generate(&self, rng: &mut RandomSource, species_pool: &[Species]) -> StarSystem {
        let id = SystemId(rng.uuid());
        let star_class = *rng.weighted(&StarClass::weights());
        let (age_min, age_max) = star_class.age_range();
        let age = rng.range_f64(age_min, age_max);
        let name = generate_name(&self.phonemes, NameKind::Location, rng);
        let coordinates = self.disk_position(rng);

        let settlers: Vec<&Species> = if species_pool.is_empty() {
            Vec::new()
        } else {
            let count = rng.range_usize(1, MAX_DOMINANT_SPECIES.min(species_pool.len()));
            let all: Vec<&Species> = species_pool.iter().collect();
            rng.subset(&all, count)
        };
        let dominant_species = settlers.iter().map(|s| s.id).collect();

        let (min_planets, max_planets) = star_class.planet_range();
        let planet_count = rng.range_usize(min_planets, max_planets);
        let context = OrbitContext {
            star_class,
            system_name: &name,
        };

        let mut planets = Vec::with_capacity(planet_count);
        for orbital_index in 1..=planet_count as u32 {
            let mut planet = self.planets.generate_planet(&context, orbital_index, rng);
            self.political.populate(&mut planet, &settlers, rng);
            for moon in planet.moons.iter_mut() {
                self.political.populate(moon, &settlers, rng);
            }
            planets.push(planet);
        }

        let total_population = planets.iter().map(Planet::total_population).sum();
        let resources = self.system_resources(&planets, rng);
        let hazards = system_hazards(star_class, age, rng);

        tracing::debug!(
            system = %name,
            class = %star_class,
            planets = planets.len(),
            population = total_population,
            "Generated star system"
        );

        StarSystem {
            id,
            name,
            coordinates,
            star_class,
            age,
            planets,
            total_population,
            dominant_species,
            resources,
            hazards,
        }
    }

    /// Polar sampling inside a thin disk
    fn disk_position(&self, rng: &mut RandomSource) -> Vec3 {
        let angle = rng.range_f64(0.0, TAU);
        let radius = rng.range_f64(0.0, self.galaxy_radius);
        let half_height = self.galaxy_radius * DISK_HEIGHT_FRACTION;
        let height = rng.range_f64(-half_height, half_height);
        Vec3::new(radius * angle.cos(), radius * angle.sin(), height)
    }

    /// Base stellar resources plus every planet's and moon's contribution
    fn system_resources(
        &self,
        planets: &[Planet],
        rng: &mut RandomSource,
    ) -> BTreeMap<ResourceKind, u32> {
        let mut resources = BTreeMap::new();
        for kind in [
            ResourceKind::Hydrogen,
            ResourceKind::Helium,
            ResourceKind::Metals,
            ResourceKind::RareElements,
        ] {
            resources.insert(kind, rng.range(1, 10) as u32);
        }

        for body in planets.iter().flat_map(Planet::bodies) {
            for (kind, amount) in &body.resources {
                *resources.entry(*kind).or_insert(0) += amount;
            }
        }
        resources
    }
}

/// Class hazards, then age hazards, then 0-2 generic ones, without repeats
fn system_hazards(star_class: StarClass, age: f64, rng: &mut RandomSource) -> Vec<String> {
    let mut hazards: Vec<String> = Vec::new();
    let mut add = |hazard: &str| {
        if !hazards.iter().any(|h| h == hazard) {
            hazards.push(hazard.to_string());
        }
    };

    for &hazard in star_class.hazards() {
        add(hazard);
    }
    if age < YOUNG_SYSTEM_AGE {
        add("Formation Debris");
    }
    if age > OLD_SYSTEM_AGE {
        add("Stellar Senescence");
    }
    let generic_count = rng.range_usize(0, 2);
    for hazard in rng.subset(GENERIC_HAZARDS, generic_count) {
        add(hazard);
    }

    hazards
}
