//! WorldIndex - owner of the generated galaxy and its ID lookups
//!
//! Entities live in a strict tree (system → planet → moon, body →
//! government/city, city → district). The index keeps a flat map from every
//! ID to the entity's position in that tree, so lookups are O(1) without
//! any shared ownership.

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::types::{
    CityId, CivilizationId, DistrictId, EntityKind, GovernmentId, PlanetId, SpeciesId, SystemId,
};
use crate::galaxy::civilization::Civilization;
use crate::galaxy::planet::Planet;
use crate::galaxy::political::{City, District, Government};
use crate::galaxy::species::Species;
use crate::galaxy::star::StarSystem;

/// Serializable content of a generated galaxy
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub seed: u64,
    pub galaxy_radius: f64,
    pub species: Vec<Species>,
    pub systems: Vec<StarSystem>,
    pub civilizations: Vec<Civilization>,
}

/// Position of a planet or moon in the tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BodyAddress {
    system: usize,
    planet: usize,
    moon: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Address {
    Species(usize),
    System(usize),
    Planet(BodyAddress),
    Government(BodyAddress, usize),
    City(BodyAddress, usize),
    District(BodyAddress, usize, usize),
    Civilization(usize),
}

impl Address {
    fn kind(&self) -> EntityKind {
        match self {
            Address::Species(_) => EntityKind::Species,
            Address::System(_) => EntityKind::System,
            Address::Planet(_) => EntityKind::Planet,
            Address::Government(..) => EntityKind::Government,
            Address::City(..) => EntityKind::City,
            Address::District(..) => EntityKind::District,
            Address::Civilization(_) => EntityKind::Civilization,
        }
    }
}

/// Borrowed view of any indexed entity
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityRef<'a> {
    Species(&'a Species),
    System(&'a StarSystem),
    Planet(&'a Planet),
    Government(&'a Government),
    City(&'a City),
    District(&'a District),
    Civilization(&'a Civilization),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Species(_) => EntityKind::Species,
            EntityRef::System(_) => EntityKind::System,
            EntityRef::Planet(_) => EntityKind::Planet,
            EntityRef::Government(_) => EntityKind::Government,
            EntityRef::City(_) => EntityKind::City,
            EntityRef::District(_) => EntityKind::District,
            EntityRef::Civilization(_) => EntityKind::Civilization,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EntityRef::Species(e) => &e.name,
            EntityRef::System(e) => &e.name,
            EntityRef::Planet(e) => &e.name,
            EntityRef::Government(e) => &e.name,
            EntityRef::City(e) => &e.name,
            EntityRef::District(e) => &e.name,
            EntityRef::Civilization(e) => &e.name,
        }
    }
}

/// Aggregate counts over a generated galaxy
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalaxyStats {
    pub seed: u64,
    pub galaxy_radius: f64,
    pub species: usize,
    pub systems: usize,
    pub planets: usize,
    pub moons: usize,
    pub inhabited_bodies: usize,
    pub governments: usize,
    pub cities: usize,
    pub districts: usize,
    pub civilizations: usize,
    pub total_population: u64,
    /// Mean species technology level, 0 without species
    pub average_technology_level: f64,
}

impl GalaxyStats {
    pub fn summary(&self) -> String {
        format!(
            "Galaxy seed {} (radius {:.0} ly)\n\
             {} species, {} civilizations\n\
             {} systems, {} planets, {} moons ({} inhabited)\n\
             {} governments, {} cities, {} districts\n\
             population {}, average technology {:.1}",
            self.seed,
            self.galaxy_radius,
            self.species,
            self.civilizations,
            self.systems,
            self.planets,
            self.moons,
            self.inhabited_bodies,
            self.governments,
            self.cities,
            self.districts,
            self.total_population,
            self.average_technology_level,
        )
    }
}

/// Read-only generated galaxy with O(1) lookup by ID
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "WorldSnapshot")]
pub struct WorldIndex {
    world: WorldSnapshot,
    addresses: AHashMap<Uuid, Address>,
}

impl Serialize for WorldIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.world.serialize(serializer)
    }
}

impl From<WorldSnapshot> for WorldIndex {
    fn from(world: WorldSnapshot) -> Self {
        Self::new(world)
    }
}

impl PartialEq for WorldIndex {
    fn eq(&self, other: &Self) -> bool {
        self.world == other.world
    }
}

impl WorldIndex {
    pub fn new(world: WorldSnapshot) -> Self {
        let addresses = build_addresses(&world);
        Self { world, addresses }
    }

    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.world
    }

    pub fn seed(&self) -> u64 {
        self.world.seed
    }

    pub fn galaxy_radius(&self) -> f64 {
        self.world.galaxy_radius
    }

    pub fn all_species(&self) -> &[Species] {
        &self.world.species
    }

    pub fn all_systems(&self) -> &[StarSystem] {
        &self.world.systems
    }

    pub fn all_civilizations(&self) -> &[Civilization] {
        &self.world.civilizations
    }

    /// Every planet and moon in the galaxy
    pub fn all_bodies(&self) -> impl Iterator<Item = &Planet> {
        self.world.systems.iter().flat_map(StarSystem::bodies)
    }

    /// Look up an entity; `None` if absent or of another kind
    pub fn get(&self, kind: EntityKind, id: Uuid) -> Option<EntityRef<'_>> {
        let address = *self.addresses.get(&id)?;
        if address.kind() != kind {
            return None;
        }
        self.resolve(address)
    }

    pub fn species(&self, id: SpeciesId) -> Option<&Species> {
        match self.get(EntityKind::Species, id.0)? {
            EntityRef::Species(e) => Some(e),
            _ => None,
        }
    }

    pub fn system(&self, id: SystemId) -> Option<&StarSystem> {
        match self.get(EntityKind::System, id.0)? {
            EntityRef::System(e) => Some(e),
            _ => None,
        }
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        match self.get(EntityKind::Planet, id.0)? {
            EntityRef::Planet(e) => Some(e),
            _ => None,
        }
    }

    pub fn government(&self, id: GovernmentId) -> Option<&Government> {
        match self.get(EntityKind::Government, id.0)? {
            EntityRef::Government(e) => Some(e),
            _ => None,
        }
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        match self.get(EntityKind::City, id.0)? {
            EntityRef::City(e) => Some(e),
            _ => None,
        }
    }

    pub fn district(&self, id: DistrictId) -> Option<&District> {
        match self.get(EntityKind::District, id.0)? {
            EntityRef::District(e) => Some(e),
            _ => None,
        }
    }

    pub fn civilization(&self, id: CivilizationId) -> Option<&Civilization> {
        match self.get(EntityKind::Civilization, id.0)? {
            EntityRef::Civilization(e) => Some(e),
            _ => None,
        }
    }

    /// System containing a planet or moon
    pub fn system_of_planet(&self, id: PlanetId) -> Option<&StarSystem> {
        match self.addresses.get(&id.0)? {
            Address::Planet(body) => self.world.systems.get(body.system),
            _ => None,
        }
    }

    /// Systems that list the species among their dominant species
    pub fn systems_by_species(&self, id: SpeciesId) -> Vec<&StarSystem> {
        self.world
            .systems
            .iter()
            .filter(|s| s.dominant_species.contains(&id))
            .collect()
    }

    /// Systems within `max_distance` of `origin`, nearest first
    ///
    /// The origin itself is excluded; an unknown origin yields nothing.
    pub fn nearby_systems(&self, origin: SystemId, max_distance: f64) -> Vec<(&StarSystem, f64)> {
        let Some(center) = self.system(origin) else {
            return Vec::new();
        };

        let mut nearby: Vec<(&StarSystem, f64)> = self
            .world
            .systems
            .iter()
            .filter(|s| s.id != origin)
            .map(|s| (s, center.coordinates.distance(&s.coordinates)))
            .filter(|(_, d)| *d <= max_distance)
            .collect();
        nearby.sort_by_key(|(_, d)| OrderedFloat(*d));
        nearby
    }

    pub fn galaxy_stats(&self) -> GalaxyStats {
        let mut stats = GalaxyStats {
            seed: self.world.seed,
            galaxy_radius: self.world.galaxy_radius,
            species: self.world.species.len(),
            systems: self.world.systems.len(),
            planets: 0,
            moons: 0,
            inhabited_bodies: 0,
            governments: 0,
            cities: 0,
            districts: 0,
            civilizations: self.world.civilizations.len(),
            total_population: self
                .world
                .systems
                .iter()
                .fold(0u64, |acc, s| acc.saturating_add(s.total_population)),
            average_technology_level: 0.0,
        };

        for body in self.all_bodies() {
            if body.is_moon {
                stats.moons += 1;
            } else {
                stats.planets += 1;
            }
            if body.is_inhabited() {
                stats.inhabited_bodies += 1;
            }
            stats.governments += body.governments.len();
            stats.cities += body.cities.len();
            stats.districts += body.cities.iter().map(|c| c.districts.len()).sum::<usize>();
        }

        if !self.world.species.is_empty() {
            let levels: u32 = self
                .world
                .species
                .iter()
                .map(|s| s.technology.level as u32)
                .sum();
            stats.average_technology_level = levels as f64 / self.world.species.len() as f64;
        }
        stats
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn body(&self, address: BodyAddress) -> Option<&Planet> {
        let planet = self
            .world
            .systems
            .get(address.system)?
            .planets
            .get(address.planet)?;
        match address.moon {
            Some(moon) => planet.moons.get(moon),
            None => Some(planet),
        }
    }

    fn resolve(&self, address: Address) -> Option<EntityRef<'_>> {
        Some(match address {
            Address::Species(i) => EntityRef::Species(self.world.species.get(i)?),
            Address::System(i) => EntityRef::System(self.world.systems.get(i)?),
            Address::Planet(body) => EntityRef::Planet(self.body(body)?),
            Address::Government(body, i) => {
                EntityRef::Government(self.body(body)?.governments.get(i)?)
            }
            Address::City(body, i) => EntityRef::City(self.body(body)?.cities.get(i)?),
            Address::District(body, city, i) => {
                EntityRef::District(self.body(body)?.cities.get(city)?.districts.get(i)?)
            }
            Address::Civilization(i) => EntityRef::Civilization(self.world.civilizations.get(i)?),
        })
    }
}

fn index_body(addresses: &mut AHashMap<Uuid, Address>, body: &Planet, address: BodyAddress) {
    addresses.insert(body.id.0, Address::Planet(address));
    for (i, government) in body.governments.iter().enumerate() {
        addresses.insert(government.id.0, Address::Government(address, i));
    }
    for (c, city) in body.cities.iter().enumerate() {
        addresses.insert(city.id.0, Address::City(address, c));
        for (d, district) in city.districts.iter().enumerate() {
            addresses.insert(district.id.0, Address::District(address, c, d));
        }
    }
}

fn build_addresses(world: &WorldSnapshot) -> AHashMap<Uuid, Address> {
    let mut addresses = AHashMap::new();

    for (i, species) in world.species.iter().enumerate() {
        addresses.insert(species.id.0, Address::Species(i));
    }
    for (s, system) in world.systems.iter().enumerate() {
        addresses.insert(system.id.0, Address::System(s));
        for (p, planet) in system.planets.iter().enumerate() {
            let address = BodyAddress {
                system: s,
                planet: p,
                moon: None,
            };
            index_body(&mut addresses, planet, address);
            for (m, moon) in planet.moons.iter().enumerate() {
                index_body(&mut addresses, moon, BodyAddress { moon: Some(m), ..address });
            }
        }
    }
    for (i, civilization) in world.civilizations.iter().enumerate() {
        addresses.insert(civilization.id.0, Address::Civilization(i));
    }
    addresses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GalaxyGenerationConfig;
    use crate::core::random::RandomSource;
    use crate::galaxy::species::SpeciesGenerator;
    use crate::galaxy::star::StarSystemGenerator;

    fn sample_world() -> WorldIndex {
        let config = GalaxyGenerationConfig::default();
        let species: Vec<Species> = (0..2)
            .map(|i| SpeciesGenerator::new(&config).generate(&mut RandomSource::seeded(i)))
            .collect();
        let generator = StarSystemGenerator::new(&config);
        let systems = (0..5)
            .map(|i| generator.generate(&mut RandomSource::seeded(50 + i), &species))
            .collect();
        WorldIndex::new(WorldSnapshot {
            seed: 7,
            galaxy_radius: config.galaxy_radius,
            species,
            systems,
            civilizations: Vec::new(),
        })
    }

    #[test]
    fn test_every_body_resolves() {
        let world = sample_world();
        for body in world.all_bodies() {
            assert_eq!(world.planet(body.id).unwrap().id, body.id);
            for government in &body.governments {
                assert_eq!(world.government(government.id).unwrap().id, government.id);
            }
            for city in &body.cities {
                assert_eq!(world.city(city.id).unwrap().name, city.name);
                for district in &city.districts {
                    assert_eq!(world.district(district.id).unwrap().id, district.id);
                }
            }
        }
    }

    #[test]
    fn test_kind_mismatch_is_none() {
        let world = sample_world();
        let system_id = world.all_systems()[0].id;
        assert!(world.get(EntityKind::System, system_id.0).is_some());
        assert!(world.get(EntityKind::Planet, system_id.0).is_none());
        assert!(world.get(EntityKind::System, Uuid::nil()).is_none());
    }

    #[test]
    fn test_nearby_sorted_and_excludes_origin() {
        let world = sample_world();
        let origin = world.all_systems()[0].id;
        let nearby = world.nearby_systems(origin, f64::INFINITY);
        assert_eq!(nearby.len(), world.all_systems().len() - 1);
        assert!(nearby.iter().all(|(s, _)| s.id != origin));
        assert!(nearby.windows(2).all(|w| w[0].1 <= w[1].1));
        assert!(world.nearby_systems(origin, -1.0).is_empty());
    }

    #[test]
    fn test_stats_match_tree() {
        let world = sample_world();
        let stats = world.galaxy_stats();
        assert_eq!(stats.systems, 5);
        assert_eq!(stats.species, 2);
        assert_eq!(
            stats.planets,
            world.all_systems().iter().map(|s| s.planets.len()).sum::<usize>()
        );
        assert_eq!(stats.planets + stats.moons, world.all_bodies().count());
        assert!(stats.summary().contains("5 systems"));
    }

    #[test]
    fn test_bytes_roundtrip_rebuilds_lookups() {
        let world = sample_world();
        let restored = WorldIndex::from_bytes(&world.to_bytes().unwrap()).unwrap();
        // Exact, floats included
        assert_eq!(restored.snapshot(), world.snapshot());
        for system in world.all_systems() {
            assert_eq!(restored.system(system.id).unwrap().name, system.name);
        }
        let city = world.all_bodies().flat_map(|b| b.cities.iter()).next();
        if let Some(city) = city {
            assert!(restored.city(city.id).is_some());
        }
    }
}
