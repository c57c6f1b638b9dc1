//! Galaxy world generation
//!
//! Species, star systems, planets and moons, the political layer of
//! inhabited bodies, civilizations, and the index that owns them.

pub mod atmosphere;
pub mod civilization;
pub mod events;
pub mod generator;
pub mod index;
pub mod planet;
pub mod political;
pub mod species;
pub mod star;

pub use atmosphere::{Atmosphere, Gas};
pub use civilization::{CapitalRef, Civilization, CivilizationAssembler, DiplomaticStance};
pub use events::{EventSender, GenerationEvent, ImageSubject};
pub use generator::{generate, GalaxyGenerator};
pub use index::{EntityRef, GalaxyStats, WorldIndex, WorldSnapshot};
pub use planet::{Planet, PlanetGenerator, PlanetSize, PlanetType};
pub use political::{City, CityType, District, DistrictType, Government, GovernmentType, Ideology};
pub use species::{BodyPlan, Origin, Species, SpeciesGenerator, TechField};
pub use star::{ResourceKind, StarClass, StarSystem, StarSystemGenerator};
