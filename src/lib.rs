//! Galaxy Forge - procedural galaxy generation
//!
//! One seeded pass produces species, star systems with planets and moons,
//! the governments, cities and districts of inhabited worlds, and the
//! civilizations that span them. The result is a read-only [`galaxy::WorldIndex`].

pub mod core;
pub mod galaxy;
pub mod media;
pub mod naming;
