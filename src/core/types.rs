//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Galactic standard year in which the generated snapshot is taken
pub const CURRENT_YEAR: i32 = 3400;

/// Lowest value of any 1-10 score
pub const SCORE_MIN: i32 = 1;

/// Highest value of any 1-10 score
pub const SCORE_MAX: i32 = 10;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            Display,
        )]
        #[display(fmt = "{}", _0)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for species
    SpeciesId
);
entity_id!(
    /// Unique identifier for star systems
    SystemId
);
entity_id!(
    /// Unique identifier for planets and moons
    PlanetId
);
entity_id!(
    /// Unique identifier for governments
    GovernmentId
);
entity_id!(
    /// Unique identifier for cities
    CityId
);
entity_id!(
    /// Unique identifier for districts
    DistrictId
);
entity_id!(
    /// Unique identifier for civilizations
    CivilizationId
);
entity_id!(
    /// Unique identifier for government leaders
    LeaderId
);

/// The kinds of entity a [`crate::galaxy::WorldIndex`] can resolve by ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum EntityKind {
    Species,
    System,
    Planet,
    Government,
    City,
    District,
    Civilization,
}

/// 3D position in light years, galactic centre at the origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance from the galactic axis, ignoring height
    pub fn planar_radius(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Clamp a value into `[min, max]`
///
/// Every bounded numeric field goes through this one helper.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp an integer into the 1-10 score band
pub fn score(value: i32) -> u8 {
    clamp(value, SCORE_MIN, SCORE_MAX) as u8
}

/// Roman numeral for small positive integers (planet designations)
pub fn roman_numeral(mut n: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    for (value, symbol) in TABLE {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}
