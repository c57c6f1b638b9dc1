//! Atmospheric gases and composition

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
pub enum Gas {
    Oxygen,
    Nitrogen,
    #[display(fmt = "Carbon Dioxide")]
    CarbonDioxide,
    Methane,
    Ammonia,
    Hydrogen,
    Helium,
    #[display(fmt = "Sulfur Dioxide")]
    SulfurDioxide,
    Argon,
    #[display(fmt = "Water Vapor")]
    WaterVapor,
}

impl Gas {
    /// Gases that make an atmosphere unbreathable for typical biology
    pub fn is_toxic(&self) -> bool {
        matches!(
            self,
            Gas::Methane | Gas::Ammonia | Gas::SulfurDioxide | Gas::Hydrogen
        )
    }
}

/// Atmospheric composition, one of the curated per-type option sets
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub gases: Vec<Gas>,
}

impl Atmosphere {
    pub fn new(gases: &[Gas]) -> Self {
        Self {
            gases: gases.to_vec(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.gases.is_empty()
    }

    pub fn contains(&self, gas: Gas) -> bool {
        self.gases.contains(&gas)
    }

    pub fn is_toxic(&self) -> bool {
        self.gases.iter().any(Gas::is_toxic)
    }

    /// Habitability contribution of the atmosphere
    ///
    /// -4 none or toxic, +3 oxygen and nitrogen, +1 oxygen only, 0 otherwise.
    pub fn habitability_term(&self) -> i32 {
        if self.is_empty() || self.is_toxic() {
            -4
        } else if self.contains(Gas::Oxygen) && self.contains(Gas::Nitrogen) {
            3
        } else if self.contains(Gas::Oxygen) {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breathable_scores_highest() {
        assert_eq!(Atmosphere::new(&[Gas::Nitrogen, Gas::Oxygen]).habitability_term(), 3);
        let air = Atmosphere::new(&[Gas::Oxygen, Gas::Nitrogen, Gas::Argon]);
        assert_eq!(air.habitability_term(), 3);
    }

    #[test]
    fn test_oxygen_without_nitrogen() {
        assert_eq!(Atmosphere::new(&[Gas::Oxygen, Gas::CarbonDioxide]).habitability_term(), 1);
    }

    #[test]
    fn test_inert_atmosphere_is_neutral() {
        assert_eq!(Atmosphere::new(&[Gas::CarbonDioxide]).habitability_term(), 0);
        assert_eq!(Atmosphere::new(&[Gas::Nitrogen]).habitability_term(), 0);
    }

    #[test]
    fn test_toxic_or_missing_penalized() {
        assert_eq!(Atmosphere::none().habitability_term(), -4);
        assert_eq!(Atmosphere::new(&[Gas::Hydrogen, Gas::Helium]).habitability_term(), -4);
        assert_eq!(
            Atmosphere::new(&[Gas::SulfurDioxide, Gas::CarbonDioxide]).habitability_term(),
            -4
        );
    }
}
