//! Galaxy generation configuration with documented knobs
//!
//! The config is consumed once at the start of a generation pass and never
//! mutated afterwards. All knobs in the 0.0-1.0 band are dimensionless.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GalaxyError, Result};

/// Average population of a system that the planet capacity tables are tuned for
pub const DEFAULT_AVERAGE_SYSTEM_POPULATION: f64 = 1_000_000_000.0;

/// Upper bound on `average_system_population`
///
/// At this scale the fullest possible system (12 planets with 8 moons each,
/// every body at the 1e10 capacity) still totals below `u64::MAX`.
pub const MAX_AVERAGE_SYSTEM_POPULATION: f64 = 1e16;

/// Inclusive `{min, max}` count range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: i64,
    pub max: i64,
}

impl CountRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn exactly(n: i64) -> Self {
        Self { min: n, max: n }
    }

    fn check(&self, name: &str) -> Result<()> {
        if self.min < 0 {
            return Err(GalaxyError::InvalidConfiguration(format!(
                "{}.min ({}) must not be negative",
                name, self.min
            )));
        }
        if self.min > self.max {
            return Err(GalaxyError::InvalidConfiguration(format!(
                "{}.min ({}) must be <= {}.max ({})",
                name, self.min, name, self.max
            )));
        }
        Ok(())
    }
}

/// Configuration for one galaxy generation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyGenerationConfig {
    /// Master seed; every entity stream is derived from it
    pub seed: u64,

    /// Number of star systems to generate
    ///
    /// Signed so that a negative value in a hand-written config file is
    /// reported as a configuration error instead of failing to parse.
    pub total_systems: i64,

    /// Radius of the galactic disk (light years)
    ///
    /// Disk height is +/-5% of this value.
    pub galaxy_radius: f64,

    /// How many species to generate
    pub species_count: CountRange,

    /// How many civilizations to assemble (clamped to the species count)
    pub civilization_count: CountRange,

    /// Population the planet capacity tables are scaled towards
    ///
    /// At the default (1e9) the capacity tables are used unscaled.
    pub average_system_population: f64,

    /// Spread of technology levels around the intelligence baseline (0-1)
    ///
    /// Noise on each tech field is uniform in [-k, k], k = 1 + round(2 * spread).
    pub technology_spread: f64,

    /// Size of leadership councils beyond the type's fixed titles (0-1)
    pub political_complexity: f64,

    /// Number of cultural values and taboos per species (0-1)
    pub cultural_diversity: f64,

    /// Likelihood of hostile stances and rivalries between civilizations (0-1)
    pub conflict_level: f64,

    /// Likelihood that two civilizations trade (0-1)
    pub trade_network_density: f64,
}

impl Default for GalaxyGenerationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            total_systems: 100,
            galaxy_radius: 50_000.0,
            species_count: CountRange::new(3, 8),
            civilization_count: CountRange::new(2, 6),
            average_system_population: DEFAULT_AVERAGE_SYSTEM_POPULATION,
            technology_spread: 0.5,
            political_complexity: 0.5,
            cultural_diversity: 0.5,
            conflict_level: 0.3,
            trade_network_density: 0.4,
        }
    }
}

impl GalaxyGenerationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing fields take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration before any generation begins
    pub fn validate(&self) -> Result<()> {
        if self.total_systems < 0 {
            return Err(GalaxyError::InvalidConfiguration(format!(
                "total_systems ({}) must not be negative",
                self.total_systems
            )));
        }

        if !self.galaxy_radius.is_finite() || self.galaxy_radius <= 0.0 {
            return Err(GalaxyError::InvalidConfiguration(format!(
                "galaxy_radius ({}) must be a positive number",
                self.galaxy_radius
            )));
        }

        self.species_count.check("species_count")?;
        self.civilization_count.check("civilization_count")?;

        if !(0.0..=MAX_AVERAGE_SYSTEM_POPULATION).contains(&self.average_system_population) {
            return Err(GalaxyError::InvalidConfiguration(format!(
                "average_system_population ({}) must be within 0-{:e}",
                self.average_system_population, MAX_AVERAGE_SYSTEM_POPULATION
            )));
        }

        let knobs = [
            ("technology_spread", self.technology_spread),
            ("political_complexity", self.political_complexity),
            ("cultural_diversity", self.cultural_diversity),
            ("conflict_level", self.conflict_level),
            ("trade_network_density", self.trade_network_density),
        ];
        for (name, value) in knobs {
            if !(0.0..=1.0).contains(&value) {
                return Err(GalaxyError::InvalidConfiguration(format!(
                    "{} ({}) must be within 0.0-1.0",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Scale applied to planet population capacities
    pub fn population_scale(&self) -> f64 {
        self.average_system_population / DEFAULT_AVERAGE_SYSTEM_POPULATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GalaxyGenerationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_systems_rejected() {
        let config = GalaxyGenerationConfig {
            total_systems: -1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GalaxyError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = GalaxyGenerationConfig {
            species_count: CountRange::new(5, 2),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("species_count"));
    }

    #[test]
    fn test_knob_out_of_band_rejected() {
        let config = GalaxyGenerationConfig {
            conflict_level: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_config_uses_defaults() {
        let config = GalaxyGenerationConfig::from_toml_str(
            r#"
            seed = 7
            total_systems = 10

            [species_count]
            min = 2
            max = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.total_systems, 10);
        assert_eq!(config.species_count, CountRange::exactly(2));
        assert_eq!(config.galaxy_radius, GalaxyGenerationConfig::default().galaxy_radius);
    }

    #[test]
    fn test_population_ceiling_enforced() {
        let at_ceiling = GalaxyGenerationConfig {
            average_system_population: MAX_AVERAGE_SYSTEM_POPULATION,
            ..Default::default()
        };
        assert!(at_ceiling.validate().is_ok());

        for bad in [1e20, f64::INFINITY, f64::NAN, -1.0] {
            let config = GalaxyGenerationConfig {
                average_system_population: bad,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("average_system_population"));
        }
    }

    #[test]
    fn test_population_scale_default_is_one() {
        assert!((GalaxyGenerationConfig::default().population_scale() - 1.0).abs() < 1e-12);
    }
}
