//! Automaton configuration with documented defaults
//!
//! Every tunable number of a session lives here. A config can be built in
//! code, or loaded from a TOML file where missing keys fall back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{AutomatonError, Result};
use crate::core::types::Mode;

/// Smallest universe edge; below this the 3x3 wrap aliases a cell with itself
pub const MIN_DIMENSION: i32 = 3;

/// Valid range of the predator-prey initial lifetime
pub const PREDATOR_LIFETIME_RANGE: std::ops::RangeInclusive<i32> = 1..=99;

/// Configuration for an automaton session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    // === UNIVERSE ===
    /// Number of interior columns
    pub width: i32,

    /// Number of interior rows
    pub height: i32,

    /// Largest accepted edge length
    ///
    /// The grid is a dense allocation of six `(width + 2) * (height + 2)`
    /// buffers, so sizes are capped rather than trusted.
    pub max_dimension: i32,

    /// Rule-set active when the session starts
    pub mode: Mode,

    // === RANDOMNESS ===
    /// Seed for the engine's random source
    ///
    /// `None` draws a seed from OS entropy once, at construction. Tests pass
    /// a fixed seed to get reproducible boards.
    pub seed: Option<u64>,

    /// Sprinkle random noise when a modeling mode (Noise, Erosion, Fluids,
    /// Gases) is cleared
    pub seed_noise_on_clear: bool,

    // === PREDATOR-PREY ===
    /// Lifetime given to freshly placed predators and prey, and restored when
    /// an entity devours a neighbor
    ///
    /// At the default of 50 an entity that never eats disappears after 50
    /// generations of travel.
    pub predator_lifetime: i32,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            max_dimension: 1000,
            mode: Mode::Life,
            seed: None,
            seed_noise_on_clear: false,
            predator_lifetime: 50,
        }
    }
}

impl AutomatonConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_predator_lifetime(mut self, lifetime: i32) -> Self {
        self.predator_lifetime = lifetime;
        self
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AutomatonConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height, self.max_dimension)?;

        if !PREDATOR_LIFETIME_RANGE.contains(&self.predator_lifetime) {
            return Err(AutomatonError::InvalidConfig(format!(
                "predator_lifetime ({}) must be within {}..={}",
                self.predator_lifetime,
                PREDATOR_LIFETIME_RANGE.start(),
                PREDATOR_LIFETIME_RANGE.end()
            )));
        }

        Ok(())
    }
}

/// Check a requested universe size against the supported range
pub fn validate_dimensions(width: i32, height: i32, max_dimension: i32) -> Result<()> {
    let valid = |d: i32| (MIN_DIMENSION..=max_dimension).contains(&d);
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(AutomatonError::InvalidDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AutomatonConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 50);
        assert_eq!(config.predator_lifetime, 50);
        assert_eq!(config.mode, Mode::Life);
    }

    #[test]
    fn test_rejects_small_and_oversized_grids() {
        assert!(AutomatonConfig::new().with_size(2, 10).validate().is_err());
        assert!(AutomatonConfig::new().with_size(10, -4).validate().is_err());
        assert!(AutomatonConfig::new().with_size(1001, 10).validate().is_err());
        assert!(AutomatonConfig::new().with_size(3, 3).validate().is_ok());
    }

    #[test]
    fn test_rejects_lifetime_out_of_range() {
        assert!(AutomatonConfig::new().with_predator_lifetime(0).validate().is_err());
        assert!(AutomatonConfig::new().with_predator_lifetime(100).validate().is_err());
        assert!(AutomatonConfig::new().with_predator_lifetime(99).validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AutomatonConfig::from_toml_str(
            r#"
            mode = "predator_prey"
            width = 20
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, Mode::PredatorPrey);
        assert_eq!(config.width, 20);
        assert_eq!(config.height, 50);
        assert_eq!(config.seed, Some(7));
        assert!(!config.seed_noise_on_clear);
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        let err = AutomatonConfig::from_toml_str("predator_lifetime = 500").unwrap_err();
        assert!(matches!(err, AutomatonError::InvalidConfig(_)));

        let err = AutomatonConfig::from_toml_str("mode = \"sand\"").unwrap_err();
        assert!(matches!(err, AutomatonError::TomlError(_)));
    }
}
