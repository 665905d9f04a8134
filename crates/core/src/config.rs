//! Configuration for the cutting-stock optimizer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::numeric::DEFAULT_EPSILON;

/// Shop-wide minimum usable length in inches.
///
/// Parts shorter than this cannot be requested, and remainders at least this
/// long are kept as remnants.
pub const MIN_PART_LENGTH_IN: f64 = 18.0;

/// Default scrap-free threshold, as a percentage of stock consumed.
pub const DEFAULT_SCRAP_FREE_THRESHOLD_PCT: f64 = 2.0;

/// Configuration parameters for the optimizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct OptimizerConfig {
    /// Tolerance for every length comparison, in inches.
    pub epsilon: f64,

    /// Minimum usable length used when a request carries no override.
    pub default_min_part_length_in: f64,

    /// Waste percentage at or below which a plan counts as scrap-free.
    pub scrap_free_threshold_pct: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            default_min_part_length_in: MIN_PART_LENGTH_IN,
            scrap_free_threshold_pct: DEFAULT_SCRAP_FREE_THRESHOLD_PCT,
        }
    }
}

impl OptimizerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the comparison epsilon.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the default minimum usable length.
    pub fn with_default_min_part_length(mut self, length_in: f64) -> Self {
        self.default_min_part_length_in = length_in;
        self
    }

    /// Sets the scrap-free threshold percentage.
    pub fn with_scrap_free_threshold(mut self, pct: f64) -> Self {
        self.scrap_free_threshold_pct = pct;
        self
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::validation(
                "Comparison epsilon must be a positive number.",
            ));
        }
        if !self.default_min_part_length_in.is_finite() || self.default_min_part_length_in <= 0.0 {
            return Err(Error::validation(
                "Default minimum part length must be a positive number.",
            ));
        }
        if !self.scrap_free_threshold_pct.is_finite() || self.scrap_free_threshold_pct < 0.0 {
            return Err(Error::validation(
                "Scrap-free threshold must be a non-negative number.",
            ));
        }
        Ok(())
    }

    /// Resolves the minimum usable length for a request.
    pub fn min_part_length(&self, override_in: Option<f64>) -> f64 {
        override_in.unwrap_or(self.default_min_part_length_in)
    }
}
