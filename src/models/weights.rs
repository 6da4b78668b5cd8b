use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::domain::FeatureVector;

/// Tunable constants for the whole scoring network
///
/// Defaults are hand-tuned; every value can be overridden from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NetworkWeights {
    #[validate(nested)]
    pub features: FeatureRules,
    #[validate(nested)]
    pub primary: LinearWeights,
    #[validate(nested)]
    pub secondary: LinearWeights,
    #[validate(nested)]
    pub interaction: InteractionWeights,
    #[validate(nested)]
    pub bonus: BonusWeights,
    #[validate(nested)]
    pub output: OutputWeights,
    #[validate(nested)]
    pub thresholds: ReasonThresholds,
}

/// Constants used by the feature extractor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FeatureRules {
    /// Breed feature for a same-species candidate that is not the preferred breed
    #[validate(range(min = 0.0, max = 1.0), custom(function = "finite"))]
    pub same_species_breed: f64,
    /// Age feature when bounds are stated but the birthdate is unknown
    #[validate(range(min = 0.0, max = 1.0), custom(function = "finite"))]
    pub unknown_age: f64,
    /// Years outside the preferred range at which the age feature reaches zero
    #[validate(range(exclusive_min = 0.0), custom(function = "finite"))]
    pub age_decay_years: f64,
}

impl Default for FeatureRules {
    fn default() -> Self {
        Self {
            same_species_breed: 0.3,
            unknown_age: 0.5,
            age_decay_years: 2.0,
        }
    }
}

/// Weights over the five scalar features plus a bias
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LinearWeights {
    #[validate(custom(function = "finite"))]
    pub breed: f64,
    #[validate(custom(function = "finite"))]
    pub sex: f64,
    #[validate(custom(function = "finite"))]
    pub age: f64,
    #[validate(custom(function = "finite"))]
    pub behaviors: f64,
    #[validate(custom(function = "finite"))]
    pub attributes: f64,
    #[validate(custom(function = "finite"))]
    pub bias: f64,
}

/// `range` lets NaN through, so every weight is also checked here
fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

impl LinearWeights {
    #[inline]
    pub fn apply(&self, f: &FeatureVector) -> f64 {
        self.breed * f.breed
            + self.sex * f.sex
            + self.age * f.age
            + self.behaviors * f.behaviors
            + self.attributes * f.attributes
            + self.bias
    }
}

/// Interaction neuron: a linear part plus pairwise cross terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InteractionWeights {
    #[validate(nested)]
    pub linear: LinearWeights,
    #[validate(custom(function = "finite"))]
    pub breed_behaviors: f64,
    #[validate(custom(function = "finite"))]
    pub breed_attributes: f64,
    #[validate(custom(function = "finite"))]
    pub age_sex: f64,
}

impl Default for InteractionWeights {
    fn default() -> Self {
        Self {
            linear: LinearWeights::default(),
            breed_behaviors: 0.5,
            breed_attributes: 0.3,
            age_sex: 0.2,
        }
    }
}

/// Bonus neuron: rewards the volume of overlapping traits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BonusWeights {
    #[validate(nested)]
    pub linear: LinearWeights,
    #[validate(custom(function = "finite"))]
    pub per_behavior: f64,
    #[validate(custom(function = "finite"))]
    pub per_attribute: f64,
    /// Counts above this contribute nothing more
    #[validate(range(min = 1))]
    pub count_cap: u32,
}

impl Default for BonusWeights {
    fn default() -> Self {
        Self {
            linear: LinearWeights {
                breed: 0.6,
                sex: 0.4,
                age: 0.4,
                behaviors: 0.0,
                attributes: 0.0,
                bias: -1.0,
            },
            per_behavior: 0.3,
            per_attribute: 0.3,
            count_cap: 3,
        }
    }
}

/// Output layer weights
///
/// All weights and the gain must be non-negative so the score never drops
/// when a hidden activation rises.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputWeights {
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub primary: f64,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub secondary: f64,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub interaction: f64,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub bonus: f64,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub gain: f64,
    #[validate(custom(function = "finite"))]
    pub bias: f64,
    /// Soft lower bound applied through softplus, in score points
    #[validate(range(min = 0.0, max = 100.0), custom(function = "finite"))]
    pub floor: f64,
}

impl Default for OutputWeights {
    fn default() -> Self {
        Self {
            primary: 0.45,
            secondary: 0.25,
            interaction: 0.15,
            bonus: 0.15,
            gain: 6.0,
            bias: -3.0,
            floor: 10.0,
        }
    }
}

/// Feature thresholds that turn into reasons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReasonThresholds {
    #[validate(range(min = 0.0, max = 1.0), custom(function = "finite"))]
    pub breed: f64,
    #[validate(range(min = 0.0, max = 1.0), custom(function = "finite"))]
    pub sex: f64,
    #[validate(range(min = 0.0, max = 1.0), custom(function = "finite"))]
    pub age: f64,
}

impl Default for ReasonThresholds {
    fn default() -> Self {
        Self {
            breed: 1.0,
            sex: 1.0,
            age: 0.8,
        }
    }
}

impl Default for NetworkWeights {
    fn default() -> Self {
        Self {
            features: FeatureRules::default(),
            primary: LinearWeights {
                breed: 0.35,
                sex: 0.15,
                age: 0.20,
                behaviors: 0.0,
                attributes: 0.0,
                bias: 0.0,
            },
            secondary: LinearWeights {
                breed: 0.0,
                sex: 0.0,
                age: 0.0,
                behaviors: 0.45,
                attributes: 0.45,
                bias: -0.45,
            },
            interaction: InteractionWeights::default(),
            bonus: BonusWeights::default(),
            output: OutputWeights::default(),
            thresholds: ReasonThresholds::default(),
        }
    }
}
