use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Pet record as supplied by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PetRecord {
    #[validate(length(min = 1))]
    pub pet_id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    #[serde(default)]
    pub behaviors: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool { true }

impl PetRecord {
    /// Age in fractional years at `as_of`, or `None` without a birthdate.
    ///
    /// Birthdates after `as_of` yield zero.
    pub fn age_years(&self, as_of: NaiveDate) -> Option<f64> {
        self.birthdate.map(|born| {
            let days = as_of.signed_duration_since(born).num_days();
            (days.max(0) as f64) / DAYS_PER_YEAR
        })
    }
}

const DAYS_PER_YEAR: f64 = 365.25;

/// Partner preferences a requester states for the other pet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    #[serde(default)]
    pub preferred_breed: Option<String>,
    #[serde(default)]
    pub preferred_sex: Option<String>,
    /// Minimum preferred age in years
    #[serde(default)]
    pub min_age: Option<f64>,
    /// Maximum preferred age in years
    #[serde(default)]
    pub max_age: Option<f64>,
    #[serde(default)]
    pub preferred_behaviors: Option<Vec<String>>,
    #[serde(default)]
    pub preferred_attributes: Option<Vec<String>>,
}

/// Normalized features for one (candidate, requester, preferences) triple
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FeatureVector {
    pub breed: f64,
    pub sex: f64,
    pub age: f64,
    pub behaviors: f64,
    pub attributes: f64,
    /// Overlapping behaviors, used for the bonus neuron and reasons
    pub behaviors_count: u32,
    /// Overlapping attributes, used for the bonus neuron and reasons
    pub attributes_count: u32,
}

/// Outputs of the four hidden neurons
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HiddenActivations {
    pub primary: f64,
    pub secondary: f64,
    pub interaction: f64,
    pub bonus: f64,
}

/// Human-readable justification attached to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchReason {
    #[serde(rename = "Perfect breed match")]
    PerfectBreedMatch,
    #[serde(rename = "Sex preference match")]
    SexPreferenceMatch,
    #[serde(rename = "Age within preferred range")]
    AgeWithinRange,
    #[serde(rename = "Matching behaviors")]
    MatchingBehaviors,
    #[serde(rename = "Matching attributes")]
    MatchingAttributes,
    #[serde(rename = "General compatibility")]
    GeneralCompatibility,
    #[serde(rename = "No specific preferences set")]
    NoPreferencesSet,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchReason::PerfectBreedMatch => "Perfect breed match",
            MatchReason::SexPreferenceMatch => "Sex preference match",
            MatchReason::AgeWithinRange => "Age within preferred range",
            MatchReason::MatchingBehaviors => "Matching behaviors",
            MatchReason::MatchingAttributes => "Matching attributes",
            MatchReason::GeneralCompatibility => "General compatibility",
            MatchReason::NoPreferencesSet => "No specific preferences set",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final compatibility score with its reasons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Always within 0-100
    pub score: u8,
    /// Evaluation order, distinct, never empty
    pub reasons: Vec<MatchReason>,
}

impl ScoreResult {
    pub fn has_reason(&self, reason: MatchReason) -> bool {
        self.reasons.contains(&reason)
    }

    pub fn reason_strings(&self) -> Vec<&'static str> {
        self.reasons.iter().map(MatchReason::as_str).collect()
    }
}

/// A scored candidate in a ranked batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub pet_id: String,
    #[serde(rename = "compatibility_score")]
    pub score: u8,
    #[serde(rename = "match_reasons")]
    pub reasons: Vec<MatchReason>,
}

/// Best candidate found for one of the requester's pets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMatch {
    pub pet_id: String,
    pub best: RankedMatch,
}
