use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::core::activation::clamp_unit;
use crate::models::{FeatureRules, FeatureVector, PetRecord, PreferenceRecord};

/// Input layer: turns raw records into bounded features
///
/// The reference date for age calculations is fixed at construction so that
/// extraction never reads the clock.
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor {
    rules: FeatureRules,
    as_of: NaiveDate,
}

impl FeatureExtractor {
    pub fn new(rules: FeatureRules, as_of: NaiveDate) -> Self {
        Self { rules, as_of }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Extract the feature vector for one candidate
    ///
    /// Total: missing fields degrade to neutral values.
    pub fn extract(
        &self,
        candidate: &PetRecord,
        requester_pet: &PetRecord,
        prefs: &PreferenceRecord,
    ) -> FeatureVector {
        let (behaviors, behaviors_count) = overlap(
            prefs.preferred_behaviors.as_deref(),
            &candidate.behaviors,
        );
        let (attributes, attributes_count) = overlap(
            prefs.preferred_attributes.as_deref(),
            &candidate.attributes,
        );

        FeatureVector {
            breed: clamp_unit(self.breed_feature(candidate, requester_pet, prefs)),
            sex: clamp_unit(sex_feature(candidate, prefs)),
            age: clamp_unit(self.age_feature(candidate, prefs)),
            behaviors: clamp_unit(behaviors),
            attributes: clamp_unit(attributes),
            behaviors_count,
            attributes_count,
        }
    }

    /// 1.0 for the preferred breed, partial credit for the same species
    #[inline]
    pub fn breed_feature(
        &self,
        candidate: &PetRecord,
        requester_pet: &PetRecord,
        prefs: &PreferenceRecord,
    ) -> f64 {
        if prefs.preferred_breed.as_deref() == Some(candidate.breed.as_str()) {
            1.0
        } else if candidate.species == requester_pet.species {
            self.rules.same_species_breed
        } else {
            0.0
        }
    }

    /// 1.0 inside the preferred range, decaying linearly outside it
    pub fn age_feature(&self, candidate: &PetRecord, prefs: &PreferenceRecord) -> f64 {
        let (min, max) = match (valid_bound(prefs.min_age), valid_bound(prefs.max_age)) {
            (None, None) => return 1.0,
            (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
            bounds => bounds,
        };

        let Some(age) = candidate.age_years(self.as_of) else {
            return self.rules.unknown_age;
        };

        let below = min.map_or(0.0, |m| m - age);
        let above = max.map_or(0.0, |m| age - m);
        let distance = below.max(above);

        if distance <= 0.0 {
            1.0
        } else {
            (1.0 - distance / self.rules.age_decay_years).max(0.0)
        }
    }
}

/// 1.0 without a preference or on an exact match
#[inline]
pub fn sex_feature(candidate: &PetRecord, prefs: &PreferenceRecord) -> f64 {
    match prefs.preferred_sex.as_deref() {
        None => 1.0,
        Some(sex) if sex == candidate.sex => 1.0,
        Some(_) => 0.0,
    }
}

/// Fraction of distinct preferred items the candidate has, plus the count
///
/// Empty or missing lists give `(0.0, 0)`.
pub fn overlap(preferred: Option<&[String]>, actual: &[String]) -> (f64, u32) {
    let preferred: BTreeSet<&str> = match preferred {
        Some(items) => items.iter().map(String::as_str).collect(),
        None => return (0.0, 0),
    };
    if preferred.is_empty() || actual.is_empty() {
        return (0.0, 0);
    }

    let actual: BTreeSet<&str> = actual.iter().map(String::as_str).collect();
    let count = preferred.intersection(&actual).count();

    (count as f64 / preferred.len() as f64, count as u32)
}

/// Non-finite or negative bounds count as "not stated"
#[inline]
fn valid_bound(bound: Option<f64>) -> Option<f64> {
    bound.filter(|b| b.is_finite() && *b >= 0.0)
}
