use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{features::FeatureExtractor, hidden::HiddenLayer, output::OutputLayer};
use crate::models::{FeatureVector, HiddenActivations, NetworkWeights, PetRecord, PreferenceRecord, ScoreResult};

/// Every intermediate value of one scoring call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub features: FeatureVector,
    pub hidden: HiddenActivations,
    pub result: ScoreResult,
}

/// Calculate a compatibility score (0-100) for a candidate pet
///
/// Runs the three stages in order:
/// 1. Feature extraction against the requester's preferences
/// 2. Hidden layer (ReLU, sigmoid, tanh, sigmoid)
/// 3. Output layer score and reasons
///
/// Stateless and `Sync`; a single scorer can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityScorer {
    extractor: FeatureExtractor,
    hidden: HiddenLayer,
    output: OutputLayer,
}

impl CompatibilityScorer {
    pub fn new(weights: &NetworkWeights, as_of: NaiveDate) -> Self {
        Self {
            extractor: FeatureExtractor::new(weights.features, as_of),
            hidden: HiddenLayer::new(weights.primary, weights.secondary, weights.interaction, weights.bonus),
            output: OutputLayer::new(weights.output, weights.thresholds),
        }
    }

    pub fn with_default_weights(as_of: NaiveDate) -> Self {
        Self::new(&NetworkWeights::default(), as_of)
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn hidden_layer(&self) -> &HiddenLayer {
        &self.hidden
    }

    pub fn output_layer(&self) -> &OutputLayer {
        &self.output
    }

    pub fn score(
        &self,
        candidate: &PetRecord,
        requester_pet: &PetRecord,
        prefs: &PreferenceRecord,
    ) -> ScoreResult {
        self.breakdown(candidate, requester_pet, prefs).result
    }

    /// Same as [`score`](Self::score) but keeps the features and activations
    pub fn breakdown(
        &self,
        candidate: &PetRecord,
        requester_pet: &PetRecord,
        prefs: &PreferenceRecord,
    ) -> ScoreBreakdown {
        let features = self.extractor.extract(candidate, requester_pet, prefs);
        let hidden = self.hidden.evaluate(&features);
        let result = self.output.score(&hidden, &features);

        ScoreBreakdown { features, hidden, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchReason;

    fn create_test_pet(id: &str, breed: &str, sex: &str) -> PetRecord {
        PetRecord {
            pet_id: id.to_string(),
            owner_id: None,
            species: "Dog".to_string(),
            breed: breed.to_string(),
            sex: sex.to_string(),
            birthdate: NaiveDate::from_ymd_opt(2021, 3, 1),
            behaviors: vec!["Friendly".to_string(), "Calm".to_string()],
            attributes: vec!["Short Coat".to_string()],
            active: true,
        }
    }

    fn create_test_preferences() -> PreferenceRecord {
        PreferenceRecord {
            preferred_breed: Some("Beagle".to_string()),
            preferred_sex: Some("Female".to_string()),
            min_age: Some(1.0),
            max_age: Some(5.0),
            preferred_behaviors: Some(vec!["Friendly".to_string()]),
            preferred_attributes: Some(vec!["Short Coat".to_string()]),
        }
    }

    fn scorer() -> CompatibilityScorer {
        CompatibilityScorer::with_default_weights(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_calculate_score() {
        let candidate = create_test_pet("c1", "Beagle", "Female");
        let requester = create_test_pet("r1", "Beagle", "Male");

        let result = scorer().score(&candidate, &requester, &create_test_preferences());

        assert!(result.score > 50, "perfect match scored {}", result.score);
        assert_eq!(result.reasons.len(), 5);
    }

    #[test]
    fn test_better_candidate_scores_higher() {
        let requester = create_test_pet("r1", "Beagle", "Male");
        let prefs = create_test_preferences();

        let good = scorer().score(&create_test_pet("c1", "Beagle", "Female"), &requester, &prefs);
        let poor = scorer().score(&create_test_pet("c2", "Husky", "Male"), &requester, &prefs);

        assert!(good.score > poor.score);
        assert!(!poor.has_reason(MatchReason::PerfectBreedMatch));
    }

    #[test]
    fn test_breakdown_matches_score() {
        let candidate = create_test_pet("c1", "Beagle", "Female");
        let requester = create_test_pet("r1", "Beagle", "Male");
        let prefs = create_test_preferences();

        let breakdown = scorer().breakdown(&candidate, &requester, &prefs);

        assert_eq!(breakdown.result, scorer().score(&candidate, &requester, &prefs));
        assert_eq!(breakdown.features.breed, 1.0);
        assert_eq!(breakdown.features.behaviors_count, 1);
    }

    #[test]
    fn test_breakdown_follows_each_stage() {
        let scorer = scorer();
        let candidate = create_test_pet("c1", "Husky", "Female");
        let requester = create_test_pet("r1", "Beagle", "Male");
        let prefs = create_test_preferences();

        let breakdown = scorer.breakdown(&candidate, &requester, &prefs);
        let features = scorer.extractor().extract(&candidate, &requester, &prefs);
        let hidden = scorer.hidden_layer().evaluate(&features);

        assert_eq!(breakdown.features, features);
        assert_eq!(breakdown.hidden, hidden);
        assert_eq!(breakdown.result, scorer.output_layer().score(&hidden, &features));
    }
}
