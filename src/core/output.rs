use crate::core::activation::{sigmoid, softplus};
use crate::models::{FeatureVector, HiddenActivations, MatchReason, OutputWeights, ReasonThresholds, ScoreResult};

/// Output layer: final score plus reasons
///
/// Score formula:
/// ```text
/// sum      = wp*primary + ws*secondary + wi*interaction + wb*bonus
/// raw      = 100 * sigmoid(gain * sum + bias)
/// smoothed = softplus(raw - floor) + floor
/// score    = round(clamp(smoothed, 0, 100))
/// ```
///
/// Reasons are read from the raw features, never from the activations.
#[derive(Debug, Clone, Copy)]
pub struct OutputLayer {
    weights: OutputWeights,
    thresholds: ReasonThresholds,
}

impl OutputLayer {
    pub fn new(weights: OutputWeights, thresholds: ReasonThresholds) -> Self {
        Self { weights, thresholds }
    }

    pub fn score(&self, hidden: &HiddenActivations, features: &FeatureVector) -> ScoreResult {
        ScoreResult {
            score: self.raw_score(hidden),
            reasons: self.reasons(features),
        }
    }

    /// Score for the activations alone, before reasons are attached
    pub fn raw_score(&self, hidden: &HiddenActivations) -> u8 {
        let w = &self.weights;
        let sum = hidden.primary * w.primary
            + hidden.secondary * w.secondary
            + hidden.interaction * w.interaction
            + hidden.bonus * w.bonus;

        let raw = sigmoid(w.gain * sum + w.bias) * 100.0;
        let smoothed = softplus(raw - w.floor) + w.floor;

        if smoothed.is_nan() {
            return 0;
        }
        smoothed.clamp(0.0, 100.0).round() as u8
    }

    /// Reasons in fixed priority order, falling back to general compatibility
    pub fn reasons(&self, features: &FeatureVector) -> Vec<MatchReason> {
        let t = &self.thresholds;
        let checks = [
            (features.breed >= t.breed, MatchReason::PerfectBreedMatch),
            (features.sex >= t.sex, MatchReason::SexPreferenceMatch),
            (features.age >= t.age, MatchReason::AgeWithinRange),
            (features.behaviors_count > 0, MatchReason::MatchingBehaviors),
            (features.attributes_count > 0, MatchReason::MatchingAttributes),
        ];

        let mut reasons = Vec::with_capacity(checks.len());
        for (met, reason) in checks {
            if met && !reasons.contains(&reason) {
                reasons.push(reason);
            }
        }

        if reasons.is_empty() {
            reasons.push(MatchReason::GeneralCompatibility);
        }
        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> OutputLayer {
        OutputLayer::new(OutputWeights::default(), ReasonThresholds::default())
    }

    fn all_features() -> FeatureVector {
        FeatureVector {
            breed: 1.0,
            sex: 1.0,
            age: 0.9,
            behaviors: 0.6,
            attributes: 0.6,
            behaviors_count: 2,
            attributes_count: 2,
        }
    }

    #[test]
    fn test_score_within_range() {
        let hidden = HiddenActivations { primary: 0.5, secondary: 0.6, interaction: 0.3, bonus: 0.7 };
        let result = layer().score(&hidden, &all_features());

        assert!(result.score <= 100);
        assert!(!result.reasons.is_empty());
    }

    #[test]
    fn test_reasons_for_high_match() {
        let hidden = HiddenActivations { primary: 0.7, secondary: 0.6, interaction: 0.5, bonus: 0.8 };
        let result = layer().score(&hidden, &all_features());

        assert_eq!(
            result.reasons,
            vec![
                MatchReason::PerfectBreedMatch,
                MatchReason::SexPreferenceMatch,
                MatchReason::AgeWithinRange,
                MatchReason::MatchingBehaviors,
                MatchReason::MatchingAttributes,
            ]
        );
    }

    #[test]
    fn test_general_reason_for_low_match() {
        let features = FeatureVector {
            breed: 0.3,
            sex: 0.0,
            age: 0.3,
            ..FeatureVector::default()
        };

        assert_eq!(layer().reasons(&features), vec![MatchReason::GeneralCompatibility]);
    }

    #[test]
    fn test_higher_activations_score_higher() {
        let low = HiddenActivations { primary: 0.1, secondary: 0.1, interaction: 0.0, bonus: 0.3 };
        let high = HiddenActivations { primary: 0.7, secondary: 0.6, interaction: 0.5, bonus: 0.8 };

        assert!(layer().raw_score(&high) > layer().raw_score(&low));
    }

    #[test]
    fn test_extreme_activations_clamped() {
        let huge = HiddenActivations { primary: 1e9, secondary: 1.0, interaction: 1.0, bonus: 1.0 };
        assert_eq!(layer().raw_score(&huge), 100);

        let nan = HiddenActivations { primary: f64::NAN, ..HiddenActivations::default() };
        assert_eq!(layer().raw_score(&nan), 0);
    }
}
