use crate::core::activation::{relu, sigmoid, tanh};
use crate::models::{BonusWeights, FeatureVector, HiddenActivations, InteractionWeights, LinearWeights};

/// Hidden layer: four fixed neurons, each with its own activation
///
/// * `primary`  - ReLU over breed/sex/age evidence
/// * `secondary` - sigmoid over behaviour and attribute ratios
/// * `interaction` - tanh over pairwise feature products
/// * `bonus` - sigmoid over strong features and overlap counts
#[derive(Debug, Clone, Copy)]
pub struct HiddenLayer {
    primary: LinearWeights,
    secondary: LinearWeights,
    interaction: InteractionWeights,
    bonus: BonusWeights,
}

impl HiddenLayer {
    pub fn new(
        primary: LinearWeights,
        secondary: LinearWeights,
        interaction: InteractionWeights,
        bonus: BonusWeights,
    ) -> Self {
        Self { primary, secondary, interaction, bonus }
    }

    pub fn evaluate(&self, features: &FeatureVector) -> HiddenActivations {
        HiddenActivations {
            primary: relu(self.primary.apply(features)),
            secondary: sigmoid(self.secondary.apply(features)),
            interaction: tanh(self.interaction_sum(features)),
            bonus: sigmoid(self.bonus_sum(features)),
        }
    }

    #[inline]
    fn interaction_sum(&self, f: &FeatureVector) -> f64 {
        let w = &self.interaction;
        w.linear.apply(f)
            + w.breed_behaviors * f.breed * f.behaviors
            + w.breed_attributes * f.breed * f.attributes
            + w.age_sex * f.age * f.sex
    }

    #[inline]
    fn bonus_sum(&self, f: &FeatureVector) -> f64 {
        let w = &self.bonus;
        let behaviors = f.behaviors_count.min(w.count_cap) as f64;
        let attributes = f.attributes_count.min(w.count_cap) as f64;

        w.linear.apply(f) + w.per_behavior * behaviors + w.per_attribute * attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NetworkWeights;

    fn layer() -> HiddenLayer {
        let w = NetworkWeights::default();
        HiddenLayer::new(w.primary, w.secondary, w.interaction, w.bonus)
    }

    fn strong_features() -> FeatureVector {
        FeatureVector {
            breed: 1.0,
            sex: 1.0,
            age: 0.9,
            behaviors: 0.8,
            attributes: 0.7,
            behaviors_count: 3,
            attributes_count: 2,
        }
    }

    #[test]
    fn test_activations_within_bounds() {
        let hidden = layer().evaluate(&strong_features());

        assert!(hidden.primary > 0.0);
        assert!(hidden.secondary > 0.0 && hidden.secondary <= 1.0);
        assert!(hidden.interaction >= -1.0 && hidden.interaction <= 1.0);
        assert!(hidden.bonus > 0.0 && hidden.bonus <= 1.0);
    }

    #[test]
    fn test_zero_features() {
        let hidden = layer().evaluate(&FeatureVector::default());

        assert_eq!(hidden.primary, 0.0);
        assert_eq!(hidden.interaction, 0.0);
        assert!(hidden.secondary < 0.5);
        assert!(hidden.bonus < 0.5);
    }

    #[test]
    fn test_primary_rectifies_negative_evidence() {
        let mut weights = NetworkWeights::default();
        weights.primary.bias = -5.0;
        let layer = HiddenLayer::new(weights.primary, weights.secondary, weights.interaction, weights.bonus);

        assert_eq!(layer.evaluate(&strong_features()).primary, 0.0);
    }

    #[test]
    fn test_bonus_counts_are_capped() {
        let at_cap = FeatureVector { behaviors_count: 3, ..strong_features() };
        let over_cap = FeatureVector { behaviors_count: 30, ..strong_features() };

        assert_eq!(layer().evaluate(&at_cap).bonus, layer().evaluate(&over_cap).bonus);
    }

    #[test]
    fn test_interaction_rewards_breed_and_behaviors_together() {
        let breed_only = FeatureVector { breed: 1.0, ..FeatureVector::default() };
        let both = FeatureVector { breed: 1.0, behaviors: 1.0, ..FeatureVector::default() };

        assert_eq!(layer().evaluate(&breed_only).interaction, 0.0);
        assert!(layer().evaluate(&both).interaction > 0.4);
    }
}
