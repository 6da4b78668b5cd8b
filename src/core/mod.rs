// Core algorithm exports
pub mod activation;
pub mod features;
pub mod filters;
pub mod hidden;
pub mod matcher;
pub mod output;
pub mod scorer;

pub use activation::{relu, sigmoid, softplus, tanh};
pub use features::{FeatureExtractor, overlap, sex_feature};
pub use filters::{is_eligible, same_owner};
pub use hidden::HiddenLayer;
pub use matcher::{Explanation, Matcher, MatchPolicy, MatchResult, rank};
pub use output::OutputLayer;
pub use scorer::{CompatibilityScorer, ScoreBreakdown};
