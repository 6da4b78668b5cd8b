//! PawLink Match - pet compatibility scoring engine
//!
//! Scores a candidate pet against a requester's pet and partner preferences
//! with a small fixed-weight network (feature extraction, four activated
//! hidden neurons, an output layer) and ranks candidate batches.

pub mod config;
pub mod core;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use core::{CompatibilityScorer, FeatureExtractor, HiddenLayer, OutputLayer, Matcher, MatchPolicy, MatchResult};
pub use error::MatchError;
pub use models::{PetRecord, PreferenceRecord, FeatureVector, HiddenActivations, MatchReason, ScoreResult, NetworkWeights};
