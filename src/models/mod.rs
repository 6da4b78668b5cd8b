// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod weights;

pub use domain::{PetRecord, PreferenceRecord, FeatureVector, HiddenActivations, MatchReason, ScoreResult, RankedMatch, TopMatch};
pub use requests::{RankRequest, RequesterPet, TopMatchesRequest};
pub use responses::{RankResponse, TopMatchesResponse};
pub use weights::{NetworkWeights, FeatureRules, LinearWeights, InteractionWeights, BonusWeights, OutputWeights, ReasonThresholds};
