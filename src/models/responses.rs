use serde::{Deserialize, Serialize};
use crate::models::domain::{RankedMatch, TopMatch};

/// Response for a ranked batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub matches: Vec<RankedMatch>,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
}

/// Response for a top-matches request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopMatchesResponse {
    pub top_matches: Vec<TopMatch>,
}
