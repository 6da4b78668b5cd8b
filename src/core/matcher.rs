use chrono::NaiveDate;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use serde::Serialize;

use crate::core::{filters::is_eligible, scorer::CompatibilityScorer};
use crate::models::{
    FeatureVector, HiddenActivations, MatchReason, NetworkWeights, PetRecord, PreferenceRecord, RankedMatch,
    ScoreResult, TopMatch,
};

/// Filtering and ordering rules for a ranked batch
///
/// Results with `score >= min_score` are kept, sorted by score descending
/// then `pet_id` ascending, and truncated to `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    pub min_score: u8,
    pub limit: Option<usize>,
    /// Score candidates on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
    /// Score given to every candidate when the requester stated no preferences
    pub neutral_score: u8,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            min_score: 0,
            limit: None,
            parallel: true,
            neutral_score: 50,
        }
    }
}

/// Result of the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub matches: Vec<RankedMatch>,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
}

/// Intermediate values behind one candidate's score
///
/// `features` and `hidden` are absent when the requester stated no
/// preferences and the neutral result was used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub pet_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<HiddenActivations>,
    pub result: ScoreResult,
}

/// Batch driver: scores candidates against one requester pet and ranks them
///
/// # Pipeline Stages
/// 1. Eligibility pre-filter (active, not self, not same owner)
/// 2. Compatibility scoring
/// 3. Minimum score filter
/// 4. Stable ranking and limit
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    scorer: CompatibilityScorer,
    policy: MatchPolicy,
}

impl Matcher {
    pub fn new(scorer: CompatibilityScorer, policy: MatchPolicy) -> Self {
        Self { scorer, policy }
    }

    pub fn with_default_weights(as_of: NaiveDate) -> Self {
        Self::new(
            CompatibilityScorer::new(&NetworkWeights::default(), as_of),
            MatchPolicy::default(),
        )
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Copy of this matcher with a different policy
    pub fn with_policy(&self, policy: MatchPolicy) -> Self {
        Self { scorer: self.scorer, policy }
    }

    /// Score and rank candidates for one requester pet
    ///
    /// # Arguments
    /// * `requester_pet` - The requester's own pet, used for species comparison
    /// * `preferences` - The requester's partner preferences, if any
    /// * `candidates` - Candidate pets in storage order
    pub fn find_matches(
        &self,
        requester_pet: &PetRecord,
        preferences: Option<&PreferenceRecord>,
        candidates: &[PetRecord],
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let eligible: Vec<&PetRecord> = candidates
            .iter()
            .filter(|candidate| is_eligible(candidate, requester_pet))
            .collect();
        let eligible_candidates = eligible.len();

        let mut matches: Vec<RankedMatch> = self
            .score_all(requester_pet, preferences, &eligible)
            .into_iter()
            .filter(|m| m.score >= self.policy.min_score)
            .collect();

        rank(&mut matches);

        if let Some(limit) = self.policy.limit {
            matches.truncate(limit);
        }

        tracing::debug!(
            requester = %requester_pet.pet_id,
            total_candidates,
            eligible_candidates,
            returned = matches.len(),
            "ranked candidate batch"
        );

        MatchResult {
            matches,
            total_candidates,
            eligible_candidates,
        }
    }

    /// Best candidate for each of the requester's pets
    ///
    /// Pets with no eligible candidate at or above `min_score` are omitted.
    pub fn top_matches(
        &self,
        requester_pets: &[(PetRecord, Option<PreferenceRecord>)],
        candidates: &[PetRecord],
    ) -> Vec<TopMatch> {
        let single = self.with_policy(MatchPolicy {
            limit: Some(1),
            ..self.policy
        });

        requester_pets
            .iter()
            .filter_map(|(pet, prefs)| {
                let best = single
                    .find_matches(pet, prefs.as_ref(), candidates)
                    .matches
                    .into_iter()
                    .next()?;

                Some(TopMatch {
                    pet_id: pet.pet_id.clone(),
                    best,
                })
            })
            .collect()
    }

    /// Explain every eligible candidate in input order
    ///
    /// Scores agree with [`find_matches`](Self::find_matches); `min_score`
    /// and `limit` are not applied.
    pub fn explain(
        &self,
        requester_pet: &PetRecord,
        preferences: Option<&PreferenceRecord>,
        candidates: &[PetRecord],
    ) -> Vec<Explanation> {
        candidates
            .iter()
            .filter(|candidate| is_eligible(candidate, requester_pet))
            .map(|candidate| match preferences {
                Some(prefs) => {
                    let breakdown = self.scorer.breakdown(candidate, requester_pet, prefs);
                    Explanation {
                        pet_id: candidate.pet_id.clone(),
                        features: Some(breakdown.features),
                        hidden: Some(breakdown.hidden),
                        result: breakdown.result,
                    }
                }
                None => Explanation {
                    pet_id: candidate.pet_id.clone(),
                    features: None,
                    hidden: None,
                    result: self.neutral_result(),
                },
            })
            .collect()
    }

    fn score_all(
        &self,
        requester_pet: &PetRecord,
        preferences: Option<&PreferenceRecord>,
        eligible: &[&PetRecord],
    ) -> Vec<RankedMatch> {
        let score_one = |candidate: &&PetRecord| {
            let result = match preferences {
                Some(prefs) => self.scorer.score(candidate, requester_pet, prefs),
                None => self.neutral_result(),
            };
            RankedMatch {
                pet_id: candidate.pet_id.clone(),
                score: result.score,
                reasons: result.reasons,
            }
        };

        map_candidates(eligible, self.policy.parallel, score_one)
    }

    fn neutral_result(&self) -> ScoreResult {
        ScoreResult {
            score: self.policy.neutral_score.min(100),
            reasons: vec![MatchReason::NoPreferencesSet],
        }
    }
}

#[cfg(feature = "parallel")]
fn map_candidates<F>(eligible: &[&PetRecord], parallel: bool, f: F) -> Vec<RankedMatch>
where
    F: Fn(&&PetRecord) -> RankedMatch + Send + Sync,
{
    if parallel {
        eligible.par_iter().map(f).collect()
    } else {
        eligible.iter().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_candidates<F>(eligible: &[&PetRecord], _parallel: bool, f: F) -> Vec<RankedMatch>
where
    F: Fn(&&PetRecord) -> RankedMatch,
{
    eligible.iter().map(f).collect()
}

/// Sort by score descending, then pet id ascending
///
/// `sort_by` is stable, so duplicate ids keep their input order.
pub fn rank(matches: &mut [RankedMatch]) {
    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.pet_id.cmp(&b.pet_id))
    });
}
