use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{PetRecord, PreferenceRecord};

/// Batch of candidates to rank against one requester pet
///
/// ```json
/// {
///   "requester": { "pet_id": "1", "species": "Dog", "breed": "Beagle" },
///   "preferences": { "preferred_sex": "Female" },
///   "candidates": [ { "pet_id": "2", "species": "Dog", "breed": "Beagle" } ],
///   "min_score": 40,
///   "limit": 10
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(nested)]
    pub requester: PetRecord,
    #[serde(default)]
    pub preferences: Option<PreferenceRecord>,
    #[validate(nested)]
    #[serde(default)]
    pub candidates: Vec<PetRecord>,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub min_score: Option<u8>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One of the requester's pets with its own partner preferences
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequesterPet {
    #[validate(nested)]
    pub pet: PetRecord,
    #[serde(default)]
    pub preferences: Option<PreferenceRecord>,
}

/// Find the best candidate for each of the requester's pets
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TopMatchesRequest {
    #[validate(length(min = 1), nested)]
    pub pets: Vec<RequesterPet>,
    #[validate(nested)]
    #[serde(default)]
    pub candidates: Vec<PetRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_request_parses_minimal_payload() {
        let req: RankRequest = serde_json::from_str(
            r#"{"requester": {"pet_id": "1", "species": "Dog"}, "candidates": []}"#,
        )
        .unwrap();

        assert!(req.preferences.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_pet_id_rejected() {
        let req: RankRequest = serde_json::from_str(
            r#"{"requester": {"pet_id": "", "species": "Dog"}}"#,
        )
        .unwrap();

        assert!(req.validate().is_err());
    }
}
