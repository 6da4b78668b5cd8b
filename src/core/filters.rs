use crate::models::PetRecord;

/// Check whether a candidate may be offered to the requester pet at all
///
/// This is the pre-filter stage of the batch driver: inactive pets, the
/// requester pet itself and pets of the same owner are never scored.
#[inline]
pub fn is_eligible(candidate: &PetRecord, requester_pet: &PetRecord) -> bool {
    if !candidate.active {
        return false;
    }

    if candidate.pet_id == requester_pet.pet_id {
        return false;
    }

    !same_owner(candidate, requester_pet)
}

/// Both owners known and equal
#[inline]
pub fn same_owner(a: &PetRecord, b: &PetRecord) -> bool {
    matches!((&a.owner_id, &b.owner_id), (Some(x), Some(y)) if x == y)
}
