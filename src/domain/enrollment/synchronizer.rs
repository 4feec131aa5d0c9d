//! RelationshipSynchronizer - keeps the guardian consistent with the parents.
//!
//! These three pure functions are the only place dependent-field derivation
//! happens. Derived guardians never store their own copy of a parent's
//! fields; every read goes through `resolve_guardian_fields` so the guardian
//! view always reflects the latest parent edits.

use super::{EnrollmentDraft, GuardianDraft, GuardianRelationKind, ParentRole, PersonFields};

/// Computes the guardian record after the user selects a new relation.
///
/// A derived relation is only honored while the referenced parent is
/// non-absent; an impossible selection falls back to a blank independent
/// guardian. That fallback is a policy repair, not an error.
///
/// Selecting `Independent` keeps the current fields when the guardian was
/// already independent, and yields blank fields when coming from a derived
/// relation. Manual entries are deliberately not remembered across a derived
/// round trip.
pub fn on_guardian_relation_changed(
    draft: &EnrollmentDraft,
    kind: GuardianRelationKind,
) -> GuardianDraft {
    match kind {
        GuardianRelationKind::DerivedFromFather if !draft.father().is_absent() => {
            GuardianDraft::DerivedFromFather
        }
        GuardianRelationKind::DerivedFromMother if !draft.mother().is_absent() => {
            GuardianDraft::DerivedFromMother
        }
        GuardianRelationKind::Independent => match draft.guardian() {
            GuardianDraft::Independent(fields) => GuardianDraft::Independent(fields.clone()),
            _ => GuardianDraft::blank_independent(),
        },
        // Derived relation pointing at an absent parent: repair, don't fail.
        _ => GuardianDraft::blank_independent(),
    }
}

/// Computes the guardian record after a parent role changed mode.
///
/// A guardian can never reference an absent parent: if the guardian is
/// currently derived from `role` and that parent is now absent, it is forced
/// back to independent with blank fields. In every other case the guardian
/// is returned unchanged, which makes the operation idempotent.
pub fn on_parent_mode_changed(role: ParentRole, draft: &EnrollmentDraft) -> GuardianDraft {
    let dangling = draft.guardian().derived_role() == Some(role) && draft.parent(role).is_absent();
    if dangling {
        GuardianDraft::blank_independent()
    } else {
        draft.guardian().clone()
    }
}

/// Pure projection of the guardian's current field values.
///
/// Derived variants return the referenced parent's snapshot (whatever its
/// mode); `Independent` returns its own stored fields. Recomputed on every
/// read, never cached.
pub fn resolve_guardian_fields(draft: &EnrollmentDraft) -> PersonFields {
    match draft.guardian() {
        GuardianDraft::Independent(fields) => fields.clone(),
        GuardianDraft::DerivedFromFather => draft
            .father()
            .fields()
            .cloned()
            .unwrap_or_else(PersonFields::blank),
        GuardianDraft::DerivedFromMother => draft
            .mother()
            .fields()
            .cloned()
            .unwrap_or_else(PersonFields::blank),
    }
}
