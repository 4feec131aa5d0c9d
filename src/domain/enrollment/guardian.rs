//! GuardianDraft - the mandatory primary contact ("tuteur").

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ParentRole, PersonFields};

/// The guardian's designated origin, as selected in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardianRelationKind {
    DerivedFromFather,
    DerivedFromMother,
    Independent,
}

/// The guardian record of the draft.
///
/// Derived variants store no fields of their own; their display values are
/// always projected from the referenced parent through the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardianDraft {
    DerivedFromFather,
    DerivedFromMother,
    Independent(PersonFields),
}

impl GuardianDraft {
    /// A blank independent guardian, the wizard's starting point and the
    /// fallback whenever a derivation becomes impossible.
    pub fn blank_independent() -> Self {
        GuardianDraft::Independent(PersonFields::blank())
    }

    /// The relation tag of this record.
    pub fn kind(&self) -> GuardianRelationKind {
        match self {
            GuardianDraft::DerivedFromFather => GuardianRelationKind::DerivedFromFather,
            GuardianDraft::DerivedFromMother => GuardianRelationKind::DerivedFromMother,
            GuardianDraft::Independent(_) => GuardianRelationKind::Independent,
        }
    }

    /// The parent role a derived guardian reads through, if any.
    pub fn derived_role(&self) -> Option<ParentRole> {
        match self {
            GuardianDraft::DerivedFromFather => Some(ParentRole::Father),
            GuardianDraft::DerivedFromMother => Some(ParentRole::Mother),
            GuardianDraft::Independent(_) => None,
        }
    }

    /// The wire-level guardian role of the submission payload.
    pub fn tuteur_role(&self) -> TuteurRole {
        match self {
            GuardianDraft::DerivedFromFather => TuteurRole::Pere,
            GuardianDraft::DerivedFromMother => TuteurRole::Mere,
            GuardianDraft::Independent(_) => TuteurRole::Autre,
        }
    }
}

impl Default for GuardianDraft {
    fn default() -> Self {
        GuardianDraft::blank_independent()
    }
}

/// Wire value of `tuteur_role` in the creation payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TuteurRole {
    Pere,
    Mere,
    Autre,
}

impl fmt::Display for TuteurRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuteurRole::Pere => write!(f, "pere"),
            TuteurRole::Mere => write!(f, "mere"),
            TuteurRole::Autre => write!(f, "autre"),
        }
    }
}
