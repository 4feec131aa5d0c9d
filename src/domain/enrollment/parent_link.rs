//! ParentLink - per-role tagged link to a father or mother record.
//!
//! Each role is addressed by the `ParentRole` enum rather than constructed
//! string keys, so the compiler rules out the typo class of bugs the old
//! dashboard suffered from.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{PersonFields, PersonSummary};
use crate::domain::foundation::PersonId;

/// The two optional parent roles of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentRole {
    Father,
    Mother,
}

impl ParentRole {
    /// Both roles, father first.
    pub fn all() -> &'static [ParentRole] {
        &[ParentRole::Father, ParentRole::Mother]
    }
}

impl fmt::Display for ParentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRole::Father => write!(f, "pere"),
            ParentRole::Mother => write!(f, "mere"),
        }
    }
}

/// The mode tag a role can be switched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentMode {
    /// No record for this role.
    Absent,
    /// Reference a previously created person, selected via search.
    Existing,
    /// Full data to be created atomically with the enrollment.
    New,
}

/// One parent role's record within the draft.
///
/// `Searching` is `Existing` mode before any search result has been picked;
/// it carries no data and never reaches the submission payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentLink {
    Absent,
    Searching,
    Existing {
        id: PersonId,
        /// Read-only display cache (name/phone/address/profession), used for
        /// rendering and guardian derivation, never sent back as authoritative.
        display: PersonFields,
    },
    New(PersonFields),
}

impl ParentLink {
    /// The mode tag of this link.
    pub fn mode(&self) -> ParentMode {
        match self {
            ParentLink::Absent => ParentMode::Absent,
            ParentLink::Searching | ParentLink::Existing { .. } => ParentMode::Existing,
            ParentLink::New(_) => ParentMode::New,
        }
    }

    /// A freshly reset link for the given mode.
    ///
    /// Mode transitions always go through here: no field survives a switch.
    pub fn reset_for(mode: ParentMode) -> Self {
        match mode {
            ParentMode::Absent => ParentLink::Absent,
            ParentMode::Existing => ParentLink::Searching,
            ParentMode::New => ParentLink::New(PersonFields::blank()),
        }
    }

    /// Builds an `Existing` link from a search selection.
    pub fn from_selection(person: PersonSummary) -> Self {
        ParentLink::Existing {
            id: person.id,
            display: person.fields,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ParentLink::Absent)
    }

    /// The current field snapshot for this role, if any.
    ///
    /// `Existing` yields the display cache, `New` the entered data.
    pub fn fields(&self) -> Option<&PersonFields> {
        match self {
            ParentLink::Absent | ParentLink::Searching => None,
            ParentLink::Existing { display, .. } => Some(display),
            ParentLink::New(fields) => Some(fields),
        }
    }

    /// The referenced person id, for `Existing` links only.
    pub fn person_id(&self) -> Option<PersonId> {
        match self {
            ParentLink::Existing { id, .. } => Some(*id),
            _ => None,
        }
    }
}

impl Default for ParentLink {
    fn default() -> Self {
        ParentLink::Absent
    }
}
