//! Person value objects shared by parents and guardians.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::PersonId;

/// Administrative sex marker carried on person records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "M"),
            Sex::Female => write!(f, "F"),
        }
    }
}

/// The field set shared by every adult person record in the wizard
/// (parents in create-new mode, independent guardians, search results).
///
/// Field names follow the wire contract of the enrollment service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFields {
    pub nom: String,
    pub prenom: String,
    pub sexe: Option<Sex>,
    pub telephone: String,
    pub adresse_quartier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lieu_travail: Option<String>,
}

impl PersonFields {
    /// A record with every field empty.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Names of required fields that are still empty.
    ///
    /// The required subset is nom, prenom, telephone, and adresse_quartier;
    /// sexe, profession, and lieu_travail are optional.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.nom.trim().is_empty() {
            missing.push("nom");
        }
        if self.prenom.trim().is_empty() {
            missing.push("prenom");
        }
        if self.telephone.trim().is_empty() {
            missing.push("telephone");
        }
        if self.adresse_quartier.trim().is_empty() {
            missing.push("adresse_quartier");
        }
        missing
    }

    /// Returns true when the required subset is fully entered.
    pub fn required_complete(&self) -> bool {
        self.missing_required().is_empty()
    }
}

/// A person record that already exists server-side, as returned by the
/// existing-parent search.
///
/// The fields are a read-only display cache; they are never sent back as
/// authoritative data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: PersonId,
    pub fields: PersonFields,
}
