//! StudentDraft - identity of the student being enrolled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Sex;
use crate::domain::foundation::{ClassId, SchoolYearId};

/// The enrolled student's identity plus enrollment targets.
///
/// Every field is required before submission; `missing_fields` drives the
/// first wizard step's validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub nom: String,
    pub prenom: String,
    pub sexe: Option<Sex>,
    pub date_naissance: Option<NaiveDate>,
    pub lieu_naissance: String,
    pub telephone: String,
    pub adresse_quartier: String,
    pub classe_id: Option<ClassId>,
    pub annee_scolaire_id: Option<SchoolYearId>,
}

impl StudentDraft {
    /// Names of fields that are still empty or unselected.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.nom.trim().is_empty() {
            missing.push("nom");
        }
        if self.prenom.trim().is_empty() {
            missing.push("prenom");
        }
        if self.sexe.is_none() {
            missing.push("sexe");
        }
        if self.date_naissance.is_none() {
            missing.push("date_naissance");
        }
        if self.lieu_naissance.trim().is_empty() {
            missing.push("lieu_naissance");
        }
        if self.telephone.trim().is_empty() {
            missing.push("telephone");
        }
        if self.adresse_quartier.trim().is_empty() {
            missing.push("adresse_quartier");
        }
        if self.classe_id.is_none() {
            missing.push("classe_id");
        }
        if self.annee_scolaire_id.is_none() {
            missing.push("annee_scolaire_id");
        }
        missing
    }

    /// Returns true when every field is entered and both targets selected.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
