//! SubmissionAssembler - projects a validated draft into the creation payload.
//!
//! A total pure function of the draft: no partial results, no network calls.
//! The controller hands the returned bundle to the enrollment gateway as a
//! single multipart submission (JSON payload plus sibling photo parts).

use chrono::NaiveDate;
use serde::Serialize;

use super::{
    EnrollmentDraft, GuardianDraft, ParentLink, ParentRole, PersonFields, PhotoAttachment,
    PhotoRole, Sex, TuteurRole,
};
use crate::domain::foundation::{ClassId, PersonId, SchoolYearId};

/// The `eleve` sub-object of the creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct StudentPayload {
    pub nom: String,
    pub prenom: String,
    pub sexe: Option<Sex>,
    pub telephone: String,
    pub adresse_quartier: String,
    pub date_naissance: Option<NaiveDate>,
    pub lieu_naissance: String,
}

/// A parent sub-object: a bare reference for existing people, full data for
/// records created with the enrollment.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ParentPayload {
    Existing { id: PersonId },
    New { data: PersonFields },
}

/// The `tuteur_data` sub-object, present only for independent guardians.
#[derive(Debug, Clone, Serialize)]
pub struct GuardianDataPayload {
    pub data: PersonFields,
}

/// The polymorphic enrollment creation payload.
///
/// Absent sub-objects are omitted entirely, never serialized as null: the
/// backend derives the guardian identity from whichever parent object is
/// supplied when `tuteur_role` is not `"autre"`.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentPayload {
    pub eleve: StudentPayload,
    pub tuteur_role: TuteurRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuteur_data: Option<GuardianDataPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pere: Option<ParentPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mere: Option<ParentPayload>,
    pub classe_id: Option<ClassId>,
    pub annee_scolaire_id: Option<SchoolYearId>,
}

/// The complete submission: JSON payload plus pending photo parts keyed by
/// role.
#[derive(Debug, Clone)]
pub struct SubmissionBundle {
    pub payload: EnrollmentPayload,
    pub photos: Vec<(PhotoRole, PhotoAttachment)>,
}

/// Builds the submission bundle from the current draft state.
///
/// Callers run `validate_submission` first; this function stays total
/// regardless and simply omits whatever is not there.
pub fn assemble(draft: &EnrollmentDraft) -> SubmissionBundle {
    let student = draft.student();

    let payload = EnrollmentPayload {
        eleve: StudentPayload {
            nom: student.nom.clone(),
            prenom: student.prenom.clone(),
            sexe: student.sexe,
            telephone: student.telephone.clone(),
            adresse_quartier: student.adresse_quartier.clone(),
            date_naissance: student.date_naissance,
            lieu_naissance: student.lieu_naissance.clone(),
        },
        tuteur_role: draft.guardian().tuteur_role(),
        tuteur_data: match draft.guardian() {
            GuardianDraft::Independent(fields) => Some(GuardianDataPayload {
                data: fields.clone(),
            }),
            _ => None,
        },
        pere: parent_payload(draft.father()),
        mere: parent_payload(draft.mother()),
        classe_id: student.classe_id,
        annee_scolaire_id: student.annee_scolaire_id,
    };

    let photos = PhotoRole::all()
        .iter()
        .filter(|role| photo_travels(draft, **role))
        .filter_map(|role| draft.photo(*role).map(|p| (*role, p.clone())))
        .collect();

    SubmissionBundle { payload, photos }
}

fn parent_payload(link: &ParentLink) -> Option<ParentPayload> {
    match link {
        ParentLink::Absent | ParentLink::Searching => None,
        ParentLink::Existing { id, .. } => Some(ParentPayload::Existing { id: *id }),
        ParentLink::New(fields) => Some(ParentPayload::New {
            data: fields.clone(),
        }),
    }
}

/// A photo part travels only when the submission carries the matching
/// person record.
fn photo_travels(draft: &EnrollmentDraft, role: PhotoRole) -> bool {
    match role {
        PhotoRole::Student => true,
        PhotoRole::Guardian => matches!(draft.guardian(), GuardianDraft::Independent(_)),
        PhotoRole::Father => matches!(draft.parent(ParentRole::Father), ParentLink::New(_)),
        PhotoRole::Mother => matches!(draft.parent(ParentRole::Mother), ParentLink::New(_)),
    }
}
