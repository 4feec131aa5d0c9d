//! StepValidator - gates step navigation and final submission.
//!
//! Purely predicates over the draft: no side effects, no network calls.
//! Failures are local and recoverable; the wizard stays put and surfaces
//! the messages inline.

use super::{EnrollmentDraft, GuardianDraft, ParentLink, ParentRole, WizardStep};

/// The rule a failure was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    /// A required field is empty or unselected.
    RequiredField,
    /// A role is in existing mode with no search selection applied.
    ParentSelectionPending,
    /// Guardian derived from the father while the father is absent.
    GuardianDerivedFromAbsentFather,
    /// Guardian derived from the mother while the mother is absent.
    GuardianDerivedFromAbsentMother,
    /// Independent guardian with an incomplete required subset.
    GuardianIncomplete,
    /// Neither parent is present.
    NoParentPresent,
}

/// A single recoverable validation failure, rendered inline by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub rule: ValidationRule,
    /// The offending field, when the rule concerns one.
    pub field: Option<&'static str>,
    pub message: String,
}

impl ValidationFailure {
    fn required(scope: &str, field: &'static str) -> Self {
        Self {
            rule: ValidationRule::RequiredField,
            field: Some(field),
            message: format!("{}: le champ '{}' est obligatoire", scope, field),
        }
    }

    fn rule(rule: ValidationRule, message: impl Into<String>) -> Self {
        Self {
            rule,
            field: None,
            message: message.into(),
        }
    }
}

/// Validates the rules that must hold before leaving `step`.
///
/// Returns an empty vector when the wizard may advance.
pub fn validate_step(draft: &EnrollmentDraft, step: WizardStep) -> Vec<ValidationFailure> {
    match step {
        WizardStep::Student => validate_student(draft),
        WizardStep::Parents => validate_parents(draft),
        WizardStep::Guardian => validate_guardian(draft),
        WizardStep::Review => validate_submission(draft),
    }
}

/// The full submission-time rule set, re-checked defensively at `Review`
/// even though earlier steps enforced their own subsets.
pub fn validate_submission(draft: &EnrollmentDraft) -> Vec<ValidationFailure> {
    let mut failures = validate_student(draft);
    failures.extend(validate_parents(draft));

    match draft.guardian() {
        GuardianDraft::DerivedFromFather if draft.father().is_absent() => {
            failures.push(ValidationFailure::rule(
                ValidationRule::GuardianDerivedFromAbsentFather,
                "Le tuteur ne peut pas etre un pere absent",
            ));
        }
        GuardianDraft::DerivedFromMother if draft.mother().is_absent() => {
            failures.push(ValidationFailure::rule(
                ValidationRule::GuardianDerivedFromAbsentMother,
                "Le tuteur ne peut pas etre une mere absente",
            ));
        }
        GuardianDraft::Independent(fields) if !fields.required_complete() => {
            failures.push(ValidationFailure::rule(
                ValidationRule::GuardianIncomplete,
                "Les coordonnees du tuteur sont incompletes",
            ));
        }
        _ => {}
    }

    if draft.father().is_absent() && draft.mother().is_absent() {
        failures.push(ValidationFailure::rule(
            ValidationRule::NoParentPresent,
            "Au moins un parent (pere ou mere) est requis",
        ));
    }

    failures
}

fn validate_student(draft: &EnrollmentDraft) -> Vec<ValidationFailure> {
    draft
        .student()
        .missing_fields()
        .into_iter()
        .map(|field| ValidationFailure::required("eleve", field))
        .collect()
}

fn validate_parents(draft: &EnrollmentDraft) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    for role in ParentRole::all() {
        let scope = match role {
            ParentRole::Father => "pere",
            ParentRole::Mother => "mere",
        };
        match draft.parent(*role) {
            // Both parents may be absent at this step; rule 4 applies at
            // submission only.
            ParentLink::Absent | ParentLink::Existing { .. } => {}
            ParentLink::Searching => {
                failures.push(ValidationFailure::rule(
                    ValidationRule::ParentSelectionPending,
                    format!("{}: aucune personne selectionnee", scope),
                ));
            }
            ParentLink::New(fields) => {
                failures.extend(
                    fields
                        .missing_required()
                        .into_iter()
                        .map(|field| ValidationFailure::required(scope, field)),
                );
            }
        }
    }
    failures
}

fn validate_guardian(draft: &EnrollmentDraft) -> Vec<ValidationFailure> {
    match draft.guardian() {
        GuardianDraft::Independent(fields) => fields
            .missing_required()
            .into_iter()
            .map(|field| ValidationFailure::required("tuteur", field))
            .collect(),
        // Derived guardians need nothing further: the parent was validated
        // in its own step, or is an existing reference assumed valid.
        GuardianDraft::DerivedFromFather | GuardianDraft::DerivedFromMother => Vec::new(),
    }
}
