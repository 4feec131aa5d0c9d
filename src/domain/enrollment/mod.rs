//! Enrollment bounded context - the student-enrollment wizard.
//!
//! The wizard collects an enrolled student, optional father/mother records,
//! and a mandatory guardian across four steps, then assembles a single
//! atomic creation request for the enrollment gateway.

mod assembler;
mod draft;
mod events;
mod guardian;
mod parent_link;
mod person;
mod photo;
mod step;
mod student;
mod synchronizer;
mod validation;

pub use assembler::{
    assemble, EnrollmentPayload, GuardianDataPayload, ParentPayload, StudentPayload,
    SubmissionBundle,
};
pub use draft::{EnrollmentDraft, WizardEvent};
pub use events::EnrollmentEvent;
pub use guardian::{GuardianDraft, GuardianRelationKind, TuteurRole};
pub use parent_link::{ParentLink, ParentMode, ParentRole};
pub use person::{PersonFields, PersonSummary, Sex};
pub use photo::{PhotoAttachment, PhotoRole};
pub use step::{StepSequence, WizardStep};
pub use student::StudentDraft;
pub use synchronizer::{
    on_guardian_relation_changed, on_parent_mode_changed, resolve_guardian_fields,
};
pub use validation::{validate_step, validate_submission, ValidationFailure, ValidationRule};
