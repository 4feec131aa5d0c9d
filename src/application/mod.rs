//! Application layer - orchestration of the enrollment wizard.

mod wizard;

pub use wizard::{
    EnrollmentSubmittedEvent, EnrollmentWizard, SearchResponse, SearchTicket, SubmitError,
    SubmitOutcome,
};
