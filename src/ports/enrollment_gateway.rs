//! Enrollment gateway port.
//!
//! The REST endpoint that performs the actual enrollment creation sits
//! behind this trait. Transport, auth-token attachment, and retry policy
//! are implementation concerns.

use async_trait::async_trait;

use crate::domain::enrollment::SubmissionBundle;
use crate::domain::foundation::{DomainError, EnrollmentId};

/// Port for the enrollment creation call.
///
/// The submission is all-or-nothing server-side: either the student, any
/// new parent records, and the guardian linkage are all created, or
/// nothing is.
#[async_trait]
pub trait EnrollmentGateway: Send + Sync {
    /// Submits the assembled bundle (JSON payload plus photo parts) as a
    /// single multipart request.
    ///
    /// # Errors
    ///
    /// - `SubmissionRejected` when the backend refuses the payload
    /// - `GatewayUnavailable` on transport failure
    async fn submit(&self, bundle: SubmissionBundle) -> Result<EnrollmentId, DomainError>;
}
