//! Existing-parent search port.

use async_trait::async_trait;

use crate::domain::enrollment::PersonSummary;
use crate::domain::foundation::DomainError;

/// Port for looking up previously created people by name or phone.
///
/// Results are display caches only; the authoritative record stays
/// server-side and the wizard keeps just the selected id.
#[async_trait]
pub trait PersonSearchGateway: Send + Sync {
    /// Searches people matching `query`.
    ///
    /// Returns matches ordered by relevance, empty when nothing matches.
    ///
    /// # Errors
    ///
    /// - `GatewayUnavailable` on transport failure
    async fn search(&self, query: &str) -> Result<Vec<PersonSummary>, DomainError>;
}
