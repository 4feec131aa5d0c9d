//! EnrollmentWizard - the stateful controller of the enrollment flow.
//!
//! Holds the single draft instance, routes UI events through the reducer,
//! gates navigation with the step validator, and talks to the enrollment
//! and search gateways. All mutations go through `&mut self`; the only
//! asynchronous operations are the two port calls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::WizardConfig;
use crate::domain::enrollment::{
    assemble, resolve_guardian_fields, validate_step, validate_submission, EnrollmentDraft,
    EnrollmentEvent, ParentRole, PersonFields, PersonSummary, ValidationFailure, WizardEvent,
    WizardStep,
};
use crate::domain::foundation::{
    domain_event, CommandMetadata, DomainError, DraftId, EnrollmentId, ErrorCode, EventId,
    SerializableDomainEvent, Timestamp,
};
use crate::ports::{EnrollmentGateway, EventPublisher, PersonSearchGateway};

/// Ties an async search result to the draft it was issued for.
///
/// The continuation point compares the ticket against the live draft and
/// discards results that arrive after a cancel or a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    draft_id: DraftId,
}

/// Result of an existing-parent search.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    /// Hand this back to `select_parent` when applying a selection.
    pub ticket: SearchTicket,
    pub matches: Vec<PersonSummary>,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The id assigned by the enrollment service.
    pub enrollment_id: EnrollmentId,
    /// The published event.
    pub event: EnrollmentSubmittedEvent,
}

/// Event published when an enrollment is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentSubmittedEvent {
    /// Unique event identifier.
    pub event_id: EventId,
    /// The draft that produced the enrollment.
    pub draft_id: DraftId,
    /// The id assigned by the enrollment service.
    pub enrollment_id: EnrollmentId,
    /// When the submission completed.
    pub submitted_at: Timestamp,
}

domain_event!(
    EnrollmentSubmittedEvent,
    event_type = "enrollment.submitted.v1",
    schema_version = 1,
    aggregate_id = draft_id,
    aggregate_type = "EnrollmentDraft",
    occurred_at = submitted_at,
    event_id = event_id
);

/// Error type for the submission path.
#[derive(Debug, Clone)]
pub enum SubmitError {
    /// The submission-time rule set rejected the draft.
    Validation(Vec<ValidationFailure>),
    /// The gateway rejected or failed the call; the draft is retained.
    Gateway(DomainError),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Validation(failures) => {
                write!(f, "Submission blocked by {} validation failure(s)", failures.len())
            }
            SubmitError::Gateway(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SubmitError {}

/// The wizard controller.
///
/// One instance per open wizard; the draft it owns is destroyed on submit
/// success or cancel and survives gateway failures for manual retry.
pub struct EnrollmentWizard {
    config: WizardConfig,
    draft: EnrollmentDraft,
    last_submission_error: Option<DomainError>,
    enrollment_gateway: Arc<dyn EnrollmentGateway>,
    person_search: Arc<dyn PersonSearchGateway>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl EnrollmentWizard {
    pub fn new(
        config: WizardConfig,
        enrollment_gateway: Arc<dyn EnrollmentGateway>,
        person_search: Arc<dyn PersonSearchGateway>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            config,
            draft: EnrollmentDraft::new(),
            last_submission_error: None,
            enrollment_gateway,
            person_search,
            event_publisher,
        }
    }

    /// Returns the current draft.
    pub fn draft(&self) -> &EnrollmentDraft {
        &self.draft
    }

    /// Returns the error of the last failed submission, if any.
    pub fn last_submission_error(&self) -> Option<&DomainError> {
        self.last_submission_error.as_ref()
    }

    /// The guardian's current display values, projected through the
    /// synchronizer on every call.
    pub fn guardian_view(&self) -> PersonFields {
        resolve_guardian_fields(&self.draft)
    }

    /// Drains the draft's accumulated events for the UI.
    pub fn take_events(&mut self) -> Vec<EnrollmentEvent> {
        self.draft.take_events()
    }

    // ───────────────────────────────────────────────────────────────
    // Field edits
    // ───────────────────────────────────────────────────────────────

    /// Routes one UI event through the reducer.
    ///
    /// Photo attachments are checked against the configured size ceiling
    /// before entering the reducer; everything else is accepted as-is.
    pub fn handle(&mut self, event: WizardEvent) -> Result<(), DomainError> {
        if let WizardEvent::PhotoAttached { role, photo } = &event {
            if photo.size_bytes() > self.config.max_photo_bytes {
                return Err(DomainError::new(
                    ErrorCode::PhotoTooLarge,
                    format!(
                        "Photo for {} exceeds the {} byte ceiling",
                        role, self.config.max_photo_bytes
                    ),
                )
                .with_detail("size", photo.size_bytes().to_string()));
            }
        }

        let requested = match &event {
            WizardEvent::GuardianRelationChanged(kind) => Some(*kind),
            _ => None,
        };
        let was = self.draft.guardian().kind();
        self.draft = self.draft.apply(event);

        // The reducer repairs impossible guardian states silently; make the
        // repair visible in the logs.
        let now = self.draft.guardian().kind();
        let repaired = match requested {
            Some(kind) => now != kind,
            None => now != was,
        };
        if repaired {
            tracing::debug!(?was, ?now, "Guardian relation repaired for consistency");
        }
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    /// Validates the current step and advances on success.
    ///
    /// On failure the cursor stays put and the failure list is returned
    /// for inline rendering. Entering the guardian step re-resolves stale
    /// derivations for both parent roles.
    pub fn next(&mut self) -> Result<WizardStep, Vec<ValidationFailure>> {
        let failures = validate_step(&self.draft, self.draft.step());
        if !failures.is_empty() {
            return Err(failures);
        }

        match self.draft.advance() {
            Ok(draft) => {
                self.draft = draft;
                Ok(self.draft.step())
            }
            // Already at the last step; submit is the only way forward.
            Err(_) => Ok(self.draft.step()),
        }
    }

    /// Moves backward without re-validation; a no-op at the first step.
    pub fn back(&mut self) -> WizardStep {
        self.draft = self.draft.retreat();
        self.draft.step()
    }

    /// Discards the draft and starts over.
    pub fn cancel(&mut self) {
        tracing::debug!(draft_id = %self.draft.id(), "Enrollment draft cancelled");
        self.draft = EnrollmentDraft::new();
        self.last_submission_error = None;
    }

    // ───────────────────────────────────────────────────────────────
    // Existing-parent search
    // ───────────────────────────────────────────────────────────────

    /// Searches existing people for a parent selection.
    ///
    /// Queries below the configured minimum length return an empty result
    /// without touching the gateway.
    pub async fn search_parents(&self, query: &str) -> Result<SearchResponse, DomainError> {
        let ticket = SearchTicket {
            draft_id: self.draft.id(),
        };

        if query.chars().count() < self.config.search_min_chars {
            return Ok(SearchResponse {
                ticket,
                matches: Vec::new(),
            });
        }

        let matches = self.person_search.search(query).await?;
        tracing::debug!(query, count = matches.len(), "Parent search completed");
        Ok(SearchResponse { ticket, matches })
    }

    /// Applies a search selection to a parent role.
    ///
    /// Returns false and leaves the draft untouched when the ticket does
    /// not name the live draft (the result resolved after a cancel or a
    /// completed submission).
    pub fn select_parent(
        &mut self,
        ticket: SearchTicket,
        role: ParentRole,
        person: PersonSummary,
    ) -> bool {
        if ticket.draft_id != self.draft.id() {
            tracing::debug!(
                stale = %ticket.draft_id,
                current = %self.draft.id(),
                "Discarding stale search selection"
            );
            return false;
        }
        self.draft = self.draft.apply(WizardEvent::ParentSelected { role, person });
        true
    }

    // ───────────────────────────────────────────────────────────────
    // Submission
    // ───────────────────────────────────────────────────────────────

    /// Runs the submission-time rule set, assembles the payload, and calls
    /// the enrollment gateway.
    ///
    /// The assembler is only invoked once validation passes. Gateway
    /// success destroys the draft; gateway failure retains it so the user
    /// can retry without re-entering data. Once the gateway has accepted
    /// the submission, a publish failure must not resurrect the draft: the
    /// enrollment already exists server-side and a retry would duplicate
    /// it, so the event is dropped with a warning instead.
    pub async fn submit(&mut self, metadata: CommandMetadata) -> Result<SubmitOutcome, SubmitError> {
        let failures = validate_submission(&self.draft);
        if !failures.is_empty() {
            return Err(SubmitError::Validation(failures));
        }

        let bundle = assemble(&self.draft);
        let draft_id = self.draft.id();

        match self.enrollment_gateway.submit(bundle).await {
            Ok(enrollment_id) => {
                let event = EnrollmentSubmittedEvent {
                    event_id: EventId::new(),
                    draft_id,
                    enrollment_id,
                    submitted_at: Timestamp::now(),
                };

                let envelope = event
                    .to_envelope()
                    .with_correlation_id(metadata.correlation_id())
                    .with_user_id(metadata.user_id.to_string());
                if let Err(err) = self.event_publisher.publish(envelope).await {
                    tracing::warn!(
                        %draft_id,
                        %enrollment_id,
                        error = %err,
                        "Enrollment created but event publication failed"
                    );
                }

                tracing::info!(%draft_id, %enrollment_id, "Enrollment submitted");
                self.draft = EnrollmentDraft::new();
                self.last_submission_error = None;

                Ok(SubmitOutcome {
                    enrollment_id,
                    event,
                })
            }
            Err(err) => {
                tracing::warn!(%draft_id, error = %err, "Enrollment submission failed");
                self.last_submission_error = Some(err.clone());
                Err(SubmitError::Gateway(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enrollment::{
        GuardianRelationKind, ParentMode, PhotoAttachment, PhotoRole, Sex, StudentDraft,
    };
    use crate::domain::foundation::{ClassId, EventEnvelope, PersonId, SchoolYearId};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    // ─────────────────────────────────────────────────────────────────────
    // Mock implementations
    // ─────────────────────────────────────────────────────────────────────

    struct MockEnrollmentGateway {
        submissions: Mutex<Vec<crate::domain::enrollment::SubmissionBundle>>,
        fail_with: Option<ErrorCode>,
    }

    impl MockEnrollmentGateway {
        fn new() -> Self {
            Self {
                submissions: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        /// Transport-level outage; nothing reached the backend.
        fn failing() -> Self {
            Self {
                submissions: Mutex::new(Vec::new()),
                fail_with: Some(ErrorCode::GatewayUnavailable),
            }
        }

        /// The backend received the payload and refused it.
        fn rejecting() -> Self {
            Self {
                submissions: Mutex::new(Vec::new()),
                fail_with: Some(ErrorCode::SubmissionRejected),
            }
        }

        fn submission_count(&self) -> usize {
            self.submissions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EnrollmentGateway for MockEnrollmentGateway {
        async fn submit(
            &self,
            bundle: crate::domain::enrollment::SubmissionBundle,
        ) -> Result<EnrollmentId, DomainError> {
            if let Some(code) = self.fail_with {
                return Err(DomainError::new(code, "Simulated gateway failure"));
            }
            self.submissions.lock().unwrap().push(bundle);
            Ok(EnrollmentId::new())
        }
    }

    struct MockPersonSearchGateway {
        results: Vec<PersonSummary>,
        queries: Mutex<Vec<String>>,
    }

    impl MockPersonSearchGateway {
        fn new(results: Vec<PersonSummary>) -> Self {
            Self {
                results,
                queries: Mutex::new(Vec::new()),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PersonSearchGateway for MockPersonSearchGateway {
        async fn search(&self, query: &str) -> Result<Vec<PersonSummary>, DomainError> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.results.clone())
        }
    }

    struct MockEventPublisher {
        published_events: Mutex<Vec<EventEnvelope>>,
        fail_publish: bool,
    }

    impl MockEventPublisher {
        fn new() -> Self {
            Self {
                published_events: Mutex::new(Vec::new()),
                fail_publish: false,
            }
        }

        fn failing() -> Self {
            Self {
                published_events: Mutex::new(Vec::new()),
                fail_publish: true,
            }
        }

        fn published_events(&self) -> Vec<EventEnvelope> {
            self.published_events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventPublisher for MockEventPublisher {
        async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
            if self.fail_publish {
                return Err(DomainError::new(
                    ErrorCode::GatewayUnavailable,
                    "Simulated event bus outage",
                ));
            }
            self.published_events.lock().unwrap().push(event);
            Ok(())
        }

        async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
            for event in events {
                self.publish(event).await?;
            }
            Ok(())
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Test helpers
    // ─────────────────────────────────────────────────────────────────────

    fn complete_student() -> StudentDraft {
        StudentDraft {
            nom: "Sylla".into(),
            prenom: "Mohamed".into(),
            sexe: Some(Sex::Male),
            date_naissance: NaiveDate::from_ymd_opt(2017, 6, 5),
            lieu_naissance: "Conakry".into(),
            telephone: "620000050".into(),
            adresse_quartier: "Lambanyi".into(),
            classe_id: Some(ClassId::new()),
            annee_scolaire_id: Some(SchoolYearId::new()),
        }
    }

    fn complete_fields() -> PersonFields {
        PersonFields {
            nom: "Sylla".into(),
            prenom: "Kadiatou".into(),
            sexe: Some(Sex::Female),
            telephone: "620000051".into(),
            adresse_quartier: "Lambanyi".into(),
            profession: None,
            lieu_travail: None,
        }
    }

    fn wizard_with(
        gateway: Arc<MockEnrollmentGateway>,
        search: Arc<MockPersonSearchGateway>,
        publisher: Arc<MockEventPublisher>,
    ) -> EnrollmentWizard {
        EnrollmentWizard::new(WizardConfig::default(), gateway, search, publisher)
    }

    fn default_wizard() -> EnrollmentWizard {
        wizard_with(
            Arc::new(MockEnrollmentGateway::new()),
            Arc::new(MockPersonSearchGateway::new(Vec::new())),
            Arc::new(MockEventPublisher::new()),
        )
    }

    /// Drives a wizard to a submittable state: complete student, new
    /// mother, guardian derived from her.
    fn fill_submittable(wizard: &mut EnrollmentWizard) {
        wizard
            .handle(WizardEvent::StudentEdited(complete_student()))
            .unwrap();
        wizard
            .handle(WizardEvent::ParentModeChanged {
                role: ParentRole::Mother,
                mode: ParentMode::New,
            })
            .unwrap();
        wizard
            .handle(WizardEvent::ParentFieldsEdited {
                role: ParentRole::Mother,
                fields: complete_fields(),
            })
            .unwrap();
        wizard
            .handle(WizardEvent::GuardianRelationChanged(
                GuardianRelationKind::DerivedFromMother,
            ))
            .unwrap();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation tests
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn next_blocks_on_incomplete_student() {
        let mut wizard = default_wizard();
        let result = wizard.next();
        assert!(result.is_err());
        assert_eq!(wizard.draft().step(), WizardStep::Student);
    }

    #[test]
    fn next_advances_after_student_completed() {
        let mut wizard = default_wizard();
        wizard
            .handle(WizardEvent::StudentEdited(complete_student()))
            .unwrap();
        assert_eq!(wizard.next().unwrap(), WizardStep::Parents);
    }

    #[test]
    fn back_never_validates() {
        let mut wizard = default_wizard();
        wizard
            .handle(WizardEvent::StudentEdited(complete_student()))
            .unwrap();
        wizard.next().unwrap();

        // Blank the student again; back must still succeed
        wizard
            .handle(WizardEvent::StudentEdited(StudentDraft::default()))
            .unwrap();
        assert_eq!(wizard.back(), WizardStep::Student);
    }

    #[test]
    fn back_is_noop_at_first_step() {
        let mut wizard = default_wizard();
        assert_eq!(wizard.back(), WizardStep::Student);
    }

    #[test]
    fn oversized_photo_is_rejected_before_the_reducer() {
        let mut wizard = wizard_with(
            Arc::new(MockEnrollmentGateway::new()),
            Arc::new(MockPersonSearchGateway::new(Vec::new())),
            Arc::new(MockEventPublisher::new()),
        );
        let oversized = PhotoAttachment::new(
            "big.jpg",
            "image/jpeg",
            vec![0u8; WizardConfig::default().max_photo_bytes + 1],
        );
        let err = wizard
            .handle(WizardEvent::PhotoAttached {
                role: PhotoRole::Student,
                photo: oversized,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PhotoTooLarge);
        assert!(wizard.draft().photo(PhotoRole::Student).is_none());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Search tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn short_queries_skip_the_gateway() {
        let search = Arc::new(MockPersonSearchGateway::new(Vec::new()));
        let wizard = wizard_with(
            Arc::new(MockEnrollmentGateway::new()),
            search.clone(),
            Arc::new(MockEventPublisher::new()),
        );

        let response = wizard.search_parents("a").await.unwrap();
        assert!(response.matches.is_empty());
        assert!(search.queries().is_empty());
    }

    #[tokio::test]
    async fn long_enough_queries_reach_the_gateway() {
        let person = PersonSummary {
            id: PersonId::new(),
            fields: complete_fields(),
        };
        let search = Arc::new(MockPersonSearchGateway::new(vec![person]));
        let wizard = wizard_with(
            Arc::new(MockEnrollmentGateway::new()),
            search.clone(),
            Arc::new(MockEventPublisher::new()),
        );

        let response = wizard.search_parents("Sylla").await.unwrap();
        assert_eq!(response.matches.len(), 1);
        assert_eq!(search.queries(), vec!["Sylla".to_string()]);
    }

    #[tokio::test]
    async fn fresh_selection_is_applied() {
        let person = PersonSummary {
            id: PersonId::new(),
            fields: complete_fields(),
        };
        let mut wizard = default_wizard();
        wizard
            .handle(WizardEvent::ParentModeChanged {
                role: ParentRole::Father,
                mode: ParentMode::Existing,
            })
            .unwrap();

        let response = wizard.search_parents("Sylla").await.unwrap();
        assert!(wizard.select_parent(response.ticket, ParentRole::Father, person.clone()));
        assert_eq!(wizard.draft().father().person_id(), Some(person.id));
    }

    #[tokio::test]
    async fn stale_selection_is_discarded_after_cancel() {
        let person = PersonSummary {
            id: PersonId::new(),
            fields: complete_fields(),
        };
        let mut wizard = default_wizard();
        wizard
            .handle(WizardEvent::ParentModeChanged {
                role: ParentRole::Father,
                mode: ParentMode::Existing,
            })
            .unwrap();

        let response = wizard.search_parents("Sylla").await.unwrap();
        wizard.cancel();

        assert!(!wizard.select_parent(response.ticket, ParentRole::Father, person));
        assert!(wizard.draft().father().is_absent());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Submission tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn submit_rejects_invalid_draft_without_calling_gateway() {
        let gateway = Arc::new(MockEnrollmentGateway::new());
        let mut wizard = wizard_with(
            gateway.clone(),
            Arc::new(MockPersonSearchGateway::new(Vec::new())),
            Arc::new(MockEventPublisher::new()),
        );

        let result = wizard.submit(CommandMetadata::test_fixture()).await;

        // The assembler and gateway are never reached on a failing rule set
        assert!(matches!(result, Err(SubmitError::Validation(_))));
        assert_eq!(gateway.submission_count(), 0);
    }

    #[tokio::test]
    async fn submit_rejects_when_both_parents_absent() {
        let mut wizard = default_wizard();
        wizard
            .handle(WizardEvent::StudentEdited(complete_student()))
            .unwrap();
        wizard
            .handle(WizardEvent::GuardianFieldsEdited(complete_fields()))
            .unwrap();

        let result = wizard.submit(CommandMetadata::test_fixture()).await;
        match result {
            Err(SubmitError::Validation(failures)) => {
                assert!(failures.iter().any(|f| f.rule
                    == crate::domain::enrollment::ValidationRule::NoParentPresent));
            }
            other => panic!("Expected validation failure, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn successful_submit_destroys_the_draft() {
        let gateway = Arc::new(MockEnrollmentGateway::new());
        let mut wizard = wizard_with(
            gateway.clone(),
            Arc::new(MockPersonSearchGateway::new(Vec::new())),
            Arc::new(MockEventPublisher::new()),
        );
        fill_submittable(&mut wizard);
        let old_draft_id = wizard.draft().id();

        let outcome = wizard.submit(CommandMetadata::test_fixture()).await.unwrap();

        assert_eq!(outcome.event.draft_id, old_draft_id);
        assert_eq!(gateway.submission_count(), 1);
        assert_ne!(wizard.draft().id(), old_draft_id);
        assert_eq!(wizard.draft().step(), WizardStep::Student);
        assert!(wizard.last_submission_error().is_none());
    }

    #[tokio::test]
    async fn successful_submit_publishes_event_with_metadata() {
        let publisher = Arc::new(MockEventPublisher::new());
        let mut wizard = wizard_with(
            Arc::new(MockEnrollmentGateway::new()),
            Arc::new(MockPersonSearchGateway::new(Vec::new())),
            publisher.clone(),
        );
        fill_submittable(&mut wizard);

        wizard.submit(CommandMetadata::test_fixture()).await.unwrap();

        let events = publisher.published_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "enrollment.submitted.v1");
        assert_eq!(
            events[0].metadata.correlation_id.as_deref(),
            Some("test-correlation-id")
        );
        assert_eq!(events[0].metadata.user_id.as_deref(), Some("test-admin"));
    }

    #[tokio::test]
    async fn failed_submit_retains_the_draft_for_retry() {
        let publisher = Arc::new(MockEventPublisher::new());
        let mut wizard = wizard_with(
            Arc::new(MockEnrollmentGateway::failing()),
            Arc::new(MockPersonSearchGateway::new(Vec::new())),
            publisher.clone(),
        );
        fill_submittable(&mut wizard);
        let draft_id = wizard.draft().id();

        let result = wizard.submit(CommandMetadata::test_fixture()).await;

        assert!(matches!(result, Err(SubmitError::Gateway(_))));
        assert_eq!(wizard.draft().id(), draft_id);
        assert_eq!(
            wizard.last_submission_error().map(|e| e.code),
            Some(ErrorCode::GatewayUnavailable)
        );
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn rejected_submission_surfaces_the_backend_refusal() {
        let mut wizard = wizard_with(
            Arc::new(MockEnrollmentGateway::rejecting()),
            Arc::new(MockPersonSearchGateway::new(Vec::new())),
            Arc::new(MockEventPublisher::new()),
        );
        fill_submittable(&mut wizard);
        let draft_id = wizard.draft().id();

        let result = wizard.submit(CommandMetadata::test_fixture()).await;

        assert!(matches!(result, Err(SubmitError::Gateway(_))));
        assert_eq!(wizard.draft().id(), draft_id);
        assert_eq!(
            wizard.last_submission_error().map(|e| e.code),
            Some(ErrorCode::SubmissionRejected)
        );
    }

    #[tokio::test]
    async fn publish_failure_after_gateway_success_still_completes() {
        let gateway = Arc::new(MockEnrollmentGateway::new());
        let mut wizard = wizard_with(
            gateway.clone(),
            Arc::new(MockPersonSearchGateway::new(Vec::new())),
            Arc::new(MockEventPublisher::failing()),
        );
        fill_submittable(&mut wizard);
        let old_draft_id = wizard.draft().id();

        // The enrollment already exists once the gateway accepts it; a dead
        // event bus must not leave the draft around inviting a duplicate.
        let outcome = wizard.submit(CommandMetadata::test_fixture()).await.unwrap();

        assert_eq!(outcome.event.draft_id, old_draft_id);
        assert_eq!(gateway.submission_count(), 1);
        assert_ne!(wizard.draft().id(), old_draft_id);
        assert!(wizard.last_submission_error().is_none());

        // Retrying on the fresh draft cannot resubmit the old enrollment
        assert!(matches!(
            wizard.submit(CommandMetadata::test_fixture()).await,
            Err(SubmitError::Validation(_))
        ));
        assert_eq!(gateway.submission_count(), 1);
    }

    #[tokio::test]
    async fn retry_after_failure_can_succeed() {
        let mut wizard = wizard_with(
            Arc::new(MockEnrollmentGateway::failing()),
            Arc::new(MockPersonSearchGateway::new(Vec::new())),
            Arc::new(MockEventPublisher::new()),
        );
        fill_submittable(&mut wizard);
        assert!(wizard.submit(CommandMetadata::test_fixture()).await.is_err());

        // Swap in a healthy gateway, keeping the same draft
        wizard.enrollment_gateway = Arc::new(MockEnrollmentGateway::new());
        assert!(wizard.submit(CommandMetadata::test_fixture()).await.is_ok());
    }

    #[test]
    fn guardian_view_reads_through_the_synchronizer() {
        let mut wizard = default_wizard();
        fill_submittable(&mut wizard);
        assert_eq!(wizard.guardian_view().prenom, "Kadiatou");

        // Editing the mother updates the view with no guardian write
        let mut edited = complete_fields();
        edited.telephone = "620777777".into();
        wizard
            .handle(WizardEvent::ParentFieldsEdited {
                role: ParentRole::Mother,
                fields: edited,
            })
            .unwrap();
        assert_eq!(wizard.guardian_view().telephone, "620777777");
    }

    #[test]
    fn cancel_discards_draft_and_error_state() {
        let mut wizard = default_wizard();
        fill_submittable(&mut wizard);
        let old_id = wizard.draft().id();

        wizard.cancel();

        assert_ne!(wizard.draft().id(), old_id);
        assert!(wizard.draft().mother().is_absent());
    }
}
