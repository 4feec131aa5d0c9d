//! Aggregate-internal events recorded by the enrollment draft.

use super::{GuardianRelationKind, ParentMode, ParentRole, WizardStep};
use crate::domain::foundation::DraftId;

/// Events recorded by `EnrollmentDraft` as the reducer runs.
///
/// Drained via `take_events()`; the UI consumes them to surface silent
/// repairs (a guardian relation forced back to independent) as field resets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentEvent {
    StepAdvanced {
        draft_id: DraftId,
        from: WizardStep,
        to: WizardStep,
    },
    SteppedBack {
        draft_id: DraftId,
        from: WizardStep,
        to: WizardStep,
    },
    ParentModeChanged {
        draft_id: DraftId,
        role: ParentRole,
        mode: ParentMode,
    },
    GuardianRelationChanged {
        draft_id: DraftId,
        kind: GuardianRelationKind,
    },
    /// The synchronizer repaired an impossible derivation; the guardian is
    /// now independent with blank fields.
    GuardianRelationCorrected {
        draft_id: DraftId,
        was: GuardianRelationKind,
    },
}
