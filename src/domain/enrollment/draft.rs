//! EnrollmentDraft aggregate - the root entity of one enrollment flow.
//!
//! The draft owns the student, both parent links, the guardian, and the
//! photo slots. It is updated exclusively through the pure reducer
//! `apply(&self, event) -> EnrollmentDraft`, so every mutation - including
//! synchronizer-triggered repairs - is an explicit state transition that can
//! be tested and replayed. There is no shared mutable form state.

use std::collections::HashMap;

use super::synchronizer;
use super::{
    EnrollmentEvent, GuardianDraft, ParentLink, ParentMode, ParentRole, PersonFields,
    PersonSummary, PhotoAttachment, PhotoRole, StepSequence, StudentDraft, WizardStep,
};
use crate::domain::foundation::{DraftId, StateMachine, Timestamp, ValidationError};

/// Input to the draft reducer: one discrete UI action.
///
/// Mode and relation changes run through the synchronizer inside `apply`;
/// plain field edits replace the relevant record directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Replace the student record with the edited form contents.
    StudentEdited(StudentDraft),
    /// Switch a parent role to another mode, resetting its field set.
    ParentModeChanged { role: ParentRole, mode: ParentMode },
    /// Replace a create-new parent's fields. Ignored in any other mode.
    ParentFieldsEdited { role: ParentRole, fields: PersonFields },
    /// Apply an existing-parent search selection. Ignored unless the role is
    /// in existing mode.
    ParentSelected { role: ParentRole, person: PersonSummary },
    /// Switch the guardian relation.
    GuardianRelationChanged(super::GuardianRelationKind),
    /// Replace an independent guardian's fields. Ignored while derived.
    GuardianFieldsEdited(PersonFields),
    /// Attach a photo to a person slot. Ignored for slots the current draft
    /// cannot carry (absent or existing parents, derived guardians).
    PhotoAttached { role: PhotoRole, photo: PhotoAttachment },
    /// Remove a previously attached photo.
    PhotoRemoved { role: PhotoRole },
}

/// The EnrollmentDraft aggregate root.
///
/// One instance per wizard session; destroyed on submit success or cancel.
#[derive(Debug, Clone)]
pub struct EnrollmentDraft {
    id: DraftId,
    student: StudentDraft,
    father: ParentLink,
    mother: ParentLink,
    guardian: GuardianDraft,
    photos: HashMap<PhotoRole, PhotoAttachment>,
    step: WizardStep,
    created_at: Timestamp,
    updated_at: Timestamp,
    domain_events: Vec<EnrollmentEvent>,
}

impl EnrollmentDraft {
    /// Creates a blank draft at the first step.
    ///
    /// Both parents start absent and the guardian starts as a blank
    /// independent record.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            id: DraftId::new(),
            student: StudentDraft::default(),
            father: ParentLink::Absent,
            mother: ParentLink::Absent,
            guardian: GuardianDraft::blank_independent(),
            photos: HashMap::new(),
            step: StepSequence::first(),
            created_at: now,
            updated_at: now,
            domain_events: Vec::new(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    /// Returns the draft ID.
    pub fn id(&self) -> DraftId {
        self.id
    }

    /// Returns the student record.
    pub fn student(&self) -> &StudentDraft {
        &self.student
    }

    /// Returns the link for a parent role.
    pub fn parent(&self, role: ParentRole) -> &ParentLink {
        match role {
            ParentRole::Father => &self.father,
            ParentRole::Mother => &self.mother,
        }
    }

    /// Returns the father link.
    pub fn father(&self) -> &ParentLink {
        &self.father
    }

    /// Returns the mother link.
    pub fn mother(&self) -> &ParentLink {
        &self.mother
    }

    /// Returns the guardian record.
    pub fn guardian(&self) -> &GuardianDraft {
        &self.guardian
    }

    /// Returns the photo attached to a slot, if any.
    pub fn photo(&self, role: PhotoRole) -> Option<&PhotoAttachment> {
        self.photos.get(&role)
    }

    /// Returns the current step cursor.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Returns when this draft was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when this draft was last updated.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Takes accumulated events, clearing the internal buffer.
    pub fn take_events(&mut self) -> Vec<EnrollmentEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Reducer
    // ───────────────────────────────────────────────────────────────

    /// Pure state transition: produces the draft after one event.
    ///
    /// Total over all events - an event that is impossible in the current
    /// state (editing fields of an absent parent, deriving from an absent
    /// parent) is either repaired through the synchronizer or dropped,
    /// never an error.
    pub fn apply(&self, event: WizardEvent) -> EnrollmentDraft {
        let mut next = self.clone();

        match event {
            WizardEvent::StudentEdited(student) => {
                next.student = student;
            }
            WizardEvent::ParentModeChanged { role, mode } => {
                // Re-selecting the current mode is not a transition and must
                // not wipe entered data.
                if next.parent(role).mode() != mode {
                    next.set_parent(role, ParentLink::reset_for(mode));
                    next.record_event(EnrollmentEvent::ParentModeChanged {
                        draft_id: next.id,
                        role,
                        mode,
                    });
                    next.repair_guardian_after(role);
                }
            }
            WizardEvent::ParentFieldsEdited { role, fields } => {
                if let ParentLink::New(_) = next.parent(role) {
                    next.set_parent(role, ParentLink::New(fields));
                }
            }
            WizardEvent::ParentSelected { role, person } => {
                if next.parent(role).mode() == ParentMode::Existing {
                    next.set_parent(role, ParentLink::from_selection(person));
                }
            }
            WizardEvent::GuardianRelationChanged(kind) => {
                let guardian = synchronizer::on_guardian_relation_changed(&next, kind);
                let corrected = guardian.kind() != kind;
                next.guardian = guardian;
                next.record_event(EnrollmentEvent::GuardianRelationChanged {
                    draft_id: next.id,
                    kind: next.guardian.kind(),
                });
                if corrected {
                    next.record_event(EnrollmentEvent::GuardianRelationCorrected {
                        draft_id: next.id,
                        was: kind,
                    });
                }
            }
            WizardEvent::GuardianFieldsEdited(fields) => {
                if let GuardianDraft::Independent(_) = next.guardian {
                    next.guardian = GuardianDraft::Independent(fields);
                }
            }
            WizardEvent::PhotoAttached { role, photo } => {
                if next.accepts_photo(role) {
                    next.photos.insert(role, photo);
                }
            }
            WizardEvent::PhotoRemoved { role } => {
                next.photos.remove(&role);
            }
        }

        next.updated_at = Timestamp::now();
        next
    }

    /// Advances the cursor one step.
    ///
    /// Step validation is the caller's concern; this only refuses
    /// transitions the step machine does not allow (past `Review`).
    /// Entering the guardian step re-runs the synchronizer for both roles so
    /// no stale derivation survives the parents step.
    pub fn advance(&self) -> Result<EnrollmentDraft, ValidationError> {
        let target = StepSequence::next(self.step).ok_or_else(|| {
            ValidationError::invalid_format(
                "step",
                format!("No step after {:?}", self.step),
            )
        })?;

        let mut next = self.clone();
        next.step = next.step.transition_to(target)?;
        next.record_event(EnrollmentEvent::StepAdvanced {
            draft_id: next.id,
            from: self.step,
            to: target,
        });

        if target == WizardStep::Guardian {
            for role in ParentRole::all() {
                next.repair_guardian_after(*role);
            }
        }

        next.updated_at = Timestamp::now();
        Ok(next)
    }

    /// Moves the cursor one step backward; a no-op at the first step.
    pub fn retreat(&self) -> EnrollmentDraft {
        let mut next = self.clone();
        if let Some(target) = StepSequence::previous(self.step) {
            next.step = target;
            next.record_event(EnrollmentEvent::SteppedBack {
                draft_id: next.id,
                from: self.step,
                to: target,
            });
            next.updated_at = Timestamp::now();
        }
        next
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    fn set_parent(&mut self, role: ParentRole, link: ParentLink) {
        match role {
            ParentRole::Father => self.father = link,
            ParentRole::Mother => self.mother = link,
        }
    }

    /// Runs `on_parent_mode_changed` for `role` and records a correction
    /// event when it repaired a dangling derivation.
    fn repair_guardian_after(&mut self, role: ParentRole) {
        let was = self.guardian.kind();
        let guardian = synchronizer::on_parent_mode_changed(role, self);
        if guardian != self.guardian {
            self.guardian = guardian;
            self.record_event(EnrollmentEvent::GuardianRelationCorrected {
                draft_id: self.id,
                was,
            });
        }
    }

    /// A slot accepts a photo only while the draft holds a record the photo
    /// could belong to: the student always, the guardian while independent,
    /// a parent only in create-new mode (existing people already have one
    /// server-side).
    fn accepts_photo(&self, role: PhotoRole) -> bool {
        match role {
            PhotoRole::Student => true,
            PhotoRole::Guardian => matches!(self.guardian, GuardianDraft::Independent(_)),
            PhotoRole::Father => matches!(self.father, ParentLink::New(_)),
            PhotoRole::Mother => matches!(self.mother, ParentLink::New(_)),
        }
    }

    fn record_event(&mut self, event: EnrollmentEvent) {
        self.domain_events.push(event);
    }
}

impl Default for EnrollmentDraft {
    fn default() -> Self {
        Self::new()
    }
}
