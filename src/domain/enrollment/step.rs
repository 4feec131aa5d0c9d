//! WizardStep - the linear four-step cursor of the enrollment wizard.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The four wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Student,
    Parents,
    Guardian,
    Review,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WizardStep::Student => "Student",
            WizardStep::Parents => "Parents",
            WizardStep::Guardian => "Guardian",
            WizardStep::Review => "Review",
        };
        write!(f, "{}", s)
    }
}

/// Central location for step ordering logic.
///
/// All ordering queries go through this type; nothing else hard-codes the
/// sequence.
pub struct StepSequence;

impl StepSequence {
    /// The canonical step order.
    pub const ORDER: [WizardStep; 4] = [
        WizardStep::Student,
        WizardStep::Parents,
        WizardStep::Guardian,
        WizardStep::Review,
    ];

    /// Returns all steps in order.
    pub fn all() -> &'static [WizardStep; 4] {
        &Self::ORDER
    }

    /// The initial step.
    pub fn first() -> WizardStep {
        WizardStep::Student
    }

    /// The terminal step (consumed by submit).
    pub fn last() -> WizardStep {
        WizardStep::Review
    }

    /// Returns the 0-based index of a step.
    #[inline]
    pub fn order_index(step: WizardStep) -> usize {
        Self::ORDER
            .iter()
            .position(|&s| s == step)
            .expect("All WizardStep variants must be in ORDER")
    }

    /// The step after `step`, or None at the end.
    pub fn next(step: WizardStep) -> Option<WizardStep> {
        let idx = Self::order_index(step);
        Self::ORDER.get(idx + 1).copied()
    }

    /// The step before `step`, or None at the start.
    pub fn previous(step: WizardStep) -> Option<WizardStep> {
        let idx = Self::order_index(step);
        if idx > 0 {
            Self::ORDER.get(idx - 1).copied()
        } else {
            None
        }
    }
}

/// Navigation is strictly linear: one step forward or one step backward.
impl StateMachine for WizardStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        StepSequence::next(*self) == Some(*target) || StepSequence::previous(*self) == Some(*target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        StepSequence::previous(*self)
            .into_iter()
            .chain(StepSequence::next(*self))
            .collect()
    }
}
