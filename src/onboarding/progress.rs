//! Completion vector — one flag per onboarding step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::steps::{STEP_COUNT, STEPS, StepId};

/// Per-step completion flags, keyed on the wire by each step's `completion_key`.
///
/// Unknown keys are ignored and missing keys read as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct CompletionVector {
    flags: [bool; STEP_COUNT],
}

impl CompletionVector {
    /// A vector with every step completed.
    pub fn all_complete() -> Self {
        Self {
            flags: [true; STEP_COUNT],
        }
    }

    /// Build a vector with exactly the given steps completed.
    pub fn with_completed(steps: &[StepId]) -> Self {
        let mut vector = Self::default();
        for &step in steps {
            vector.set(step);
        }
        vector
    }

    pub fn is_complete(&self, step: StepId) -> bool {
        self.flags[step.ordinal()]
    }

    /// Set a step's flag. Returns `true` if the flag changed.
    pub fn set(&mut self, step: StepId) -> bool {
        let flag = &mut self.flags[step.ordinal()];
        let changed = !*flag;
        *flag = true;
        changed
    }

    /// Lowest-ordinal step whose flag is still false.
    pub fn first_incomplete(&self) -> Option<StepId> {
        StepId::ALL.into_iter().find(|&s| !self.is_complete(s))
    }

    pub fn completed_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    pub fn is_all_complete(&self) -> bool {
        self.completed_count() == STEP_COUNT
    }

    /// Completed share of the workflow, rounded to a whole percent.
    pub fn percent_complete(&self) -> u8 {
        ((self.completed_count() as f64 / STEP_COUNT as f64) * 100.0).round() as u8
    }

    /// Flag-wise OR with another vector.
    pub fn union(&self, other: &CompletionVector) -> CompletionVector {
        let mut flags = self.flags;
        for (flag, theirs) in flags.iter_mut().zip(other.flags) {
            *flag |= theirs;
        }
        CompletionVector { flags }
    }

    /// Steps set here but cleared in `other`.
    pub fn regressions_in(&self, other: &CompletionVector) -> Vec<StepId> {
        StepId::ALL
            .into_iter()
            .filter(|&s| self.is_complete(s) && !other.is_complete(s))
            .collect()
    }
}

impl From<BTreeMap<String, bool>> for CompletionVector {
    fn from(map: BTreeMap<String, bool>) -> Self {
        let mut vector = Self::default();
        for descriptor in &STEPS {
            let done = [descriptor.completion_key, descriptor.legacy_completion_key]
                .iter()
                .any(|key| map.get(*key).copied().unwrap_or(false));
            if done {
                vector.set(descriptor.id);
            }
        }
        vector
    }
}

impl From<CompletionVector> for BTreeMap<String, bool> {
    fn from(vector: CompletionVector) -> Self {
        STEPS
            .iter()
            .map(|d| (d.completion_key.to_string(), vector.is_complete(d.id)))
            .collect()
    }
}

/// Navigation status of a step, for progress UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Locked,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Current => write!(f, "current"),
            Self::Locked => write!(f, "locked"),
        }
    }
}
