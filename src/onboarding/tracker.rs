//! Progress tracker — derives the current step from the completion vector and
//! gates navigation between steps.
//!
//! The tracker keeps a read-through cache of the backend's completion vector.
//! The *frontier* (`current_step`) is always derived from that cache; the step
//! the user is looking at (`active_step`) equals the frontier unless the user
//! explicitly opened another navigable step, which is held as an override.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::NavigationError;

use super::model::{ApplicationStatus, ProfileRecord};
use super::progress::{CompletionVector, StepStatus};
use super::steps::{STEPS, StepDescriptor, StepId};

/// Onboarding state machine over the eight steps.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    session_id: Uuid,
    completion: CompletionVector,
    application_status: ApplicationStatus,
    /// Step explicitly opened by the user, if different from the frontier.
    selected: Option<StepId>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(CompletionVector::default())
    }
}

impl ProgressTracker {
    pub fn new(completion: CompletionVector) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            completion,
            application_status: ApplicationStatus::default(),
            selected: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn completion(&self) -> &CompletionVector {
        &self.completion
    }

    pub fn application_status(&self) -> ApplicationStatus {
        self.application_status
    }

    pub fn steps(&self) -> &'static [StepDescriptor] {
        &STEPS
    }

    /// First incomplete step in ordinal order, or the last step once all are complete.
    pub fn current_step(&self) -> StepId {
        self.completion
            .first_incomplete()
            .unwrap_or_else(StepId::last)
    }

    /// Whether every step has been completed.
    pub fn is_all_complete(&self) -> bool {
        self.completion.is_all_complete()
    }

    pub fn status_of(&self, step: StepId) -> StepStatus {
        if self.completion.is_complete(step) {
            StepStatus::Completed
        } else if step == self.current_step() {
            StepStatus::Current
        } else {
            StepStatus::Locked
        }
    }

    pub fn can_navigate_to(&self, step: StepId) -> bool {
        self.status_of(step) != StepStatus::Locked
    }

    /// Mark a step complete. Idempotent; never clears a flag.
    ///
    /// Once the step the user was working on is complete, the explicit
    /// selection is dropped so the view follows the frontier again.
    pub fn mark_complete(&mut self, step: StepId) {
        if self.completion.set(step) {
            info!(
                session = %self.session_id,
                step = %step,
                current = %self.current_step(),
                "Onboarding step completed"
            );
        }
        if self.selected == Some(step) {
            self.selected = None;
        }
    }

    /// The step the user is looking at.
    pub fn active_step(&self) -> StepId {
        self.selected.unwrap_or_else(|| self.current_step())
    }

    /// True when the active step was already completed, so the step should
    /// edit existing data rather than create it.
    pub fn review_mode(&self) -> bool {
        self.completion.is_complete(self.active_step())
    }

    /// Open any navigable step (sidebar click).
    pub fn open(&mut self, step: StepId) -> Result<StepId, NavigationError> {
        if !self.can_navigate_to(step) {
            debug!(step = %step, "Refusing navigation to locked step");
            return Err(NavigationError::Locked { step });
        }
        self.selected = if step == self.current_step() {
            None
        } else {
            Some(step)
        };
        Ok(step)
    }

    /// Re-open a completed step to update it.
    pub fn enter_for_review(&mut self, step: StepId) -> Result<StepId, NavigationError> {
        if !self.completion.is_complete(step) {
            return Err(NavigationError::NotCompleted { step });
        }
        self.open(step)
    }

    /// Leave review mode and return to the frontier.
    pub fn resume(&mut self) -> StepId {
        self.selected = None;
        self.current_step()
    }

    /// Move from the active step to the following one, if it is navigable.
    pub fn next(&mut self) -> Result<StepId, NavigationError> {
        let next = self
            .active_step()
            .next()
            .ok_or(NavigationError::NoNextStep)?;
        self.open(next)
    }

    /// Move from the active step to the preceding one.
    pub fn back(&mut self) -> Result<StepId, NavigationError> {
        let previous = self
            .active_step()
            .previous()
            .ok_or(NavigationError::NoPreviousStep)?;
        self.open(previous)
    }

    /// Apply a freshly fetched profile.
    ///
    /// While the application is a draft or submitted, flags are merged
    /// monotonically with the cache. Any other status is taken verbatim, which
    /// is how an administrative rejection rewinds progress. The frontier is
    /// re-derived; an explicit selection survives only if it is still navigable.
    pub fn apply_profile(&mut self, profile: &ProfileRecord) {
        let fetched = profile.progress;
        self.application_status = profile.application_status;

        self.completion = if profile.application_status.flags_are_monotonic() {
            let regressions = self.completion.regressions_in(&fetched);
            if !regressions.is_empty() {
                warn!(
                    session = %self.session_id,
                    status = %profile.application_status,
                    steps = ?regressions,
                    "Backend cleared completed steps; keeping cached flags"
                );
            }
            self.completion.union(&fetched)
        } else {
            fetched
        };

        if let Some(step) = self.selected {
            if !self.can_navigate_to(step) || step == self.current_step() {
                self.selected = None;
            }
        }

        debug!(
            session = %self.session_id,
            current = %self.current_step(),
            completed = self.completion.completed_count(),
            "Progress refreshed"
        );
    }

    /// Fall back to the safest state after a failed progress fetch: nothing
    /// completed, only the prescreen reachable.
    pub fn reset_to_safe_state(&mut self) {
        warn!(session = %self.session_id, "Progress unavailable; resetting to prescreen");
        self.completion = CompletionVector::default();
        self.application_status = ApplicationStatus::default();
        self.selected = None;
    }

    /// Snapshot for rendering code.
    pub fn session(&self) -> OnboardingSession {
        OnboardingSession {
            session_id: self.session_id,
            current_step: self.active_step(),
            frontier: self.current_step(),
            review_mode: self.review_mode(),
            all_complete: self.is_all_complete(),
            percent_complete: self.completion.percent_complete(),
            application_status: self.application_status,
            completion: self.completion,
            steps: STEPS
                .iter()
                .map(|d| StepView {
                    id: d.id,
                    title: d.title,
                    description: d.description,
                    status: self.status_of(d.id),
                    navigable: self.can_navigate_to(d.id),
                })
                .collect(),
        }
    }
}

/// Per-step progress entry in an `OnboardingSession`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub id: StepId,
    pub title: &'static str,
    pub description: &'static str,
    pub status: StepStatus,
    pub navigable: bool,
}

/// Read-only view of the tracker for progress UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSession {
    pub session_id: Uuid,
    /// The step being shown (the frontier unless a completed step was re-opened).
    pub current_step: StepId,
    /// First incomplete step.
    pub frontier: StepId,
    pub review_mode: bool,
    pub all_complete: bool,
    pub percent_complete: u8,
    pub application_status: ApplicationStatus,
    pub completion: CompletionVector,
    pub steps: Vec<StepView>,
}
