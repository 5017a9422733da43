//! OnboardingFlow — ties the progress tracker, per-step auto-save and
//! eligibility scoring to the profile backend for one signed-in candidate.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::autosave::{AutoSaveCoordinator, StepSaver};
use crate::backend::{AuthContext, ProfileBackend};
use crate::config::OnboardingConfig;
use crate::eligibility::{self, Assessment, PrescreenAnswers, RequirementMatrix};
use crate::error::{BackendError, Error, NavigationError, SaveError};

use super::model::{PrescreenOutcome, ProfileRecord};
use super::steps::{SaveCadence, StepId};
use super::tracker::{OnboardingSession, ProgressTracker};

/// Drives one candidate through the onboarding steps.
pub struct OnboardingFlow {
    backend: Arc<dyn ProfileBackend>,
    auth: AuthContext,
    config: OnboardingConfig,
    profile: RwLock<ProfileRecord>,
    tracker: Arc<RwLock<ProgressTracker>>,
}

impl OnboardingFlow {
    pub fn new(
        backend: Arc<dyn ProfileBackend>,
        auth: AuthContext,
        config: OnboardingConfig,
    ) -> Self {
        Self {
            backend,
            auth,
            config,
            profile: RwLock::new(ProfileRecord::default()),
            tracker: Arc::new(RwLock::new(ProgressTracker::default())),
        }
    }

    /// Shared handle to the tracker, for the status routes.
    pub fn tracker(&self) -> Arc<RwLock<ProgressTracker>> {
        Arc::clone(&self.tracker)
    }

    /// Load (or reload) the profile and re-derive progress from it.
    ///
    /// On failure the tracker falls back to the prescreen-only state and the
    /// error is returned; a stale token must end the session.
    pub async fn refresh(&self) -> Result<OnboardingSession, Error> {
        match self.backend.fetch_profile(&self.auth).await {
            Ok(profile) => {
                let session = {
                    let mut tracker = self.tracker.write().await;
                    tracker.apply_profile(&profile);
                    tracker.session()
                };
                *self.profile.write().await = profile;
                info!(
                    current = %session.frontier,
                    percent = session.percent_complete,
                    "Onboarding progress loaded"
                );
                Ok(session)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch profile");
                self.tracker.write().await.reset_to_safe_state();
                Err(e.into())
            }
        }
    }

    pub async fn session(&self) -> OnboardingSession {
        self.tracker.read().await.session()
    }

    pub async fn current_step(&self) -> StepId {
        self.tracker.read().await.current_step()
    }

    // ── Navigation ──────────────────────────────────────────────────

    pub async fn open(&self, step: StepId) -> Result<StepId, NavigationError> {
        self.tracker.write().await.open(step)
    }

    /// Re-open a completed step to edit its data.
    pub async fn enter_for_review(&self, step: StepId) -> Result<StepId, NavigationError> {
        self.tracker.write().await.enter_for_review(step)
    }

    pub async fn next(&self) -> Result<StepId, NavigationError> {
        self.tracker.write().await.next()
    }

    pub async fn back(&self) -> Result<StepId, NavigationError> {
        self.tracker.write().await.back()
    }

    // ── Step data ───────────────────────────────────────────────────

    /// Previously saved data for a step, or the form's defaults.
    pub async fn saved_form<T>(&self, step: StepId) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.profile
            .read()
            .await
            .step_blob(step)
            .unwrap_or_default()
    }

    /// Start an auto-save coordinator for a step's form.
    pub fn step_autosaver<T>(&self, step: StepId, initial: T) -> AutoSaveCoordinator<T>
    where
        T: Serialize + Clone + PartialEq + Send + 'static,
    {
        let saver: StepSaver<T> =
            StepSaver::new(Arc::clone(&self.backend), self.auth.clone(), step);
        AutoSaveCoordinator::spawn(initial, self.autosave_delay(step), Arc::new(saver))
    }

    fn autosave_delay(&self, step: StepId) -> std::time::Duration {
        match step.descriptor().cadence {
            SaveCadence::Form => self.config.autosave_delay,
            SaveCadence::Upload => self.config.upload_autosave_delay,
        }
    }

    // ── Completion ──────────────────────────────────────────────────

    /// Commit a step's final data and advance.
    ///
    /// Pending auto-save edits are flushed first. Returns the step to show next.
    /// The prescreen is refused here; it goes through `submit_prescreen`.
    pub async fn submit_step<T>(
        &self,
        step: StepId,
        data: &T,
        autosave: Option<&AutoSaveCoordinator<T>>,
    ) -> Result<StepId, Error>
    where
        T: Serialize + Clone + PartialEq + Send + 'static,
    {
        if step == StepId::Prescreen {
            return Err(NavigationError::RequiresScoring { step }.into());
        }
        self.ensure_reachable(step).await?;
        flush(autosave).await?;

        let body = serde_json::to_value(data).map_err(|e| BackendError::Serialization {
            reason: e.to_string(),
        })?;
        self.backend.submit_step(&self.auth, step, &body).await?;
        self.backend.mark_step_complete(&self.auth, step).await?;

        let mut tracker = self.tracker.write().await;
        tracker.mark_complete(step);
        Ok(tracker.active_step())
    }

    /// Validate, score and commit the prescreen.
    ///
    /// The verdict is informational; the step is completed whatever it is.
    pub async fn submit_prescreen(
        &self,
        answers: &PrescreenAnswers,
        autosave: Option<&AutoSaveCoordinator<PrescreenAnswers>>,
    ) -> Result<Assessment, Error> {
        self.ensure_reachable(StepId::Prescreen).await?;

        let job_title = self.profile.read().await.job_title.clone();
        eligibility::validate_prescreen(answers, job_title.as_deref().unwrap_or_default())?;
        flush(autosave).await?;

        let matrix = match job_title.as_deref() {
            Some(job_title) => self.requirement_matrix(job_title, &answers.current_location).await?,
            None => None,
        };
        let assessment = eligibility::assess(answers, matrix.as_ref());
        info!(
            verdict = %assessment.verdict,
            percentage = assessment.percentage,
            source = ?assessment.source,
            "Prescreen scored"
        );

        let body = serde_json::to_value(answers).map_err(|e| BackendError::Serialization {
            reason: e.to_string(),
        })?;
        self.backend
            .submit_step(&self.auth, StepId::Prescreen, &body)
            .await?;

        let outcome = PrescreenOutcome {
            prescreen_result: assessment.verdict,
            prescreen_completed: true,
            base_city: answers.current_location.trim().to_string(),
            languages: answers.languages.clone(),
        };
        self.backend
            .record_prescreen_outcome(&self.auth, &outcome)
            .await?;

        self.profile.write().await.base_city = Some(outcome.base_city);
        self.tracker.write().await.mark_complete(StepId::Prescreen);
        Ok(assessment)
    }

    /// Fetch the matrix for scoring. Anything but a stale token falls back to
    /// the default rubric.
    async fn requirement_matrix(
        &self,
        job_title: &str,
        city: &str,
    ) -> Result<Option<RequirementMatrix>, BackendError> {
        match self
            .backend
            .fetch_requirement_matrix(&self.auth, job_title, city.trim())
            .await
        {
            Ok(matrix) => Ok(matrix),
            Err(BackendError::StaleToken) => Err(BackendError::StaleToken),
            Err(e) => {
                warn!(
                    job_title,
                    city,
                    error = %e,
                    "Requirement matrix unavailable; using default rubric"
                );
                Ok(None)
            }
        }
    }

    async fn ensure_reachable(&self, step: StepId) -> Result<(), NavigationError> {
        if self.tracker.read().await.can_navigate_to(step) {
            Ok(())
        } else {
            Err(NavigationError::Locked { step })
        }
    }
}

/// Flush pending auto-save edits before committing a step.
///
/// The commit carries the full form anyway, so only a stale token is fatal.
async fn flush<T>(autosave: Option<&AutoSaveCoordinator<T>>) -> Result<(), SaveError>
where
    T: Clone + PartialEq + Send + 'static,
{
    let Some(coordinator) = autosave else {
        return Ok(());
    };
    match coordinator.save_now().await {
        Err(SaveError::Backend(e)) if e.is_stale_token() => Err(SaveError::Backend(e)),
        Err(e) => {
            warn!(error = %e, "Auto-save flush failed; submitting anyway");
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}
