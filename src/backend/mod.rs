//! Profile backend — the REST collaborator the onboarding engine reads and
//! writes through.
//!
//! Every call takes an explicit `AuthContext`; nothing here reads ambient
//! credentials.

mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::eligibility::RequirementMatrix;
use crate::error::BackendError;
use crate::onboarding::model::{PrescreenOutcome, ProfileRecord};
use crate::onboarding::steps::StepId;

/// Credentials for one signed-in candidate.
#[derive(Clone)]
pub struct AuthContext {
    token: SecretString,
}

impl AuthContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }

    pub fn bearer_token(&self) -> &str {
        self.token.expose_secret()
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Backend-agnostic profile API used by the onboarding flow.
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    // ── Reads ───────────────────────────────────────────────────────

    /// Load the candidate's profile: completion vector plus saved step data.
    async fn fetch_profile(&self, auth: &AuthContext) -> Result<ProfileRecord, BackendError>;

    /// Load the requirement matrix for a job title and city.
    ///
    /// Returns `Ok(None)` when the backend has no matrix for the pair.
    async fn fetch_requirement_matrix(
        &self,
        auth: &AuthContext,
        job_title: &str,
        city: &str,
    ) -> Result<Option<RequirementMatrix>, BackendError>;

    // ── Writes ──────────────────────────────────────────────────────

    /// Persist a partial data blob for a step. Idempotent, no merge semantics.
    async fn auto_save(
        &self,
        auth: &AuthContext,
        step: StepId,
        data: &serde_json::Value,
    ) -> Result<(), BackendError>;

    /// Validate and commit a step's final data.
    async fn submit_step(
        &self,
        auth: &AuthContext,
        step: StepId,
        data: &serde_json::Value,
    ) -> Result<(), BackendError>;

    /// Record a step as completed on the profile.
    async fn mark_step_complete(&self, auth: &AuthContext, step: StepId)
    -> Result<(), BackendError>;

    /// Record the prescreen verdict and the profile fields derived from it.
    async fn record_prescreen_outcome(
        &self,
        auth: &AuthContext,
        outcome: &PrescreenOutcome,
    ) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let auth = AuthContext::new("secret-token-123");
        let debug = format!("{auth:?}");
        assert!(!debug.contains("secret-token-123"));
        assert!(debug.contains("REDACTED"));
        assert_eq!(auth.bearer_token(), "secret-token-123");
    }
}
