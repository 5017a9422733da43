//! HTTP implementation of `ProfileBackend` over the agency REST API.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::config::OnboardingConfig;
use crate::eligibility::RequirementMatrix;
use crate::eligibility::matrix::MatrixResponse;
use crate::error::BackendError;
use crate::onboarding::model::{PrescreenOutcome, ProfileRecord};
use crate::onboarding::steps::StepId;

use super::{AuthContext, ProfileBackend};

/// Envelope returned by `GET profile`.
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    profile: ProfileRecord,
}

/// REST client for the profile backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a backend from config, applying the optional request timeout.
    pub fn from_config(config: &OnboardingConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn put_json(
        &self,
        auth: &AuthContext,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(), BackendError> {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(auth.bearer_token())
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        check_status(resp).await.map(|_| ())
    }
}

/// Map non-success responses onto `BackendError`.
async fn check_status(resp: Response) -> Result<Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(BackendError::StaleToken);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Pull `message` out of a JSON error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl ProfileBackend for HttpBackend {
    async fn fetch_profile(&self, auth: &AuthContext) -> Result<ProfileRecord, BackendError> {
        let resp = self
            .client
            .get(self.url("profile"))
            .bearer_auth(auth.bearer_token())
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        let resp = check_status(resp).await?;
        let body: ProfileResponse = resp.json().await.map_err(|e| BackendError::Serialization {
            reason: e.to_string(),
        })?;
        Ok(body.profile)
    }

    async fn fetch_requirement_matrix(
        &self,
        auth: &AuthContext,
        job_title: &str,
        city: &str,
    ) -> Result<Option<RequirementMatrix>, BackendError> {
        let resp = self
            .client
            .get(self.url("requirements/matrix"))
            .bearer_auth(auth.bearer_token())
            .query(&[("jobTitle", job_title), ("city", city)])
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = check_status(resp).await?;
        let text = resp
            .text()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        let body: MatrixResponse =
            serde_json::from_str(&text).map_err(|e| BackendError::Serialization {
                reason: e.to_string(),
            })?;
        Ok(body.requirements)
    }

    async fn auto_save(
        &self,
        auth: &AuthContext,
        step: StepId,
        data: &serde_json::Value,
    ) -> Result<(), BackendError> {
        let path = format!("profile/auto-save/{}", step.descriptor().resource);
        self.put_json(auth, &path, data).await
    }

    async fn submit_step(
        &self,
        auth: &AuthContext,
        step: StepId,
        data: &serde_json::Value,
    ) -> Result<(), BackendError> {
        if step == StepId::Submission {
            let resp = self
                .client
                .post(self.url("profile/submit"))
                .bearer_auth(auth.bearer_token())
                .json(data)
                .send()
                .await
                .map_err(|e| BackendError::network(e.to_string()))?;
            return check_status(resp).await.map(|_| ());
        }
        let path = format!("profile/{}", step.descriptor().resource);
        self.put_json(auth, &path, data).await
    }

    async fn mark_step_complete(
        &self,
        auth: &AuthContext,
        step: StepId,
    ) -> Result<(), BackendError> {
        let body = serde_json::json!({ "step": step, "completed": true });
        self.put_json(auth, "profile/onboarding-step", &body).await
    }

    async fn record_prescreen_outcome(
        &self,
        auth: &AuthContext,
        outcome: &PrescreenOutcome,
    ) -> Result<(), BackendError> {
        let body = serde_json::to_value(outcome).map_err(|e| BackendError::Serialization {
            reason: e.to_string(),
        })?;
        self.put_json(auth, "profile/update", &body).await
    }
}
