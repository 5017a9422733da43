//! Candidate profile data as loaded from the backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::eligibility::Verdict;

use super::progress::CompletionVector;
use super::steps::StepId;

/// Lifecycle of a candidate's application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Draft,
    Submitted,
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Whether completion flags must only ever move forward in this status.
    pub fn flags_are_monotonic(&self) -> bool {
        matches!(self, Self::Draft | Self::Submitted)
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

/// The profile record returned by `GET profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default)]
    pub progress: CompletionVector,
    #[serde(default)]
    pub application_status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_city: Option<String>,
    /// Partially saved data for each step, keyed by step.
    #[serde(default)]
    pub step_data: HashMap<StepId, serde_json::Value>,
}

impl ProfileRecord {
    /// Saved data for a step, deserialized into the step's form type.
    ///
    /// Missing or malformed blobs yield `None` so the step starts from its defaults.
    pub fn step_blob<T: serde::de::DeserializeOwned>(&self, step: StepId) -> Option<T> {
        let raw = self.step_data.get(&step)?;
        match serde_json::from_value(raw.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(step = %step, error = %e, "Ignoring malformed saved step data");
                None
            }
        }
    }
}

/// Prescreen outcome recorded on the profile after scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescreenOutcome {
    pub prescreen_result: Verdict,
    pub prescreen_completed: bool,
    pub base_city: String,
    pub languages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::PrescreenAnswers;

    #[test]
    fn profile_parses_with_defaults() {
        let profile: ProfileRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.application_status, ApplicationStatus::Draft);
        assert_eq!(profile.progress, CompletionVector::default());
        assert!(profile.step_data.is_empty());
    }

    #[test]
    fn profile_parses_step_data() {
        let json = serde_json::json!({
            "progress": { "prescreen": true },
            "applicationStatus": "under_review",
            "jobTitle": "nurse",
            "baseCity": "Delhi NCR",
            "stepData": {
                "personal_info": { "fullName": "Asha" },
                "identity_verification": { "documentType": "passport" }
            }
        });
        let profile: ProfileRecord = serde_json::from_value(json).unwrap();
        assert_eq!(profile.application_status, ApplicationStatus::UnderReview);
        assert!(profile.progress.is_complete(StepId::Prescreen));
        assert_eq!(profile.job_title.as_deref(), Some("nurse"));
        assert_eq!(profile.step_data[&StepId::Identity]["documentType"], "passport");
    }

    #[test]
    fn malformed_step_blob_is_ignored() {
        #[derive(Deserialize)]
        struct Form {
            #[allow(dead_code)]
            count: u32,
        }

        let mut profile = ProfileRecord::default();
        profile
            .step_data
            .insert(StepId::References, serde_json::json!({ "count": "many" }));
        assert!(profile.step_blob::<Form>(StepId::References).is_none());
        assert!(profile.step_blob::<Form>(StepId::Documents).is_none());
    }

    #[test]
    fn saved_prescreen_with_null_field_keeps_the_rest() {
        let mut profile = ProfileRecord::default();
        profile.step_data.insert(
            StepId::Prescreen,
            serde_json::json!({
                "experienceMonths": 30,
                "currentLocation": "Pune",
                "languages": ["Hindi", "English"],
                "salaryExpectation": null
            }),
        );
        let answers: PrescreenAnswers = profile.step_blob(StepId::Prescreen).unwrap();
        assert_eq!(answers.experience_months, 30);
        assert_eq!(answers.current_location, "Pune");
        assert_eq!(answers.languages, vec!["Hindi".to_string(), "English".to_string()]);
        assert_eq!(answers.salary_expectation, 0);
    }

    #[test]
    fn monotonic_statuses() {
        assert!(ApplicationStatus::Draft.flags_are_monotonic());
        assert!(ApplicationStatus::Submitted.flags_are_monotonic());
        assert!(!ApplicationStatus::Rejected.flags_are_monotonic());
        assert!(!ApplicationStatus::Approved.flags_are_monotonic());
    }

    #[test]
    fn outcome_wire_shape() {
        let outcome = PrescreenOutcome {
            prescreen_result: Verdict::Caution,
            prescreen_completed: true,
            base_city: "Pune".to_string(),
            languages: vec!["Marathi".to_string()],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["prescreenResult"], "caution");
        assert_eq!(json["prescreenCompleted"], true);
        assert_eq!(json["baseCity"], "Pune");
    }
}
