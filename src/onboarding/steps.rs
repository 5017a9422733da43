//! Static step table — the single source of per-step metadata.

use serde::{Deserialize, Serialize};

/// Number of onboarding steps.
pub const STEP_COUNT: usize = 8;

/// The onboarding steps, in ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Prescreen,
    PersonalInfo,
    #[serde(rename = "identity_verification")]
    Identity,
    ProfessionalBackground,
    HealthAssessment,
    References,
    Documents,
    #[serde(rename = "profile_submission")]
    Submission,
}

impl StepId {
    /// All steps in ordinal order.
    pub const ALL: [StepId; STEP_COUNT] = [
        StepId::Prescreen,
        StepId::PersonalInfo,
        StepId::Identity,
        StepId::ProfessionalBackground,
        StepId::HealthAssessment,
        StepId::References,
        StepId::Documents,
        StepId::Submission,
    ];

    /// Zero-based position in the workflow.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<StepId> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn first() -> StepId {
        Self::ALL[0]
    }

    pub fn last() -> StepId {
        Self::ALL[STEP_COUNT - 1]
    }

    pub fn next(self) -> Option<StepId> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    pub fn previous(self) -> Option<StepId> {
        self.ordinal().checked_sub(1).and_then(Self::from_ordinal)
    }

    /// Static metadata for this step.
    pub fn descriptor(self) -> &'static StepDescriptor {
        &STEPS[self.ordinal()]
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.descriptor().wire_name)
    }
}

impl std::str::FromStr for StepId {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STEPS
            .iter()
            .find(|d| d.wire_name == s || d.completion_key == s || d.resource == s)
            .map(|d| d.id)
            .ok_or_else(|| format!("Unknown onboarding step: {}", s))
    }
}

/// How quickly a step's edits are auto-saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveCadence {
    /// Small text forms.
    Form,
    /// Steps that carry file uploads and save less eagerly.
    Upload,
}

/// Immutable per-step metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDescriptor {
    pub id: StepId,
    pub ordinal: usize,
    pub title: &'static str,
    pub description: &'static str,
    /// Key of this step's flag in the completion vector.
    pub completion_key: &'static str,
    /// Older profiles name the flag this way, e.g. `identity_verified`.
    pub legacy_completion_key: &'static str,
    /// Path segment used for `profile/auto-save/{resource}` and `profile/{resource}`.
    pub resource: &'static str,
    /// Step name reported to `profile/onboarding-step`.
    pub wire_name: &'static str,
    pub cadence: SaveCadence,
}

/// The step table, indexed by `StepId::ordinal`.
pub static STEPS: [StepDescriptor; STEP_COUNT] = [
    StepDescriptor {
        id: StepId::Prescreen,
        ordinal: 0,
        title: "Prescreen Assessment",
        description: "Complete initial qualification assessment",
        completion_key: "prescreen",
        legacy_completion_key: "prescreen_completed",
        resource: "prescreen",
        wire_name: "prescreen",
        cadence: SaveCadence::Form,
    },
    StepDescriptor {
        id: StepId::PersonalInfo,
        ordinal: 1,
        title: "Personal Information",
        description: "Provide your personal details and contact information",
        completion_key: "personalInfo",
        legacy_completion_key: "personal_info_completed",
        resource: "personal-info",
        wire_name: "personal_info",
        cadence: SaveCadence::Form,
    },
    StepDescriptor {
        id: StepId::Identity,
        ordinal: 2,
        title: "Identity Verification",
        description: "Verify your identity with official documents",
        completion_key: "identity",
        legacy_completion_key: "identity_verified",
        resource: "identity-verification",
        wire_name: "identity_verification",
        cadence: SaveCadence::Upload,
    },
    StepDescriptor {
        id: StepId::ProfessionalBackground,
        ordinal: 3,
        title: "Professional Background",
        description: "Share your work experience and qualifications",
        completion_key: "professionalBackground",
        legacy_completion_key: "professional_background_completed",
        resource: "professional-background",
        wire_name: "professional_background",
        cadence: SaveCadence::Form,
    },
    StepDescriptor {
        id: StepId::HealthAssessment,
        ordinal: 4,
        title: "Health Assessment",
        description: "Complete health screening and medical history",
        completion_key: "healthAssessment",
        legacy_completion_key: "health_assessment_completed",
        resource: "health-assessment",
        wire_name: "health_assessment",
        cadence: SaveCadence::Form,
    },
    StepDescriptor {
        id: StepId::References,
        ordinal: 5,
        title: "References",
        description: "Provide professional and personal references",
        completion_key: "references",
        legacy_completion_key: "references_completed",
        resource: "references",
        wire_name: "references",
        cadence: SaveCadence::Form,
    },
    StepDescriptor {
        id: StepId::Documents,
        ordinal: 6,
        title: "Document Upload",
        description: "Upload required certificates and documents",
        completion_key: "documents",
        legacy_completion_key: "documents_uploaded",
        resource: "documents",
        wire_name: "documents",
        cadence: SaveCadence::Upload,
    },
    StepDescriptor {
        id: StepId::Submission,
        ordinal: 7,
        title: "Profile Submission",
        description: "Review and submit your complete profile",
        completion_key: "submission",
        legacy_completion_key: "profile_submitted",
        resource: "submission",
        wire_name: "profile_submission",
        cadence: SaveCadence::Form,
    },
];
