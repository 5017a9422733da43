//! Three-valued eligibility outcome.

use serde::{Deserialize, Serialize};

/// Minimum percentage for a `pass`.
pub const PASS_THRESHOLD: f64 = 80.0;
/// Minimum percentage for a `caution`.
pub const CAUTION_THRESHOLD: f64 = 60.0;

/// Eligibility verdict for a prescreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Caution,
    Fail,
}

impl Verdict {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= PASS_THRESHOLD {
            Self::Pass
        } else if percentage >= CAUTION_THRESHOLD {
            Self::Caution
        } else {
            Self::Fail
        }
    }

    /// Whether the candidate proceeds to the rest of onboarding. A `fail` is
    /// informational and returns the candidate to the dashboard.
    pub fn allows_continuation(&self) -> bool {
        !matches!(self, Self::Fail)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Caution => write!(f, "caution"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Points awarded by one criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScore {
    pub criterion: String,
    pub points: f64,
    pub max_points: f64,
}

/// Where the rubric that produced an assessment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricSource {
    Default,
    RequirementMatrix,
}

/// Full scoring result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub verdict: Verdict,
    pub source: RubricSource,
    pub breakdown: Vec<CriterionScore>,
}
