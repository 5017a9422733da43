//! Externally supplied, job/city specific requirement matrix.

use serde::{Deserialize, Serialize};

use super::rubric::{Criterion, Rubric};

/// Job-title/city keyed scoring rules that replace the default rubric.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequirementMatrix {
    pub job_title: String,
    pub city: String,
    pub criteria: Vec<Criterion>,
}

impl RequirementMatrix {
    /// The matrix's rules as a rubric, or `None` when it defines nothing scorable.
    pub fn rubric(&self) -> Option<Rubric> {
        let rubric = Rubric::new(self.criteria.clone());
        rubric.is_scorable().then_some(rubric)
    }
}

/// Envelope returned by `GET requirements/matrix`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixResponse {
    #[serde(default)]
    pub requirements: Option<RequirementMatrix>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matrix_has_no_rubric() {
        assert!(RequirementMatrix::default().rubric().is_none());
    }

    #[test]
    fn response_without_requirements() {
        let resp: MatrixResponse = serde_json::from_str(r#"{"requirements": null}"#).unwrap();
        assert!(resp.requirements.is_none());
        let resp: MatrixResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.requirements.is_none());
    }

    #[test]
    fn response_with_requirements() {
        let resp: MatrixResponse = serde_json::from_value(serde_json::json!({
            "requirements": {
                "jobTitle": "nurse",
                "city": "Mumbai",
                "criteria": [{ "kind": "flag", "flag": "icuExposure", "points": 10 }]
            }
        }))
        .unwrap();
        let matrix = resp.requirements.unwrap();
        assert_eq!(matrix.city, "Mumbai");
        assert_eq!(matrix.rubric().unwrap().max_points(), 10.0);
    }
}
