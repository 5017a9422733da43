//! Eligibility scoring for prescreen answers.
//!
//! Scoring is pure: callers fetch the optional `RequirementMatrix` themselves
//! and validate the form (`validate_prescreen`) before scoring. When a
//! scorable matrix is supplied its rules replace the default rubric entirely.

pub mod answers;
pub mod matrix;
pub mod rubric;
pub mod validation;
pub mod verdict;

pub use answers::{Availability, EducationTier, EmergencyContact, PrescreenAnswers, ShiftPreference};
pub use matrix::RequirementMatrix;
pub use rubric::{AnswerFlag, AnswerList, Criterion, ExperienceTier, Rubric};
pub use validation::validate_prescreen;
pub use verdict::{Assessment, CriterionScore, RubricSource, Verdict};

/// Score answers and return only the verdict.
pub fn evaluate(answers: &PrescreenAnswers, matrix: Option<&RequirementMatrix>) -> Verdict {
    assess(answers, matrix).verdict
}

/// Score answers with a per-criterion breakdown.
pub fn assess(answers: &PrescreenAnswers, matrix: Option<&RequirementMatrix>) -> Assessment {
    let (rubric, source) = match matrix.and_then(RequirementMatrix::rubric) {
        Some(rubric) => (rubric, RubricSource::RequirementMatrix),
        None => (Rubric::default_rubric(), RubricSource::Default),
    };
    score_with(&rubric, answers, source)
}

fn score_with(rubric: &Rubric, answers: &PrescreenAnswers, source: RubricSource) -> Assessment {
    let breakdown: Vec<CriterionScore> = rubric
        .criteria
        .iter()
        .map(|criterion| {
            let max_points = criterion.max_points();
            CriterionScore {
                criterion: criterion.label(),
                points: criterion.score(answers).min(max_points),
                max_points,
            }
        })
        .collect();

    let score: f64 = breakdown.iter().map(|c| c.points).sum();
    let max_score = rubric.max_points();
    // Multiply first so whole-point scores give exact percentages.
    let percentage = if max_score > 0.0 {
        score * 100.0 / max_score
    } else {
        0.0
    };

    Assessment {
        score,
        max_score,
        percentage,
        verdict: Verdict::from_percentage(percentage),
        source,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn strong_candidate() -> PrescreenAnswers {
        PrescreenAnswers {
            experience_months: 30,
            icu_exposure: true,
            languages: strings(&["English", "Hindi", "Punjabi"]),
            education_level: "Bachelor's Degree".to_string(),
            certifications: strings(&["BLS", "ACLS", "PALS", "NALS"]),
            ..Default::default()
        }
    }

    #[test]
    fn strong_candidate_scores_full_marks() {
        let assessment = assess(&strong_candidate(), None);
        assert_eq!(assessment.score, 100.0);
        assert_eq!(assessment.max_score, 100.0);
        assert_eq!(assessment.percentage, 100.0);
        assert_eq!(assessment.verdict, Verdict::Pass);
        assert_eq!(assessment.source, RubricSource::Default);
        let points: Vec<f64> = assessment.breakdown.iter().map(|c| c.points).collect();
        assert_eq!(points, vec![30.0, 20.0, 15.0, 15.0, 20.0]);
    }

    #[test]
    fn evaluate_is_deterministic() {
        let answers = PrescreenAnswers {
            experience_months: 13,
            languages: strings(&["Tamil"]),
            ..Default::default()
        };
        assert_eq!(evaluate(&answers, None), evaluate(&answers, None));
    }

    #[test]
    fn empty_answers_fail_without_error() {
        let assessment = assess(&PrescreenAnswers::default(), None);
        assert_eq!(assessment.score, 0.0);
        assert_eq!(assessment.verdict, Verdict::Fail);
    }

    #[test]
    fn exactly_eighty_passes() {
        // 30 + 20 + 15 + 15 = 80
        let answers = PrescreenAnswers {
            certifications: Vec::new(),
            ..strong_candidate()
        };
        let assessment = assess(&answers, None);
        assert_eq!(assessment.percentage, 80.0);
        assert_eq!(assessment.verdict, Verdict::Pass);
    }

    #[test]
    fn exactly_sixty_is_caution() {
        // 20 (12mo) + 20 (ICU) + 10 (2 languages) + 10 (diploma) = 60
        let answers = PrescreenAnswers {
            experience_months: 12,
            icu_exposure: true,
            languages: strings(&["English", "Hindi"]),
            education_level: "Diploma".to_string(),
            ..Default::default()
        };
        let assessment = assess(&answers, None);
        assert_eq!(assessment.percentage, 60.0);
        assert_eq!(assessment.verdict, Verdict::Caution);
    }

    #[test]
    fn fifty_five_fails() {
        let answers = PrescreenAnswers {
            experience_months: 12,
            icu_exposure: true,
            languages: strings(&["English"]),
            education_level: "Diploma".to_string(),
            ..Default::default()
        };
        assert_eq!(assess(&answers, None).percentage, 55.0);
        assert_eq!(evaluate(&answers, None), Verdict::Fail);
    }

    #[test]
    fn matrix_replaces_default_rubric() {
        let matrix = RequirementMatrix {
            job_title: "attendant".to_string(),
            city: "Delhi NCR".to_string(),
            criteria: vec![
                Criterion::Flag {
                    flag: AnswerFlag::WillingToRelocate,
                    points: 50,
                },
                Criterion::RequiredCertifications {
                    certifications: strings(&["BLS"]),
                    points: 50,
                },
            ],
        };
        // Perfect on the default rubric, but the matrix asks for other things.
        let answers = PrescreenAnswers {
            willing_to_relocate: false,
            ..strong_candidate()
        };
        let assessment = assess(&answers, Some(&matrix));
        assert_eq!(assessment.source, RubricSource::RequirementMatrix);
        assert_eq!(assessment.percentage, 50.0);
        assert_eq!(assessment.verdict, Verdict::Fail);
    }

    #[test]
    fn unscorable_matrix_falls_back_to_default() {
        let matrix = RequirementMatrix {
            job_title: "nurse".to_string(),
            city: "Pune".to_string(),
            criteria: Vec::new(),
        };
        let assessment = assess(&strong_candidate(), Some(&matrix));
        assert_eq!(assessment.source, RubricSource::Default);
        assert_eq!(assessment.verdict, Verdict::Pass);
    }
}
