//! Scoring criteria and the built-in default rubric.

use serde::{Deserialize, Serialize};

use super::answers::{EducationTier, PrescreenAnswers};

/// Boolean answers a criterion can award points for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerFlag {
    IcuExposure,
    VentilatorHandling,
    WillingToRelocate,
}

impl AnswerFlag {
    fn read(self, answers: &PrescreenAnswers) -> bool {
        match self {
            Self::IcuExposure => answers.icu_exposure,
            Self::VentilatorHandling => answers.ventilator_handling,
            Self::WillingToRelocate => answers.willing_to_relocate,
        }
    }
}

/// List answers scored per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerList {
    Languages,
    Certifications,
    PreferredCities,
}

impl AnswerList {
    fn len(self, answers: &PrescreenAnswers) -> usize {
        match self {
            Self::Languages => answers.languages.len(),
            Self::Certifications => answers.certifications.len(),
            Self::PreferredCities => answers.preferred_cities.len(),
        }
    }
}

/// Minimum experience and the points it earns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceTier {
    pub min_months: u32,
    pub points: u32,
}

/// One scored dimension of a rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Criterion {
    /// Points from the best experience tier the candidate reaches.
    ExperienceTiers { tiers: Vec<ExperienceTier> },
    /// Flat points when a yes/no answer is yes.
    Flag { flag: AnswerFlag, points: u32 },
    /// Points per list item, capped.
    PerItem {
        list: AnswerList,
        points_each: u32,
        cap: u32,
    },
    /// Points by education tier.
    Education { highest: u32, mid: u32, entry: u32 },
    /// Points in proportion to how many named certifications are held.
    RequiredCertifications {
        certifications: Vec<String>,
        points: u32,
    },
}

impl Criterion {
    /// Short label for score breakdowns.
    pub fn label(&self) -> String {
        match self {
            Self::ExperienceTiers { .. } => "experience".to_string(),
            Self::Flag { flag, .. } => format!("{flag:?}"),
            Self::PerItem { list, .. } => format!("{list:?}"),
            Self::Education { .. } => "education".to_string(),
            Self::RequiredCertifications { .. } => "requiredCertifications".to_string(),
        }
    }

    /// Most points this criterion can award.
    pub fn max_points(&self) -> f64 {
        let max = match self {
            Self::ExperienceTiers { tiers } => tiers.iter().map(|t| t.points).max().unwrap_or(0),
            Self::Flag { points, .. } => *points,
            Self::PerItem { cap, .. } => *cap,
            Self::Education {
                highest,
                mid,
                entry,
            } => (*highest).max(*mid).max(*entry),
            Self::RequiredCertifications { points, .. } => *points,
        };
        f64::from(max)
    }

    /// Points awarded for the given answers, never above `max_points`.
    pub fn score(&self, answers: &PrescreenAnswers) -> f64 {
        match self {
            Self::ExperienceTiers { tiers } => f64::from(
                tiers
                    .iter()
                    .filter(|t| answers.experience_months >= t.min_months)
                    .map(|t| t.points)
                    .max()
                    .unwrap_or(0),
            ),
            Self::Flag { flag, points } => {
                if flag.read(answers) {
                    f64::from(*points)
                } else {
                    0.0
                }
            }
            Self::PerItem {
                list,
                points_each,
                cap,
            } => {
                let earned = (list.len(answers) as u64).saturating_mul(u64::from(*points_each));
                earned.min(u64::from(*cap)) as f64
            }
            Self::Education {
                highest,
                mid,
                entry,
            } => f64::from(match answers.education_tier() {
                EducationTier::Highest => *highest,
                EducationTier::Mid => *mid,
                EducationTier::Entry => *entry,
                EducationTier::None => 0,
            }),
            Self::RequiredCertifications {
                certifications,
                points,
            } => {
                if certifications.is_empty() {
                    return f64::from(*points);
                }
                let held = certifications
                    .iter()
                    .filter(|c| answers.has_certification(c))
                    .count();
                f64::from(*points) * held as f64 / certifications.len() as f64
            }
        }
    }
}

/// An ordered set of criteria scored on a common percentage scale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rubric {
    pub criteria: Vec<Criterion>,
}

impl Rubric {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    /// The built-in 100-point rubric used when no requirement matrix applies.
    pub fn default_rubric() -> Self {
        Self::new(vec![
            Criterion::ExperienceTiers {
                tiers: vec![
                    ExperienceTier {
                        min_months: 24,
                        points: 30,
                    },
                    ExperienceTier {
                        min_months: 12,
                        points: 20,
                    },
                    ExperienceTier {
                        min_months: 6,
                        points: 10,
                    },
                ],
            },
            Criterion::Flag {
                flag: AnswerFlag::IcuExposure,
                points: 20,
            },
            Criterion::PerItem {
                list: AnswerList::Languages,
                points_each: 5,
                cap: 15,
            },
            Criterion::Education {
                highest: 15,
                mid: 10,
                entry: 5,
            },
            Criterion::PerItem {
                list: AnswerList::Certifications,
                points_each: 5,
                cap: 20,
            },
        ])
    }

    pub fn max_points(&self) -> f64 {
        self.criteria.iter().map(Criterion::max_points).sum()
    }

    /// A rubric that can award no points cannot produce a percentage.
    pub fn is_scorable(&self) -> bool {
        self.max_points() > 0.0
    }
}
