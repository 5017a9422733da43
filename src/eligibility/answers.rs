//! Prescreen answers as entered by the candidate.

use serde::{Deserialize, Deserializer, Serialize};

/// Preferred shift length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftPreference {
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "either")]
    Either,
}

impl Default for ShiftPreference {
    fn default() -> Self {
        Self::Either
    }
}

/// How soon the candidate can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Immediate,
    #[serde(rename = "1_week")]
    OneWeek,
    #[serde(rename = "2_weeks")]
    TwoWeeks,
    #[serde(rename = "1_month")]
    OneMonth,
}

impl Default for Availability {
    fn default() -> Self {
        Self::Immediate
    }
}

/// Emergency contact captured during prescreen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyContact {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub relationship: String,
}

/// Highest education level, grouped into scoring tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EducationTier {
    None,
    Entry,
    Mid,
    Highest,
}

impl EducationTier {
    /// Map a free-form education label to its tier. Unrecognised labels
    /// (including "Other") carry no tier.
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace())
            .collect();
        match normalized.as_str() {
            "high school" => Self::Entry,
            "diploma" => Self::Mid,
            "bachelors degree" | "bachelors" | "masters degree" | "masters" | "phd" => {
                Self::Highest
            }
            _ => Self::None,
        }
    }
}

/// The candidate's prescreen form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescreenAnswers {
    #[serde(deserialize_with = "null_as_default")]
    pub experience_months: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub icu_exposure: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub ventilator_handling: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub shift_preference: ShiftPreference,
    #[serde(deserialize_with = "null_as_default")]
    pub travel_km: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub education_level: String,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub availability: Availability,
    #[serde(deserialize_with = "null_as_default")]
    pub salary_expectation: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub current_location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub willing_to_relocate: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub preferred_cities: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub emergency_contact: EmergencyContact,
}

impl PrescreenAnswers {
    pub fn education_tier(&self) -> EducationTier {
        EducationTier::from_label(&self.education_level)
    }

    /// Toggle a language in or out of the selection.
    pub fn toggle_language(&mut self, language: &str) {
        toggle(&mut self.languages, language);
    }

    /// Toggle a certification in or out of the selection.
    pub fn toggle_certification(&mut self, certification: &str) {
        toggle(&mut self.certifications, certification);
    }

    /// Whether the candidate holds a certification (case-insensitive).
    pub fn has_certification(&self, certification: &str) -> bool {
        self.certifications
            .iter()
            .any(|c| c.eq_ignore_ascii_case(certification))
    }
}

fn toggle(items: &mut Vec<String>, item: &str) {
    if let Some(pos) = items.iter().position(|i| i == item) {
        items.remove(pos);
    } else {
        items.push(item.to_string());
    }
}

/// Saved drafts may carry explicit nulls for fields the candidate cleared.
/// Treat those like a missing field instead of rejecting the whole form.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn education_labels_map_to_tiers() {
        assert_eq!(EducationTier::from_label("Bachelor's Degree"), EducationTier::Highest);
        assert_eq!(EducationTier::from_label("Diploma"), EducationTier::Mid);
        assert_eq!(EducationTier::from_label("High School"), EducationTier::Entry);
        assert_eq!(EducationTier::from_label("Other"), EducationTier::None);
        assert_eq!(EducationTier::from_label(""), EducationTier::None);
    }

    #[test]
    fn masters_and_phd_score_as_highest_tier() {
        // The legacy default rubric only recognised Bachelor's, so postgraduate
        // candidates scored zero for education. They rank with Bachelor's here.
        assert_eq!(EducationTier::from_label("Master's Degree"), EducationTier::Highest);
        assert_eq!(EducationTier::from_label("Masters"), EducationTier::Highest);
        assert_eq!(EducationTier::from_label("PhD"), EducationTier::Highest);
    }

    #[test]
    fn toggles_add_and_remove() {
        let mut answers = PrescreenAnswers::default();
        answers.toggle_language("Hindi");
        answers.toggle_language("Tamil");
        answers.toggle_language("Hindi");
        assert_eq!(answers.languages, vec!["Tamil".to_string()]);

        answers.toggle_certification("BLS");
        assert!(answers.has_certification("bls"));
        answers.toggle_certification("BLS");
        assert!(answers.certifications.is_empty());
    }

    #[test]
    fn partial_blob_fills_defaults() {
        let answers: PrescreenAnswers = serde_json::from_value(serde_json::json!({
            "experienceMonths": 18,
            "shiftPreference": "12h",
            "availability": "2_weeks",
            "emergencyContact": { "name": "Ravi" }
        }))
        .unwrap();
        assert_eq!(answers.experience_months, 18);
        assert_eq!(answers.shift_preference, ShiftPreference::TwelveHour);
        assert_eq!(answers.availability, Availability::TwoWeeks);
        assert_eq!(answers.emergency_contact.name, "Ravi");
        assert!(answers.emergency_contact.phone.is_empty());
        assert!(answers.languages.is_empty());
    }

    #[test]
    fn null_fields_fall_back_individually() {
        let answers: PrescreenAnswers = serde_json::from_value(serde_json::json!({
            "experienceMonths": 30,
            "currentLocation": "Pune",
            "languages": ["Hindi", "English"],
            "salaryExpectation": null,
            "shiftPreference": null,
            "emergencyContact": { "name": "Ravi", "phone": null }
        }))
        .unwrap();
        assert_eq!(answers.experience_months, 30);
        assert_eq!(answers.current_location, "Pune");
        assert_eq!(answers.languages, vec!["Hindi".to_string(), "English".to_string()]);
        assert_eq!(answers.salary_expectation, 0);
        assert_eq!(answers.shift_preference, ShiftPreference::Either);
        assert_eq!(answers.emergency_contact.name, "Ravi");
        assert!(answers.emergency_contact.phone.is_empty());

        let cleared: PrescreenAnswers =
            serde_json::from_value(serde_json::json!({ "emergencyContact": null })).unwrap();
        assert_eq!(cleared.emergency_contact, EmergencyContact::default());
    }
}
