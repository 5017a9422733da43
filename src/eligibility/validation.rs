//! Prescreen form validation, run before scoring and before the step is
//! completed. Never run for auto-save.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationErrors;

use super::answers::PrescreenAnswers;

const MAX_EXPERIENCE_MONTHS: u32 = 50 * 12;
const MAX_TRAVEL_KM: u32 = 1000;

/// Job titles whose prescreen requires languages and an education level.
const LANGUAGE_AND_EDUCATION_REQUIRED: &[&str] = &["nurse"];

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^[0-9+\-\s()]{10,15}$").expect("phone pattern is valid"))
}

/// Validate a prescreen form for the given job title.
pub fn validate_prescreen(
    answers: &PrescreenAnswers,
    job_title: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if answers.experience_months > MAX_EXPERIENCE_MONTHS {
        errors.add("experienceMonths", "Experience seems too high");
    }
    if answers.travel_km > MAX_TRAVEL_KM {
        errors.add("travelKm", "Distance seems too high");
    }
    if answers.current_location.trim().is_empty() {
        errors.add("currentLocation", "Current location is required");
    }

    let contact = &answers.emergency_contact;
    if contact.name.trim().is_empty() {
        errors.add("emergencyContact.name", "Emergency contact name is required");
    }
    if contact.phone.trim().is_empty() {
        errors.add("emergencyContact.phone", "Emergency contact phone is required");
    } else if !phone_regex().is_match(&contact.phone) {
        errors.add("emergencyContact.phone", "Invalid phone number format");
    }
    if contact.relationship.trim().is_empty() {
        errors.add("emergencyContact.relationship", "Relationship is required");
    }

    let job = job_title.trim().to_ascii_lowercase();
    if LANGUAGE_AND_EDUCATION_REQUIRED.contains(&job.as_str()) {
        if answers.languages.is_empty() {
            errors.add("languages", "At least one language is required");
        }
        if answers.education_level.trim().is_empty() {
            errors.add("educationLevel", "Education level is required for nurses");
        }
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::answers::EmergencyContact;

    fn valid_answers() -> PrescreenAnswers {
        PrescreenAnswers {
            experience_months: 14,
            current_location: "Delhi NCR".to_string(),
            languages: vec!["Hindi".to_string()],
            education_level: "Diploma".to_string(),
            emergency_contact: EmergencyContact {
                name: "Meera".to_string(),
                phone: "+91 98765 43210".to_string(),
                relationship: "Sister".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(validate_prescreen(&valid_answers(), "nurse").is_ok());
    }

    #[test]
    fn missing_required_fields_reported_per_field() {
        let answers = PrescreenAnswers::default();
        let errors = validate_prescreen(&answers, "attendant").unwrap_err();
        assert_eq!(errors.get("currentLocation"), Some("Current location is required"));
        assert_eq!(
            errors.get("emergencyContact.phone"),
            Some("Emergency contact phone is required")
        );
        assert!(errors.get("emergencyContact.name").is_some());
        assert!(errors.get("emergencyContact.relationship").is_some());
        // Not a nurse: languages and education are optional.
        assert!(errors.get("languages").is_none());
        assert!(errors.get("educationLevel").is_none());
    }

    #[test]
    fn nurse_requires_languages_and_education() {
        let mut answers = valid_answers();
        answers.languages.clear();
        answers.education_level = "  ".to_string();
        let errors = validate_prescreen(&answers, "Nurse").unwrap_err();
        assert_eq!(errors.fields.len(), 2);
        assert!(errors.get("languages").is_some());
        assert!(errors.get("educationLevel").is_some());
    }

    #[test]
    fn phone_format_checked() {
        let mut answers = valid_answers();
        answers.emergency_contact.phone = "12345".to_string();
        let errors = validate_prescreen(&answers, "nurse").unwrap_err();
        assert_eq!(errors.get("emergencyContact.phone"), Some("Invalid phone number format"));
    }

    #[test]
    fn zero_experience_is_valid() {
        let mut answers = valid_answers();
        answers.experience_months = 0;
        answers.certifications.clear();
        assert!(validate_prescreen(&answers, "nurse").is_ok());
    }

    #[test]
    fn range_limits() {
        let mut answers = valid_answers();
        answers.experience_months = 601;
        answers.travel_km = 1001;
        let errors = validate_prescreen(&answers, "nurse").unwrap_err();
        assert!(errors.get("experienceMonths").is_some());
        assert!(errors.get("travelKm").is_some());
    }
}
