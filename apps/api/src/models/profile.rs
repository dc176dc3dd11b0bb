use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::locale::Language;

const AGE_RANGE: (u32, u32) = (18, 80);
const EXPERIENCE_RANGE: (u32, u32) = (0, 50);
const LEADERSHIP_RANGE: (u32, u32) = (0, 40);

const DEFAULT_AGE: u32 = 30;
const DEFAULT_EXPERIENCE_YEARS: u32 = 5;
const DEFAULT_LEADERSHIP_YEARS: u32 = 2;

/// Raw profile form as submitted by the client. Optional fields fall back to
/// the form defaults when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_position: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub country: String,
    pub age: Option<u32>,
    pub experience_years: Option<u32>,
    pub leadership_experience: Option<u32>,
    pub team_size: Option<String>,
    pub company_size: Option<String>,
    pub education: Option<String>,
    pub current_challenges: Option<String>,
}

/// A validated professional profile. Never mutated after submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub current_position: String,
    pub industry: String,
    pub country: String,
    pub experience_years: u32,
    pub leadership_experience: u32,
    pub team_size: String,
    pub company_size: String,
    pub education: String,
    pub current_challenges: String,
}

impl ProfileForm {
    /// Validates the form and fills defaults from the locale's option lists.
    ///
    /// Rejects the form when any of name, position, industry or country is
    /// blank, or when a numeric field is outside its range.
    pub fn validate(self, language: Language) -> Result<Profile, AppError> {
        let labels = language.labels();

        let missing: Vec<&str> = [
            ("name", &self.name),
            ("current_position", &self.current_position),
            ("industry", &self.industry),
            ("country", &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "{}: {}",
                labels.required_fields_error,
                missing.join(", ")
            )));
        }

        let age = check_range("age", self.age.unwrap_or(DEFAULT_AGE), AGE_RANGE)?;
        let experience_years = check_range(
            "experience_years",
            self.experience_years.unwrap_or(DEFAULT_EXPERIENCE_YEARS),
            EXPERIENCE_RANGE,
        )?;
        let leadership_experience = check_range(
            "leadership_experience",
            self.leadership_experience
                .unwrap_or(DEFAULT_LEADERSHIP_YEARS),
            LEADERSHIP_RANGE,
        )?;

        let options = language.profile_options();

        Ok(Profile {
            name: self.name.trim().to_string(),
            age,
            current_position: self.current_position.trim().to_string(),
            industry: self.industry.trim().to_string(),
            country: self.country.trim().to_string(),
            experience_years,
            leadership_experience,
            team_size: or_default(self.team_size, options.team_sizes[0]),
            company_size: or_default(self.company_size, options.company_sizes[0]),
            education: or_default(self.education, options.education_levels[0]),
            current_challenges: self
                .current_challenges
                .map(|c| c.trim().to_string())
                .unwrap_or_default(),
        })
    }
}

fn check_range(field: &str, value: u32, (min, max): (u32, u32)) -> Result<u32, AppError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::Validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )))
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
pub(crate) fn sample_form() -> ProfileForm {
    ProfileForm {
        name: "Amina".to_string(),
        current_position: "Engineering Manager".to_string(),
        industry: "Technology".to_string(),
        country: "Jordan".to_string(),
        ..ProfileForm::default()
    }
}
