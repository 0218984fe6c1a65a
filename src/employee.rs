use crate::progress::round_to_hundredths;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<NaiveDate>,
}

impl EmployeeProfile {
    /// First, middle and last name with blank parts dropped.
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .flat_map(|part| part.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Completed years of age on `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.date_of_birth
            .and_then(|dob| today.years_since(dob))
    }

    pub fn experience_years(&self, today: NaiveDate) -> Option<f64> {
        self.date_of_joining
            .map(|joined| experience_years(joined, today))
    }
}

/// Tenure in 365-day years, two decimals. Joining in the future yields a
/// negative value rather than an error.
pub fn experience_years(joined: NaiveDate, today: NaiveDate) -> f64 {
    round_to_hundredths((today - joined).num_days() as f64 / 365.0)
}

/// Profile sections the login response says are still missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingFlags {
    #[serde(default)]
    pub must_fill_personal_details: bool,
    #[serde(default)]
    pub must_fill_education_details: bool,
    #[serde(default)]
    pub must_fill_professional_details: bool,
}

impl OnboardingFlags {
    pub fn requires_details(&self) -> bool {
        self.must_fill_personal_details
            || self.must_fill_education_details
            || self.must_fill_professional_details
    }
}
