use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Gender as the backend encodes it: 1 = male, 2 = female.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Numeric wire code used across every backend payload.
    pub fn code(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }

    /// Parse the form's `"1"` / `"2"` selection string.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        match code.trim() {
            "1" => Ok(Gender::Male),
            "2" => Ok(Gender::Female),
            other => Err(CoreError::InvalidGender(other.to_string())),
        }
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Male
    }
}

/// The evaluation-creation form as the user typed it. Age stays a string
/// until validation so the form can round-trip partial input.
#[derive(Debug, Clone, Default)]
pub struct PatientForm {
    pub name: String,
    pub age: String,
    pub gender: Gender,
}

impl PatientForm {
    /// Validate the form ahead of any network call: name must be
    /// non-empty and age a positive number. Fractional input is accepted
    /// and truncated, so "54.5" submits as 54.
    pub fn validate(&self) -> Result<ValidPatient, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::MissingName);
        }

        let age: f64 = self.age.trim().parse().map_err(|_| CoreError::InvalidAge)?;
        if !age.is_finite() || age <= 0.0 {
            return Err(CoreError::InvalidAge);
        }

        Ok(ValidPatient {
            name: name.to_string(),
            age: age as u32,
            gender: self.gender,
        })
    }
}

/// A patient form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_parses() {
        let form = PatientForm {
            name: " Jane Doe ".to_string(),
            age: "54".to_string(),
            gender: Gender::Female,
        };
        let patient = form.validate().unwrap();
        assert_eq!(patient.name, "Jane Doe");
        assert_eq!(patient.age, 54);
        assert_eq!(patient.gender, Gender::Female);
    }

    #[test]
    fn empty_name_rejected() {
        let form = PatientForm {
            name: "   ".to_string(),
            age: "54".to_string(),
            gender: Gender::Male,
        };
        assert!(matches!(form.validate(), Err(CoreError::MissingName)));
    }

    #[test]
    fn non_numeric_age_rejected() {
        let form = PatientForm {
            name: "Jane".to_string(),
            age: "fifty".to_string(),
            gender: Gender::Male,
        };
        assert!(matches!(form.validate(), Err(CoreError::InvalidAge)));
    }

    #[test]
    fn fractional_age_truncates() {
        let form = PatientForm {
            name: "Jane".to_string(),
            age: "54.5".to_string(),
            gender: Gender::Male,
        };
        assert_eq!(form.validate().unwrap().age, 54);
    }

    #[test]
    fn negative_age_rejected() {
        let form = PatientForm {
            name: "Jane".to_string(),
            age: "-3".to_string(),
            gender: Gender::Male,
        };
        assert!(matches!(form.validate(), Err(CoreError::InvalidAge)));
    }

    #[test]
    fn zero_age_rejected() {
        let form = PatientForm {
            name: "Jane".to_string(),
            age: "0".to_string(),
            gender: Gender::Male,
        };
        assert!(matches!(form.validate(), Err(CoreError::InvalidAge)));
    }

    #[test]
    fn gender_codes_round_trip() {
        assert_eq!(Gender::from_code("1").unwrap(), Gender::Male);
        assert_eq!(Gender::from_code("2").unwrap(), Gender::Female);
        assert_eq!(Gender::Female.code(), 2);
        assert!(Gender::from_code("3").is_err());
    }
}
