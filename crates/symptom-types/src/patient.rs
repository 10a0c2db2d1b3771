//! Patient intake profile.
//!
//! The profile is collected alongside selections and echoed back in reports.
//! Inference does not use it.

use std::fmt;

/// Patient gender as offered on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    /// Male.
    #[default]
    Male,
    /// Female.
    Female,
}

/// ABO blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BloodType {
    /// Group A.
    #[default]
    A,
    /// Group B.
    B,
    /// Group AB.
    AB,
    /// Group O.
    O,
}

/// Region the patient is located in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Canada.
    #[default]
    Canada,
    /// United States.
    #[cfg_attr(feature = "serde", serde(rename = "USA"))]
    Usa,
    /// United Kingdom.
    #[cfg_attr(feature = "serde", serde(rename = "UK"))]
    Uk,
    /// Australia.
    Australia,
}

/// Error returned when a profile field is out of range.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// Age above [`PatientProfile::MAX_AGE`].
    AgeOutOfRange(u16),
    /// Weight outside `0..=MAX_WEIGHT_KG` or not a number.
    WeightOutOfRange(f64),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AgeOutOfRange(age) => write!(
                f,
                "age {} out of range (expected 0..={})",
                age,
                PatientProfile::MAX_AGE
            ),
            Self::WeightOutOfRange(weight) => write!(
                f,
                "weight {} kg out of range (expected 0..={})",
                weight,
                PatientProfile::MAX_WEIGHT_KG
            ),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Basic patient information from the intake form.
///
/// # Examples
///
/// ```
/// use symptom_types::{PatientProfile, Region};
///
/// let profile = PatientProfile {
///     age: 41,
///     region: Region::Uk,
///     ..Default::default()
/// };
/// assert!(profile.validate().is_ok());
///
/// let too_old = PatientProfile { age: 130, ..Default::default() };
/// assert!(too_old.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatientProfile {
    /// Gender.
    pub gender: Gender,
    /// Age in years.
    pub age: u16,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Blood group.
    pub blood_type: BloodType,
    /// Region.
    pub region: Region,
}

impl PatientProfile {
    /// Highest accepted age in years.
    pub const MAX_AGE: u16 = 120;
    /// Highest accepted weight in kilograms.
    pub const MAX_WEIGHT_KG: f64 = 300.0;

    /// Checks that age and weight are within the intake form's bounds.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.age > Self::MAX_AGE {
            return Err(ProfileError::AgeOutOfRange(self.age));
        }
        if !(0.0..=Self::MAX_WEIGHT_KG).contains(&self.weight_kg) {
            return Err(ProfileError::WeightOutOfRange(self.weight_kg));
        }
        Ok(())
    }
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            gender: Gender::default(),
            age: 25,
            weight_kg: 70.0,
            blood_type: BloodType::default(),
            region: Region::default(),
        }
    }
}
