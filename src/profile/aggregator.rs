//! # Profile aggregation
//!
//! Turns a stored [`RawProfile`] (or no profile at all) into a complete
//! [`DisplayProfile`]. Aggregation is total and has no side effects:
//!
//! | Source | Result |
//! |--------|--------|
//! | scalar present and non-blank | stored value |
//! | `bloodPressure` / `heartRate` absent | configured default (`"120/80"`, `"72"`) |
//! | any other scalar absent | `""` |
//! | `allergies`, `medications`, `medicalConditions` | parsed list (empty when absent) |
//! | `emergencyContact` absent | all three fields `""` |
//! | `height` (cm) and `weight` (kg) both positive numbers | `bmi` to one decimal |
//! | anything else | `bmi == ""` |

use crate::profile::lists::parse_list;
use crate::shared::config::ProfileSettings;
use crate::shared::profile::{DisplayProfile, RawProfile};

/// Builds display profiles using the configured defaults
#[derive(Debug, Clone, Default)]
pub struct ProfileAggregator {
    settings: ProfileSettings,
}

impl ProfileAggregator {
    pub fn new(settings: ProfileSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ProfileSettings {
        &self.settings
    }

    /// Derive the display profile. Never fails.
    pub fn aggregate(&self, raw: Option<&RawProfile>) -> DisplayProfile {
        let empty = RawProfile::default();
        let raw = raw.unwrap_or(&empty);
        let delimiter = self.settings.list_delimiter.as_str();
        let list = |value: &Option<String>| {
            value
                .as_deref()
                .map(|v| parse_list(v, delimiter))
                .unwrap_or_default()
        };

        DisplayProfile {
            first_name: scalar(&raw.first_name, ""),
            last_name: scalar(&raw.last_name, ""),
            email: scalar(&raw.email, ""),
            age: scalar(&raw.age, ""),
            gender: scalar(&raw.gender, ""),
            blood_type: scalar(&raw.blood_type, ""),
            height: scalar(&raw.height, ""),
            weight: scalar(&raw.weight, ""),
            blood_pressure: scalar(&raw.blood_pressure, &self.settings.default_blood_pressure),
            heart_rate: scalar(&raw.heart_rate, &self.settings.default_heart_rate),
            allergies: list(&raw.allergies),
            medications: list(&raw.medications),
            conditions: list(&raw.medical_conditions),
            last_checkup: scalar(&raw.last_checkup, ""),
            next_checkup: scalar(&raw.next_checkup, ""),
            emergency_contact: raw.emergency_contact.clone().unwrap_or_default(),
            bmi: compute_bmi(raw.height.as_deref(), raw.weight.as_deref()),
        }
    }
}

/// Aggregate with the default settings.
pub fn aggregate(raw: Option<&RawProfile>) -> DisplayProfile {
    ProfileAggregator::default().aggregate(raw)
}

fn scalar(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// BMI from height in centimeters and weight in kilograms, rounded to one
/// decimal place. Missing, non-numeric or non-positive input yields `""`.
pub fn compute_bmi(height_cm: Option<&str>, weight_kg: Option<&str>) -> String {
    match (positive_number(height_cm), positive_number(weight_kg)) {
        (Some(height_cm), Some(weight_kg)) => {
            let height_m = height_cm / 100.0;
            let bmi = ((weight_kg / (height_m * height_m)) * 10.0).round() / 10.0;
            if !bmi.is_finite() {
                return String::new();
            }
            format!("{:.1}", bmi)
        }
        _ => String::new(),
    }
}

fn positive_number(value: Option<&str>) -> Option<f64> {
    let n: f64 = value?.trim().parse().ok()?;
    (n.is_finite() && n > 0.0).then_some(n)
}
