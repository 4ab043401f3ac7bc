//! Profile Data Types
//!
//! Two shapes of the same health profile live here:
//!
//! - **`RawProfile`** - the sparse document as stored. Every field is optional
//!   and list fields are comma-delimited strings. Field names are camelCase on
//!   the wire (`firstName`, `bloodType`, `medicalConditions`, ...).
//! - **`DisplayProfile`** - the fully populated, derived shape views render.
//!   Built only by [`crate::profile::aggregator`].
//!
//! `RawProfile` has no `bmi` field, so BMI can never be written to the store.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Emergency contact sub-record. Stored and replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

impl EmergencyContact {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.relationship.trim().is_empty()
            && self.phone.trim().is_empty()
    }
}

/// Health profile as stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub blood_type: Option<String>,
    /// Centimeters
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub height: Option<String>,
    /// Kilograms
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub blood_pressure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub heart_rate: Option<String>,
    /// Comma-delimited
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub allergies: Option<String>,
    /// Comma-delimited
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub medications: Option<String>,
    /// Comma-delimited; surfaced as `conditions` on the display profile
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub medical_conditions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub last_checkup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub next_checkup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
}

impl RawProfile {
    /// Minimal document written right after account creation
    pub fn signup_stub(email: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            email: Some(email.into()),
            created_at: Some(created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ..Self::default()
        }
    }

    /// Whether profile setup has been submitted.
    ///
    /// The sign-up stub (`email`, `createdAt`) alone does not count; any other
    /// non-empty field does.
    pub fn is_setup_complete(&self) -> bool {
        let scalars = [
            &self.first_name,
            &self.last_name,
            &self.age,
            &self.gender,
            &self.blood_type,
            &self.height,
            &self.weight,
            &self.blood_pressure,
            &self.heart_rate,
            &self.allergies,
            &self.medications,
            &self.medical_conditions,
            &self.last_checkup,
            &self.next_checkup,
        ];
        scalars
            .iter()
            .any(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
            || self
                .emergency_contact
                .as_ref()
                .is_some_and(|contact| !contact.is_empty())
    }
}

/// Fully populated profile ready for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: String,
    pub gender: String,
    pub blood_type: String,
    pub height: String,
    pub weight: String,
    pub blood_pressure: String,
    pub heart_rate: String,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
    pub conditions: Vec<String>,
    pub last_checkup: String,
    pub next_checkup: String,
    pub emergency_contact: EmergencyContact,
    /// One decimal place, or empty when height or weight is unusable
    pub bmi: String,
}

impl DisplayProfile {
    /// "First Last", falling back to the email when no name is set
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// Deserializers that accept values written by other clients in a looser shape.
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    /// Strings pass through; numbers and booleans become their text form.
    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }))
    }
}
