/**
 * Profile Form
 *
 * Typed input collected by the profile-setup and profile-edit views. Lists are
 * `Vec<String>` here and only become delimited strings in [`ProfileForm::to_partial`],
 * right before the store write.
 *
 * Only fields the user actually set (`Some`) end up in the partial, so saving
 * a form never blanks fields it did not carry.
 */

use serde::{Deserialize, Serialize};

use crate::profile::lists::join_list;
use crate::shared::config::ProfileSettings;
use crate::shared::profile::{DisplayProfile, EmergencyContact, RawProfile};

/// Profile setup / edit submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub blood_pressure: Option<String>,
    pub heart_rate: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub medications: Option<Vec<String>>,
    pub conditions: Option<Vec<String>>,
    pub last_checkup: Option<String>,
    pub next_checkup: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill an edit form from what is currently displayed.
    ///
    /// Only values that came from the store are carried over: blank fields,
    /// empty lists, an empty contact and the display defaults for blood
    /// pressure and heart rate stay `None`, so saving an untouched form
    /// writes nothing the user did not enter. `email` and `bmi` are not
    /// editable and are left out.
    pub fn from_display(profile: &DisplayProfile, settings: &ProfileSettings) -> Self {
        let list = |items: &Vec<String>| (!items.is_empty()).then(|| items.clone());
        Self {
            first_name: entered(&profile.first_name, ""),
            last_name: entered(&profile.last_name, ""),
            age: entered(&profile.age, ""),
            gender: entered(&profile.gender, ""),
            blood_type: entered(&profile.blood_type, ""),
            height: entered(&profile.height, ""),
            weight: entered(&profile.weight, ""),
            blood_pressure: entered(&profile.blood_pressure, &settings.default_blood_pressure),
            heart_rate: entered(&profile.heart_rate, &settings.default_heart_rate),
            allergies: list(&profile.allergies),
            medications: list(&profile.medications),
            conditions: list(&profile.conditions),
            last_checkup: entered(&profile.last_checkup, ""),
            next_checkup: entered(&profile.next_checkup, ""),
            emergency_contact: (!profile.emergency_contact.is_empty()).then(|| profile.emergency_contact.clone()),
        }
    }

    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn with_allergies<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.allergies = Some(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_medications<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.medications = Some(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_conditions<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.conditions = Some(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_emergency_contact(mut self, contact: EmergencyContact) -> Self {
        self.emergency_contact = Some(contact);
        self
    }

    /// Convert to the partial document written by a merge.
    pub fn to_partial(&self, separator: &str) -> RawProfile {
        let joined = |items: &Option<Vec<String>>| items.as_ref().map(|items| join_list(items, separator));
        RawProfile {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: None,
            age: self.age.clone(),
            gender: self.gender.clone(),
            blood_type: self.blood_type.clone(),
            height: self.height.clone(),
            weight: self.weight.clone(),
            blood_pressure: self.blood_pressure.clone(),
            heart_rate: self.heart_rate.clone(),
            allergies: joined(&self.allergies),
            medications: joined(&self.medications),
            medical_conditions: joined(&self.conditions),
            last_checkup: self.last_checkup.clone(),
            next_checkup: self.next_checkup.clone(),
            emergency_contact: self.emergency_contact.clone(),
            created_at: None,
        }
    }
}

fn entered(value: &str, default: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty() && trimmed != default).then(|| value.to_string())
}
