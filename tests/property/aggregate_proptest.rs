//! Property-based tests for profile aggregation
//!
//! Uses proptest to generate random inputs and verify properties

use healthtrack::profile::{join_list, parse_list};
use healthtrack::{aggregate, compute_bmi, EmergencyContact, RawProfile};
use proptest::prelude::*;

fn list_item() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,12}[A-Za-z0-9]".prop_map(|s| s.trim().to_string())
}

proptest! {
    #[test]
    fn test_bmi_matches_formula(height in 30.0f64..260.0, weight in 1.0f64..400.0) {
        let bmi = weight / ((height / 100.0) * (height / 100.0));
        let expected = format!("{:.1}", (bmi * 10.0).round() / 10.0);
        let (height, weight) = (height.to_string(), weight.to_string());
        prop_assert_eq!(compute_bmi(Some(height.as_str()), Some(weight.as_str())), expected);
    }

    #[test]
    fn test_bmi_empty_for_non_positive(height in -500.0f64..=0.0, weight in 1.0f64..400.0) {
        let (height, weight) = (height.to_string(), weight.to_string());
        prop_assert_eq!(compute_bmi(Some(height.as_str()), Some(weight.as_str())), "");
        prop_assert_eq!(compute_bmi(Some(weight.as_str()), Some(height.as_str())), "");
    }

    #[test]
    fn test_list_parse_join_roundtrip(items in prop::collection::vec(list_item(), 0..8)) {
        prop_assert_eq!(parse_list(&join_list(&items, ", "), ","), items);
    }

    #[test]
    fn test_aggregate_is_total(
        height in ".*",
        weight in ".*",
        allergies in ".*",
        heart_rate in proptest::option::of(".*"),
        contact_name in ".*",
    ) {
        let raw = RawProfile {
            height: Some(height),
            weight: Some(weight),
            allergies: Some(allergies),
            heart_rate,
            emergency_contact: Some(EmergencyContact { name: contact_name, ..EmergencyContact::default() }),
            ..RawProfile::default()
        };
        let display = aggregate(Some(&raw));
        prop_assert!(display.allergies.iter().all(|item| !item.is_empty() && item.trim() == item));
        prop_assert!(!display.heart_rate.is_empty());
        prop_assert_eq!(&display, &aggregate(Some(&raw)));
    }
}

#[test]
fn test_aggregate_none_defaults() {
    let display = aggregate(None);
    assert_eq!(display.blood_pressure, "120/80");
    assert_eq!(display.heart_rate, "72");
    assert_eq!(display.bmi, "");
    assert!(display.allergies.is_empty() && display.medications.is_empty() && display.conditions.is_empty());
    assert_eq!(display.emergency_contact, EmergencyContact::default());
}
