//! AuthSession flows against the in-memory provider and store

use assert_matches::assert_matches;
use healthtrack::{
    aggregate, AuthErrorKind, EmergencyContact, GateDecision, GateState, IdentityProvider, ProfileError, ProfileForm,
    ProviderError, RawProfile, View,
};
use pretty_assertions::assert_eq;

use crate::common::*;

#[tokio::test]
async fn test_fresh_signup_redirects_to_profile_setup() {
    let (mut session, identity) = signed_up().await;

    let stored = assert_ok!(session.get_profile().await).expect("stub written");
    assert_eq!(stored.email.as_deref(), Some(EMAIL));
    assert!(stored.created_at.is_some());
    assert_eq!(stored.first_name, None);

    let state = gate_state(&session);
    assert_eq!(state, GateState::AuthenticatedNoProfile);
    assert_eq!(
        healthtrack::decide(state, View::Dashboard),
        GateDecision::Redirect(View::ProfileSetup)
    );
    assert_eq!(session.identity(), Some(&identity));
}

#[tokio::test]
async fn test_height_and_weight_yield_bmi() {
    let (mut session, _) = signed_up().await;
    let partial = RawProfile {
        height: Some("180".to_string()),
        weight: Some("81".to_string()),
        ..RawProfile::default()
    };
    assert_ok!(session.update_profile(&partial).await);

    let raw = assert_ok!(session.get_profile().await);
    assert_eq!(aggregate(raw.as_ref()).bmi, "25.0");
    assert_eq!(session.display_profile().bmi, "25.0");
    assert_eq!(gate_state(&session), GateState::AuthenticatedWithProfile);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let mut session = resolved_session().await;
    assert_auth_err!(
        session.login("nobody@b.com", PASSWORD).await,
        AuthErrorKind::NotFound,
        "No account found with this email."
    );
    assert_eq!(gate_state(&session), GateState::Unauthenticated);
}

#[tokio::test]
async fn test_allergies_are_parsed() {
    let (mut session, _) = signed_up().await;
    let partial = RawProfile {
        allergies: Some("Peanuts, Shellfish ,  Pollen".to_string()),
        ..RawProfile::default()
    };
    assert_ok!(session.update_profile(&partial).await);
    assert_eq!(
        session.display_profile().allergies,
        vec!["Peanuts", "Shellfish", "Pollen"]
    );
}

#[tokio::test]
async fn test_update_never_overwrites_absent_fields() {
    let (mut session, identity) = signed_up().await;
    let first = RawProfile {
        first_name: Some("Ada".to_string()),
        blood_type: Some("O+".to_string()),
        ..RawProfile::default()
    };
    let second = RawProfile {
        height: Some("170".to_string()),
        ..RawProfile::default()
    };
    assert_ok!(session.update_profile(&first).await);
    assert_ok!(session.update_profile(&second).await);

    let stored = session.cached_profile().cloned().expect("cached");
    assert_eq!(stored.first_name.as_deref(), Some("Ada"));
    assert_eq!(stored.blood_type.as_deref(), Some("O+"));
    assert_eq!(stored.height.as_deref(), Some("170"));
    assert_eq!(stored.email.as_deref(), Some(EMAIL));

    let document = session.store().document(&identity.id).expect("document");
    assert!(!document.contains_key("bmi"));
}

#[tokio::test]
async fn test_emergency_contact_is_replaced_wholesale() {
    let (mut session, _) = signed_up().await;
    let full = ProfileForm::new().with_emergency_contact(EmergencyContact {
        name: "Grace".to_string(),
        relationship: "Sister".to_string(),
        phone: "555-0100".to_string(),
    });
    assert_ok!(session.save_profile(&full).await);

    let name_only = ProfileForm::new().with_emergency_contact(EmergencyContact {
        name: "Alan".to_string(),
        ..EmergencyContact::default()
    });
    assert_ok!(session.save_profile(&name_only).await);

    let contact = session.display_profile().emergency_contact;
    assert_eq!(contact.name, "Alan");
    assert_eq!(contact.relationship, "");
    assert_eq!(contact.phone, "");
}

#[tokio::test]
async fn test_form_lists_roundtrip_through_store() {
    let (mut session, identity) = signed_up().await;
    let form = ProfileForm::new()
        .with_allergies(["Peanuts", "Pollen"])
        .with_medications(["Ibuprofen"])
        .with_conditions(["Asthma", "Migraine"]);
    assert_ok!(session.save_profile(&form).await);

    let document = session.store().document(&identity.id).expect("document");
    assert_eq!(document["allergies"], "Peanuts, Pollen");
    assert_eq!(document["medicalConditions"], "Asthma, Migraine");

    let display = session.display_profile();
    assert_eq!(display.allergies, vec!["Peanuts", "Pollen"]);
    assert_eq!(display.medications, vec!["Ibuprofen"]);
    assert_eq!(display.conditions, vec!["Asthma", "Migraine"]);
}

#[tokio::test]
async fn test_logout_with_provider_offline_still_clears() {
    let (mut session, _) = signed_up().await;
    session.provider().set_online(false);

    session.logout().await;

    assert_eq!(session.identity(), None);
    assert_eq!(session.cached_profile(), None);
    assert_eq!(gate_state(&session), GateState::Unauthenticated);
    assert_matches!(session.get_profile().await, Err(ProfileError::NotSignedIn));
}

#[tokio::test]
async fn test_signup_errors() {
    let (mut session, _) = signed_up().await;
    session.logout().await;

    assert_auth_err!(
        session.signup(EMAIL, PASSWORD).await,
        AuthErrorKind::DuplicateAccount,
        "An account with this email already exists."
    );
    assert_auth_err!(
        session.signup("new@b.com", "123").await,
        AuthErrorKind::WeakCredential,
        "Password should be at least 6 characters."
    );

    session.provider().set_online(false);
    assert_auth_err!(
        session.signup("new@b.com", PASSWORD).await,
        AuthErrorKind::ProviderUnavailable,
        "Network error. Please check your connection and try again."
    );
    assert_eq!(gate_state(&session), GateState::Unauthenticated);
}

#[tokio::test]
async fn test_login_errors() {
    let (mut session, _) = signed_up().await;
    session.logout().await;

    assert_auth_err!(
        session.login(EMAIL, "not-the-password").await,
        AuthErrorKind::WrongCredential,
        "Incorrect password."
    );
    assert_auth_err!(
        session.login("not an email", PASSWORD).await,
        AuthErrorKind::InvalidInput,
        "Invalid email address."
    );
}

#[tokio::test]
async fn test_repeated_failures_are_rate_limited() {
    let (mut session, _) = signed_up().await;
    session.logout().await;

    for _ in 0..fast_identity_settings().max_failed_attempts {
        let _ = session.login(EMAIL, "not-the-password").await;
    }
    assert_auth_err!(
        session.login(EMAIL, PASSWORD).await,
        AuthErrorKind::RateLimited,
        "Too many failed attempts. Please try again later."
    );
}

#[tokio::test]
async fn test_unknown_provider_code_surfaces_raw_message() {
    let mut session = resolved_session().await;
    session
        .provider()
        .inject_error(ProviderError::new("auth/user-disabled", "The user account has been disabled."));

    assert_auth_err!(
        session.login(EMAIL, PASSWORD).await,
        AuthErrorKind::Unknown,
        "The user account has been disabled."
    );
}

#[tokio::test]
async fn test_login_restores_profile() {
    let (mut session, _) = signed_up().await;
    assert_ok!(session.save_profile(&ProfileForm::new().with_height("165").with_weight("60")).await);
    session.logout().await;
    assert_eq!(session.display_profile().bmi, "");

    assert_ok!(session.login(EMAIL, PASSWORD).await);
    assert_eq!(gate_state(&session), GateState::AuthenticatedWithProfile);
    assert_eq!(session.display_profile().bmi, "22.0");
}

#[tokio::test]
async fn test_gate_waits_until_profile_fetch_completes() {
    let (signed_in, _) = signed_up().await;
    assert_ok!(signed_in.provider().authenticate(EMAIL, PASSWORD).await);

    // A new session over the same provider starts before anything is resolved
    let mut session = sibling(&signed_in);
    assert_eq!(gate_state(&session), GateState::Loading);

    // Identity resolves but the profile read fails: still no decision
    session.store().set_available(false);
    assert_matches!(session.resolve_initial().await, Err(ProfileError::Store(_)));
    assert!(session.identity().is_some());
    assert_eq!(gate_state(&session), GateState::Loading);
    assert_eq!(
        healthtrack::decide(gate_state(&session), View::Dashboard),
        GateDecision::Wait
    );

    session.store().set_available(true);
    assert_ok!(session.get_profile().await);
    assert_eq!(gate_state(&session), GateState::AuthenticatedNoProfile);
}

#[tokio::test]
async fn test_sibling_session_follows_provider_changes() {
    let (mut first, identity) = signed_up().await;
    let mut second = sibling(&first);
    assert_ok!(second.resolve_initial().await);
    assert_eq!(second.identity(), Some(&identity));

    first.logout().await;
    assert_ok!(second.process_pending_changes().await);
    assert_eq!(second.identity(), None);
    assert_eq!(gate_state(&second), GateState::Unauthenticated);
}

#[tokio::test]
async fn test_provider_sign_in_is_observed() {
    let mut session = resolved_session().await;
    let other = sibling(&session);
    assert_ok!(other.provider().create_account("c@d.com", PASSWORD).await);

    assert!(assert_ok!(session.process_next_change().await));
    assert_eq!(session.identity().map(|i| i.email.as_str()), Some("c@d.com"));
    // No stub was written by a direct provider call
    assert_eq!(gate_state(&session), GateState::AuthenticatedNoProfile);
    assert_eq!(session.provider().current_identity().map(|i| i.email), Some("c@d.com".to_string()));
}

#[tokio::test]
async fn test_login_with_store_down_stays_unauthenticated() {
    let (mut session, _) = signed_up().await;
    assert_ok!(session.save_profile(&ProfileForm::new().with_height("180")).await);
    session.logout().await;

    session.store().set_available(false);
    assert_auth_err!(
        session.login(EMAIL, PASSWORD).await,
        AuthErrorKind::ProviderUnavailable,
        "Network error. Please check your connection and try again."
    );
    assert_eq!(gate_state(&session), GateState::Unauthenticated);
    assert_eq!(session.provider().current_identity(), None);

    session.store().set_available(true);
    assert_ok!(session.login(EMAIL, PASSWORD).await);
    assert_eq!(gate_state(&session), GateState::AuthenticatedWithProfile);
}
