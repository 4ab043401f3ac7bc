//! File-backed store through AuthSession

use healthtrack::{AuthSession, FileProfileStore, GateState, ProfileForm, ProfileStore};
use pretty_assertions::assert_eq;

use crate::common::*;

#[tokio::test]
async fn test_profile_survives_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let provider = provider();

    let mut first = AuthSession::new(provider.clone(), FileProfileStore::new(dir.path()));
    assert_ok!(first.resolve_initial().await);
    let identity = assert_ok!(first.signup(EMAIL, PASSWORD).await);
    assert_ok!(
        first
            .save_profile(&ProfileForm::new().with_height("180").with_weight("81").with_allergies(["Latex"]))
            .await
    );
    assert!(dir.path().join(format!("{}.json", identity.id)).exists());

    let mut second = AuthSession::new(provider, FileProfileStore::new(dir.path()));
    assert_ok!(second.resolve_initial().await);
    assert_eq!(GateState::from_session(&second), GateState::AuthenticatedWithProfile);

    let display = second.display_profile();
    assert_eq!(display.email, EMAIL);
    assert_eq!(display.bmi, "25.0");
    assert_eq!(display.allergies, vec!["Latex"]);
}

#[tokio::test]
async fn test_numeric_values_written_elsewhere_still_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("user-7.json"),
        r#"{"email":"a@b.com","height":165,"weight":60.0,"heartRate":58}"#,
    )
    .unwrap();

    let store = FileProfileStore::new(dir.path());
    let raw = assert_ok!(store.get("user-7").await).expect("document");
    let display = healthtrack::aggregate(Some(&raw));
    assert_eq!(display.height, "165");
    assert_eq!(display.heart_rate, "58");
    assert_eq!(display.bmi, "22.0");
}
