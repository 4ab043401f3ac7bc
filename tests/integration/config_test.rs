//! Configuration wired through a session

use healthtrack::shared::ConfigError;
use healthtrack::{AppConfig, AuthErrorKind, AuthSession, FileProfileStore, MemoryIdentityProvider, MemoryProfileStore};

use crate::common::*;

#[tokio::test]
async fn test_config_file_drives_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("healthtrack.toml");
    std::fs::write(
        &path,
        r#"
[profile]
default_blood_pressure = "118/76"
default_heart_rate = "64"

[identity]
min_password_length = 10
bcrypt_cost = 4
"#,
    )
    .unwrap();

    let config = assert_ok!(AppConfig::load(&path));
    let provider = MemoryIdentityProvider::new(config.identity.clone());
    let mut session = AuthSession::with_config(provider, MemoryProfileStore::new(), &config);
    assert_ok!(session.resolve_initial().await);

    assert_auth_err!(
        session.signup(EMAIL, "short-pw").await,
        AuthErrorKind::WeakCredential,
        "Password should be at least 6 characters."
    );
    assert_ok!(session.signup(EMAIL, "long-enough-pw").await);

    let display = session.display_profile();
    assert_eq!(display.blood_pressure, "118/76");
    assert_eq!(display.heart_rate, "64");
}

#[tokio::test]
async fn test_store_dir_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = assert_ok!(AppConfig::builder().data_dir(dir.path()).bcrypt_cost(4).build());
    let store = assert_ok!(FileProfileStore::from_settings(&config.store));
    assert_eq!(store.base_dir(), dir.path());
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = AppConfig::from_toml("[identity]\nbcrypt_cost = 2\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue("identity.bcrypt_cost", _)));
}
