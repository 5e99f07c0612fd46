//! Regression coverage for this module.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key bytes");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn valid_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, path_of(key)),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release configuration should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_complete_configuration(valid_key: NamedTempFile) {
    let settings = session_settings_from_env(&mock_env(release_vars(&valid_key)), BuildMode::Release)
        .expect("valid release settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggle(valid_key: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&valid_key);
    vars.remove(missing);

    let error = release_error(vars);

    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sideways")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
fn release_rejects_invalid_toggle(
    valid_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&valid_key);
    vars.insert(name, value.to_owned());

    let error = release_error(vars);

    assert!(matches!(error, SessionConfigError::InvalidEnv { name: n, .. } if n == name));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(valid_key: NamedTempFile) {
    let mut vars = release_vars(&valid_key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys(valid_key: NamedTempFile) {
    let mut vars = release_vars(&valid_key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "1".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_short_key() {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);

    let error = release_error(release_vars(&short));

    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_unreadable_key(valid_key: NamedTempFile) {
    let mut vars = release_vars(&valid_key);
    vars.insert(KEY_FILE_ENV, "/nonexistent/hunt/session_key".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let vars = HashMap::from([(KEY_FILE_ENV, "/nonexistent/hunt/session_key".to_owned())]);

    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug settings tolerate gaps");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn same_key_file_yields_same_key(valid_key: NamedTempFile) {
    let env = mock_env(release_vars(&valid_key));

    let first = session_settings_from_env(&env, BuildMode::Release).expect("first load");
    let second = session_settings_from_env(&env, BuildMode::Release).expect("second load");

    assert_eq!(
        fingerprint::key_fingerprint(&first.key),
        fingerprint::key_fingerprint(&second.key)
    );
}
