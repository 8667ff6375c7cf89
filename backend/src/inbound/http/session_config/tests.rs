//! Session settings across build modes.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn env_with(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

#[fixture]
fn release_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn path_of(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("utf-8 temp path")
}

#[rstest]
fn debug_uses_defaults_when_nothing_is_set() {
    let env = env_with(&[(KEY_FILE_ENV, "/nonexistent/session-key")]);

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn release_accepts_explicit_settings(release_key: NamedTempFile) {
    let env = env_with(&[
        (KEY_FILE_ENV, path_of(&release_key)),
        (COOKIE_SECURE_ENV, "0"),
        (SAMESITE_ENV, "strict"),
        (ALLOW_EPHEMERAL_ENV, "false"),
    ]);

    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");

    assert!(!settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_variable(release_key: NamedTempFile, #[case] missing: &str) {
    let vars: Vec<(&str, &str)> = [
        (KEY_FILE_ENV, path_of(&release_key)),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]
    .into_iter()
    .filter(|(name, _)| *name != missing)
    .collect();
    let env = env_with(&vars);

    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("missing variable");

    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sideways")]
fn release_rejects_malformed_values(
    release_key: NamedTempFile,
    #[case] name: &str,
    #[case] value: &str,
) {
    let mut vars = vec![
        (KEY_FILE_ENV, path_of(&release_key)),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ];
    for entry in &mut vars {
        if entry.0 == name {
            entry.1 = value;
        }
    }
    let env = env_with(&vars);

    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("malformed value");

    assert!(matches!(err, SessionConfigError::InvalidEnv { name: n, .. } if n == name));
}

#[rstest]
fn debug_tolerates_malformed_values() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/session-key"),
        (COOKIE_SECURE_ENV, "maybe"),
        (SAMESITE_ENV, "sideways"),
    ]);

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug fallback");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn release_refuses_ephemeral_keys(release_key: NamedTempFile) {
    let env = env_with(&[
        (KEY_FILE_ENV, path_of(&release_key)),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "1"),
    ]);

    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("ephemeral");

    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
#[case(BuildMode::Release, false)]
#[case(BuildMode::Debug, true)]
fn same_site_none_needs_secure_cookies(
    release_key: NamedTempFile,
    #[case] mode: BuildMode,
    #[case] accepted: bool,
) {
    let env = env_with(&[
        (KEY_FILE_ENV, path_of(&release_key)),
        (COOKIE_SECURE_ENV, "0"),
        (SAMESITE_ENV, "None"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]);

    let result = session_settings_from_env(&env, mode);

    assert_eq!(result.is_ok(), accepted);
    if let Err(err) = result {
        assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
    }
}

#[rstest]
fn release_rejects_short_keys() {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);
    let env = env_with(&[
        (KEY_FILE_ENV, path_of(&short)),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]);

    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("short key");

    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_fails_on_unreadable_key() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/session-key"),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Lax"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]);

    let err = session_settings_from_env(&env, BuildMode::Release).expect_err("unreadable key");

    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn same_key_file_yields_the_same_key(release_key: NamedTempFile) {
    let env = env_with(&[(KEY_FILE_ENV, path_of(&release_key))]);

    let first = session_settings_from_env(&env, BuildMode::Debug).expect("first load");
    let second = session_settings_from_env(&env, BuildMode::Debug).expect("second load");

    assert_eq!(first.key.master(), second.key.master());
}

#[rstest]
fn debug_output_hides_the_key(release_key: NamedTempFile) {
    let env = env_with(&[(KEY_FILE_ENV, path_of(&release_key))]);
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("settings");

    let rendered = format!("{settings:?}");

    assert!(rendered.contains("cookie_secure"));
    assert!(!rendered.contains("key"));
}
