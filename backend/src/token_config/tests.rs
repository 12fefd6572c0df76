//! Unit tests for token secret configuration.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug)]
struct TempSecretFile {
    path: PathBuf,
}

impl TempSecretFile {
    fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("token-secret-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b's'; len])?;
        Ok(Self { path })
    }

    fn path_str(&self) -> &str {
        self.path
            .to_str()
            .expect("temporary path should be valid UTF-8")
    }
}

impl Drop for TempSecretFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
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

fn missing_file() -> String {
    std::env::temp_dir()
        .join(format!("missing-token-secret-{}", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned()
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn inline_secret_is_used(#[case] mode: BuildMode) {
    let env = mock_env(&[(SECRET_ENV, "0123456789abcdef0123456789abcdef")]);

    let settings = token_settings_from_env(&env, mode).expect("inline secret accepted");

    assert_eq!(settings.secret(), b"0123456789abcdef0123456789abcdef");
    assert!(!settings.is_ephemeral());
}

#[rstest]
fn secret_file_is_read() {
    let file = TempSecretFile::new(TOKEN_SECRET_MIN_LEN).expect("secret file");
    let env = mock_env(&[(SECRET_FILE_ENV, file.path_str())]);

    let settings = token_settings_from_env(&env, BuildMode::Release).expect("file secret");

    assert_eq!(settings.secret(), vec![b's'; TOKEN_SECRET_MIN_LEN].as_slice());
}

#[rstest]
fn release_rejects_short_secret() {
    let file = TempSecretFile::new(TOKEN_SECRET_MIN_LEN - 1).expect("secret file");
    let env = mock_env(&[(SECRET_FILE_ENV, file.path_str())]);

    let err = token_settings_from_env(&env, BuildMode::Release).expect_err("too short");

    assert!(matches!(
        err,
        TokenConfigError::SecretTooShort {
            length,
            min_len: TOKEN_SECRET_MIN_LEN,
            ..
        } if length == TOKEN_SECRET_MIN_LEN - 1
    ));
}

#[rstest]
fn debug_accepts_short_secret() {
    let env = mock_env(&[(SECRET_ENV, "short")]);

    let settings = token_settings_from_env(&env, BuildMode::Debug).expect("debug tolerates");

    assert_eq!(settings.secret(), b"short");
}

#[rstest]
fn release_missing_secret_is_rejected() {
    let path = missing_file();
    let env = mock_env(&[(SECRET_FILE_ENV, path.as_str())]);

    let err = token_settings_from_env(&env, BuildMode::Release).expect_err("no secret");

    assert!(matches!(err, TokenConfigError::SecretRead { .. }));
}

#[rstest]
fn debug_missing_secret_generates_ephemeral_secret() {
    let path = missing_file();
    let env = mock_env(&[(SECRET_FILE_ENV, path.as_str())]);

    let first = token_settings_from_env(&env, BuildMode::Debug).expect("ephemeral");
    let second = token_settings_from_env(&env, BuildMode::Debug).expect("ephemeral");

    assert!(first.is_ephemeral());
    assert!(first.secret().len() >= TOKEN_SECRET_MIN_LEN);
    assert_ne!(first.secret(), second.secret());
}

#[rstest]
#[case("1")]
#[case("true")]
fn release_forbids_ephemeral_secrets(#[case] value: &str) {
    let env = mock_env(&[
        (ALLOW_EPHEMERAL_ENV, value),
        (SECRET_ENV, "0123456789abcdef0123456789abcdef"),
    ]);

    let err = token_settings_from_env(&env, BuildMode::Release).expect_err("forbidden");

    assert!(matches!(err, TokenConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_unparseable_toggle() {
    let env = mock_env(&[(ALLOW_EPHEMERAL_ENV, "maybe")]);

    let err = token_settings_from_env(&env, BuildMode::Release).expect_err("invalid toggle");

    assert!(matches!(
        err,
        TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            ..
        }
    ));
}

#[rstest]
fn debug_output_redacts_secret() {
    let env = mock_env(&[(SECRET_ENV, "0123456789abcdef0123456789abcdef")]);
    let settings = token_settings_from_env(&env, BuildMode::Release).expect("valid");

    let rendered = format!("{settings:?}");

    assert!(!rendered.contains("0123456789abcdef"));
    assert!(rendered.contains("<redacted>"));
}
