//! Session cookie settings read from the environment.
//!
//! Debug builds fall back to development defaults (with a warning) when a
//! variable is missing or malformed; release builds refuse to start instead.
//!
//! | Variable                  | Meaning                          | Debug default |
//! |---------------------------|----------------------------------|---------------|
//! | `SESSION_KEY_FILE`        | path to the signing key material | ephemeral key |
//! | `SESSION_COOKIE_SECURE`   | `1`/`0`, `true`/`false`          | `true`        |
//! | `SESSION_SAMESITE`        | `Strict`, `Lax` or `None`        | `Lax`         |
//! | `SESSION_ALLOW_EPHEMERAL` | generate a key if the file fails | `false`       |

use std::fmt;
use std::path::PathBuf;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

pub const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key material accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Name of the cookie carrying the encrypted session.
pub const SESSION_COOKIE_NAME: &str = "session";
const SESSION_TTL_HOURS: i64 = 2;

/// Whether development fallbacks are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode of the running binary.
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSettings")
            .field("cookie_secure", &self.cookie_secure)
            .field("same_site", &self.same_site)
            .finish_non_exhaustive()
    }
}

impl SessionSettings {
    /// Private (encrypted) cookie session with a two hour lifetime.
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_same_site(self.same_site)
            .session_lifecycle(
                PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
            )
            .build()
    }
}

/// Reasons the session settings were rejected.
#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("{name} must be set in release builds")]
    MissingEnv { name: &'static str },
    #[error("{name} has invalid value {value:?}; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{ALLOW_EPHEMERAL_ENV} must not be enabled in release builds")]
    EphemeralNotAllowed,
    #[error("SameSite=None requires {COOKIE_SECURE_ENV}=1")]
    InsecureSameSiteNone,
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} is {length} bytes; at least {min_length} are required")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_length: usize,
    },
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_same_site(raw: &str) -> Option<SameSite> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

/// Read one variable, substituting `fallback` in debug builds.
fn read_setting<E, T>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    expected: &'static str,
    parse: fn(&str) -> Option<T>,
    fallback: T,
) -> Result<T, SessionConfigError>
where
    E: Env,
    T: fmt::Debug,
{
    let Some(raw) = env.string(name) else {
        if mode.is_debug() {
            warn!(variable = name, default = ?fallback, "session setting missing; using default");
            return Ok(fallback);
        }
        return Err(SessionConfigError::MissingEnv { name });
    };
    match parse(&raw) {
        Some(value) => Ok(value),
        None if mode.is_debug() => {
            warn!(variable = name, value = %raw, default = ?fallback, "invalid session setting; using default");
            Ok(fallback)
        }
        None => Err(SessionConfigError::InvalidEnv {
            name,
            value: raw,
            expected,
        }),
    }
}

fn load_key(
    path: PathBuf,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let may_generate = mode.is_debug() || allow_ephemeral;
    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) if may_generate => {
            warn!(path = %path.display(), error = %source, "using an ephemeral session key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };
    if !mode.is_debug() && bytes.len() < SESSION_KEY_MIN_LEN {
        let length = bytes.len();
        bytes.zeroize();
        return Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_length: SESSION_KEY_MIN_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

/// Build [`SessionSettings`] from `env`.
///
/// # Errors
///
/// Release builds fail on any missing or malformed variable, on an
/// unreadable or short key file, on `SESSION_ALLOW_EPHEMERAL=1` and on
/// `SameSite=None` without secure cookies.
///
/// # Examples
/// ```
/// use kitchen::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
/// let settings = session_settings_from_env(&env, BuildMode::Debug).unwrap();
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = read_setting(
        env,
        mode,
        COOKIE_SECURE_ENV,
        "1 or 0",
        parse_flag,
        true,
    )?;
    let same_site = read_setting(
        env,
        mode,
        SAMESITE_ENV,
        "Strict, Lax or None",
        parse_same_site,
        SameSite::Lax,
    )?;
    let allow_ephemeral = read_setting(
        env,
        mode,
        ALLOW_EPHEMERAL_ENV,
        "1 or 0",
        parse_flag,
        false,
    )?;

    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    if same_site == SameSite::None && !cookie_secure {
        if !mode.is_debug() {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SameSite=None without secure cookies; browsers will drop the session");
    }

    let path = env
        .string(KEY_FILE_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_KEY_PATH), PathBuf::from);
    let key = load_key(path, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

#[cfg(test)]
mod tests;
