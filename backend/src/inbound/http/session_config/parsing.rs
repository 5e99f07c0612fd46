//! Environment parsing helpers for session configuration.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Name and debug-mode fallback of a boolean toggle.
pub(super) struct BoolEnvConfig {
    name: &'static str,
    default_value: bool,
}

impl BoolEnvConfig {
    pub(super) const fn new(name: &'static str, default_value: bool) -> Self {
        Self {
            name,
            default_value,
        }
    }
}

/// Read a boolean toggle, then let `validate` veto the parsed value.
pub(super) fn parse_bool_env<E: Env, F>(
    env: &E,
    mode: BuildMode,
    config: BoolEnvConfig,
    validate: F,
) -> Result<bool, SessionConfigError>
where
    F: FnOnce(bool, BuildMode) -> Result<bool, SessionConfigError>,
{
    let BoolEnvConfig {
        name,
        default_value,
    } = config;
    match env.string(name) {
        Some(value) => match parse_bool(&value) {
            Some(flag) => validate(flag, mode),
            None => {
                let error = SessionConfigError::InvalidEnv {
                    name,
                    value: value.clone(),
                    expected: BOOL_EXPECTED,
                };
                debug_warn_or_error(mode, default_value, error, || {
                    warn!(%value, default_value, "invalid {name}; using default");
                })
            }
        },
        None => debug_warn_or_error(
            mode,
            default_value,
            SessionConfigError::MissingEnv { name },
            || warn!(default_value, "{name} not set; using default"),
        ),
    }
}

/// Debug builds warn and fall back; release builds fail.
pub(super) fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: F,
) -> Result<T, SessionConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_same_site_value(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    default_same_site: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => debug_warn_or_error(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without SESSION_COOKIE_SECURE; browsers may drop it"),
        ),
        _ => debug_warn_or_error(
            mode,
            default_same_site,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(%value, "invalid SESSION_SAMESITE; using default"),
        ),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
