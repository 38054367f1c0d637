//! API credential resolution.
//!
//! Precedence per key: explicit flag value, then environment variable.
//! Both keys are required. Errors name the flag and the env var, never a value.
//! `Debug` output is redacted.

use anyhow::{bail, Result};

pub const ENV_API_KEY: &str = "DATADOG_API_KEY";
pub const ENV_APP_KEY: &str = "DATADOG_APP_KEY";

#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub app_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            app_key: app_key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<REDACTED>")
            .field("app_key", &"<REDACTED>")
            .finish()
    }
}

fn non_blank(v: Option<&str>) -> Option<String> {
    v.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Resolve both keys. `env` returns `None` for unset variables.
pub fn resolve_credentials<F>(
    api_key_flag: Option<&str>,
    app_key_flag: Option<&str>,
    env: F,
) -> Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = non_blank(api_key_flag).or_else(|| non_blank(env(ENV_API_KEY).as_deref()));
    let app_key = non_blank(app_key_flag).or_else(|| non_blank(env(ENV_APP_KEY).as_deref()));

    let Some(api_key) = api_key else {
        bail!(
            "no API key provided: pass --api-key or set {}",
            ENV_API_KEY
        );
    };
    let Some(app_key) = app_key else {
        bail!(
            "no application key provided: pass --app-key or set {}",
            ENV_APP_KEY
        );
    };

    Ok(Credentials { api_key, app_key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn flags_take_precedence_over_env() {
        let env = env_of(&[(ENV_API_KEY, "env-api"), (ENV_APP_KEY, "env-app")]);
        let c = resolve_credentials(Some("flag-api"), None, env).unwrap();
        assert_eq!(c.api_key, "flag-api");
        assert_eq!(c.app_key, "env-app");
    }

    #[test]
    fn missing_api_key_names_flag_and_var() {
        let env = env_of(&[(ENV_APP_KEY, "env-app")]);
        let err = resolve_credentials(None, None, env).unwrap_err().to_string();
        assert!(err.contains("--api-key"));
        assert!(err.contains(ENV_API_KEY));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let env = env_of(&[(ENV_API_KEY, "abc"), (ENV_APP_KEY, "   ")]);
        let err = resolve_credentials(None, Some(""), env).unwrap_err().to_string();
        assert!(err.contains("no application key provided"));
    }

    #[test]
    fn debug_is_redacted() {
        let c = Credentials::new("secret-api-value", "secret-app-value");
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("secret-api-value"));
        assert!(!dbg.contains("secret-app-value"));
        assert!(dbg.contains("<REDACTED>"));
    }
}
