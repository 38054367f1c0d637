//! HTTP endpoint settings for the monitor API client.
//!
//! | Variable               | Meaning                               | Default           |
//! |------------------------|---------------------------------------|-------------------|
//! | `DATADOG_API_URL`      | full base URL (wins over `DD_SITE`)   | -                 |
//! | `DD_SITE`              | site domain, URL becomes `https://api.<site>` | `datadoghq.com` |
//! | `DATADOG_TIMEOUT_SECS` | per-request timeout                   | 30                |
//! | `DATADOG_PAGE_SIZE`    | monitors per list page                | 1000              |

use anyhow::{bail, Context, Result};
use std::time::Duration;

pub const ENV_API_URL: &str = "DATADOG_API_URL";
pub const ENV_SITE: &str = "DD_SITE";
pub const ENV_TIMEOUT_SECS: &str = "DATADOG_TIMEOUT_SECS";
pub const ENV_PAGE_SIZE: &str = "DATADOG_PAGE_SIZE";

pub const DEFAULT_SITE: &str = "datadoghq.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Base URL without trailing slash, e.g. `https://api.datadoghq.com`.
    pub base_url: String,
    pub timeout: Duration,
    pub page_size: u32,
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::with_base_url(format!("https://api.{DEFAULT_SITE}"))
    }
}

pub fn resolve_client_settings<F>(env: F) -> Result<ClientSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = match env(ENV_API_URL) {
        Some(url) => {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("{} must be an http(s) URL, got '{}'", ENV_API_URL, url);
            }
            url.to_string()
        }
        None => {
            let site = env(ENV_SITE).unwrap_or_else(|| DEFAULT_SITE.to_string());
            format!("https://api.{}", site.trim())
        }
    };

    let mut settings = ClientSettings::with_base_url(base_url);

    if let Some(raw) = env(ENV_TIMEOUT_SECS) {
        let secs: u64 = raw
            .trim()
            .parse()
            .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))?;
        if secs == 0 {
            bail!("{} must be greater than zero", ENV_TIMEOUT_SECS);
        }
        settings.timeout = Duration::from_secs(secs);
    }

    if let Some(raw) = env(ENV_PAGE_SIZE) {
        let size: u32 = raw
            .trim()
            .parse()
            .with_context(|| format!("{ENV_PAGE_SIZE} must be a positive integer"))?;
        if size == 0 {
            bail!("{} must be greater than zero", ENV_PAGE_SIZE);
        }
        settings.page_size = size;
    }

    Ok(settings)
}
