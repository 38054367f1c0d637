//! dds-config
//!
//! Startup configuration for a sync run.
//!
//! - [`Mode`]: pull or push.
//! - [`credentials`]: API / application key resolution (flags, then env).
//! - [`endpoint`]: base URL, timeout and page size for the HTTP client.
//!
//! Everything here is resolved once at startup and treated as read-only for
//! the rest of the run. Resolution functions take an env lookup closure so
//! tests never have to mutate the process environment.

pub mod credentials;
pub mod endpoint;

pub use credentials::{resolve_credentials, Credentials};
pub use endpoint::{resolve_client_settings, ClientSettings};

use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Remote -> local document.
    Pull,
    /// Local document -> remote.
    Push,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Pull => "pull",
            Mode::Push => "push",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pull" => Ok(Mode::Pull),
            "push" => Ok(Mode::Push),
            other => bail!("unsupported mode '{}'. expected one of: pull | push", other),
        }
    }
}

/// Process-environment lookup; blank values count as unset.
pub fn process_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}
