//! Command handlers for datadog-sync.
//!
//! [`RunConfig`] is resolved once from flags and environment before any
//! remote call; `pull` and `push` only read it.

pub mod pull;
pub mod push;

use crate::Cli;
use anyhow::{Context, Result};
use dds_client::DatadogClient;
use dds_codec::Format;
use dds_config::{resolve_client_settings, resolve_credentials, ClientSettings, Credentials, Mode};
use dds_model::NameFilter;
use dds_reconcile::SyncOptions;
use std::path::PathBuf;

#[derive(Debug)]
pub struct RunConfig {
    pub mode: Mode,
    pub format: Format,
    pub filter: NameFilter,
    pub options: SyncOptions,
    /// pull: keep ids in the written document.
    pub keep_ids: bool,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub credentials: Credentials,
    pub settings: ClientSettings,
}

impl RunConfig {
    /// Validate every input up front. Nothing here touches the network.
    pub(crate) fn resolve<F>(cli: Cli, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = Mode::parse(&cli.mode)?;
        let format: Format = cli.format.parse()?;
        let filter = NameFilter::new(&cli.only)?;
        let credentials = resolve_credentials(cli.api_key.as_deref(), cli.app_key.as_deref(), &env)?;
        let settings = resolve_client_settings(&env).context("invalid API endpoint settings")?;

        Ok(Self {
            mode,
            format,
            filter,
            options: SyncOptions {
                dry_run: cli.dry_run,
                verbose: cli.verbose,
            },
            keep_ids: cli.ids,
            input: cli.input,
            output: cli.output,
            credentials,
            settings,
        })
    }
}

/// Build the live API client for this run.
pub fn connect(config: &RunConfig) -> Result<DatadogClient> {
    DatadogClient::new(&config.settings, config.credentials.clone())
        .context("could not build API client")
}
