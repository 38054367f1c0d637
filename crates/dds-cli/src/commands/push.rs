//! `--mode push`: document -> remote, through the reconciliation engine.

use super::{connect, RunConfig};
use anyhow::{Context, Result};
use dds_codec::unmarshal_bytes;
use dds_reconcile::{sync, MonitorSource, Reporter};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, warn};

pub fn run(config: &RunConfig) -> Result<()> {
    let bytes = read_document(config.input.as_deref())?;
    let local = unmarshal_bytes(&bytes, config.format).context("could not deserialize monitors")?;
    let local = config.filter.apply(local);

    let client = connect(config)?;
    let remote = client.list_monitors().context("could not pull monitors")?;
    let remote = config.filter.apply(remote);
    info!(
        local = local.len(),
        remote = remote.len(),
        filter = config.filter.pattern().unwrap_or(""),
        "monitor sets loaded"
    );

    if config.options.dry_run {
        warn!("dry run: no remote changes will be made");
    }

    let mut reporter = Reporter::new(io::stdout().lock(), config.format, config.options);
    let result = sync(&local, &remote, &client, config.options, &mut reporter);
    let finished = reporter.finish();

    let report = result.context("could not sync monitors")?;
    finished
        .map(drop)
        .context("could not write sync report")?;

    let counts = report.counts();
    info!(
        create = counts.create,
        update = counts.update,
        delete = counts.delete,
        unchanged = counts.unchanged,
        dry_run = report.dry_run,
        "push complete"
    );
    Ok(())
}

fn read_document(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) => {
            fs::read(p).with_context(|| format!("could not read input file: {}", p.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("could not read monitors from stdin")?;
            Ok(buf)
        }
    }
}
