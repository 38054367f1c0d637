//! `--mode pull`: remote monitors -> document.

use super::{connect, RunConfig};
use anyhow::{Context, Result};
use dds_codec::{marshal, strip_ids};
use dds_reconcile::MonitorSource;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

pub fn run(config: &RunConfig) -> Result<()> {
    let client = connect(config)?;
    info!(base_url = client.base_url(), "pulling monitors");

    let monitors = client.list_monitors().context("could not pull monitors")?;
    let total = monitors.len();
    let mut monitors = config.filter.apply(monitors);
    if !config.keep_ids {
        strip_ids(&mut monitors);
    }

    let mut doc = marshal(&monitors, config.format).context("could not serialize monitors")?;
    if !doc.ends_with('\n') {
        doc.push('\n');
    }
    write_document(config.output.as_deref(), &doc)?;

    info!(
        listed = total,
        written = monitors.len(),
        format = %config.format,
        "pull complete"
    );
    Ok(())
}

fn write_document(path: Option<&Path>, doc: &str) -> Result<()> {
    match path {
        Some(p) => fs::write(p, doc)
            .with_context(|| format!("could not write output file: {}", p.display())),
        None => {
            let mut out = io::stdout().lock();
            out.write_all(doc.as_bytes())
                .and_then(|()| out.flush())
                .context("could not write monitors to stdout")
        }
    }
}
