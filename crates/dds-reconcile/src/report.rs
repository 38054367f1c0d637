//! Plain-text narration of a plan as it is applied.
//!
//! Output shape:
//!
//! ```text
//! create: web-errors
//! update: cpu
//! delete: disk
//! error: update cpu: api error status=400: bad query
//! applied: 1 create, 0 update, 1 delete, 3 unchanged, 1 failed
//! ```
//!
//! Verbose adds indented `before:` / `after:` documents (in the run's
//! encoding) under each change and reports unchanged monitors.
//!
//! Write errors never interrupt a run: the first one is kept and surfaced by
//! [`Reporter::finish`].

use crate::{ApplyReport, MutationIntent, Operation, SyncOptions};
use dds_codec::{marshal_one, Format};
use dds_model::Monitor;
use std::io::{self, Write};

pub struct Reporter<W: Write> {
    out: W,
    format: Format,
    options: SyncOptions,
    error: Option<io::Error>,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: Format, options: SyncOptions) -> Self {
        Self {
            out,
            format,
            options,
            error: None,
        }
    }

    /// Announce an intent before it is executed.
    pub fn intent(&mut self, intent: &MutationIntent) {
        let verbose = self.options.verbose;
        match intent {
            MutationIntent::Noop { monitor } => {
                if verbose {
                    self.line(&format!("unchanged: {}", monitor.name));
                }
            }
            MutationIntent::Create { monitor } => {
                self.line(&format!("create: {}", monitor.name));
                if verbose {
                    self.document("after", &monitor.without_id());
                }
            }
            MutationIntent::Update {
                id,
                previous,
                monitor,
            } => {
                self.line(&format!("update: {}", monitor.name));
                if verbose {
                    self.document("before", previous);
                    let mut after = monitor.clone();
                    after.id = Some(*id);
                    self.document("after", &after);
                }
            }
            MutationIntent::Delete { monitor, .. } => {
                self.line(&format!("delete: {}", monitor.name));
                if verbose {
                    self.document("before", monitor);
                }
            }
        }
    }

    pub fn failure(&mut self, operation: Operation, name: &str, cause: &str) {
        self.line(&format!("error: {operation} {name}: {cause}"));
    }

    /// Closing count line. In dry-run nothing can have failed, so the failed
    /// column is omitted.
    pub fn summary(&mut self, report: &ApplyReport) {
        let c = report.counts();
        let line = if report.dry_run {
            format!(
                "dry run: {} create, {} update, {} delete, {} unchanged",
                c.create, c.update, c.delete, c.unchanged
            )
        } else {
            format!(
                "applied: {} create, {} update, {} delete, {} unchanged, {} failed",
                c.create, c.update, c.delete, c.unchanged, c.failed
            )
        };
        self.line(&line);
    }

    /// Flush and hand back the writer, or the first write error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn document(&mut self, label: &str, monitor: &Monitor) {
        let body = match marshal_one(monitor, self.format) {
            Ok(text) => text,
            Err(e) => format!("<unrenderable: {e}>"),
        };
        self.line(&format!("  {label}:"));
        for l in body.lines() {
            self.line(&format!("    {l}"));
        }
    }

    fn line(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{text}") {
            self.error = Some(e);
        }
    }
}
