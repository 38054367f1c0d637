use crate::{
    plan, ClientError, MonitorClient, MutationIntent, Operation, PlanError, Reporter, SyncPlan,
};
use dds_model::{Monitor, MonitorId};
use std::fmt;
use std::io::Write;
use tracing::{debug, error, info};

/// Behaviour switches for one run. Constructed once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Report intents without issuing any remote mutation.
    pub dry_run: bool,
    /// Include full monitor content in the report.
    pub verbose: bool,
}

/// What happened to a single intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Remote call succeeded. `id` is the id created, updated or deleted.
    Applied { id: MonitorId },
    /// Dry-run: the call was not issued.
    Planned,
    /// Noop intent: nothing to do.
    Unchanged,
    /// Remote call failed; later intents were still attempted.
    Failed { cause: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentOutcome {
    pub operation: Operation,
    pub name: String,
    pub outcome: Outcome,
}

impl IntentOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    /// Applied, or planned in dry-run.
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// One outcome per intent, in plan order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub dry_run: bool,
    pub outcomes: Vec<IntentOutcome>,
}

impl ApplyReport {
    pub fn failures(&self) -> impl Iterator<Item = &IntentOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn counts(&self) -> OutcomeCounts {
        let mut c = OutcomeCounts::default();
        for o in &self.outcomes {
            match (&o.outcome, o.operation) {
                (Outcome::Failed { .. }, _) => c.failed += 1,
                (Outcome::Unchanged, _) | (_, Operation::Noop) => c.unchanged += 1,
                (_, Operation::Create) => c.create += 1,
                (_, Operation::Update) => c.update += 1,
                (_, Operation::Delete) => c.delete += 1,
            }
        }
        c
    }

    /// `Err` when at least one intent failed.
    pub fn into_result(self) -> Result<ApplyReport, SyncFailure> {
        if !self.has_failures() {
            return Ok(self);
        }
        let succeeded = self
            .outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Applied { .. }))
            .count();
        let failed = self
            .outcomes
            .into_iter()
            .filter_map(|o| match o.outcome {
                Outcome::Failed { cause } => Some(FailedIntent {
                    operation: o.operation,
                    name: o.name,
                    cause,
                }),
                _ => None,
            })
            .collect();
        Err(SyncFailure { succeeded, failed })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedIntent {
    pub operation: Operation,
    pub name: String,
    pub cause: String,
}

impl fmt::Display for FailedIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.operation, self.name, self.cause)
    }
}

/// Aggregate per-intent failure. Successful mutations are not rolled back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncFailure {
    /// Remote mutations that went through.
    pub succeeded: usize,
    pub failed: Vec<FailedIntent>,
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} monitor change(s) failed, {} succeeded",
            self.failed.len(),
            self.succeeded
        )?;
        for (i, fi) in self.failed.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{fi}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SyncFailure {}

/// Either the plan could not be computed (nothing applied) or some intents
/// failed while applying.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Apply(#[from] SyncFailure),
}

fn settle<W: Write>(
    result: Result<MonitorId, ClientError>,
    operation: Operation,
    name: &str,
    reporter: &mut Reporter<W>,
) -> Outcome {
    match result {
        Ok(id) => {
            info!(op = %operation, monitor = name, %id, "monitor change applied");
            Outcome::Applied { id }
        }
        Err(e) => {
            let cause = e.to_string();
            error!(op = %operation, monitor = name, error = %cause, "monitor change failed");
            reporter.failure(operation, name, &cause);
            Outcome::Failed { cause }
        }
    }
}

/// Run every intent of `plan` in order.
///
/// Sequential and run-to-completion: a failed intent is logged and reported,
/// then the next intent is attempted. In dry-run no client method is called.
pub fn apply<C, W>(
    plan: &SyncPlan,
    client: &C,
    options: SyncOptions,
    reporter: &mut Reporter<W>,
) -> ApplyReport
where
    C: MonitorClient + ?Sized,
    W: Write,
{
    let mut outcomes: Vec<IntentOutcome> = Vec::with_capacity(plan.len());

    for intent in plan {
        reporter.intent(intent);

        let operation = intent.operation();
        let name = intent.name();

        if !intent.is_noop() && !options.dry_run {
            debug!(op = %operation, monitor = name, "issuing remote call");
        }

        let outcome = match intent {
            MutationIntent::Noop { .. } => Outcome::Unchanged,
            _ if options.dry_run => Outcome::Planned,
            MutationIntent::Create { monitor } => {
                settle(client.create_monitor(monitor), operation, name, reporter)
            }
            MutationIntent::Update { id, monitor, .. } => settle(
                client.update_monitor(*id, monitor).map(|()| *id),
                operation,
                name,
                reporter,
            ),
            MutationIntent::Delete { id, .. } => settle(
                client.delete_monitor(*id).map(|()| *id),
                operation,
                name,
                reporter,
            ),
        };

        outcomes.push(IntentOutcome {
            operation,
            name: name.to_string(),
            outcome,
        });
    }

    let report = ApplyReport {
        dry_run: options.dry_run,
        outcomes,
    };
    reporter.summary(&report);
    report
}

/// Plan and apply in one step.
pub fn sync<C, W>(
    local: &[Monitor],
    remote: &[Monitor],
    client: &C,
    options: SyncOptions,
    reporter: &mut Reporter<W>,
) -> Result<ApplyReport, SyncError>
where
    C: MonitorClient + ?Sized,
    W: Write,
{
    let plan = plan(local, remote)?;
    let counts = plan.counts();
    info!(
        create = counts.create,
        update = counts.update,
        delete = counts.delete,
        unchanged = counts.noop,
        dry_run = options.dry_run,
        "sync plan computed"
    );
    Ok(apply(&plan, client, options, reporter).into_result()?)
}
