use dds_model::{Monitor, MonitorId};
use std::fmt;

/// Kind of change an intent represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Noop,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Noop => "unchanged",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pending action produced by the matcher and consumed by the applier.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationIntent {
    /// Local monitor with no remote counterpart.
    Create { monitor: Monitor },

    /// Same name on both sides, different definition. `id` is the remote id;
    /// `previous` is the remote monitor as currently stored.
    Update {
        id: MonitorId,
        previous: Monitor,
        monitor: Monitor,
    },

    /// Remote monitor with no local counterpart.
    Delete { id: MonitorId, monitor: Monitor },

    /// Same name, same definition. Carries the remote monitor.
    Noop { monitor: Monitor },
}

impl MutationIntent {
    pub fn operation(&self) -> Operation {
        match self {
            MutationIntent::Create { .. } => Operation::Create,
            MutationIntent::Update { .. } => Operation::Update,
            MutationIntent::Delete { .. } => Operation::Delete,
            MutationIntent::Noop { .. } => Operation::Noop,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MutationIntent::Create { monitor }
            | MutationIntent::Update { monitor, .. }
            | MutationIntent::Delete { monitor, .. }
            | MutationIntent::Noop { monitor } => &monitor.name,
        }
    }

    /// Remote id the intent targets. `None` only for `Create`.
    pub fn remote_id(&self) -> Option<MonitorId> {
        match self {
            MutationIntent::Create { .. } => None,
            MutationIntent::Update { id, .. } | MutationIntent::Delete { id, .. } => Some(*id),
            MutationIntent::Noop { monitor } => monitor.id,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, MutationIntent::Noop { .. })
    }
}

/// Intent counts per operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanCounts {
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub noop: usize,
}

/// Ordered set of intents for one run.
///
/// Deletions always come after every create/update/noop. The constructor
/// enforces this with a stable partition, so relative order within each
/// group is preserved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncPlan {
    intents: Vec<MutationIntent>,
}

impl SyncPlan {
    pub fn new(intents: Vec<MutationIntent>) -> Self {
        let (mut head, deletes): (Vec<_>, Vec<_>) = intents
            .into_iter()
            .partition(|i| i.operation() != Operation::Delete);
        head.extend(deletes);
        Self { intents: head }
    }

    pub fn intents(&self) -> &[MutationIntent] {
        &self.intents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MutationIntent> {
        self.intents.iter()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// `true` when applying the plan would not touch the remote set.
    pub fn is_noop(&self) -> bool {
        self.intents.iter().all(MutationIntent::is_noop)
    }

    pub fn counts(&self) -> PlanCounts {
        let mut c = PlanCounts::default();
        for i in &self.intents {
            match i.operation() {
                Operation::Create => c.create += 1,
                Operation::Update => c.update += 1,
                Operation::Delete => c.delete += 1,
                Operation::Noop => c.noop += 1,
            }
        }
        c
    }
}

impl<'a> IntoIterator for &'a SyncPlan {
    type Item = &'a MutationIntent;
    type IntoIter = std::slice::Iter<'a, MutationIntent>;

    fn into_iter(self) -> Self::IntoIter {
        self.intents.iter()
    }
}

/// Which input set an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Local,
    Remote,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Local => f.write_str("local"),
            Side::Remote => f.write_str("remote"),
        }
    }
}

/// Reasons no plan can be computed. Nothing is applied when planning fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("duplicate monitor name(s) in {side} set: {}", .names.join(", "))]
    DuplicateNames { side: Side, names: Vec<String> },

    #[error("remote monitor '{name}' has no id")]
    MissingRemoteId { name: String },
}
