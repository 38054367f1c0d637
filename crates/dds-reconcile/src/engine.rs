use crate::index::{build_name_index, NameIndex};
use crate::{MutationIntent, PlanError, Side, SyncPlan};
use dds_model::{same_definition, Monitor};
use std::collections::{HashMap, HashSet};
use tracing::debug;

fn unique_index(monitors: &[Monitor], side: Side) -> Result<HashMap<&str, &Monitor>, PlanError> {
    match build_name_index(monitors) {
        NameIndex::Unique(map) => Ok(map),
        NameIndex::Conflict(names) => Err(PlanError::DuplicateNames { side, names }),
    }
}

/// Classify the full local set against the full remote set.
///
/// - local name absent remotely => `Create`
/// - same name, different definition => `Update` with the remote id
/// - same name, same definition => `Noop`
/// - remote name absent locally => `Delete`
///
/// Every input monitor lands in exactly one intent. Local-driven intents keep
/// local input order; deletions follow in remote input order.
///
/// Duplicate names on either side, or a remote monitor without an id, fail the
/// whole plan: no partial plan is ever returned.
pub fn plan(local: &[Monitor], remote: &[Monitor]) -> Result<SyncPlan, PlanError> {
    // Validate local first so the error points at what the user edited.
    unique_index(local, Side::Local)?;
    let remote_by_name = unique_index(remote, Side::Remote)?;

    if let Some(r) = remote.iter().find(|r| r.id.is_none()) {
        return Err(PlanError::MissingRemoteId {
            name: r.name.clone(),
        });
    }

    let mut intents: Vec<MutationIntent> = Vec::with_capacity(local.len() + remote.len());
    let mut matched: HashSet<&str> = HashSet::with_capacity(local.len());

    for l in local {
        let Some(&r) = remote_by_name.get(l.name.as_str()) else {
            intents.push(MutationIntent::Create { monitor: l.clone() });
            continue;
        };
        matched.insert(r.name.as_str());

        // Checked above: every remote monitor has an id.
        let Some(id) = r.id else { continue };

        if let Some(local_id) = l.id {
            if local_id != id {
                debug!(monitor = %l.name, %local_id, remote_id = %id, "local id differs; matching by name");
            }
        }

        if same_definition(l, r) {
            intents.push(MutationIntent::Noop {
                monitor: r.clone(),
            });
        } else {
            intents.push(MutationIntent::Update {
                id,
                previous: r.clone(),
                monitor: l.clone(),
            });
        }
    }

    for r in remote {
        if matched.contains(r.name.as_str()) {
            continue;
        }
        if let Some(id) = r.id {
            intents.push(MutationIntent::Delete {
                id,
                monitor: r.clone(),
            });
        }
    }

    Ok(SyncPlan::new(intents))
}
