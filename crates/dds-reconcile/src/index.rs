//! Name index over a monitor set.
//!
//! Names are the matching key, so a set with repeated names cannot be
//! reconciled unambiguously. Index construction reports that as a
//! [`NameIndex::Conflict`] instead of letting one entry silently win.

use dds_model::Monitor;
use std::collections::{HashMap, HashSet};

#[derive(Debug)]
pub enum NameIndex<'a> {
    /// Every name occurs once.
    Unique(HashMap<&'a str, &'a Monitor>),
    /// Names occurring more than once, each listed once, in first-seen order.
    Conflict(Vec<String>),
}

impl<'a> NameIndex<'a> {
    pub fn is_unique(&self) -> bool {
        matches!(self, NameIndex::Unique(_))
    }
}

pub fn build_name_index(monitors: &[Monitor]) -> NameIndex<'_> {
    let mut map: HashMap<&str, &Monitor> = HashMap::with_capacity(monitors.len());
    let mut reported: HashSet<&str> = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();

    for m in monitors {
        let name = m.name.as_str();
        if map.insert(name, m).is_some() && reported.insert(name) {
            duplicates.push(name.to_string());
        }
    }

    if duplicates.is_empty() {
        NameIndex::Unique(map)
    } else {
        NameIndex::Conflict(duplicates)
    }
}
