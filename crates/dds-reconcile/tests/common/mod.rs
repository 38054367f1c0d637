//! In-memory stand-in for the remote monitor service.

#![allow(dead_code)]

use dds_model::{Definition, Monitor, MonitorId};
use dds_reconcile::{ClientError, MonitorClient, MonitorSource};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

pub struct InMemoryRemote {
    monitors: RefCell<Vec<Monitor>>,
    next_id: Cell<i64>,
    calls: RefCell<Vec<String>>,
    /// Mutations touching these names are rejected with a 400.
    reject: HashSet<String>,
}

impl InMemoryRemote {
    pub fn new(monitors: Vec<Monitor>) -> Self {
        let next = monitors
            .iter()
            .filter_map(|m| m.id.map(|id| id.0))
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            monitors: RefCell::new(monitors),
            next_id: Cell::new(next),
            calls: RefCell::new(Vec::new()),
            reject: HashSet::new(),
        }
    }

    pub fn rejecting(mut self, names: &[&str]) -> Self {
        self.reject = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn snapshot(&self) -> Vec<Monitor> {
        self.monitors.borrow().clone()
    }

    /// Calls in order, e.g. `create cpu`, `update 1`, `delete 2`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn check(&self, name: &str) -> Result<(), ClientError> {
        if self.reject.contains(name) {
            return Err(ClientError::Api {
                status: 400,
                message: format!("rejected {name}"),
            });
        }
        Ok(())
    }
}

impl MonitorSource for InMemoryRemote {
    fn list_monitors(&self) -> Result<Vec<Monitor>, ClientError> {
        Ok(self.snapshot())
    }
}

impl MonitorClient for InMemoryRemote {
    fn create_monitor(&self, monitor: &Monitor) -> Result<MonitorId, ClientError> {
        self.calls.borrow_mut().push(format!("create {}", monitor.name));
        self.check(&monitor.name)?;
        let id = MonitorId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.monitors
            .borrow_mut()
            .push(monitor.without_id().with_id(id));
        Ok(id)
    }

    fn update_monitor(&self, id: MonitorId, monitor: &Monitor) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(format!("update {id}"));
        self.check(&monitor.name)?;
        let mut ms = self.monitors.borrow_mut();
        let Some(slot) = ms.iter_mut().find(|m| m.id == Some(id)) else {
            return Err(ClientError::Api {
                status: 404,
                message: "monitor not found".to_string(),
            });
        };
        *slot = monitor.without_id().with_id(id);
        Ok(())
    }

    fn delete_monitor(&self, id: MonitorId) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(format!("delete {id}"));
        let mut ms = self.monitors.borrow_mut();
        let Some(pos) = ms.iter().position(|m| m.id == Some(id)) else {
            return Err(ClientError::Api {
                status: 404,
                message: "monitor not found".to_string(),
            });
        };
        self.check(&ms[pos].name)?;
        ms.remove(pos);
        Ok(())
    }
}

pub fn local(name: &str, query: &str) -> Monitor {
    Monitor::new(name, Definition::new("metric alert", query))
}

pub fn remote(id: i64, name: &str, query: &str) -> Monitor {
    local(name, query).with_id(id)
}
