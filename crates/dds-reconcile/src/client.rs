//! Remote-service boundary consumed by the engine.
//!
//! The engine never talks HTTP itself. Concrete transports implement these
//! traits (`dds-client` for the real service; in-memory fakes in tests).

use dds_model::{Monitor, MonitorId};

/// Errors a remote-service implementation may return.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Network failure, timeout, TLS.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("api error status={status}: {message}")]
    Api { status: u16, message: String },

    /// A response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Read side: the full current remote set.
pub trait MonitorSource {
    fn list_monitors(&self) -> Result<Vec<Monitor>, ClientError>;
}

/// Write side: the three mutations the applier issues.
///
/// Implementations ignore `monitor.id` in request payloads; the target of an
/// update or delete is always the explicit `id` argument.
pub trait MonitorClient {
    /// Create and return the id the service assigned.
    fn create_monitor(&self, monitor: &Monitor) -> Result<MonitorId, ClientError>;
    fn update_monitor(&self, id: MonitorId, monitor: &Monitor) -> Result<(), ClientError>;
    fn delete_monitor(&self, id: MonitorId) -> Result<(), ClientError>;
}
