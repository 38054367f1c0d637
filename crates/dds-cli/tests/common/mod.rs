#![allow(dead_code)]

use assert_cmd::Command;
use httpmock::MockServer;
use serde_json::{json, Value};

/// `datadog-sync` pointed at `server`, with keys in env and no ambient
/// Datadog settings leaking in from the test process.
pub fn datadog_sync(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("datadog-sync").unwrap();
    cmd.env("DATADOG_API_URL", server.base_url())
        .env("DATADOG_API_KEY", "test-api")
        .env("DATADOG_APP_KEY", "test-app")
        .env("RUST_LOG", "warn")
        .env_remove("DD_SITE")
        .env_remove("DATADOG_TIMEOUT_SECS")
        .env_remove("DATADOG_PAGE_SIZE");
    cmd
}

/// A monitor as the service returns it, read-only fields included.
pub fn remote_json(id: i64, name: &str, query: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "metric alert",
        "query": query,
        "message": "",
        "tags": [],
        "options": {},
        "overall_state": "OK",
        "creator": {"email": "ops@example.com"}
    })
}
