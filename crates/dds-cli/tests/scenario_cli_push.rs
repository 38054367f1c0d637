mod common;

use common::{datadog_sync, remote_json};
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;

const LOCAL_YAML: &str = "\
- name: cpu
  type: metric alert
  query: avg:cpu > 95
- name: web
  type: metric alert
  query: avg:web.errors > 5
";

fn remote_listing(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/monitor");
        then.status(200).json_body(json!([
            remote_json(1, "cpu", "avg:cpu > 90"),
            remote_json(2, "disk", "avg:disk > 80"),
        ]));
    })
}

#[test]
fn push_dry_run_reports_plan_without_mutating() {
    let server = MockServer::start();
    let list = remote_listing(&server);
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/v1/monitor");
        then.status(200).json_body(json!({"id": 99}));
    });
    let update = server.mock(|when, then| {
        when.method(PUT).path("/api/v1/monitor/1");
        then.status(200).json_body(json!({}));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/monitor/2");
        then.status(200).json_body(json!({}));
    });

    datadog_sync(&server)
        .args(["--mode", "push", "--dry-run"])
        .write_stdin(LOCAL_YAML)
        .assert()
        .success()
        .stdout(
            "update: cpu\n\
             create: web\n\
             delete: disk\n\
             dry run: 1 create, 1 update, 1 delete, 0 unchanged\n",
        );

    list.assert();
    create.assert_hits(0);
    update.assert_hits(0);
    delete.assert_hits(0);
}

#[test]
fn push_applies_creates_updates_then_deletes() {
    let server = MockServer::start();
    remote_listing(&server);
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/monitor")
            .json_body(json!({
                "name": "web",
                "type": "metric alert",
                "query": "avg:web.errors > 5",
                "message": "",
                "tags": [],
                "priority": null,
                "options": {}
            }));
        then.status(200).json_body(json!({"id": 99, "name": "web"}));
    });
    let update = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/v1/monitor/1")
            .json_body(json!({
                "name": "cpu",
                "type": "metric alert",
                "query": "avg:cpu > 95",
                "message": "",
                "tags": [],
                "priority": null,
                "options": {}
            }));
        then.status(200).json_body(json!({"id": 1}));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/monitor/2");
        then.status(200).json_body(json!({"deleted_monitor_id": 2}));
    });

    datadog_sync(&server)
        .args(["--mode", "push"])
        .write_stdin(LOCAL_YAML)
        .assert()
        .success()
        .stdout(
            "update: cpu\n\
             create: web\n\
             delete: disk\n\
             applied: 1 create, 1 update, 1 delete, 0 unchanged, 0 failed\n",
        );

    create.assert();
    update.assert();
    delete.assert();
}

#[test]
fn push_reads_json_input_file_and_scopes_with_filter() -> anyhow::Result<()> {
    let server = MockServer::start();
    remote_listing(&server);
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/monitor/2");
        then.status(200).json_body(json!({}));
    });

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("monitors.json");
    std::fs::write(
        &path,
        r#"[{"name": "cpu", "type": "metric alert", "query": "avg:cpu > 90", "message": ""}]"#,
    )?;

    // Only `cpu` is in scope, so `disk` is not deleted even though it is
    // missing from the file.
    datadog_sync(&server)
        .args(["--mode", "push", "--format", "json", "--only", "^cpu$", "--verbose", "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout(
            "unchanged: cpu\n\
             applied: 0 create, 0 update, 0 delete, 1 unchanged, 0 failed\n",
        );

    delete.assert_hits(0);
    Ok(())
}

#[test]
fn push_partial_failure_runs_everything_then_exits_non_zero() {
    let server = MockServer::start();
    remote_listing(&server);
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/v1/monitor");
        then.status(400).json_body(json!({"errors": ["bad query"]}));
    });
    let update = server.mock(|when, then| {
        when.method(PUT).path("/api/v1/monitor/1");
        then.status(200).json_body(json!({}));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/monitor/2");
        then.status(200).json_body(json!({}));
    });

    datadog_sync(&server)
        .args(["--mode", "push"])
        .write_stdin(LOCAL_YAML)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "error: create web: api error status=400: bad query",
        ))
        .stdout(predicate::str::contains(
            "applied: 0 create, 1 update, 1 delete, 0 unchanged, 1 failed",
        ))
        .stderr(predicate::str::contains("could not sync monitors"))
        .stderr(predicate::str::contains("1 monitor change(s) failed, 2 succeeded"));

    create.assert();
    update.assert();
    delete.assert();
}

#[test]
fn push_with_duplicate_local_names_changes_nothing() {
    let server = MockServer::start();
    remote_listing(&server);
    let delete = server.mock(|when, then| {
        when.method(DELETE).path_contains("/api/v1/monitor/");
        then.status(200).json_body(json!({}));
    });

    datadog_sync(&server)
        .args(["--mode", "push"])
        .write_stdin(
            "- name: cpu\n  type: metric alert\n  query: a\n\
             - name: cpu\n  type: metric alert\n  query: b\n",
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate monitor name(s) in local set: cpu"));

    delete.assert_hits(0);
}

#[test]
fn push_with_malformed_document_never_contacts_the_service() {
    let server = MockServer::start();
    let list = remote_listing(&server);

    datadog_sync(&server)
        .args(["--mode", "push", "--format", "json"])
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not deserialize monitors"));

    list.assert_hits(0);
}
