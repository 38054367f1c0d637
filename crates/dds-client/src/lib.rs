//! dds-client
//!
//! Blocking HTTP adapter for the Datadog monitor API (v1).
//!
//! | Operation | Request                          |
//! |-----------|----------------------------------|
//! | list      | `GET /api/v1/monitor?page=N&page_size=P` |
//! | create    | `POST /api/v1/monitor`           |
//! | update    | `PUT /api/v1/monitor/{id}`       |
//! | delete    | `DELETE /api/v1/monitor/{id}`    |
//!
//! Keys are sent as `DD-API-KEY` / `DD-APPLICATION-KEY` headers and are never
//! logged.

use dds_config::{ClientSettings, Credentials};
use dds_model::{Definition, Monitor, MonitorId};
use dds_reconcile::{ClientError, MonitorClient, MonitorSource};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

const MONITOR_PATH: &str = "/api/v1/monitor";

pub struct DatadogClient {
    http: Client,
    base_url: String,
    page_size: u32,
    credentials: Credentials,
}

impl std::fmt::Debug for DatadogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatadogClient")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl DatadogClient {
    pub fn new(settings: &ClientSettings, credentials: Credentials) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("datadog-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(format!("http client build failed: {e}")))?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            page_size: settings.page_size.max(1),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, MONITOR_PATH)
    }

    fn item_url(&self, id: MonitorId) -> String {
        format!("{}{}/{}", self.base_url, MONITOR_PATH, id)
    }

    fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = req
            .header("DD-API-KEY", &self.credentials.api_key)
            .header("DD-APPLICATION-KEY", &self.credentials.app_key)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            message: api_error_message(&body, status.canonical_reason()),
        })
    }

    fn list_page(&self, page: u32) -> Result<Vec<Monitor>, ClientError> {
        debug!(page, page_size = self.page_size, "listing monitors");
        let page_s = page.to_string();
        let size_s = self.page_size.to_string();
        let resp = self.send(
            self.http
                .get(self.collection_url())
                .query(&[("page", page_s.as_str()), ("page_size", size_s.as_str())]),
        )?;
        resp.json::<Vec<Monitor>>()
            .map_err(|e| ClientError::Decode(format!("monitor list: {e}")))
    }
}

/// Request body for create/update. The target id travels in the URL only.
///
/// Unlike the document encoding, every field is always sent: the service
/// treats `PUT` as a partial edit, so an omitted `tags`, `priority` or
/// `options` would leave the remote value in place instead of clearing it.
#[derive(Serialize)]
struct MonitorPayload<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    query: &'a str,
    message: &'a str,
    tags: &'a [String],
    priority: Option<i64>,
    options: &'a Map<String, Value>,
}

impl<'a> From<&'a Monitor> for MonitorPayload<'a> {
    fn from(m: &'a Monitor) -> Self {
        let d: &'a Definition = &m.definition;
        Self {
            name: &m.name,
            kind: &d.kind,
            query: &d.query,
            message: &d.message,
            tags: &d.tags,
            priority: d.priority,
            options: &d.options,
        }
    }
}

#[derive(Deserialize)]
struct CreatedMonitor {
    id: Option<MonitorId>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// Human-readable message from an error body. The service usually answers
/// `{"errors": ["..."]}`; anything else is passed through trimmed.
fn api_error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if !parsed.errors.is_empty() {
            return parsed.errors.join("; ");
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    reason.unwrap_or("unknown error").to_string()
}

impl MonitorSource for DatadogClient {
    /// Walks pages until one comes back short.
    fn list_monitors(&self) -> Result<Vec<Monitor>, ClientError> {
        let mut out: Vec<Monitor> = Vec::new();
        let mut page: u32 = 0;
        loop {
            let batch = self.list_page(page)?;
            let short = batch.len() < self.page_size as usize;
            out.extend(batch);
            if short {
                break;
            }
            page += 1;
        }
        debug!(count = out.len(), "listed monitors");
        Ok(out)
    }
}

impl MonitorClient for DatadogClient {
    fn create_monitor(&self, monitor: &Monitor) -> Result<MonitorId, ClientError> {
        let resp = self.send(
            self.http
                .post(self.collection_url())
                .json(&MonitorPayload::from(monitor)),
        )?;
        let created: CreatedMonitor = resp
            .json()
            .map_err(|e| ClientError::Decode(format!("create response: {e}")))?;
        created
            .id
            .ok_or_else(|| ClientError::Decode("create response carried no id".to_string()))
    }

    fn update_monitor(&self, id: MonitorId, monitor: &Monitor) -> Result<(), ClientError> {
        self.send(
            self.http
                .put(self.item_url(id))
                .json(&MonitorPayload::from(monitor)),
        )?;
        Ok(())
    }

    fn delete_monitor(&self, id: MonitorId) -> Result<(), ClientError> {
        self.send(self.http.delete(self.item_url(id)))?;
        Ok(())
    }
}
