//! Best-effort log events.
//!
//! Logging must never block or fail the caller's primary action: the send
//! is dispatched to a background task and any failure is dropped after a
//! trace note. Nothing here is awaited by callers.

use crate::client::ApiClient;
use serde_json::{Map, Value};
use sheetlink_protocol::RequestBody;
use tracing::debug;

impl ApiClient {
    /// Dispatch a log event.
    ///
    /// Caller params are merged over the defaults (currently the
    /// configured user agent), caller keys winning. Must be called from
    /// within a tokio runtime.
    pub fn log(&self, event_type: impl Into<String>, params: Option<Map<String, Value>>) {
        let event_type = event_type.into();

        let mut merged = Map::new();
        if let Some(user_agent) = &self.config().user_agent {
            merged.insert("user_agent".to_string(), Value::from(user_agent.clone()));
        }
        if let Some(params) = params {
            merged.extend(params);
        }

        let client = self.clone();
        tokio::spawn(async move {
            let body = RequestBody::log(event_type.clone(), Value::Object(merged));
            if let Err(err) = client.send(body).await {
                debug!(error = %err, event = %event_type, "log event dropped");
            }
        });
    }
}
