use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::warn;

/// One record for the external log API.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub stack: String,
    pub level: String,
    pub package: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    fn new(level: &str, package: &str, message: String) -> Self {
        Self {
            stack: "backend".to_string(),
            level: level.to_string(),
            package: package.to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Handle for shipping log records to the external log API.
///
/// Sends are fire-and-forget: a full or closed channel drops the
/// record, and delivery failures never reach the request path.
#[derive(Clone)]
pub struct LogShipper {
    tx: mpsc::Sender<LogRecord>,
}

impl LogShipper {
    /// Build a shipper from `LOG_API_URL` and `LOG_API_TOKEN`.
    /// Returns `None` unless both are set.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("LOG_API_URL").ok()?;
        let token = std::env::var("LOG_API_TOKEN").ok()?;

        let (tx, rx) = mpsc::channel(1000);
        spawn_log_shipper(endpoint, token, rx);
        Some(Self { tx })
    }

    pub async fn info(&self, package: &str, message: impl Into<String>) {
        let _ = self.tx.send(LogRecord::new("info", package, message.into())).await;
    }

    pub async fn warn(&self, package: &str, message: impl Into<String>) {
        let _ = self.tx.send(LogRecord::new("warning", package, message.into())).await;
    }

    pub async fn error(&self, package: &str, message: impl Into<String>) {
        let _ = self.tx.send(LogRecord::new("error", package, message.into())).await;
    }
}

/// Drain records in the background, POSTing each one with a bearer
/// token. Rejected or undeliverable records are warned about locally
/// and dropped.
pub fn spawn_log_shipper(endpoint: String, token: String, mut rx: mpsc::Receiver<LogRecord>) {
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        while let Some(record) = rx.recv().await {
            match client
                .post(&endpoint)
                .bearer_auth(&token)
                .json(&record)
                .send()
                .await
            {
                Ok(response) if !response.status().is_success() => {
                    warn!(status = %response.status(), "Log API rejected record");
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(%e, "Failed to ship log record");
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_log_api_fields() {
        let record = LogRecord::new("error", "shorturls", "Missing 'url' field in request body.".to_string());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["stack"], "backend");
        assert_eq!(value["level"], "error");
        assert_eq!(value["package"], "shorturls");
        assert_eq!(value["message"], "Missing 'url' field in request body.");
        assert!(value["timestamp"].is_string());
    }
}
