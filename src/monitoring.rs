use chrono::Local;
use colored::*;
use tokio::sync::mpsc;
use tracing::info;

#[derive(Debug, Clone)]
pub enum LogMessage {
    UserEchoed {
        payload: String,
    },
    LinkCreated {
        shortcode: String,
        long_url: String,
    },
    LinkVisited {
        shortcode: String,
        long_url: String,
    },
    LinkExpired {
        shortcode: String,
    },
    LinkMissing {
        shortcode: String,
    },
    Error {
        message: String,
    },
}

#[derive(Clone)]
pub struct MonitoringLayer {
    tx: mpsc::Sender<LogMessage>,
}

impl MonitoringLayer {
    pub fn new(tx: mpsc::Sender<LogMessage>) -> Self {
        Self { tx }
    }

    pub async fn log_user_echoed(&self, payload: &serde_json::Value) {
        let payload_json = serde_json::to_string(payload).unwrap_or_default();
        let _ = self
            .tx
            .send(LogMessage::UserEchoed {
                payload: payload_json,
            })
            .await;
    }

    pub async fn log_link_created(&self, shortcode: &str, long_url: &str) {
        let _ = self
            .tx
            .send(LogMessage::LinkCreated {
                shortcode: shortcode.to_string(),
                long_url: long_url.to_string(),
            })
            .await;
    }

    pub async fn log_link_visited(&self, shortcode: &str, long_url: &str) {
        let _ = self
            .tx
            .send(LogMessage::LinkVisited {
                shortcode: shortcode.to_string(),
                long_url: long_url.to_string(),
            })
            .await;
    }

    pub async fn log_link_expired(&self, shortcode: &str) {
        let _ = self
            .tx
            .send(LogMessage::LinkExpired {
                shortcode: shortcode.to_string(),
            })
            .await;
    }

    pub async fn log_link_missing(&self, shortcode: &str) {
        let _ = self
            .tx
            .send(LogMessage::LinkMissing {
                shortcode: shortcode.to_string(),
            })
            .await;
    }

    pub async fn log_error(&self, message: String) {
        let _ = self.tx.send(LogMessage::Error { message }).await;
    }
}

pub async fn spawn_monitoring_display(mut rx: mpsc::Receiver<LogMessage>) {
    tokio::spawn(async move {
        info!("");
        info!("{}", "📋 Activity Log:".bold());
        info!("{}", "─".repeat(80).dimmed());

        while let Some(log) = rx.recv().await {
            let timestamp = Local::now().format("%H:%M:%S%.3f");

            match log {
                LogMessage::UserEchoed { payload } => {
                    info!(
                        "{} {} User created, payload echoed: {}",
                        timestamp.to_string().dimmed(),
                        "↑".green(),
                        payload.white().bold()
                    );
                }
                LogMessage::LinkCreated { shortcode, long_url } => {
                    info!(
                        "{} {} Short link created: {} for {}",
                        timestamp.to_string().dimmed(),
                        "→".green().bold(),
                        shortcode.yellow(),
                        long_url
                    );
                }
                LogMessage::LinkVisited { shortcode, long_url } => {
                    info!(
                        "{} {} Redirecting {} to {}",
                        timestamp.to_string().dimmed(),
                        "↓".blue(),
                        shortcode.yellow(),
                        long_url.cyan()
                    );
                }
                LogMessage::LinkExpired { shortcode } => {
                    println!(
                        "{} ⚠️ Expired shortcode accessed: {}",
                        timestamp.to_string().dimmed(),
                        shortcode.red().bold()
                    );
                }
                LogMessage::LinkMissing { shortcode } => {
                    println!(
                        "{} ❌ Shortcode not found: {}",
                        timestamp.to_string().dimmed(),
                        shortcode.red()
                    );
                }
                LogMessage::Error { message } => {
                    println!(
                        "{} ❌ Error: {}",
                        timestamp.to_string().dimmed(),
                        message.red()
                    );
                }
            }
        }
    });
}
