// ABOUTME: User-facing notification sink for long-running image operations.
// ABOUTME: Keys are stable per logical operation so later notices replace earlier ones.

use serde::Serialize;

/// Kind of a notice. A later notice with the same key replaces the earlier
/// one, so a `Loading` followed by a `Success` reads as one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Loading,
    Success,
    Error,
}

/// One user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Stable key of the logical operation, e.g. `delete:/uploads/a.jpg`.
    pub key: String,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn loading(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: NoticeKind::Loading,
            message: message.into(),
        }
    }

    pub fn success(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Sink accepting progress and result notices.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Output mode for console notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    #[default]
    Normal,
    /// Minimal output for CI (errors only)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Console implementation of the notification sink.
pub struct ConsoleSink {
    mode: OutputMode,
}

impl ConsoleSink {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl NotificationSink for ConsoleSink {
    fn notify(&self, notice: &Notice) {
        match self.mode {
            OutputMode::Normal => match notice.kind {
                NoticeKind::Loading => println!("  → {}", notice.message),
                NoticeKind::Success => println!("  ✓ {}", notice.message),
                NoticeKind::Error => eprintln!("  ✗ {}", notice.message),
            },
            OutputMode::Quiet => {
                if notice.kind == NoticeKind::Error {
                    eprintln!("Error: {}", notice.message);
                }
            }
            OutputMode::Json => {
                let event = JsonNotice {
                    event: notice.kind,
                    key: &notice.key,
                    message: &notice.message,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    match notice.kind {
                        NoticeKind::Error => eprintln!("{json}"),
                        _ => println!("{json}"),
                    }
                }
            }
        }
    }
}

#[derive(Serialize)]
struct JsonNotice<'a> {
    event: NoticeKind,
    key: &'a str,
    message: &'a str,
}
