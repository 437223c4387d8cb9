use chrono::{DateTime, Utc};
use ratatui::style::Color;

/// The controller's phase. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Creating,
    Polling,
    Downloading,
    Completed,
    Failed,
}

impl SessionPhase {
    /// A job is in flight; new submissions are rejected.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Creating | Self::Polling | Self::Downloading)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Idle, Completed and Failed all accept a fresh prompt.
    pub fn accepts_submission(&self) -> bool {
        !self.is_busy()
    }

    pub fn icon(&self) -> &str {
        match self {
            Self::Idle => "·",
            Self::Creating => "📤",
            Self::Polling => "⏳",
            Self::Downloading => "📥",
            Self::Completed => "✅",
            Self::Failed => "❌",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Idle => Color::Gray,
            Self::Creating => Color::LightBlue,
            Self::Polling => Color::Yellow,
            Self::Downloading => Color::LightCyan,
            Self::Completed => Color::Green,
            Self::Failed => Color::Red,
        }
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// The remote generation task, as last observed.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: String,
    pub remote_status: String,
    pub artifact_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            remote_status: "queued".to_string(),
            artifact_url: None,
            created_at: Utc::now(),
        }
    }
}

/// What the presenter sees after every transition. Never a partial state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub message: String,
    pub last_error: Option<String>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            message: "Ready".to_string(),
            last_error: None,
        }
    }
}
