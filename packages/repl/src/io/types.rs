//! Values passed across the [`IoHost`](super::IoHost) boundary.

use serde::{Deserialize, Serialize};

/// A line typed by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputLine {
    pub line: String,
}

/// A control signal from the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "lowercase")]
pub enum Signal {
    /// Ctrl+C.
    Interrupt,
    /// Ctrl+D.
    Eof,
}

/// Text to show, with a rendering hint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub text: String,
    #[serde(default)]
    pub style: OutputStyle,
}

impl Output {
    pub fn normal(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Normal)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Error)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Info)
    }

    pub fn banner(text: impl Into<String>) -> Self {
        Self::styled(text, OutputStyle::Banner)
    }

    fn styled(text: impl Into<String>, style: OutputStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// How a host should present an [`Output`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Printed as is (may already carry ANSI codes).
    #[default]
    Normal,
    /// Failure; hosts prefix it with a red `Error:`.
    Error,
    /// Status notes such as warnings about storage.
    Info,
    /// Startup text.
    Banner,
}

/// What the prompt should show before the next line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Number of books in the library.
    pub book_count: usize,
    /// Whether the intake form is open.
    pub form_open: bool,
    /// Whether changes are being saved to storage.
    pub storage_available: bool,
}

/// Why the REPL loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// `exit` or `quit`.
    UserExit,
    /// Ctrl+D.
    Eof,
}
