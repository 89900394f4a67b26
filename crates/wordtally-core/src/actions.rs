//! Clear and copy commands for the editor, and the notices they raise.
//!
//! The browser layer owns the textarea and the clipboard; this module only
//! decides what should happen and which message to show.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Operation completed
    Success,
    /// Operation failed
    Error,
    /// Operation refused
    Warning,
    /// Nothing to do
    #[default]
    Info,
}

impl NoticeKind {
    /// Background color as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Success => "#4caf50",
            Self::Error => "#f44336",
            Self::Warning => "#ff9800",
            Self::Info => "#2196f3",
        }
    }

    /// Font Awesome icon classes.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle",
            Self::Error => "fas fa-times-circle",
            Self::Warning => "fas fa-exclamation-triangle",
            Self::Info => "fas fa-info-circle",
        }
    }

    /// CSS class of the notification element.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notification notification-success",
            Self::Error => "notification notification-error",
            Self::Warning => "notification notification-warning",
            Self::Info => "notification notification-info",
        }
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity
    pub kind: NoticeKind,
    /// Text shown to the user
    pub message: String,
}

impl Notice {
    /// Create a notice.
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    /// Warning notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    /// Info notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    /// Raised after the editor was cleared.
    pub fn cleared() -> Self {
        Self::success("Text cleared successfully!")
    }

    /// Raised after the text reached the clipboard.
    pub fn copied() -> Self {
        Self::success("Text copied to clipboard!")
    }

    /// Raised when the clipboard write failed.
    pub fn copy_failed() -> Self {
        Self::error("Failed to copy text. Please try again.")
    }
}

/// Thresholds for the editor commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionPolicy {
    /// Ask before clearing text longer than this many UTF-16 code units
    pub confirm_clear_over: usize,
}

impl Default for ActionPolicy {
    fn default() -> Self {
        Self {
            confirm_clear_over: 100,
        }
    }
}

/// What to do when the user asks to clear the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearDecision {
    /// Clear right away
    Clear,
    /// Ask the user first; clear only if they accept
    NeedsConfirmation,
    /// Leave the editor alone and show the notice
    Rejected(Notice),
}

/// What to do when the user asks to copy the editor contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyDecision {
    /// Write the text to the clipboard
    Copy,
    /// Nothing worth copying; show the notice
    Rejected(Notice),
}

/// Decide how to handle a clear request for `text`.
#[must_use]
pub fn clear_request(text: &str, policy: &ActionPolicy) -> ClearDecision {
    if text.trim().is_empty() {
        return ClearDecision::Rejected(Notice::info("Text area is already empty!"));
    }
    if text.encode_utf16().count() > policy.confirm_clear_over {
        return ClearDecision::NeedsConfirmation;
    }
    ClearDecision::Clear
}

/// Decide how to handle a copy request for `text`.
#[must_use]
pub fn copy_request(text: &str) -> CopyDecision {
    if text.trim().is_empty() {
        CopyDecision::Rejected(Notice::warning("Nothing to copy!"))
    } else {
        CopyDecision::Copy
    }
}

/// Format a count with comma thousands separators.
#[must_use]
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
