//! Alert messages for displaying the outcome of an operation to users.
//!
//! The controller never presents anything itself. The UI layer receives an
//! [Alert] and decides how to show it (a toast, a modal, a line on stderr).

use std::fmt::{self, Display};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Error,
}

/// A user-visible message with a short headline and optional details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Whether this alert reports a success or a failure.
    pub alert_type: AlertType,
    /// The headline, e.g. "Could not delete transaction".
    pub message: String,
    /// Extra context or a suggested fix. May be empty.
    pub details: String,
}

impl Alert {
    /// Create a new success alert
    pub fn success(message: &str, details: &str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert without details
    pub fn error_simple(message: &str) -> Self {
        Self::error(message, "")
    }
}

impl Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.details.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.message, self.details)
        }
    }
}
