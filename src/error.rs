//! Defines the app level error type and conversions to user-facing alerts.

use crate::{alert::Alert, transaction_id::TransactionId};

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The input failed a local check or was rejected by the remote store,
    /// e.g. a non-positive amount.
    ///
    /// The string is a human readable reason, suitable for showing to the user.
    #[error("invalid transaction: {0}")]
    Validation(String),

    /// The operation targeted a transaction that the remote store does not have.
    #[error("transaction {0} could not be found")]
    NotFound(TransactionId),

    /// The remote store could not be reached, responded with an unexpected
    /// status, or sent a response that could not be understood.
    ///
    /// The string should only be logged for debugging. It is not intended to
    /// be shown to the user as is.
    #[error("could not reach the transaction service: {0}")]
    Transport(String),

    /// An update was submitted for a transaction that the form is not editing.
    #[error("transaction {0} is not being edited")]
    NotEditing(TransactionId),
}

/// The user intent that produced an [Error].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Loading the transaction list.
    Load,
    /// Creating a transaction.
    Create,
    /// Updating a transaction.
    Update,
    /// Deleting a transaction.
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => "Could not load transactions",
            Operation::Create => "Could not create transaction",
            Operation::Update => "Could not update transaction",
            Operation::Delete => "Could not delete transaction",
        }
    }
}

impl Error {
    /// Describe this error as an alert for the user, given the `operation` that failed.
    pub fn to_alert(&self, operation: Operation) -> Alert {
        let message = operation.failure_message();

        match self {
            Error::Validation(reason) => Alert::error(message, reason),
            Error::NotFound(_) if operation == Operation::Delete => Alert::error(
                message,
                "The transaction could not be found. \
                Try refreshing the list to see if the transaction has already been deleted.",
            ),
            Error::NotFound(_) => Alert::error(message, "The transaction could not be found."),
            Error::NotEditing(_) => Alert::error(
                message,
                "Select the transaction to edit before saving your changes.",
            ),
            Error::Transport(error) => {
                tracing::debug!("Transport error shown to user as a generic alert: {error}");
                Alert::error(
                    message,
                    "The transaction service could not be reached. Try again later.",
                )
            }
        }
    }
}
