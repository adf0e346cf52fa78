//! Keeps a local list of financial transactions in sync with a remote REST
//! store.
//!
//! [TransactionController] owns the ordered collection of transactions, the
//! input form and the delete confirmation. It turns user intents into calls to
//! a [TransactionStore] and only changes the collection after a call succeeds.
//! [HttpTransactionStore] is the store backed by the remote API.

#![warn(missing_docs)]

mod alert;
mod config;
mod controller;
mod delete_confirmation;
mod endpoints;
mod error;
mod form;
mod logging;
pub mod stores;
mod transaction;
mod transaction_id;

#[cfg(test)]
mod test_utils;

pub use alert::{Alert, AlertType};
pub use config::{Config, ConfigError, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use controller::TransactionController;
pub use delete_confirmation::{DeleteConfirmation, DeleteConfirmationState};
pub use error::{Error, Operation};
pub use form::{FormFields, FormMode, FormModeState};
pub use logging::{LOG_BODY_LENGTH_LIMIT, setup_logging};
pub use stores::{HttpTransactionStore, TransactionStore};
pub use transaction::{
    CreateTransactionInput, Transaction, TransactionType, UpdateTransactionInput,
};
pub use transaction_id::TransactionId;
