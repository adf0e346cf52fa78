//! Defines the transaction store trait.

use async_trait::async_trait;

use crate::{
    Error,
    transaction::{CreateTransactionInput, Transaction, UpdateTransactionInput},
    transaction_id::TransactionId,
};

/// Handles the creation, retrieval, update and deletion of transactions in
/// the remote store.
///
/// Implementations hold no transaction state of their own: every call is a
/// round trip to the store.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Fetch every transaction, in the order the store keeps them.
    ///
    /// # Errors
    /// Returns [Error::Transport] if the store cannot be reached or fails.
    async fn list(&self) -> Result<Vec<Transaction>, Error>;

    /// Create a new transaction in the store.
    ///
    /// Returns the transaction with the ID and creation date set by the store.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if the store rejects `input`,
    /// - or [Error::Transport] for any other failure.
    async fn create(&self, input: &CreateTransactionInput) -> Result<Transaction, Error>;

    /// Overwrite the fields present in `input` on the transaction `id`.
    ///
    /// Returns the full transaction after the update.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction in the store,
    /// - [Error::Validation] if the store rejects `input`,
    /// - or [Error::Transport] for any other failure.
    async fn update(
        &self,
        id: &TransactionId,
        input: &UpdateTransactionInput,
    ) -> Result<Transaction, Error>;

    /// Delete the transaction `id`.
    ///
    /// Deleting is not idempotent: deleting the same ID twice fails the second time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction in the store,
    /// - or [Error::Transport] for any other failure.
    async fn delete(&self, id: &TransactionId) -> Result<(), Error>;
}
