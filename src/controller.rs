//! Keeps the local list of transactions in sync with the remote store and
//! drives the form and delete confirmation state machines from user intents.

use std::cell::{Ref, RefCell};

use crate::{
    Error,
    delete_confirmation::DeleteConfirmationState,
    form::{FormFields, FormModeState},
    stores::TransactionStore,
    transaction::{CreateTransactionInput, Transaction, UpdateTransactionInput},
    transaction_id::TransactionId,
};

#[derive(Debug, Default)]
struct ControllerState {
    transactions: Vec<Transaction>,
    form: FormModeState,
    delete_confirmation: DeleteConfirmationState,
}

/// Owns the ordered collection of transactions, the input form and the
/// delete confirmation, and reconciles them with the results of calls to `S`.
///
/// The collection is only changed after the store call for an intent has
/// succeeded, and only with what the store returned.
///
/// Intents take `&self` and run on a single thread. The internal state is
/// never borrowed across an `.await`, so several intents can be in flight at
/// once. Each one applies its result when its store call completes, so the
/// last call to complete wins.
#[derive(Debug)]
pub struct TransactionController<S> {
    store: S,
    state: RefCell<ControllerState>,
}

impl<S: TransactionStore> TransactionController<S> {
    /// Create a controller with an empty collection that uses `store` for all
    /// remote calls.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: RefCell::new(ControllerState::default()),
        }
    }

    /// The store this controller calls.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The transactions, in server order followed by creations in the order they completed.
    ///
    /// Drop the returned reference before calling another intent.
    pub fn transactions(&self) -> Ref<'_, [Transaction]> {
        Ref::map(self.state.borrow(), |state| state.transactions.as_slice())
    }

    /// A copy of the transaction with the given `id`, if it is in the collection.
    pub fn find(&self, id: &TransactionId) -> Option<Transaction> {
        self.state
            .borrow()
            .transactions
            .iter()
            .find(|transaction| &transaction.id == id)
            .cloned()
    }

    /// The input form.
    ///
    /// Drop the returned reference before calling another intent.
    pub fn form(&self) -> Ref<'_, FormModeState> {
        Ref::map(self.state.borrow(), |state| &state.form)
    }

    /// The ID of the transaction waiting for delete confirmation, if any.
    pub fn pending_delete(&self) -> Option<TransactionId> {
        self.state.borrow().delete_confirmation.pending().cloned()
    }

    /// Load the full list of transactions from the store.
    ///
    /// On success the collection is replaced, keeping the server's order.
    ///
    /// # Errors
    /// Returns the store's error, leaving the collection as it was (empty on
    /// the first load).
    pub async fn initialize(&self) -> Result<(), Error> {
        let transactions = self.store.list().await.inspect_err(|error| {
            tracing::error!("Could not load transactions: {error}");
        })?;

        tracing::debug!("Loaded {} transactions", transactions.len());
        self.state.borrow_mut().transactions = transactions;

        Ok(())
    }

    /// Create a transaction and append it to the end of the collection.
    ///
    /// The input is validated before anything is sent. On success the form
    /// goes back to create mode with default values.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if `input` fails the local checks, in which case the store is not called,
    /// - or the store's error if the create fails.
    ///
    /// On error the collection and the form are unchanged.
    pub async fn submit_create(&self, input: CreateTransactionInput) -> Result<Transaction, Error> {
        input.validate().inspect_err(|error| {
            tracing::debug!("Rejected transaction before sending: {error}");
        })?;

        let transaction = self.store.create(&input).await.inspect_err(|error| {
            tracing::error!("Could not create transaction: {error}");
        })?;

        tracing::debug!("Created transaction {}", transaction.id);
        let mut state = self.state.borrow_mut();
        state.transactions.push(transaction.clone());
        state.form.submit_succeeded();

        Ok(transaction)
    }

    /// Update the transaction `id`, which must be the one the form is editing.
    ///
    /// On success the entry with the same ID is replaced in place with the
    /// store's version and the form goes back to create mode.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotEditing] if the form is not editing `id`,
    /// - [Error::Validation] if a field in `input` fails the local checks,
    /// - or the store's error if the update fails, e.g. [Error::NotFound].
    ///
    /// The store is not called for the first two. On error the collection
    /// and the form are unchanged.
    pub async fn submit_update(
        &self,
        id: &TransactionId,
        input: UpdateTransactionInput,
    ) -> Result<Transaction, Error> {
        let is_editing_id = self
            .state
            .borrow()
            .form
            .editing()
            .is_some_and(|transaction| &transaction.id == id);
        if !is_editing_id {
            tracing::debug!("Ignoring update for transaction {id}, it is not being edited");
            return Err(Error::NotEditing(id.clone()));
        }

        input.validate().inspect_err(|error| {
            tracing::debug!("Rejected update of transaction {id} before sending: {error}");
        })?;

        let updated = self.store.update(id, &input).await.inspect_err(|error| {
            tracing::error!("Could not update transaction {id}: {error}");
        })?;

        let mut state = self.state.borrow_mut();
        match state
            .transactions
            .iter_mut()
            .find(|transaction| &transaction.id == id)
        {
            Some(entry) => {
                tracing::debug!("Updated transaction {id}");
                *entry = updated.clone();
            }
            // Another intent removed the entry while the update was in flight.
            None => tracing::warn!("Updated transaction {id} is no longer in the collection"),
        }
        state.form.submit_succeeded();

        Ok(updated)
    }

    /// Submit the form: update the transaction being edited, or create a new
    /// one from the field values in create mode.
    ///
    /// # Errors
    /// See [Self::submit_create] and [Self::submit_update].
    pub async fn submit_form(&self) -> Result<Transaction, Error> {
        let editing_id = self
            .state
            .borrow()
            .form
            .editing()
            .map(|transaction| transaction.id.clone());

        match editing_id {
            Some(id) => {
                let input = self.state.borrow().form.update_input();
                self.submit_update(&id, input).await
            }
            None => {
                let input = self.state.borrow().form.create_input();
                self.submit_create(input).await
            }
        }
    }

    /// Start editing `transaction` in the form.
    pub fn request_edit(&self, transaction: Transaction) {
        self.state.borrow_mut().form.start_edit(transaction);
    }

    /// Stop editing and discard unsaved values.
    ///
    /// An update that was already submitted still completes.
    pub fn cancel_edit(&self) {
        self.state.borrow_mut().form.cancel();
    }

    /// Change the form's field values without changing its mode.
    pub fn update_fields(&self, edit: impl FnOnce(&mut FormFields)) {
        edit(self.state.borrow_mut().form.fields_mut());
    }

    /// Ask for confirmation before deleting `id`. Nothing is sent yet.
    pub fn request_delete(&self, id: TransactionId) {
        self.state.borrow_mut().delete_confirmation.request_delete(id);
    }

    /// Drop the pending delete.
    ///
    /// Returns `false` if nothing was pending.
    pub fn cancel_delete(&self) -> bool {
        self.state.borrow_mut().delete_confirmation.cancel()
    }

    /// Delete the transaction that is pending confirmation.
    ///
    /// The confirmation goes back to idle before the store is called, whatever
    /// the outcome. On success exactly the matching entry is removed from the
    /// collection and its ID is returned. Returns `Ok(None)` without calling
    /// the store if nothing was pending.
    ///
    /// # Errors
    /// Returns the store's error, e.g. [Error::NotFound], leaving the
    /// collection unchanged. The user has to request the delete again.
    pub async fn confirm_delete(&self) -> Result<Option<TransactionId>, Error> {
        let pending = self.state.borrow_mut().delete_confirmation.confirm();
        let Some(id) = pending else {
            return Ok(None);
        };

        self.store.delete(&id).await.inspect_err(|error| {
            tracing::error!("Could not delete transaction {id}: {error}");
        })?;

        let mut state = self.state.borrow_mut();
        match state
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
        {
            Some(index) => {
                state.transactions.remove(index);
                tracing::debug!("Deleted transaction {id}");
            }
            None => tracing::warn!("Deleted transaction {id} was not in the collection"),
        }

        Ok(Some(id))
    }
}
