//! The two-step delete workflow: a delete is requested, then confirmed or cancelled.

use crate::transaction_id::TransactionId;

/// Whether a delete is waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteConfirmation {
    /// Nothing is waiting to be deleted.
    #[default]
    Idle,
    /// The user asked to delete this transaction and has not answered yet.
    PendingDelete(TransactionId),
}

/// Tracks at most one pending delete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteConfirmationState {
    state: DeleteConfirmation,
}

impl DeleteConfirmationState {
    /// A state with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> &DeleteConfirmation {
        &self.state
    }

    /// The ID waiting for confirmation, if any.
    pub fn pending(&self) -> Option<&TransactionId> {
        match &self.state {
            DeleteConfirmation::Idle => None,
            DeleteConfirmation::PendingDelete(id) => Some(id),
        }
    }

    /// Ask the user to confirm deleting `id`.
    ///
    /// A delete that is already pending is replaced.
    pub fn request_delete(&mut self, id: TransactionId) {
        if let Some(previous) = self.pending() {
            tracing::debug!("Replacing pending delete of {previous} with {id}");
        }

        self.state = DeleteConfirmation::PendingDelete(id);
    }

    /// Accept the pending delete and return to idle.
    ///
    /// Returns the ID that should now be deleted, or `None` if nothing was pending.
    pub fn confirm(&mut self) -> Option<TransactionId> {
        match std::mem::take(&mut self.state) {
            DeleteConfirmation::Idle => None,
            DeleteConfirmation::PendingDelete(id) => Some(id),
        }
    }

    /// Drop the pending delete.
    ///
    /// Returns `false` if nothing was pending.
    pub fn cancel(&mut self) -> bool {
        self.confirm().is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::transaction_id::TransactionId;

    use super::{DeleteConfirmation, DeleteConfirmationState};

    #[test]
    fn request_then_confirm_yields_id() {
        let mut state = DeleteConfirmationState::new();
        let id = TransactionId::new("1");

        state.request_delete(id.clone());
        assert_eq!(state.state(), &DeleteConfirmation::PendingDelete(id.clone()));

        assert_eq!(state.confirm(), Some(id));
        assert_eq!(state.state(), &DeleteConfirmation::Idle);
    }

    #[test]
    fn request_then_cancel_returns_to_idle() {
        let mut state = DeleteConfirmationState::new();
        state.request_delete(TransactionId::new("1"));

        assert!(state.cancel());
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn confirm_and_cancel_are_no_ops_when_idle() {
        let mut state = DeleteConfirmationState::new();

        assert_eq!(state.confirm(), None);
        assert!(!state.cancel());
        assert_eq!(state, DeleteConfirmationState::new());
    }

    #[test]
    fn new_request_replaces_pending_delete() {
        let mut state = DeleteConfirmationState::new();
        state.request_delete(TransactionId::new("1"));

        state.request_delete(TransactionId::new("2"));

        assert_eq!(state.confirm(), Some(TransactionId::new("2")));
        assert_eq!(state.confirm(), None);
    }
}
