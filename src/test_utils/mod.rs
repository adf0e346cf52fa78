#![allow(missing_docs)]

//! An in-memory stand-in for the remote store.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use time::{Date, macros::date};
use tokio::sync::Notify;

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{CreateTransactionInput, Transaction, TransactionType, UpdateTransactionInput},
    transaction_id::TransactionId,
};

/// The date the fake store assigns when a create input has none.
pub(crate) const FAKE_CREATED_AT: Date = date!(2024 - 01 - 01);

/// A call the controller made to the store.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StoreCall {
    List,
    Create(CreateTransactionInput),
    Update(TransactionId, UpdateTransactionInput),
    Delete(TransactionId),
}

#[derive(Debug, Default)]
struct FakeRemote {
    transactions: Vec<Transaction>,
    next_id: usize,
    calls: Vec<StoreCall>,
    failures: VecDeque<Error>,
}

/// A [TransactionStore] that keeps transactions in memory and records every call.
///
/// Clones share the same data, so a test can keep one handle and give another
/// to the controller.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransactionStore {
    remote: Arc<Mutex<FakeRemote>>,
    update_gates: Arc<Gates>,
    delete_gates: Arc<Gates>,
}

impl FakeTransactionStore {
    pub(crate) fn with_transactions(transactions: Vec<Transaction>) -> Self {
        let store = Self::default();
        {
            let mut remote = store.remote.lock().unwrap();
            remote.next_id = transactions.len() + 1;
            remote.transactions = transactions;
        }
        store
    }

    /// Make the next call fail with `error` without touching the stored data.
    pub(crate) fn fail_next(&self, error: Error) {
        self.remote.lock().unwrap().failures.push_back(error);
    }

    /// Hold the responses to updates of `id` until the returned [Notify] is
    /// notified. The update itself is applied straight away.
    pub(crate) fn gate_update(&self, id: &TransactionId) -> Arc<Notify> {
        gate(&self.update_gates, id)
    }

    /// Hold deletes of `id` until the returned [Notify] is notified.
    pub(crate) fn gate_delete(&self, id: &TransactionId) -> Arc<Notify> {
        gate(&self.delete_gates, id)
    }

    pub(crate) fn calls(&self) -> Vec<StoreCall> {
        self.remote.lock().unwrap().calls.clone()
    }

    pub(crate) fn transactions(&self) -> Vec<Transaction> {
        self.remote.lock().unwrap().transactions.clone()
    }

    /// Record `call` and pop a queued failure, if any.
    fn begin(&self, call: StoreCall) -> Result<(), Error> {
        let mut remote = self.remote.lock().unwrap();
        remote.calls.push(call);

        match remote.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

}

type Gates = Mutex<HashMap<TransactionId, Arc<Notify>>>;

fn gate(gates: &Gates, id: &TransactionId) -> Arc<Notify> {
    gates
        .lock()
        .unwrap()
        .entry(id.clone())
        .or_insert_with(|| Arc::new(Notify::new()))
        .clone()
}

async fn wait_for_gate(gates: &Gates, id: &TransactionId) {
    let gate = gates.lock().unwrap().get(id).cloned();

    if let Some(gate) = gate {
        gate.notified().await;
    }
}

#[async_trait]
impl TransactionStore for FakeTransactionStore {
    async fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.begin(StoreCall::List)?;

        Ok(self.transactions())
    }

    async fn create(&self, input: &CreateTransactionInput) -> Result<Transaction, Error> {
        self.begin(StoreCall::Create(input.clone()))?;

        let mut remote = self.remote.lock().unwrap();
        remote.next_id = remote.next_id.max(remote.transactions.len() + 1);
        let transaction = Transaction {
            id: TransactionId::new(remote.next_id.to_string()),
            amount: input.amount,
            transaction_type: input.transaction_type,
            description: input.description.clone(),
            created_at: input.created_at.unwrap_or(FAKE_CREATED_AT),
        };
        remote.next_id += 1;
        remote.transactions.push(transaction.clone());

        Ok(transaction)
    }

    async fn update(
        &self,
        id: &TransactionId,
        input: &UpdateTransactionInput,
    ) -> Result<Transaction, Error> {
        self.begin(StoreCall::Update(id.clone(), input.clone()))?;

        let updated = {
            let mut remote = self.remote.lock().unwrap();
            let transaction = remote
                .transactions
                .iter_mut()
                .find(|transaction| &transaction.id == id)
                .ok_or_else(|| Error::NotFound(id.clone()))?;

            if let Some(amount) = input.amount {
                transaction.amount = amount;
            }
            if let Some(description) = &input.description {
                transaction.description = description.clone();
            }
            if let Some(transaction_type) = input.transaction_type {
                transaction.transaction_type = transaction_type;
            }
            if let Some(created_at) = input.created_at {
                transaction.created_at = created_at;
            }

            transaction.clone()
        };

        // The update is applied before the gate, only the response is held back.
        wait_for_gate(&self.update_gates, id).await;

        Ok(updated)
    }

    async fn delete(&self, id: &TransactionId) -> Result<(), Error> {
        self.begin(StoreCall::Delete(id.clone()))?;
        wait_for_gate(&self.delete_gates, id).await;

        let mut remote = self.remote.lock().unwrap();
        let index = remote
            .transactions
            .iter()
            .position(|transaction| &transaction.id == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        remote.transactions.remove(index);

        Ok(())
    }
}

/// A transaction as the remote store would return it.
pub(crate) fn stored_transaction(
    id: &str,
    amount: f64,
    transaction_type: TransactionType,
    description: &str,
) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        amount,
        transaction_type,
        description: description.to_owned(),
        created_at: FAKE_CREATED_AT,
    }
}
