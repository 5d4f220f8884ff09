//! Scripted transaction builder.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use payrun_chain::{ChainError, TransactionBuilder, TransferOutput};
use payrun_types::{ChainAddress, TokenAmount, TxHash};

struct Inner {
    sender: Option<ChainAddress>,
    balance: TokenAmount,
    /// Outcome queue for `submit_transfer`: `Ok(())` settles with a
    /// generated hash, `Err` fails with the scripted error. An empty queue
    /// means every further submit succeeds.
    script: VecDeque<Result<(), ChainError>>,
    submitted: Vec<Vec<TransferOutput>>,
    balance_queries: usize,
}

/// A programmable [`TransactionBuilder`] that records every call.
#[derive(Clone)]
pub struct NullChain {
    inner: Arc<Mutex<Inner>>,
}

impl NullChain {
    /// A chain with the given sender and an effectively unlimited balance.
    pub fn new(sender: impl Into<ChainAddress>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                sender: Some(sender.into()),
                balance: TokenAmount::new(u128::MAX),
                script: VecDeque::new(),
                submitted: Vec::new(),
                balance_queries: 0,
            })),
        }
    }

    /// A chain with no configured sender; `sender_address` fails.
    pub fn without_sender() -> Self {
        let chain = Self::new("unused");
        chain.inner.lock().unwrap().sender = None;
        chain
    }

    pub fn set_balance(&self, balance: TokenAmount) {
        self.inner.lock().unwrap().balance = balance;
    }

    /// Queue the outcome of the next unscripted `submit_transfer` call.
    pub fn enqueue_success(&self) {
        self.inner.lock().unwrap().script.push_back(Ok(()));
    }

    pub fn enqueue_failure(&self, error: ChainError) {
        self.inner.lock().unwrap().script.push_back(Err(error));
    }

    /// Queue `n` network failures in a row.
    pub fn enqueue_network_failures(&self, n: usize) {
        for _ in 0..n {
            self.enqueue_failure(ChainError::Network("connection timed out".into()));
        }
    }

    /// Every output set `submit_transfer` has been called with.
    pub fn submissions(&self) -> Vec<Vec<TransferOutput>> {
        self.inner.lock().unwrap().submitted.clone()
    }

    pub fn submission_count(&self) -> usize {
        self.inner.lock().unwrap().submitted.len()
    }

    pub fn balance_query_count(&self) -> usize {
        self.inner.lock().unwrap().balance_queries
    }
}

#[async_trait]
impl TransactionBuilder for NullChain {
    async fn sender_address(&self) -> Result<ChainAddress, ChainError> {
        self.inner
            .lock()
            .unwrap()
            .sender
            .clone()
            .ok_or_else(|| ChainError::Rejected("no sender account configured".into()))
    }

    async fn sender_balance(&self, _denom: &str) -> Result<TokenAmount, ChainError> {
        let mut inner = self.inner.lock().unwrap();
        inner.balance_queries += 1;
        Ok(inner.balance)
    }

    async fn submit_transfer(&self, outputs: &[TransferOutput]) -> Result<TxHash, ChainError> {
        let mut inner = self.inner.lock().unwrap();
        inner.submitted.push(outputs.to_vec());
        let outcome = inner.script.pop_front().unwrap_or(Ok(()));
        match outcome {
            Ok(()) => Ok(TxHash::new(format!("HASH{}", inner.submitted.len()))),
            Err(e) => Err(e),
        }
    }
}
