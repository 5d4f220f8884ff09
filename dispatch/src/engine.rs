//! The dispatch engine.
//!
//! Drives batches through the transaction builder one at a time. Every
//! terminal outcome (hash or exhausted retries) is written to the outcome
//! ledger before the engine moves on, so a process kill between batches
//! never loses track of what settled. Per-batch chain errors are absorbed
//! here; only configuration and ledger I/O errors escape.

use std::time::Duration;

use payrun_chain::{ChainError, TransactionBuilder, TransferOutput};
use payrun_ledger::{FailureRecord, OutcomeLedger, SettlementRecord};
use payrun_types::{Recipient, TokenAmount, TxHash};
use payrun_utils::format_duration;

use crate::batcher::split;
use crate::error::DispatchError;
use crate::report::RunReport;
use crate::scheduler::Scheduler;
use crate::settings::{DispatchSettings, FAILURE_BACKOFF, RESUME_PACING, SUCCESS_PACING};

pub struct DispatchEngine<C, L, S> {
    chain: C,
    ledger: L,
    scheduler: S,
    settings: DispatchSettings,
}

impl<C, L, S> DispatchEngine<C, L, S>
where
    C: TransactionBuilder,
    L: OutcomeLedger,
    S: Scheduler,
{
    pub fn new(chain: C, ledger: L, scheduler: S, settings: DispatchSettings) -> Self {
        Self {
            chain,
            ledger,
            scheduler,
            settings,
        }
    }

    /// Split `recipients` into batches and dispatch them all in order.
    ///
    /// A batch that exhausts its retries is persisted as a failure record
    /// and the run continues with the next batch. Returns the report of
    /// settled and failed batch numbers; exit-status policy belongs to the
    /// caller.
    pub async fn run_all(&mut self, recipients: &[Recipient]) -> Result<RunReport, DispatchError> {
        if recipients.is_empty() {
            return Err(DispatchError::Config("recipient list is empty".into()));
        }
        if self.settings.batch_size == 0 {
            return Err(DispatchError::Config("batch size must be at least 1".into()));
        }
        for recipient in recipients {
            recipient
                .validate()
                .map_err(|e| DispatchError::Config(e.to_string()))?;
        }
        let sender = self
            .chain
            .sender_address()
            .await
            .map_err(|e| DispatchError::Config(format!("cannot resolve sender: {e}")))?;

        let batches = split(recipients, self.settings.batch_size);
        tracing::info!(
            "dispatching {} recipients as {} batches of up to {} from {sender}",
            recipients.len(),
            batches.len(),
            self.settings.batch_size,
        );

        let mut report = RunReport::default();
        let last = batches.len();
        for (i, batch) in batches.iter().enumerate() {
            match self
                .settle_with_retries(batch.number, &batch.recipients)
                .await
            {
                Ok((hash, attempts)) => {
                    self.record_settlement(batch.number, batch.recipients.len(), &hash, attempts)?;
                    report.record_success(batch.number, hash);
                    if i + 1 < last {
                        self.pace("next batch", SUCCESS_PACING).await;
                    }
                }
                Err(err) => {
                    self.record_exhaustion(batch.number, &batch.recipients, &err)?;
                    report.record_failure(batch.number);
                    if i + 1 < last {
                        self.pace("next batch after failure", FAILURE_BACKOFF).await;
                    }
                }
            }
        }

        tracing::info!(
            "run complete: {} settled, {} failed",
            report.settled.len(),
            report.failed.len(),
        );
        Ok(report)
    }

    /// Retry every outstanding failure record, in stored order.
    pub async fn resume_all(&mut self) -> Result<RunReport, DispatchError> {
        let records = self.ledger.outstanding_failures()?;
        if records.is_empty() {
            tracing::info!("no outstanding failed batches to resume");
            return Ok(RunReport::default());
        }
        tracing::info!("resuming {} outstanding failed batches", records.len());

        let mut report = RunReport::default();
        let last = records.len();
        for (i, record) in records.iter().enumerate() {
            self.resume_record(record, &mut report).await?;
            if i + 1 < last {
                self.pace("next resumed batch", RESUME_PACING).await;
            }
        }
        Ok(report)
    }

    /// Retry the single outstanding failure record for `batch_number`.
    ///
    /// Fails with [`DispatchError::NotFound`], performing no ledger
    /// mutation, when no such record exists, including when the batch was
    /// already cleared by an earlier resume. A cleared batch can never be
    /// silently re-sent.
    pub async fn resume_batch(&mut self, batch_number: u64) -> Result<RunReport, DispatchError> {
        let record = self
            .ledger
            .outstanding_failures()?
            .into_iter()
            .find(|r| r.batch_number == batch_number)
            .ok_or(DispatchError::NotFound(batch_number))?;

        let mut report = RunReport::default();
        self.resume_record(&record, &mut report).await?;
        Ok(report)
    }

    /// Retry one persisted failure from its recipient snapshot.
    ///
    /// Success removes the record and appends a settlement entry;
    /// exhaustion leaves the record in place with its error text refreshed
    /// to the latest cause.
    async fn resume_record(
        &mut self,
        record: &FailureRecord,
        report: &mut RunReport,
    ) -> Result<(), DispatchError> {
        match self
            .settle_with_retries(record.batch_number, &record.recipients)
            .await
        {
            Ok((hash, _attempts)) => {
                self.ledger.resolve_failure(record.batch_number)?;
                self.ledger.append_settlement(&SettlementRecord {
                    batch_number: record.batch_number,
                    recipient_count: record.recipients.len(),
                    tx_hash: hash.clone(),
                    timestamp: self.scheduler.now(),
                    retried: true,
                })?;
                tracing::info!(
                    "batch {} resolved on resume: {hash}",
                    record.batch_number
                );
                report.record_success(record.batch_number, hash);
            }
            Err(err) => {
                tracing::warn!(
                    "batch {} still failing after resume: {err}",
                    record.batch_number
                );
                self.ledger.record_failure(FailureRecord {
                    batch_number: record.batch_number,
                    recipients: record.recipients.clone(),
                    error: err.to_string(),
                    timestamp: self.scheduler.now(),
                })?;
                report.record_failure(record.batch_number);
            }
        }
        Ok(())
    }

    /// Attempt one batch up to `max_retries + 1` times, sleeping
    /// `retry_delay` between attempts (never before the first).
    ///
    /// Each attempt verifies sender balance covers the batch total before
    /// submitting; a shortfall counts as a failed attempt without touching
    /// the network's submit path, since balance may arrive externally
    /// before the next attempt.
    async fn settle_with_retries(
        &mut self,
        batch_number: u64,
        recipients: &[Recipient],
    ) -> Result<(TxHash, u32), ChainError> {
        let total = TokenAmount::checked_sum(recipients.iter().map(|r| r.amount))
            .map_err(|e| ChainError::Rejected(e.to_string()))?;
        let outputs: Vec<TransferOutput> = recipients
            .iter()
            .map(|r| TransferOutput {
                address: r.address.clone(),
                amount: r.amount,
                denom: self.settings.denom.clone(),
            })
            .collect();

        let max_attempts = self.settings.max_retries + 1;
        let mut last_err = ChainError::Network("no attempt made".into());
        for attempt in 1..=max_attempts {
            if attempt > 1 {
                self.pace("retry", self.settings.retry_delay).await;
            }
            match self.attempt_submit(&outputs, total).await {
                Ok(hash) => {
                    tracing::info!(
                        "batch {batch_number} settled on attempt {attempt}/{max_attempts}: {hash}"
                    );
                    return Ok((hash, attempt));
                }
                Err(err) => {
                    tracing::warn!(
                        "batch {batch_number} attempt {attempt}/{max_attempts} failed: {err}"
                    );
                    last_err = err;
                }
            }
        }
        Err(last_err)
    }

    async fn attempt_submit(
        &self,
        outputs: &[TransferOutput],
        total: TokenAmount,
    ) -> Result<TxHash, ChainError> {
        let available = self.chain.sender_balance(&self.settings.denom).await?;
        if available < total {
            return Err(ChainError::InsufficientBalance {
                needed: total.to_string(),
                available: available.to_string(),
            });
        }
        self.chain.submit_transfer(outputs).await
    }

    fn record_settlement(
        &mut self,
        batch_number: u64,
        recipient_count: usize,
        hash: &TxHash,
        attempts: u32,
    ) -> Result<(), DispatchError> {
        self.ledger.append_settlement(&SettlementRecord {
            batch_number,
            recipient_count,
            tx_hash: hash.clone(),
            timestamp: self.scheduler.now(),
            retried: attempts > 1,
        })?;
        // A stale record from a previous run is resolved by this success.
        self.ledger.resolve_failure(batch_number)?;
        Ok(())
    }

    fn record_exhaustion(
        &mut self,
        batch_number: u64,
        recipients: &[Recipient],
        err: &ChainError,
    ) -> Result<(), DispatchError> {
        tracing::warn!(
            "batch {batch_number} exhausted {} attempts, persisting failure: {err}",
            self.settings.max_retries + 1
        );
        self.ledger.record_failure(FailureRecord {
            batch_number,
            recipients: recipients.to_vec(),
            error: err.to_string(),
            timestamp: self.scheduler.now(),
        })?;
        Ok(())
    }

    async fn pace(&self, reason: &str, duration: Duration) {
        tracing::debug!("waiting {} before {reason}", format_duration(duration));
        self.scheduler.sleep(duration).await;
    }
}
