//! Batch dispatch engine.
//!
//! Splits an arbitrarily large recipient list into bounded-size batches and
//! drives each one through the chain's transaction builder with bounded
//! retries, inter-batch pacing, and durable outcome recording, so a crashed
//! or partially-failed run can be resumed without re-sending settled batches.
//!
//! Batches execute strictly one at a time: the signing node needs sequential
//! account-sequence usage, and pacing is a deliberate throttle that
//! concurrency would defeat.

pub mod batcher;
pub mod engine;
pub mod error;
pub mod report;
pub mod scheduler;
pub mod settings;

pub use batcher::{split, Batch};
pub use engine::DispatchEngine;
pub use error::DispatchError;
pub use report::RunReport;
pub use scheduler::{Scheduler, TokioScheduler};
pub use settings::{DispatchSettings, FAILURE_BACKOFF, RESUME_PACING, SUCCESS_PACING};
