//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies of the dispatch engine (chain, ledger,
//! clock/scheduler) are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! The doubles are cheaply cloneable handles over shared state, so a test
//! can keep a handle for assertions after moving a clone into the engine.

pub mod chain;
pub mod ledger;
pub mod scheduler;

pub use chain::NullChain;
pub use ledger::MemoryLedger;
pub use scheduler::NullScheduler;
