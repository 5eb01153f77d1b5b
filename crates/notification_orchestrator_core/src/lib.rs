//! Shared notification orchestrator domain primitives.
//!
//! This crate owns the retrieval-and-dispatch pipeline: the relationship model,
//! the notification wire contract, the record store and queue publisher seams,
//! pagination draining and the fail-fast fan-out loop. It intentionally excludes
//! AWS SDK and Lambda runtime concerns, which live in
//! `notification_orchestrator_lambda`.

pub mod aggregator;
pub mod context;
pub mod contract;
pub mod dispatch;
pub mod publisher;
pub mod relationship;
pub mod store;
