//! AWS-oriented adapters and handlers for the notification orchestrator.
//!
//! This crate owns runtime integration details (the scheduled Lambda handler,
//! DynamoDB and SQS adapters, environment configuration and log setup). The
//! retrieval-and-dispatch pipeline itself lives in
//! `notification_orchestrator_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
