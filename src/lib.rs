//! # evalbatch
//!
//! Runs an external evaluation task once per input across a pool of
//! parallel workers and returns the results in input order.
//!
//! Provides the batch engine, the task runner abstraction with a
//! process-backed implementation, YAML input loading, JSONL output, a dry-run
//! plan, and tracing/OpenTelemetry setup.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod model;
pub mod output;
pub mod plan;
pub mod runner;
pub mod telemetry;
