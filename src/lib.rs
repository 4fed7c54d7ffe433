//! # cidrsweep - Subnet Liveness Sweep
//!
//! Pings every address in a CIDR block concurrently and renders a compact,
//! range-compressed report of which addresses answered.
//!
//! ## Pipeline
//!
//! CIDR string -> [`network::Network`] (ordered addresses) ->
//! [`scanner::ScanDispatcher`] (one probe task per address) ->
//! ordered [`probe::ProbeOutcome`]s -> [`report::partition`] ->
//! [`report::compress_ranges`] -> [`report::render_report`] -> stdout.
//!
//! Probe completion order is unconstrained; the dispatcher merges results
//! back into enumeration order, which is what lets the range compressor work
//! in a single ascending pass.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod network;
pub mod probe;
pub mod report;
pub mod scanner;

// Re-exports for convenience
pub use crate::{
    config::AppConfig,
    core::Application,
    error::{Result, SweepError},
};
