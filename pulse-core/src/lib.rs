//! Core types, errors, configuration, events, and tracing for Pulse.
//!
//! Pulse ingests periodically recomputed pattern observations and decides,
//! via trend regression, approximate significance testing, and anomaly
//! detection, whether downstream consumers should be alerted. This crate
//! holds the shared foundation; the statistics and the alert engine live
//! in `pulse-analysis`.

pub mod config;
pub mod errors;
pub mod events;
pub mod telemetry;
pub mod types;
