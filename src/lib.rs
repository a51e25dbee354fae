//! premium-engine: Covered-call premium estimation
//!
//! This library provides the core components for:
//! - 18-decimal fixed-point money arithmetic
//! - Price history from in-memory, file and JSON-RPC event log sources
//! - Realized volatility estimation
//! - Premium model (intrinsic, time value, volatility, minimum floor)
//! - Quote orchestration with cancellation and provenance
//! - Logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod feed;
pub mod model;
pub mod money;
pub mod quote;
pub mod telemetry;
