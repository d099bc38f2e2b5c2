//! Profit Mix Optimizer domain library.
//!
//! Houses the fund catalog model and loaders, the blend optimization engine
//! (enumeration, weight-grid search, diversified selection), and the HTTP
//! router exposing both to service binaries.

pub mod catalog;
pub mod config;
pub mod error;
pub mod optimizer;
pub mod telemetry;
