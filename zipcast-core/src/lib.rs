//! Core library for the `zipcast` CLI.
//!
//! This crate defines:
//! - Configuration handling (contact address, request timeout)
//! - Offline ZIP-code → coordinates resolution
//! - The two-hop National Weather Service forecast client
//! - Shared wire models for the front-end payload
//!
//! It is used by `zipcast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod locate;
pub mod model;
pub mod nws;
pub mod report;

pub use config::Config;
pub use error::{ForecastError, LocateError};
pub use locate::{ResolvedLocation, resolve_zip};
pub use model::{ForecastPeriod, OutputPayload};
pub use nws::NwsClient;
pub use report::{ConsoleReporter, Reporter, SilentReporter};
