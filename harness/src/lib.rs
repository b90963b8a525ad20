//! Wayfind Harness: map loading, query configuration and report output.
//!
//! The harness runs route queries through `wayfind_search` and packages the
//! result as a report directory with a verifiable trace digest.
//!
//! The harness does NOT implement search logic; it delegates to the search
//! crate. Worlds provide map data only; the harness owns orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod error;
pub mod map_file;
pub mod query;
pub mod report_dir;
pub mod runner;
pub mod worlds;

pub use error::HarnessError;
pub use runner::{run_query, run_world, RouteReport, RouteRun};
