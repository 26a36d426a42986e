//! AWS-oriented adapters and handlers for the site API Lambdas.
//!
//! This crate owns runtime integration details (Lambda handlers, collaborator
//! ports and logging) on top of the contracts in `site_api_core`. The AWS SDK
//! implementations of the ports live in the binaries.

pub mod adapters;
pub mod handlers;
pub mod telemetry;
