//! Shared request/response primitives for the site API Lambdas.
//!
//! This crate owns the envelope shape, request normalization, the feature
//! vector contract and the error taxonomy. It intentionally excludes AWS SDK
//! and Lambda runtime concerns; those live in `site_api_lambda`.

pub mod config;
pub mod envelope;
pub mod error;
pub mod features;
pub mod request;
