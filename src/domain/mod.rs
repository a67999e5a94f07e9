//! DAS operations: inbound field normalization and outbound parameter records
//!
//! Provides the per-method normalizers that turn a raw request body into the
//! exact parameter object forwarded to the remote indexer.

pub mod params;
pub mod utils;

pub use params::DasRequest;
