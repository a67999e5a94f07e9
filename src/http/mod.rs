//! HTTP transport layer for the DAS proxy
//!
//! Provides the REST-style routes that forward into JSON-RPC calls, plus a health probe.

pub mod handlers;
