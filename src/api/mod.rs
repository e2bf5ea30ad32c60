//! API module for the HTTP surface
//!
//! This module provides the Axum router, shared state and the REST handlers
//! for event ingest and the aggregate report.

pub mod http;
pub mod rest;
