//! REST handlers for the tracking API
//!
//! - `POST /api/track` - ingest one tracking event
//! - `GET /api/data` - recompute the aggregate report
//! - `GET /` - static dashboard document

pub mod dashboard;
pub mod data;
pub mod track;

use serde::Serialize;

/// Uniform `{message}` body used for acks and errors alike.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
