//! Formtrack - form analytics tracking server
//!
//! Ingests form-interaction events over HTTP, appends them to an append-only
//! JSONL log, and recomputes funnel analytics on demand: per-form session
//! counts, conversion rate, average time-to-submit and per-field frequency
//! tables.
//!
//! # Modules
//!
//! - `types`: event record and aggregate report structures
//! - `store`: the append-only event log
//! - `analytics`: single-pass session aggregation and report shaping
//! - `api`: Axum router and REST handlers
//! - `config`: process configuration
//!
//! # Example
//!
//! ```no_run
//! use formtrack::analytics::compute_report;
//! use formtrack::store::{EventLog, EventLogConfig};
//!
//! fn main() -> Result<(), formtrack::StoreError> {
//!     let log = EventLog::with_config(EventLogConfig::new("data"));
//!     let events = log.load_events()?;
//!     let report = compute_report(&events, Some("signup"));
//!     println!("conversion: {}%", report.kpis.conversion_rate);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod store;
pub mod types;

// Re-export commonly used items at crate root
pub use analytics::compute_report;
pub use config::ServerConfig;
pub use store::{EventLog, EventLogConfig, StoreError, StoreResult};
pub use types::{AggregateReport, Charts, EventKind, FieldCount, Kpis, TrackingEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
