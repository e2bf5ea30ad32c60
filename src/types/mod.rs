//! Core data structures
//!
//! - `event`: the stored tracking event record
//! - `report`: the derived aggregate report

pub mod event;
pub mod report;

pub use event::{EventKind, TrackingEvent};
pub use report::{AggregateReport, Charts, FieldCount, Kpis};
