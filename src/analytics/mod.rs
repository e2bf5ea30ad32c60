//! Analytics over the event log.
//!
//! `aggregator` reconstructs session-level state in a single pass over the
//! stored sequence; `format` shapes the accumulated counters into the
//! response structure. Both are pure: the report is recomputed from scratch
//! on every query and nothing is cached between requests.

pub mod aggregator;
pub mod format;

pub use aggregator::{aggregate, FunnelAccumulator};
pub use format::shape_report;

use crate::types::{AggregateReport, TrackingEvent};

/// Compute the full aggregate report for an event sequence.
///
/// `form_filter` restricts the metrics to one form; the `allFormIds`
/// selector list is always drawn from the unfiltered sequence.
pub fn compute_report(events: &[TrackingEvent], form_filter: Option<&str>) -> AggregateReport {
    let (all_form_ids, acc) = aggregate(events, form_filter);
    shape_report(all_form_ids, &acc)
}
