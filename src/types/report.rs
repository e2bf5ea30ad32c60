//! Aggregate report structures returned by `GET /api/data`.
//!
//! The report is derived state: it is recomputed from the full event log on
//! every request and never stored. Wire names are camelCase to match the
//! dashboard contract.

use serde::Serialize;

/// One row of a frequency table, e.g. interactions per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCount {
    pub field: String,
    pub count: u64,
}

impl FieldCount {
    pub fn new(field: impl Into<String>, count: u64) -> Self {
        Self {
            field: field.into(),
            count,
        }
    }
}

/// Headline funnel metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_unique_users: usize,
    pub starts: usize,
    pub submissions: usize,
    pub abandonments: usize,
    /// Percentage of started sessions that were submitted, one decimal place
    pub conversion_rate: f64,
    pub unique_starters: usize,
    pub unique_submitters: usize,
    /// Seconds from start to submission averaged over all submissions,
    /// one decimal place
    pub avg_time_to_submit: f64,
}

/// Frequency tables backing the dashboard charts.
///
/// Each table is sorted by count descending; ties are broken by field name
/// ascending so the order is stable between reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub field_interactions: Vec<FieldCount>,
    pub top_abandonment_fields: Vec<FieldCount>,
    pub validation_errors: Vec<FieldCount>,
}

/// Full response for `GET /api/data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    /// Every form id seen in the unfiltered log, in first-seen order.
    /// Populates the dashboard selector regardless of the current filter.
    pub all_form_ids: Vec<String>,
    pub kpis: Kpis,
    pub charts: Charts,
}
