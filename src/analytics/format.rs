//! Report shaping.
//!
//! Turns the raw accumulator counters into the wire-format report: derives
//! the ratio KPIs and sorts the frequency tables into display order. No
//! business logic lives here.

use std::collections::HashMap;

use super::aggregator::FunnelAccumulator;
use crate::types::{AggregateReport, Charts, FieldCount, Kpis};

/// Round to one decimal place, the precision the dashboard displays.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sort a frequency counter into display order: count descending, ties by
/// field name ascending so the order is stable between reads.
fn sorted_counts(counts: &HashMap<&str, u64>) -> Vec<FieldCount> {
    let mut rows: Vec<FieldCount> = counts
        .iter()
        .map(|(field, count)| FieldCount::new(*field, *count))
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.field.cmp(&b.field)));
    rows
}

/// Assemble the final report from the accumulator.
pub fn shape_report(all_form_ids: Vec<String>, acc: &FunnelAccumulator<'_>) -> AggregateReport {
    let starts = acc.form_sessions.len();
    let submissions = acc.submissions.len();

    let conversion_rate = if starts > 0 {
        round1(submissions as f64 / starts as f64 * 100.0)
    } else {
        0.0
    };

    // Averaged over every submission, matched or not: a submission without a
    // known start contributes zero to the numerator but still widens the
    // denominator. This matches the historical dashboard numbers.
    let avg_time_to_submit = if submissions > 0 {
        round1(acc.total_submission_time_ms as f64 / submissions as f64 / 1000.0)
    } else {
        0.0
    };

    AggregateReport {
        all_form_ids,
        kpis: Kpis {
            total_unique_users: acc.unique_users.len(),
            starts,
            submissions,
            abandonments: acc.abandonments.len(),
            conversion_rate,
            unique_starters: acc.unique_starters.len(),
            unique_submitters: acc.unique_submitters.len(),
            avg_time_to_submit,
        },
        charts: Charts {
            field_interactions: sorted_counts(&acc.field_interactions),
            top_abandonment_fields: sorted_counts(&acc.top_abandonment_fields),
            validation_errors: sorted_counts(&acc.validation_errors),
        },
    }
}
