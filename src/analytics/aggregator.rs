//! Single-pass session aggregation.
//!
//! The log stores flat per-event records; sessions only exist implicitly via
//! `form_session_id`. One left-to-right pass rebuilds enough session state
//! (start time, terminal event) to derive the cross-session metrics, without
//! ever materializing per-session objects.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::types::{EventKind, TrackingEvent};

/// Accumulator state for one aggregation pass.
///
/// Borrows from the event slice; counters are keyed by the ids as they
/// appear in the records. Malformed input never aborts the pass: duplicate
/// starts, missing starts and double terminal events all degrade gracefully
/// because membership is set-based.
#[derive(Debug, Default)]
pub struct FunnelAccumulator<'a> {
    /// Every user seen on any event, recognized kind or not
    pub unique_users: HashSet<&'a str>,
    /// Sessions with at least one form_start
    pub form_sessions: HashSet<&'a str>,
    /// Sessions with at least one form_submission
    pub submissions: HashSet<&'a str>,
    /// Sessions with at least one form_abandonment
    pub abandonments: HashSet<&'a str>,
    /// Users who triggered a form_start
    pub unique_starters: HashSet<&'a str>,
    /// Users who triggered a form_submission
    pub unique_submitters: HashSet<&'a str>,
    /// Parsed start instant per session. A repeated start overwrites the
    /// entry: last write wins.
    pub session_start_times: HashMap<&'a str, DateTime<Utc>>,
    pub field_interactions: HashMap<&'a str, u64>,
    pub top_abandonment_fields: HashMap<&'a str, u64>,
    pub validation_errors: HashMap<&'a str, u64>,
    /// Sum of start-to-submission deltas, counted only for submissions whose
    /// session had a known start time when the submission was processed
    pub total_submission_time_ms: i64,
}

impl<'a> FunnelAccumulator<'a> {
    /// Fold one event into the accumulator.
    pub fn observe(&mut self, event: &'a TrackingEvent) {
        if let Some(user) = event.user_id.as_deref() {
            self.unique_users.insert(user);
        }

        // Unrecognized event names are stored but not aggregated
        let Some(kind) = event.kind() else {
            return;
        };

        match kind {
            EventKind::FormStart => {
                if let Some(session) = event.form_session_id.as_deref() {
                    self.form_sessions.insert(session);
                    if let Some(started) = event.client_time() {
                        self.session_start_times.insert(session, started);
                    }
                }
                if let Some(user) = event.user_id.as_deref() {
                    self.unique_starters.insert(user);
                }
            }
            EventKind::FormSubmission => {
                if let Some(session) = event.form_session_id.as_deref() {
                    self.submissions.insert(session);
                    if let (Some(submitted), Some(started)) =
                        (event.client_time(), self.session_start_times.get(session))
                    {
                        self.total_submission_time_ms +=
                            submitted.signed_duration_since(*started).num_milliseconds();
                    }
                }
                if let Some(user) = event.user_id.as_deref() {
                    self.unique_submitters.insert(user);
                }
            }
            EventKind::FormAbandonment => {
                if let Some(session) = event.form_session_id.as_deref() {
                    self.abandonments.insert(session);
                }
                if let Some(field) = event.last_interacted_field.as_deref() {
                    *self.top_abandonment_fields.entry(field).or_insert(0) += 1;
                }
            }
            EventKind::FieldInteraction => {
                if let Some(field) = event.field_id.as_deref() {
                    *self.field_interactions.entry(field).or_insert(0) += 1;
                }
            }
            EventKind::ValidationError => {
                if let Some(field) = event.field_id.as_deref() {
                    *self.validation_errors.entry(field).or_insert(0) += 1;
                }
            }
        }
    }
}

/// Run the single aggregation pass.
///
/// `allFormIds` is collected from the unfiltered sequence in first-seen
/// order, so the dashboard selector is unaffected by the current filter.
/// Everything else only sees events matching `form_filter`, when given.
pub fn aggregate<'a>(
    events: &'a [TrackingEvent],
    form_filter: Option<&str>,
) -> (Vec<String>, FunnelAccumulator<'a>) {
    let mut all_form_ids = Vec::new();
    let mut seen_forms: HashSet<&str> = HashSet::new();
    let mut acc = FunnelAccumulator::default();

    for event in events {
        if let Some(form) = event.form_id.as_deref() {
            if seen_forms.insert(form) {
                all_form_ids.push(form.to_string());
            }
        }

        if let Some(filter) = form_filter {
            if event.form_id.as_deref() != Some(filter) {
                continue;
            }
        }

        acc.observe(event);
    }

    (all_form_ids, acc)
}
