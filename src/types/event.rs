//! Tracking event types for the append-only form event log.
//!
//! Events are immutable once stored. A record is deliberately sparse: the
//! collection path is permissive and stores whatever well-formed JSON the
//! tracking snippet sends, so every client-supplied field is optional.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event kinds the aggregator understands.
///
/// The wire format is an open set: events with any other name are stored
/// verbatim but contribute only to unique-user counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A user opened a form and started a new session
    FormStart,
    /// The session ended with the form being submitted
    FormSubmission,
    /// The session ended without a submission
    FormAbandonment,
    /// A user touched one field
    FieldInteraction,
    /// A field failed client-side validation
    ValidationError,
}

impl EventKind {
    /// Map a wire-format event name to a kind.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "form_start" => Some(EventKind::FormStart),
            "form_submission" => Some(EventKind::FormSubmission),
            "form_abandonment" => Some(EventKind::FormAbandonment),
            "field_interaction" => Some(EventKind::FieldInteraction),
            "validation_error" => Some(EventKind::ValidationError),
            _ => None,
        }
    }

    /// Wire-format name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::FormStart => "form_start",
            EventKind::FormSubmission => "form_submission",
            EventKind::FormAbandonment => "form_abandonment",
            EventKind::FieldInteraction => "field_interaction",
            EventKind::ValidationError => "validation_error",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One tracking event as collected from the browser.
///
/// Unknown extra fields survive a store/reload cycle through the flattened
/// `extra` map; they are never silently dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// Event name, e.g. "form_start". Open set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    /// Identifier of the form this event belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,

    /// Identifier of one attempt to fill the form, stable across the attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_session_id: Option<String>,

    /// Acting user; one user may start many sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Field touched, on field_interaction and validation_error events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,

    /// Last field touched before abandoning, on form_abandonment events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_interacted_field: Option<String>,

    /// Client-supplied ISO-8601 instant. Untrusted; parse via `client_time`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Assigned by the server at append time. Audit only, never used in
    /// aggregation math.
    #[serde(rename = "serverTimestamp", skip_serializing_if = "Option::is_none")]
    pub server_timestamp: Option<String>,

    /// Fields the collector sent that we do not model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackingEvent {
    /// Recognized kind of this event, if any.
    pub fn kind(&self) -> Option<EventKind> {
        self.event.as_deref().and_then(EventKind::parse)
    }

    /// Parse the client timestamp, if present and well formed.
    ///
    /// A malformed timestamp is tolerated: the event still counts toward set
    /// memberships, it just contributes no time delta.
    pub fn client_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Stamp the record with the instant the server received it.
    pub fn stamp_received(&mut self, now: DateTime<Utc>) {
        self.server_timestamp = Some(now.to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    /// Serialize event to JSON string (for JSONL)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize event from JSON string
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
