//! Advisory events
//!
//! An event is a timestamped remediation or status record. The on-disk form
//! is `{timestamp, type, data}`; in memory the type and its payload are one
//! enum so that a `fixed` event cannot exist without a fixed version.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminant of an event, rendered in kebab-case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Detection,
    TruePositiveDetermination,
    Fixed,
    FalsePositiveDetermination,
    AnalysisNotPlanned,
    FixNotPlanned,
    PendingUpstreamFix,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Detection => "detection",
            EventKind::TruePositiveDetermination => "true-positive-determination",
            EventKind::Fixed => "fixed",
            EventKind::FalsePositiveDetermination => "false-positive-determination",
            EventKind::AnalysisNotPlanned => "analysis-not-planned",
            EventKind::FixNotPlanned => "fix-not-planned",
            EventKind::PendingUpstreamFix => "pending-upstream-fix",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload of an event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventData {
    Detection { detection_type: String },
    TruePositiveDetermination { note: Option<String> },
    Fixed { fixed_version: String },
    FalsePositiveDetermination { fp_type: String, note: Option<String> },
    AnalysisNotPlanned { note: Option<String> },
    FixNotPlanned { note: Option<String> },
    PendingUpstreamFix { note: Option<String> },
}

impl EventData {
    pub fn kind(&self) -> EventKind {
        match self {
            EventData::Detection { .. } => EventKind::Detection,
            EventData::TruePositiveDetermination { .. } => EventKind::TruePositiveDetermination,
            EventData::Fixed { .. } => EventKind::Fixed,
            EventData::FalsePositiveDetermination { .. } => EventKind::FalsePositiveDetermination,
            EventData::AnalysisNotPlanned { .. } => EventKind::AnalysisNotPlanned,
            EventData::FixNotPlanned { .. } => EventKind::FixNotPlanned,
            EventData::PendingUpstreamFix { .. } => EventKind::PendingUpstreamFix,
        }
    }
}

/// A timestamped entry in an advisory's history
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEvent", into = "RawEvent")]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub data: EventData,
}

impl Event {
    pub fn new(timestamp: DateTime<Utc>, data: EventData) -> Self {
        Self { timestamp, data }
    }

    /// Shorthand for a `fixed` event
    pub fn fixed(timestamp: DateTime<Utc>, fixed_version: impl Into<String>) -> Self {
        Self::new(
            timestamp,
            EventData::Fixed {
                fixed_version: fixed_version.into(),
            },
        )
    }

    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }

    /// The fixed version, if this is a `fixed` event
    pub fn fixed_version(&self) -> Option<&str> {
        match &self.data {
            EventData::Fixed { fixed_version } => Some(fixed_version),
            _ => None,
        }
    }
}

/// Serialized shape of an event
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEvent {
    timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    data: Value,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DetectionPayload {
    #[serde(rename = "type", default)]
    detection_type: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FixedPayload {
    #[serde(default)]
    fixed_version: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FalsePositivePayload {
    #[serde(rename = "type", default)]
    fp_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct NotePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

fn payload<T>(data: Value) -> Result<T, String>
where
    T: Default + serde::de::DeserializeOwned,
{
    if data.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(data).map_err(|e| format!("invalid event data: {}", e))
}

fn to_value<T: Serialize>(payload: T) -> Value {
    serde_json::to_value(payload).unwrap_or(Value::Null)
}

impl TryFrom<RawEvent> for Event {
    type Error = String;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let data = match raw.kind {
            EventKind::Detection => {
                let p: DetectionPayload = payload(raw.data)?;
                EventData::Detection {
                    detection_type: p.detection_type,
                }
            }
            EventKind::Fixed => {
                let p: FixedPayload = payload(raw.data)?;
                EventData::Fixed {
                    fixed_version: p.fixed_version,
                }
            }
            EventKind::FalsePositiveDetermination => {
                let p: FalsePositivePayload = payload(raw.data)?;
                EventData::FalsePositiveDetermination {
                    fp_type: p.fp_type,
                    note: p.note,
                }
            }
            EventKind::TruePositiveDetermination => EventData::TruePositiveDetermination {
                note: payload::<NotePayload>(raw.data)?.note,
            },
            EventKind::AnalysisNotPlanned => EventData::AnalysisNotPlanned {
                note: payload::<NotePayload>(raw.data)?.note,
            },
            EventKind::FixNotPlanned => EventData::FixNotPlanned {
                note: payload::<NotePayload>(raw.data)?.note,
            },
            EventKind::PendingUpstreamFix => EventData::PendingUpstreamFix {
                note: payload::<NotePayload>(raw.data)?.note,
            },
        };

        Ok(Event {
            timestamp: raw.timestamp,
            data,
        })
    }
}

impl From<Event> for RawEvent {
    fn from(event: Event) -> Self {
        let kind = event.kind();
        let data = match event.data {
            EventData::Detection { detection_type } => to_value(DetectionPayload { detection_type }),
            EventData::Fixed { fixed_version } => to_value(FixedPayload { fixed_version }),
            EventData::FalsePositiveDetermination { fp_type, note } => {
                to_value(FalsePositivePayload { fp_type, note })
            }
            EventData::TruePositiveDetermination { note }
            | EventData::AnalysisNotPlanned { note }
            | EventData::FixNotPlanned { note }
            | EventData::PendingUpstreamFix { note } => match note {
                Some(note) => to_value(NotePayload { note: Some(note) }),
                None => Value::Null,
            },
        };

        RawEvent {
            timestamp: event.timestamp,
            kind,
            data,
        }
    }
}
