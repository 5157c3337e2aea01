use advguard_core::{Advisory, Document, Event, EventData, Snapshot};
use chrono::{DateTime, TimeZone, Utc};

/// Midnight UTC on the given day of January 2024
#[allow(dead_code)]
pub fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn detection(day: u32) -> Event {
    Event::new(
        jan(day),
        EventData::Detection {
            detection_type: "manual".to_string(),
        },
    )
}

#[allow(dead_code)]
pub fn fixed(day: u32, version: &str) -> Event {
    Event::fixed(jan(day), version)
}

/// A single-advisory document with one detection event
#[allow(dead_code)]
pub fn doc_with(package: &str, advisory_id: &str) -> Document {
    Document::new(package).with_advisory(Advisory::new(advisory_id).with_event(detection(1)))
}

/// Snapshot keyed by each document's expected file name
#[allow(dead_code)]
pub fn snapshot_of(docs: Vec<Document>) -> Snapshot {
    Snapshot::from_documents(docs)
}
