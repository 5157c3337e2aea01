use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use advguard_core::errors::AliasLookupError;
use advguard_core::{Advisory, AliasResolver, Document, Event, EventData, Snapshot};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Fixed reference clock for every test
#[allow(dead_code)]
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

#[allow(dead_code)]
pub fn detection_at(ts: DateTime<Utc>) -> Event {
    Event::new(
        ts,
        EventData::Detection {
            detection_type: "manual".to_string(),
        },
    )
}

/// A document with one advisory per id, each with a single old detection event
#[allow(dead_code)]
pub fn doc(package: &str, ids: &[&str]) -> Document {
    ids.iter().fold(Document::new(package), |d, id| {
        d.with_advisory(Advisory::new(*id).with_event(detection_at(days_ago(30))))
    })
}

#[allow(dead_code)]
pub fn snapshot(docs: Vec<Document>) -> Snapshot {
    Snapshot::from_documents(docs)
}

/// In-memory alias service with call counting and injectable faults
#[derive(Default)]
pub struct MockResolver {
    ghsas: HashMap<String, Vec<String>>,
    cves: HashMap<String, String>,
    fail_on: Option<String>,
    delay: Option<StdDuration>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(mut self, cve: &str, ghsa: &str) -> Self {
        self.ghsas
            .entry(cve.to_string())
            .or_default()
            .push(ghsa.to_string());
        self.cves.insert(ghsa.to_string(), cve.to_string());
        self
    }

    /// Fail any lookup for this id
    pub fn failing_on(mut self, id: &str) -> Self {
        self.fail_on = Some(id.to_string());
        self
    }

    pub fn with_delay(mut self, delay: StdDuration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    async fn enter(&self, id: &str) -> Result<(), AliasLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_on.as_deref() == Some(id) {
            return Err(AliasLookupError::Service(format!("503 for {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl AliasResolver for MockResolver {
    async fn ghsas_for_cve(&self, cve: &str) -> Result<Vec<String>, AliasLookupError> {
        self.enter(cve).await?;
        Ok(self.ghsas.get(cve).cloned().unwrap_or_default())
    }

    async fn cve_for_ghsa(&self, ghsa: &str) -> Result<Option<String>, AliasLookupError> {
        self.enter(ghsa).await?;
        Ok(self.cves.get(ghsa).cloned())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
