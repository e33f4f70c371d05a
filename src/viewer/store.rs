use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};

use crate::sink::{DataSink, Result};
use crate::survey::submit::RESPONSE_TABLE;
use crate::viewer::filter::ResponseFilter;
use crate::viewer::model::ResponseRecord;

/// Header stats for the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerStats {
    pub total: usize,
    pub last_submission: Option<DateTime<Utc>>,
}

/// Holds the fetched result set for the viewer session. One refresh at a
/// time is the expected use; overlapping refreshes simply let the last one
/// to resolve win.
pub struct ResponseStore {
    sink: Arc<dyn DataSink>,
    all: Vec<ResponseRecord>,
}

impl ResponseStore {
    pub fn new(sink: Arc<dyn DataSink>) -> Self {
        Self {
            sink,
            all: Vec::new(),
        }
    }

    /// Fetches every stored response, newest first, replacing the in-memory
    /// set. Transport failures bubble up for an inline error message and a
    /// manual retry; individual rows that fail to decode are skipped with a
    /// warning rather than losing the whole fetch.
    pub async fn refresh(&mut self) -> Result<()> {
        let rows = self
            .sink
            .select(RESPONSE_TABLE, None, Some("created_at.desc"))
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<ResponseRecord>(row) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping undecodable response row: {}", e),
            }
        }

        info!("Loaded {} survey response(s)", records.len());
        self.all = records;
        Ok(())
    }

    pub fn all(&self) -> &[ResponseRecord] {
        &self.all
    }

    pub fn filtered(&self, filter: &ResponseFilter) -> Vec<ResponseRecord> {
        filter.apply(&self.all)
    }

    /// Total count plus the newest submission time (the first record, since
    /// the sink returns them descending by creation time).
    pub fn stats(&self) -> ViewerStats {
        ViewerStats {
            total: self.all.len(),
            last_submission: self.all.first().and_then(|r| r.created_at),
        }
    }

    /// Whether a record is recent enough to carry the "NEW" badge.
    pub fn is_recent(record: &ResponseRecord, now: DateTime<Utc>) -> bool {
        record
            .created_at
            .map(|ts| now - ts < Duration::hours(24))
            .unwrap_or(false)
    }
}
