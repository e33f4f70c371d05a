use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{DataSink, Filter, Result};

/// In-memory sink used by tests and offline runs. Rows keep insertion order;
/// select honors the same equality filter and `column.asc|desc` ordering the
/// REST sink does.
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preloads rows, newest last, for viewer tests.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.tables.lock().insert(table.to_string(), rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.lock().get(table).cloned().unwrap_or_default()
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables.lock().get(table).map(Vec::len).unwrap_or(0)
    }
}

fn sort_key(row: &Value, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[async_trait]
impl DataSink for MemorySink {
    async fn insert(&self, table: &str, record: Value) -> Result<()> {
        self.tables
            .lock()
            .entry(table.to_string())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn select(
        &self,
        table: &str,
        filter: Filter<'_>,
        order: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut rows = self.rows(table);

        if let Some((column, value)) = filter {
            rows.retain(|row| {
                row.get(column)
                    .and_then(Value::as_str)
                    .map(|v| v == value)
                    .unwrap_or(false)
            });
        }

        if let Some(order) = order {
            let (column, descending) = match order.rsplit_once('.') {
                Some((column, "desc")) => (column, true),
                Some((column, "asc")) => (column, false),
                _ => (order, false),
            };
            rows.sort_by_key(|row| sort_key(row, column));
            if descending {
                rows.reverse();
            }
        }

        Ok(rows)
    }
}
