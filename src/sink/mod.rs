pub mod memory;
pub mod supabase;

pub use memory::MemorySink;
pub use supabase::SupabaseSink;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Sink is not configured: {0}")]
    NotConfigured(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Sink rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Failed to decode sink response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, SinkError>;

/// Equality constraint applied server-side on a select, e.g. `("status", "active")`.
pub type Filter<'a> = Option<(&'a str, &'a str)>;

/// The minimal contract the engine has with the hosted tabular store. The
/// core depends only on this, not on any specific backend.
#[async_trait]
pub trait DataSink: Send + Sync {
    /// Inserts one record into `table`.
    async fn insert(&self, table: &str, record: Value) -> Result<()>;

    /// Returns all rows of `table`, optionally narrowed by an equality filter
    /// and ordered by `column.asc` / `column.desc`.
    async fn select(&self, table: &str, filter: Filter<'_>, order: Option<&str>)
        -> Result<Vec<Value>>;
}
