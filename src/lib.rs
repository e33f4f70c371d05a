//! Holy Trinity parish survey: the multi-page survey engine (navigation,
//! validation, draft persistence, submission) and the response viewer
//! (fetch, filter, summarize). All durable storage goes through the
//! [`sink::DataSink`] contract; Supabase is the hosted implementation.

pub mod config;
pub mod sink;
pub mod survey;
pub mod viewer;

pub use config::AppConfig;
pub use sink::{DataSink, MemorySink, SinkError, SupabaseSink};
pub use survey::{AdvanceOutcome, AnswerMap, AnswerValue, DraftStore, SurveySession};
pub use viewer::{ResponseFilter, ResponseRecord, ResponseStore};
