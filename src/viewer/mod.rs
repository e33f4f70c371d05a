pub mod details;
pub mod filter;
pub mod model;
pub mod store;
pub mod summary;

pub use details::{render_details, DetailSection};
pub use filter::{ResponseFilter, FILTER_ALL};
pub use model::{display_value, ResponseRecord};
pub use store::{ResponseStore, ViewerStats};
pub use summary::{
    question_catalog, summarize, ChoiceTally, Question, QuestionKind, QuestionSummary, SummaryBody,
};
