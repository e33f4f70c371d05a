pub mod answers;
pub mod draft;
pub mod schema;
pub mod session;
pub mod submit;
pub mod validate;

pub use answers::{AnswerMap, AnswerValue};
pub use draft::{DraftRecord, DraftStore};
pub use schema::{survey_pages, AgeGroup, FieldDescriptor, FieldKind, PageSchema};
pub use session::{AdvanceOutcome, SurveySession};
pub use submit::{build_response_record, submit_survey, RESPONSE_TABLE};
pub use validate::{validate_page, FieldError, ValidationReport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Failed to serialize draft: {0}")]
    DraftEncode(#[source] serde_json::Error),
    #[error("Failed to write draft: {0}")]
    DraftIo(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SurveyError>;
