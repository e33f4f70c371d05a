use std::sync::Arc;

use log::{info, warn};

use crate::sink::DataSink;
use crate::survey::answers::{AnswerMap, AnswerValue};
use crate::survey::draft::{DraftRecord, DraftStore};
use crate::survey::schema::{survey_pages, AgeGroup, PageSchema};
use crate::survey::submit;
use crate::survey::validate::{validate_page, ValidationReport};

/// Result of an `advance()` attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Validation failed; the page index did not change and the offending
    /// fields carry their error annotations.
    Blocked(ValidationReport),
    /// Moved forward to the given page index.
    Moved(usize),
    /// Arrived at the terminal page; submission has been attempted.
    Completed,
}

/// The whole mutable state of one survey sitting: current page, accumulated
/// answers, draft persistence and the submission flag. Owned explicitly and
/// passed around, never ambient, so the state machine tests without any
/// rendering surface.
pub struct SurveySession {
    pages: &'static [PageSchema],
    current: usize,
    answers: AnswerMap,
    draft: DraftStore,
    sink: Arc<dyn DataSink>,
    submitted: bool,
}

impl SurveySession {
    /// Starts a session, restoring page index and answers from the persisted
    /// draft when one exists.
    pub fn resume(draft: DraftStore, sink: Arc<dyn DataSink>) -> Self {
        let pages = survey_pages();
        let stored = draft.load();
        let current = stored.page.min(pages.len() - 1);

        if !stored.answers.is_empty() {
            info!(
                "Restored draft with {} answer(s) at page {}",
                stored.answers.len(),
                current
            );
        }

        Self {
            pages,
            current,
            answers: stored.answers,
            draft,
            sink,
            submitted: false,
        }
    }

    pub fn page_index(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> &'static PageSchema {
        &self.pages[self.current]
    }

    pub fn is_terminal(&self) -> bool {
        self.current == self.pages.len() - 1
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Progress through the survey as a percentage of the page range.
    pub fn progress_percent(&self) -> f64 {
        self.current as f64 / (self.pages.len() - 1) as f64 * 100.0
    }

    /// Which age-conditional section is visible right now. Exactly one when an
    /// age bracket is stored, none otherwise.
    pub fn visible_section(&self) -> Option<AgeGroup> {
        self.answers.text("age_group").and_then(AgeGroup::from_value)
    }

    /// Records one field change and autosaves the draft, mirroring the
    /// change-listener autosave of the original form. A failed save is logged
    /// and ignored; the in-memory answer always wins.
    pub fn record_answer(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) {
        self.answers.set(key, value);
        self.persist();
    }

    /// Validates the current page and, if it passes, moves forward one page.
    /// Arrival on the terminal page triggers submission exactly once; viewing
    /// it again (retreat and re-advance) never re-submits.
    pub async fn advance(&mut self) -> AdvanceOutcome {
        let report = validate_page(self.current_page(), &self.answers, self.visible_section());
        if !report.is_valid() {
            return AdvanceOutcome::Blocked(report);
        }

        if self.is_terminal() {
            return AdvanceOutcome::Completed;
        }

        self.current += 1;
        self.persist();

        if self.is_terminal() {
            self.submit_once().await;
            AdvanceOutcome::Completed
        } else {
            AdvanceOutcome::Moved(self.current)
        }
    }

    /// Moves back one page. Always permitted, bounded at the first page.
    pub fn retreat(&mut self) -> usize {
        if self.current > 0 {
            self.current -= 1;
            self.persist();
        }
        self.current
    }

    /// Drops the draft and all collected answers, returning to the first page.
    pub fn restart(&mut self) {
        self.draft.clear();
        self.answers = AnswerMap::new();
        self.current = 0;
        self.submitted = false;
        info!("Survey restarted, draft cleared");
    }

    async fn submit_once(&mut self) {
        if self.submitted {
            return;
        }
        self.submitted = true;

        match submit::submit_survey(self.sink.as_ref(), &self.answers).await {
            Ok(()) => {
                // A reload after this point starts a fresh session.
                self.draft.clear();
                submit::celebrate();
            }
            Err(e) => {
                // Deliberately silent toward the respondent: the thank-you
                // page stays up even though nothing was stored.
                submit::log_submit_failure(&e);
            }
        }
    }

    fn persist(&self) {
        let record = DraftRecord {
            page: self.current,
            answers: self.answers.clone(),
        };
        if let Err(e) = self.draft.save(&record) {
            warn!("Failed to autosave draft: {}", e);
        }
    }
}
