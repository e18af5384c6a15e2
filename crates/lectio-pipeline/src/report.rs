//! Run reports
//!
//! What a caller needs to decide whether to intervene: the state each
//! translation reached, its size, and every warning and violation recorded.

use lectio_convert::SourceShape;
use lectio_core::{Translation, Violation, Warning};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Lifecycle of one translation through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationState {
    Unloaded,
    Loaded,
    Converted,
    Validated,
    Persisted,
    Failed,
}

impl fmt::Display for TranslationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unloaded => "unloaded",
            Self::Loaded => "loaded",
            Self::Converted => "converted",
            Self::Validated => "validated",
            Self::Persisted => "persisted",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Outcome for one translation.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationReport {
    pub code: String,
    pub state: TranslationState,
    pub shape: Option<SourceShape>,
    pub books: usize,
    pub chapters: usize,
    pub verses: usize,
    pub warnings: Vec<Warning>,
    pub violations: Vec<Violation>,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

impl TranslationReport {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            state: TranslationState::Unloaded,
            shape: None,
            books: 0,
            chapters: 0,
            verses: 0,
            warnings: Vec::new(),
            violations: Vec::new(),
            output: None,
            error: None,
        }
    }

    pub(crate) fn advance(&mut self, state: TranslationState) {
        tracing::debug!("{}: {} -> {}", self.code, self.state, state);
        self.state = state;
    }

    pub(crate) fn record_counts(&mut self, translation: &Translation) {
        self.books = translation.books.len();
        self.chapters = translation.chapter_count();
        self.verses = translation.verse_count();
    }

    pub fn is_failed(&self) -> bool {
        self.state == TranslationState::Failed
    }

    /// Warnings plus violations.
    pub fn issue_count(&self) -> usize {
        self.warnings.len() + self.violations.len()
    }
}

/// Outcome for a whole run, one entry per translation in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub translations: Vec<TranslationReport>,
}

impl RunReport {
    pub fn failed_count(&self) -> usize {
        self.translations.iter().filter(|t| t.is_failed()).count()
    }

    pub fn issue_count(&self) -> usize {
        self.translations.iter().map(TranslationReport::issue_count).sum()
    }

    /// No failures, and no warnings or violations anywhere.
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0 && self.issue_count() == 0
    }

    pub fn get(&self, code: &str) -> Option<&TranslationReport> {
        self.translations.iter().find(|t| t.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_report_starts_unloaded_and_clean() {
        let report = TranslationReport::new("KJV");
        assert_eq!(report.state, TranslationState::Unloaded);
        assert_eq!(report.issue_count(), 0);
        assert!(!report.is_failed());
    }

    #[test]
    fn run_report_aggregates_translations() {
        let mut failed = TranslationReport::new("ASV");
        failed.state = TranslationState::Failed;
        let mut noisy = TranslationReport::new("NLT");
        noisy.warnings.push(Warning::MissingBook {
            book: "Jude".into(),
        });

        let run = RunReport {
            translations: vec![failed, noisy],
        };
        assert_eq!(run.failed_count(), 1);
        assert_eq!(run.issue_count(), 1);
        assert!(!run.is_clean());
        assert!(run.get("NLT").is_some());
    }

    #[test]
    fn state_serializes_in_snake_case() {
        let json = serde_json::to_string(&TranslationState::Persisted).unwrap();
        assert_eq!(json, "\"persisted\"");
    }
}
