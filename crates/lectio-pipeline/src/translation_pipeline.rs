//! Translation Pipeline Orchestrator
//!
//! Runs one translation through load, convert, validate and persist, and
//! records the outcome in a [`TranslationReport`]. Each phase is timed and
//! logged; a failing phase marks the translation failed and stops it there.

use crate::report::{RunReport, TranslationReport, TranslationState};
use crate::store::CorpusStore;
use anyhow::{Context, Result};
use lectio_config::{NormalizerConfig, TranslationSource};
use lectio_convert::convert_document;
use lectio_core::{validate_against, AliasTable, CorpusError};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Configuration for pipeline behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Pretty-print canonical JSON with two-space indentation
    pub pretty: bool,
    /// Stop after validation; nothing is written
    pub dry_run: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            dry_run: false,
        }
    }
}

impl From<&NormalizerConfig> for PipelineConfig {
    fn from(config: &NormalizerConfig) -> Self {
        Self {
            pretty: config.pretty,
            dry_run: false,
        }
    }
}

/// The normalization orchestrator
///
/// ```text
/// TranslationPipeline
///   ├─> tokio::fs + serde_json   (Phase 1: load)
///   ├─> lectio-convert           (Phase 2: detect + convert)
///   ├─> lectio-core::validate    (Phase 3: schema checks)
///   └─> CorpusStore              (Phase 4: persist)
/// ```
pub struct TranslationPipeline {
    aliases: &'static AliasTable,
    store: Arc<dyn CorpusStore>,
    config: PipelineConfig,
}

impl TranslationPipeline {
    /// Create a pipeline with the default config.
    pub fn new(store: Arc<dyn CorpusStore>) -> Result<Self> {
        Self::with_config(store, PipelineConfig::default())
    }

    /// Create a pipeline with a custom config.
    pub fn with_config(store: Arc<dyn CorpusStore>, config: PipelineConfig) -> Result<Self> {
        let aliases = AliasTable::standard().context("Failed to build the alias table")?;
        Ok(Self {
            aliases,
            store,
            config,
        })
    }

    /// Process every translation in order.
    ///
    /// A failed translation is recorded and the run moves on to the next one.
    pub async fn run_all(&self, sources: &[TranslationSource]) -> RunReport {
        let start = Instant::now();
        let mut run = RunReport::default();
        for source in sources {
            run.translations.push(self.process(source).await);
        }
        info!(
            "Processed {} translations in {}ms ({} failed, {} issues)",
            run.translations.len(),
            start.elapsed().as_millis(),
            run.failed_count(),
            run.issue_count()
        );
        run
    }

    /// Process a single translation.
    ///
    /// Never returns an error: failures end up in the report with state
    /// [`TranslationState::Failed`] and the error chain in `error`.
    pub async fn process(&self, source: &TranslationSource) -> TranslationReport {
        let mut report = TranslationReport::new(&source.code);
        if let Err(e) = self.run_phases(source, &mut report).await {
            error!("{}: failed after reaching '{}': {:#}", source.code, report.state, e);
            report.error = Some(format!("{:#}", e));
            report.advance(TranslationState::Failed);
        }
        report
    }

    async fn run_phases(
        &self,
        source: &TranslationSource,
        report: &mut TranslationReport,
    ) -> Result<()> {
        let start = Instant::now();
        let code = source.code.as_str();
        info!("Normalizing {} from {}", code, source.source.display());

        // Phase 1: Load
        let phase1_start = Instant::now();
        let document = load_document(&source.source).await?;
        report.advance(TranslationState::Loaded);
        let phase1_duration = phase1_start.elapsed().as_millis() as u64;

        // Phase 2: Detect and convert
        let phase2_start = Instant::now();
        let (shape, conversion) = convert_document(code, &document, self.aliases)
            .with_context(|| format!("Phase 2: Failed to convert '{}'", source.source.display()))?;
        drop(document);
        report.shape = Some(shape);
        report.record_counts(&conversion.translation);
        for warning in &conversion.warnings {
            warn!("{}: {}", code, warning);
        }
        report.warnings = conversion.warnings;
        let translation = conversion.translation;
        report.advance(TranslationState::Converted);
        let phase2_duration = phase2_start.elapsed().as_millis() as u64;
        debug!(
            "Phase 2: {} source gave {} books, {} warnings",
            shape,
            report.books,
            report.warnings.len()
        );

        // Phase 3: Validate
        let phase3_start = Instant::now();
        let violations = validate_against(&translation, self.aliases.books());
        for violation in &violations {
            warn!("{}: {}", code, violation);
        }
        report.violations = violations;
        report.advance(TranslationState::Validated);
        let phase3_duration = phase3_start.elapsed().as_millis() as u64;

        if self.config.dry_run {
            debug!("Phase 4: Persist skipped (dry run)");
            info!(
                "Validated {} in {}ms: {} books, {} verses, {} issues",
                code,
                start.elapsed().as_millis(),
                report.books,
                report.verses,
                report.issue_count()
            );
            return Ok(());
        }

        // Phase 4: Persist
        let phase4_start = Instant::now();
        let bytes = translation
            .to_canonical_json(self.config.pretty)
            .context("Phase 4: Failed to serialize canonical JSON")?;
        let written = self
            .store
            .persist(&source.output_file(), &bytes)
            .await
            .with_context(|| format!("Phase 4: Failed to persist {}", code))?;
        report.output = Some(written);
        report.advance(TranslationState::Persisted);
        let phase4_duration = phase4_start.elapsed().as_millis() as u64;

        info!(
            "Normalized {} in {}ms (P1:{}, P2:{}, P3:{}, P4:{}): {} books, {} verses, {} issues",
            code,
            start.elapsed().as_millis(),
            phase1_duration,
            phase2_duration,
            phase3_duration,
            phase4_duration,
            report.books,
            report.verses,
            report.issue_count()
        );
        Ok(())
    }
}

/// Phase 1: read and parse a source document, tolerating a leading UTF-8 BOM.
async fn load_document(path: &Path) -> Result<Value> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CorpusError::unreadable(path, e))?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    let document = serde_json::from_slice(body).map_err(|e| CorpusError::unreadable(path, e))?;
    debug!("Phase 1: Loaded {} bytes from {}", bytes.len(), path.display());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryCorpusStore;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[tokio::test]
    async fn test_process_reaches_persisted() {
        let file = source_file(br#"{"Genesis": {"1": {"1": "In the beginning"}}}"#);
        let store = Arc::new(InMemoryCorpusStore::new());
        let pipeline = TranslationPipeline::new(store.clone()).unwrap();

        let report = pipeline
            .process(&TranslationSource::new("NLT", file.path()))
            .await;

        assert_eq!(report.state, TranslationState::Persisted);
        assert_eq!(report.books, 1);
        assert_eq!(report.verses, 1);
        assert!(report.error.is_none());
        assert!(store.get("nlt.json").is_some());
    }

    #[tokio::test]
    async fn test_bom_is_stripped() {
        let mut content = UTF8_BOM.to_vec();
        content.extend_from_slice(br#"[{"name": "Jude", "chapters": [["Jude, a servant"]]}]"#);
        let file = source_file(&content);
        let pipeline = TranslationPipeline::new(Arc::new(InMemoryCorpusStore::new())).unwrap();

        let report = pipeline
            .process(&TranslationSource::new("WEB", file.path()))
            .await;

        assert_eq!(report.state, TranslationState::Persisted);
        assert_eq!(report.shape, Some(lectio_convert::SourceShape::FetchResult));
    }

    #[tokio::test]
    async fn test_invalid_json_fails_as_unreadable() {
        let file = source_file(b"{not json");
        let pipeline = TranslationPipeline::new(Arc::new(InMemoryCorpusStore::new())).unwrap();

        let report = pipeline
            .process(&TranslationSource::new("BAD", file.path()))
            .await;

        assert!(report.is_failed());
        assert!(report.error.unwrap().contains("is unreadable"));
    }

    #[tokio::test]
    async fn test_dry_run_stops_at_validated() {
        let file = source_file(
            br#"{"resultset": {"row": [{"field": [1001001, 1, 1, 1, "In the beginning"]}]}}"#,
        );
        let store = Arc::new(InMemoryCorpusStore::new());
        let pipeline = TranslationPipeline::with_config(
            store.clone(),
            PipelineConfig {
                pretty: false,
                dry_run: true,
            },
        )
        .unwrap();

        let report = pipeline
            .process(&TranslationSource::new("ASV", file.path()))
            .await;

        assert_eq!(report.state, TranslationState::Validated);
        assert!(report.output.is_none());
        assert!(!report.violations.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_config_follows_normalizer_config() {
        let normalizer = NormalizerConfig {
            pretty: false,
            ..NormalizerConfig::default()
        };
        let config = PipelineConfig::from(&normalizer);
        assert!(!config.pretty);
        assert!(!config.dry_run);
    }
}
