use crate::cli::SummaryFormat;
use crate::output::{issue_lines, render_run};
use anyhow::Result;
use lectio_config::TranslationSource;
use lectio_pipeline::{InMemoryCorpusStore, PipelineConfig, RunReport, TranslationPipeline};
use std::path::Path;
use std::sync::Arc;

/// Code used when none is given: the upper-cased file stem.
pub fn default_code(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

/// Convert and validate without persisting. Succeeds only on a clean report.
pub async fn execute(
    path: &Path,
    code: Option<String>,
    details: bool,
    format: SummaryFormat,
) -> Result<bool> {
    let code = code.unwrap_or_else(|| default_code(path));
    let pipeline = TranslationPipeline::with_config(
        Arc::new(InMemoryCorpusStore::new()),
        PipelineConfig {
            pretty: false,
            dry_run: true,
        },
    )?;

    let report = pipeline.process(&TranslationSource::new(code, path)).await;
    let run = RunReport {
        translations: vec![report],
    };

    println!("{}", render_run(&run, format)?);
    for line in issue_lines(&run, details) {
        eprintln!("{}", line);
    }
    Ok(run.is_clean())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_defaults_to_upper_cased_stem() {
        assert_eq!(default_code(Path::new("raw/nlt_bible.json")), "NLT_BIBLE");
    }
}
