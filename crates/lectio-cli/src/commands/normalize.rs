use crate::cli::SummaryFormat;
use crate::output::{issue_lines, render_run, run_succeeded};
use anyhow::{bail, Context, Result};
use lectio_config::{NormalizerConfig, TranslationSource};
use lectio_pipeline::{FileCorpusStore, PipelineConfig, TranslationPipeline};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "lectio.toml";

/// Options for the `normalize` command
#[derive(Debug, Clone, Default)]
pub struct NormalizeArgs {
    pub config: Option<PathBuf>,
    pub code: Option<String>,
    pub source: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub strict: bool,
    pub compact: bool,
    pub format: SummaryFormat,
}

/// Build the run config from either an ad hoc source or a config file.
pub fn resolve_config(args: &NormalizeArgs) -> Result<NormalizerConfig> {
    let mut config = match (&args.code, &args.source) {
        (Some(code), Some(source)) => NormalizerConfig::single(
            TranslationSource::new(code.clone(), source.clone()),
            args.output_dir.clone().unwrap_or_else(|| PathBuf::from("data")),
        ),
        _ => {
            let path = match &args.config {
                Some(path) => path.clone(),
                None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                    PathBuf::from(DEFAULT_CONFIG_FILE)
                }
                None => bail!(
                    "nothing to normalize: pass --config, --code with --source, or create {}",
                    DEFAULT_CONFIG_FILE
                ),
            };
            NormalizerConfig::load(&path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?
        }
    };

    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if args.strict {
        config.strict = true;
    }
    if args.compact {
        config.pretty = false;
    }
    Ok(config)
}

pub async fn execute(args: NormalizeArgs) -> Result<bool> {
    let config = resolve_config(&args)?;
    info!(
        "Normalizing {} translations into {}",
        config.translations.len(),
        config.output_dir.display()
    );

    let store = Arc::new(FileCorpusStore::new(&config.output_dir));
    let pipeline = TranslationPipeline::with_config(store, PipelineConfig::from(&config))?;
    let run = pipeline.run_all(&config.translations).await;

    println!("{}", render_run(&run, args.format)?);
    for line in issue_lines(&run, true) {
        eprintln!("{}", line);
    }
    Ok(run_succeeded(&run, config.strict))
}
