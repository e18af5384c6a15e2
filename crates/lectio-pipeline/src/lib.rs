//! Pipeline Orchestration Layer
//!
//! This crate sequences the normalization of one or more translations.
//!
//! ## Architecture
//!
//! Every translation moves through the same states:
//!
//! ```text
//! Unloaded ─load─> Loaded ─convert─> Converted ─validate─> Validated ─persist─> Persisted
//!     └──────────────┴── I/O error or unknown shape ──> Failed
//! ```
//!
//! 1. **Load**: read the source document (BOM tolerated) and parse it as JSON
//! 2. **Convert**: detect the source shape and run exactly one converter
//! 3. **Validate**: check against the canonical schema, logging every violation
//! 4. **Persist**: write canonical JSON through the injected [`CorpusStore`]
//!
//! Validation problems never stop a run: a best-effort corpus is still written
//! and the report carries the warning count. A failure aborts only the
//! translation it happened in.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lectio_pipeline::{FileCorpusStore, TranslationPipeline};
//!
//! let store = Arc::new(FileCorpusStore::new(&config.output_dir));
//! let pipeline = TranslationPipeline::new(store)?;
//! let report = pipeline.run_all(&config.translations).await;
//! ```

pub mod report;
pub mod store;
pub mod translation_pipeline;

pub use report::{RunReport, TranslationReport, TranslationState};
pub use store::{CorpusStore, FileCorpusStore, InMemoryCorpusStore};
pub use translation_pipeline::*;
