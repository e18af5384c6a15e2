use anyhow::{anyhow, Context, Result};
use lectio_core::{AliasTable, Reference, Translation};
use std::path::Path;

/// Resolve `reference` against a canonical document on disk.
pub fn passage(corpus: &Path, reference: &str) -> Result<String> {
    let bytes = std::fs::read(corpus)
        .with_context(|| format!("Failed to read '{}'", corpus.display()))?;
    let code = crate::commands::validate::default_code(corpus);
    let translation = Translation::from_canonical_json(code, &bytes)
        .with_context(|| format!("'{}' is not a canonical document", corpus.display()))?;

    let reference = Reference::parse(reference, AliasTable::standard()?)?;
    translation
        .passage(&reference)
        .ok_or_else(|| anyhow!("{} not found in '{}'", reference, corpus.display()))
}

pub fn execute(corpus: &Path, reference: &str) -> Result<bool> {
    println!("{}", passage(corpus, reference)?);
    Ok(true)
}
