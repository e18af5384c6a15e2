use crate::cli::AliasFormat;
use anyhow::{Context, Result};
use lectio_core::AliasTable;
use std::path::Path;
use tracing::info;

/// Render the standard alias table.
pub fn render(format: AliasFormat) -> Result<String> {
    let table = AliasTable::standard()?;
    let rendered = match format {
        AliasFormat::Js => table.to_js_source(),
        AliasFormat::Json => {
            let mut json = serde_json::to_string_pretty(&table.export())?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

pub fn execute(format: AliasFormat, output: Option<&Path>) -> Result<bool> {
    let rendered = render(format)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!("Wrote alias export to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(true)
}
