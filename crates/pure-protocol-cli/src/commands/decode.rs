//! Decode a protocol JSON file.

use std::path::Path;

use anyhow::{Context, Result};

use pure_protocol::RegistryConfig;

/// Execute decode command.
pub async fn execute(file: &Path, supertype: &str, exclude: Vec<String>, config: &RegistryConfig) -> Result<()> {
    let canonical = decode_file(file, supertype, exclude, config).await?;
    println!("{}", canonical);
    Ok(())
}

/// Decode `file` as a `supertype` value and re-encode it
pub async fn decode_file(
    file: &Path,
    supertype: &str,
    exclude: Vec<String>,
    config: &RegistryConfig,
) -> Result<String> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mapper = super::mapper(config, exclude)?;
    let target = mapper
        .supertype_named(supertype)
        .with_context(|| format!("Unknown supertype: {}", supertype))?;

    let value = mapper
        .from_str(target, &content)
        .with_context(|| format!("Failed to decode {} as {}", file.display(), supertype))?;
    tracing::debug!("Decoded {} as {}", file.display(), value.variant_name());

    Ok(mapper.to_string_pretty(&*value)?)
}
