//! Command handlers

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use photolib_core::library::{EMPTY_LIBRARY_MSG, NO_SELECTION_MSG, UPLOAD_FAILED_MSG, UPLOAD_OK_MSG};
use photolib_core::{normalize_key, CatalogGateway, Config, ImageFormat, Library, PendingUpload};

use crate::output::{Output, OutputFormat};

/// List the catalog, newest first
pub async fn list<G: CatalogGateway>(library: &Library<G>, output: &Output) -> Result<()> {
    let entries = library.refresh().await;
    output.print_entries(&entries, EMPTY_LIBRARY_MSG);
    Ok(())
}

/// Upload local image files as one batch
pub async fn upload<G: CatalogGateway>(
    library: &Library<G>,
    files: Vec<PathBuf>,
    output: &Output,
) -> Result<()> {
    if files.is_empty() {
        output.warning(NO_SELECTION_MSG);
        return Ok(());
    }

    let mut batch = Vec::with_capacity(files.len());
    for path in &files {
        batch.push(read_upload(path)?);
    }

    // Seed first so duplicate detection sees the remote catalog.
    library.refresh().await;

    match library.upload(batch).await {
        Ok(outcome) => {
            output.success(UPLOAD_OK_MSG);
            if outcome.skipped > 0 {
                output.warning(&format!(
                    "{} file(s) already in the library were skipped.",
                    outcome.skipped
                ));
            }
            Ok(())
        }
        Err(err) => {
            output.warning(UPLOAD_FAILED_MSG);
            Err(err).context("Upload batch failed")
        }
    }
}

/// Delete an entry (optimistic; remote delete is best-effort)
pub async fn delete<G: CatalogGateway>(
    library: &Library<G>,
    key: String,
    output: &Output,
) -> Result<()> {
    library.refresh().await;
    let key = normalize_key(&library.config().prefix, &key);
    let removed = library.remove(&key).await;

    if removed {
        output.success(&format!("Deleted {}", key));
    } else {
        output.warning(&format!("{} was not in the library", key));
    }
    Ok(())
}

/// Fetch an entry's bytes to a file or stdout
pub async fn fetch<G: CatalogGateway>(
    library: &Library<G>,
    key: String,
    out_path: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let bytes = library
        .fetch_content(&key)
        .await
        .with_context(|| format!("Failed to fetch '{}'", key))?;

    match out_path {
        Some(path) => {
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write {:?}", path))?;
            output.success(&format!("Wrote {} bytes to {:?}", bytes.len(), path));
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&bytes)?;
        }
    }
    Ok(())
}

/// Print the public URL for an entry
pub async fn url<G: CatalogGateway>(
    library: &Library<G>,
    key: String,
    output: &Output,
) -> Result<()> {
    let key = normalize_key(&library.config().prefix, &key);
    let entries = library.refresh().await;
    let entry = entries
        .into_iter()
        .find(|e| e.key == key)
        .ok_or_else(|| anyhow::anyhow!("Entry not found: {}", key))?;

    let url = library.url_for(&entry)?;
    output.print_entry(&entry, &url);
    Ok(())
}

/// Pick and print a random entry
pub async fn random<G: CatalogGateway>(library: &Library<G>, output: &Output) -> Result<()> {
    let entry = library
        .random_entry()
        .await
        .context("Failed to pick a random image")?;
    let url = library.url_for(&entry)?;
    output.print_entry(&entry, &url);
    Ok(())
}

/// Show configuration and catalog summary
pub async fn status<G: CatalogGateway>(library: &Library<G>, output: &Output) -> Result<()> {
    let entries = library.refresh().await;
    let config = library.config();

    output.success(&format!(
        "bucket: {} | region: {} | prefix: {} | entries: {}",
        config.bucket,
        config.region,
        config.prefix,
        entries.len()
    ));
    Ok(())
}

/// Show the current configuration
pub fn config_show(config: &Config, output: &Output) -> Result<()> {
    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "bucket": config.bucket,
                    "region": config.region,
                    "prefix": config.prefix,
                    "endpoint_url": config.endpoint_url,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.bucket);
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  bucket:       {}", config.bucket);
            println!("  region:       {}", config.region);
            println!("  prefix:       {}", config.prefix);
            println!(
                "  endpoint_url: {}",
                config.endpoint_url.as_deref().unwrap_or("(not set)")
            );
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value and save it
pub fn config_set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "bucket" => config.bucket = value.clone(),
        "region" => config.region = value.clone(),
        "prefix" => config.prefix = value.clone(),
        "endpoint_url" => {
            config.endpoint_url = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.clone())
            };
        }
        other => bail!(
            "Unknown configuration key '{}'. Valid keys: bucket, region, prefix, endpoint_url",
            other
        ),
    }

    config.save().context("Failed to save configuration")?;
    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

/// Print the config file path
pub fn config_path(output: &Output) -> Result<()> {
    output.success(&format!("{}", Config::config_file_path().display()));
    Ok(())
}

/// Read a local file into a validated pending upload
fn read_upload(path: &Path) -> Result<PendingUpload> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name: {:?}", path))?
        .to_string();

    let Some(format) = ImageFormat::from_file_name(&file_name) else {
        bail!("'{}': Only JPG and PNG files are allowed.", file_name);
    };

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;

    Ok(PendingUpload::new(file_name, format.content_type(), bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_upload_rejects_unknown_extension() {
        let dir = std::env::temp_dir();
        let path = dir.join("photolib-test.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = read_upload(&path).unwrap_err();
        assert!(err.to_string().contains("Only JPG and PNG files are allowed."));

        let _ = std::fs::remove_file(&path);
    }
}
