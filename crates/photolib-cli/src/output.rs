//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use photolib_core::CatalogEntry;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a list of catalog entries
    pub fn print_entries(&self, entries: &[CatalogEntry], empty_message: &str) {
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("{}", empty_message);
                    return;
                }
                for entry in entries {
                    println!(
                        "{}  {}",
                        entry.last_modified.format("%Y-%m-%d %H:%M"),
                        entry.key
                    );
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(entries).unwrap_or_default());
            }
            OutputFormat::Quiet => {
                for entry in entries {
                    println!("{}", entry.key);
                }
            }
        }
    }

    /// Print a single catalog entry with its resolved URL
    pub fn print_entry(&self, entry: &CatalogEntry, url: &str) {
        match self.format {
            OutputFormat::Human => {
                println!("Key:      {}", entry.key);
                println!("Modified: {}", entry.last_modified.format("%Y-%m-%d %H:%M"));
                println!("URL:      {}", url);
            }
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "key": entry.key,
                    "last_modified": entry.last_modified,
                    "url": url,
                });
                println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
            }
            OutputFormat::Quiet => println!("{}", url),
        }
    }

    /// Print a success message (suppressed in quiet mode)
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", message),
            OutputFormat::Json => {
                let value = serde_json::json!({ "status": "ok", "message": message });
                println!("{}", value);
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning message (suppressed in quiet mode)
    pub fn warning(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("{}", message),
            OutputFormat::Json => {
                let value = serde_json::json!({ "status": "warning", "message": message });
                eprintln!("{}", value);
            }
            OutputFormat::Quiet => {}
        }
    }
}
