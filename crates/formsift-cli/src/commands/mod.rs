//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod embed;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use formsift_core::FormsiftConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("formsift")
        .join("config.json")
}

/// Config file in effect: the explicit path, otherwise the default location.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration from an explicit path, the default path, or defaults.
///
/// An explicit path must exist; the default path is optional.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<FormsiftConfig> {
    if let Some(path) = explicit {
        return FormsiftConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path, e));
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(FormsiftConfig::from_file(&path)?)
    } else {
        Ok(FormsiftConfig::default())
    }
}

/// Write command output to a file or stdout.
pub fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!(
                "{} Output written to {}",
                console::style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", content),
    }
    Ok(())
}
