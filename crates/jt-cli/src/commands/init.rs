//! Init command for writing a default config file.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::Config;
use crate::config::default_config_file;

/// Runs the init command, writing to `path` or the platform config location.
pub fn run<W: Write>(writer: &mut W, path: Option<&Path>, force: bool) -> Result<()> {
    let target: PathBuf = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_file().context("could not determine config directory")?,
    };

    if target.exists() && !force {
        bail!(
            "config already exists at {} (use --force to overwrite)",
            target.display()
        );
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&target, Config::default().to_toml())
        .with_context(|| format!("failed to write {}", target.display()))?;

    tracing::debug!(path = %target.display(), "wrote config");
    writeln!(writer, "Wrote config to {}", target.display())?;
    Ok(())
}
