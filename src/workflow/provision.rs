//! First-run provisioning of the two external tool repositories.
//!
//! Each tool is a full git checkout expected at a fixed directory under the
//! tools root. There is no freshness check and no version pin: an existing
//! directory is taken as-is.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use log::info;

use crate::config::AppConfig;

pub const WAV2LIP_REPO_URL: &'static str = "https://github.com/Rudrabha/Wav2Lip.git";
pub const CODEFORMER_REPO_URL: &'static str = "https://github.com/sczhou/CodeFormer.git";

pub const WAV2LIP_DIR: &'static str = "Wav2Lip";
pub const CODEFORMER_DIR: &'static str = "CodeFormer";

/// Clone `url` into `target` unless the directory already exists.
/// Returns `true` when a clone was actually performed.
pub fn ensure_repo(git_bin: &str, url: &str, target: &Path) -> Result<bool> {
    if target.exists() {
        return Ok(false);
    }

    info!("Cloning {} into {}", url, target.display());
    let output = Command::new(git_bin)
        .arg("clone")
        .arg(url)
        .arg(target)
        .output()
        .context(format!("Failed to spawn {} to clone {}", git_bin, url))?;

    if !output.status.success() {
        return Err(anyhow!(
            "Cloning {} failed with status code {:?}: {}",
            url,
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    Ok(true)
}

/// Ensure both tool checkouts exist before the server accepts uploads.
pub fn provision_tools(config: &AppConfig) -> Result<()> {
    ensure_repo(&config.git_bin, WAV2LIP_REPO_URL, &config.wav2lip_dir())
        .context("Failed to provision the lip-sync tool")?;
    ensure_repo(&config.git_bin, CODEFORMER_REPO_URL, &config.codeformer_dir())
        .context("Failed to provision the enhancer tool")?;
    Ok(())
}
