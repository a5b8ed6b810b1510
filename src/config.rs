use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::workflow::provision::{CODEFORMER_DIR, WAV2LIP_DIR};

/// Runtime configuration, read from `LIPSTUDIO_`-prefixed environment
/// variables (a `.env` file is honored). Every field has a default so the
/// server starts with no configuration at all.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory the two tool repositories are cloned into.
    #[serde(default = "default_tools_root")]
    pub tools_root: PathBuf,
    /// Scratch directory holding one subdirectory per processing job.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
    /// Interpreter used to run the tools' inference entry points.
    #[serde(default = "default_python_bin")]
    pub python_bin: String,
    /// Binary used to clone the tool repositories on first run.
    #[serde(default = "default_git_bin")]
    pub git_bin: String,
    /// Kill an external stage that runs longer than this many seconds.
    /// Unset means no limit, and a hung tool hangs the request.
    #[serde(default)]
    pub stage_timeout_secs: Option<u64>,
}

fn default_tools_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_work_dir() -> PathBuf {
    PathBuf::from("temp")
}

fn default_python_bin() -> String {
    "python".to_string()
}

fn default_git_bin() -> String {
    "git".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tools_root: default_tools_root(),
            work_dir: default_work_dir(),
            python_bin: default_python_bin(),
            git_bin: default_git_bin(),
            stage_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        envy::prefixed("LIPSTUDIO_")
            .from_env()
            .context("Failed to read configuration from environment")
    }

    pub fn wav2lip_dir(&self) -> PathBuf {
        self.tools_root.join(WAV2LIP_DIR)
    }

    pub fn codeformer_dir(&self) -> PathBuf {
        self.tools_root.join(CODEFORMER_DIR)
    }

    pub fn stage_timeout(&self) -> Option<Duration> {
        self.stage_timeout_secs.map(Duration::from_secs)
    }
}
