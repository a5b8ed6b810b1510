//! Execution and outcome classification for one external tool invocation.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use log::info;
use thiserror::Error;
use tokio::process::Command;

/// One failed stage. The pipeline stops at the first of these; the captured
/// diagnostic text travels up to the HTTP response untouched.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Failed to launch the {stage} tool: {source}")]
    Launch {
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("The {stage} tool exited with status code {code}: {stderr}")]
    Failed {
        stage: &'static str,
        code: i32,
        stdout: String,
        stderr: String,
    },
    #[error("The {stage} tool did not finish within {limit:?} and was killed")]
    TimedOut {
        stage: &'static str,
        limit: Duration,
    },
    #[error("The {stage} tool exited successfully but wrote no file at {path}")]
    MissingArtifact {
        stage: &'static str,
        path: PathBuf,
    },
}

impl StageError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Launch { stage, .. }
            | Self::Failed { stage, .. }
            | Self::TimedOut { stage, .. }
            | Self::MissingArtifact { stage, .. } => stage,
        }
    }
}

/// Captured output of a stage that exited 0.
#[derive(Debug)]
pub struct StageOutput {
    pub stage: &'static str,
    pub stdout: String,
}

/// Run one external tool to completion, capturing stdout and stderr.
///
/// With a timeout set the child is killed once the limit elapses
/// (`kill_on_drop` reaps it when the output future is dropped).
pub async fn run_stage(
    stage: &'static str,
    mut command: Command,
    timeout: Option<Duration>,
) -> Result<StageOutput, StageError> {
    command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let wait = command.output();
    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, wait).await {
            Ok(result) => result,
            Err(_) => return Err(StageError::TimedOut { stage, limit }),
        },
        None => wait.await,
    }
    .map_err(|source| StageError::Launch { stage, source })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(StageError::Failed {
            stage,
            code: output.status.code().unwrap_or(-1),
            stdout,
            stderr,
        });
    }

    info!(stage = stage; "External tool finished");
    Ok(StageOutput { stage, stdout })
}
