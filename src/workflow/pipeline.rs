//! The two-stage processing pipeline: lip-sync generation followed by face
//! enhancement. Strictly linear; the first failing stage aborts the run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;
use uuid::Uuid;

use crate::common::{ENHANCED_OUTPUT_NAME, LIP_SYNCED_OUTPUT_NAME};
use crate::config::AppConfig;
use crate::workflow::stage::{StageError, StageOutput, run_stage};

pub const STAGE_LIP_SYNC: &'static str = "lip-sync";
pub const STAGE_ENHANCE: &'static str = "enhance";

/// Filesystem layout of one processing job. Every run gets its own
/// UUID-named directory under the scratch root, so concurrent uploads never
/// overwrite each other's in-flight files.
#[derive(Debug, Clone)]
pub struct JobPaths {
    pub dir: PathBuf,
}

impl JobPaths {
    pub fn new(work_dir: &Path, job_id: Uuid) -> Self {
        Self {
            dir: work_dir.join(job_id.to_string()),
        }
    }

    /// The lip-synced intermediate produced by stage one.
    pub fn lip_synced(&self) -> PathBuf {
        self.dir.join(LIP_SYNCED_OUTPUT_NAME)
    }

    /// The enhanced final artifact produced by stage two.
    pub fn enhanced(&self) -> PathBuf {
        self.dir.join(ENHANCED_OUTPUT_NAME)
    }
}

/// A completed run: both stages exited 0 and the final artifact exists.
#[derive(Debug)]
pub struct PipelineRun {
    pub stages: Vec<StageOutput>,
    pub final_path: PathBuf,
}

/// Run both stages in order. A stage failure short-circuits: stage two is
/// never invoked after a stage-one failure, and presentation never happens
/// after a stage-two failure.
pub async fn run_pipeline(
    config: &AppConfig,
    paths: &JobPaths,
    video: &Path,
    audio: &Path,
) -> Result<PipelineRun, StageError> {
    let timeout = config.stage_timeout();
    let lip_synced = paths.lip_synced();
    let enhanced = paths.enhanced();

    let mut stages = Vec::with_capacity(2);

    stages.push(run_lip_sync(config, video, audio, &lip_synced, timeout).await?);
    expect_artifact(STAGE_LIP_SYNC, &lip_synced)?;

    stages.push(run_enhance(config, &lip_synced, &enhanced, timeout).await?);
    expect_artifact(STAGE_ENHANCE, &enhanced)?;

    Ok(PipelineRun {
        stages,
        final_path: enhanced,
    })
}

/// A zero exit status alone does not prove the tool wrote its output; the
/// file must exist before the next stage may consume it.
fn expect_artifact(stage: &'static str, path: &Path) -> Result<(), StageError> {
    if path.exists() {
        Ok(())
    } else {
        Err(StageError::MissingArtifact {
            stage,
            path: path.to_path_buf(),
        })
    }
}

/// Invoke the Wav2Lip inference entry point.
async fn run_lip_sync(
    config: &AppConfig,
    video: &Path,
    audio: &Path,
    outfile: &Path,
    timeout: Option<Duration>,
) -> Result<StageOutput, StageError> {
    let tool_dir = config.wav2lip_dir();

    let mut command = Command::new(&config.python_bin);
    command
        .arg(tool_dir.join("inference.py"))
        .arg("--checkpoint_path")
        .arg(tool_dir.join("checkpoints").join("wav2lip.pth"))
        .arg("--face")
        .arg(video)
        .arg("--audio")
        .arg(audio)
        .arg("--outfile")
        .arg(outfile);

    run_stage(STAGE_LIP_SYNC, command, timeout).await
}

/// Invoke the CodeFormer inference entry point on stage one's output.
async fn run_enhance(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    timeout: Option<Duration>,
) -> Result<StageOutput, StageError> {
    let tool_dir = config.codeformer_dir();

    let mut command = Command::new(&config.python_bin);
    command
        .arg(tool_dir.join("inference_codeformer.py"))
        .arg("--input_path")
        .arg(input)
        .arg("--output_path")
        .arg(output)
        .arg("--model_path")
        .arg(tool_dir.join("checkpoints").join("codeformer.pth"));

    run_stage(STAGE_ENHANCE, command, timeout).await
}
