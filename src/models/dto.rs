use serde::Serialize;

use crate::workflow::stage::StageOutput;

/// Per-stage diagnostic text shown to the user on success.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageLog {
    pub stage: &'static str,
    pub stdout: String,
}

impl From<StageOutput> for StageLog {
    fn from(output: StageOutput) -> Self {
        Self {
            stage: output.stage,
            stdout: output.stdout,
        }
    }
}

/// Response to a completed upload: where to preview and download the
/// enhanced video, plus what each tool printed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub job_id: String,
    pub preview_url: String,
    pub download_url: String,
    pub stages: Vec<StageLog>,
}
