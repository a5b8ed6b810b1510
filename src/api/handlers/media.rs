use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use log::{error, info};
use rocket::State;
use rocket::form::{Errors, Form, FromForm};
use rocket::fs::{NamedFile, TempFile};
use rocket::http::Header;
use rocket::serde::json::Json;
use rocket::{get, post};
use rocket_seek_stream::SeekStream;
use uuid::Uuid;

use crate::api::{AppError, AppResult};
use crate::common::{ENHANCED_OUTPUT_NAME, VALID_AUDIO_EXTENSIONS, VALID_VIDEO_EXTENSIONS};
use crate::config::AppConfig;
use crate::models::dto::{ProcessResponse, StageLog};
use crate::workflow::pipeline::{JobPaths, run_pipeline};

#[derive(FromForm, Debug)]
pub struct UploadForm<'r> {
    /// The face video the mouth motion is replaced in.
    #[field(name = "video")]
    pub video: TempFile<'r>,

    /// The driving audio track.
    #[field(name = "audio")]
    pub audio: TempFile<'r>,
}

/// Accept the video/audio pair, run both stages to completion and report the
/// result. The whole pipeline runs within the request; the response arrives
/// only once the final artifact exists (or a stage has failed).
#[post("/upload", data = "<form>")]
pub async fn upload(
    config: &State<AppConfig>,
    form: Result<Form<UploadForm<'_>>, Errors<'_>>,
) -> AppResult<Json<ProcessResponse>> {
    let mut inner_form = match form {
        Ok(form) => form.into_inner(),
        Err(errors) => {
            let error_chain = errors
                .iter()
                .map(|e| anyhow!(e.to_string()))
                .reduce(|acc, e| acc.context(e.to_string()));

            return match error_chain {
                Some(chain) => Err(chain.context("Failed to parse form").into()),
                None => Err(anyhow!("Failed to parse form with unknown error").into()),
            };
        }
    };

    let job_id = Uuid::new_v4();
    let paths = JobPaths::new(&config.work_dir, job_id);
    tokio::fs::create_dir_all(&paths.dir)
        .await
        .context("Failed to create job working directory")?;

    let video_path =
        save_upload(&mut inner_form.video, &paths.dir, VALID_VIDEO_EXTENSIONS).await?;
    let audio_path =
        save_upload(&mut inner_form.audio, &paths.dir, VALID_AUDIO_EXTENSIONS).await?;

    info!(job = &*job_id.to_string(); "Running lip-sync pipeline");
    let run = run_pipeline(config, &paths, &video_path, &audio_path)
        .await
        .map_err(|err| {
            error!("Pipeline failed at the {} stage: {:#}", err.stage(), err);
            AppError::from_stage(err)
        })?;

    Ok(Json(ProcessResponse {
        job_id: job_id.to_string(),
        preview_url: format!("/result/{}", job_id),
        download_url: format!("/download/{}", job_id),
        stages: run.stages.into_iter().map(StageLog::from).collect(),
    }))
}

/// Stream the enhanced video for inline playback (supports HTTP ranges).
#[get("/result/<job_id>")]
pub async fn result_video(
    config: &State<AppConfig>,
    job_id: &str,
) -> AppResult<SeekStream<'static>> {
    let path = job_artifact(config, job_id)?;
    let stream = SeekStream::from_path(&path).context(format!(
        "Failed to open enhanced video: {}",
        path.display()
    ))?;
    Ok(stream)
}

#[derive(Responder)]
pub struct DownloadResponse {
    file: NamedFile,
    disposition: Header<'static>,
}

/// Offer the enhanced video as an attachment under its fixed name.
#[get("/download/<job_id>")]
pub async fn download_video(
    config: &State<AppConfig>,
    job_id: &str,
) -> AppResult<DownloadResponse> {
    let path = job_artifact(config, job_id)?;
    let file = NamedFile::open(&path).await.context(format!(
        "Failed to open enhanced video: {}",
        path.display()
    ))?;
    Ok(DownloadResponse {
        file,
        disposition: Header::new(
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", ENHANCED_OUTPUT_NAME),
        ),
    })
}

/// Resolve a job id to its final artifact. The only success gate in the
/// whole system is this existence check.
fn job_artifact(config: &AppConfig, job_id: &str) -> Result<PathBuf, AppError> {
    let job_id = Uuid::parse_str(job_id)
        .map_err(|_| AppError::not_found(anyhow!("Unknown job: {}", job_id)))?;
    let path = JobPaths::new(&config.work_dir, job_id).enhanced();
    if !path.exists() {
        return Err(AppError::not_found(anyhow!(
            "No enhanced video exists for job {}",
            job_id
        )));
    }
    Ok(path)
}

async fn save_upload(
    file: &mut TempFile<'_>,
    dir: &Path,
    valid_extensions: &[&str],
) -> Result<PathBuf, AppError> {
    let filename = get_filename(file);
    let extension = get_extension(file)?;

    if !valid_extensions.contains(&extension.as_str()) {
        error!("Invalid file type");
        return Err(anyhow!("Invalid file type: {}", extension).into());
    }

    let path = dir.join(format!("{}.{}", filename, extension));
    file.move_copy_to(&path)
        .await
        .context(format!("Failed to save upload to {}", path.display()))?;

    info!("Saved upload '{}.{}'", filename, extension);
    Ok(path)
}

fn get_filename(file: &TempFile<'_>) -> String {
    file.name()
        .map(|name| name.to_string())
        .unwrap_or_else(|| "".to_string())
}

fn get_extension(file: &TempFile<'_>) -> Result<String> {
    match file.content_type() {
        Some(ct) => match ct.extension() {
            Some(ext) => Ok(ext.as_str().to_lowercase()),
            None => {
                error!("Failed to extract file extension.");
                bail!("Failed to extract file extension.")
            }
        },
        None => {
            error!("Failed to get content type.");
            bail!("Failed to get content type.")
        }
    }
}

pub fn generate_media_routes() -> Vec<rocket::Route> {
    routes![upload, result_video, download_video]
}
