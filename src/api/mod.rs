pub mod handlers;

use std::io::Cursor;

use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use serde_json::json;

use crate::workflow::stage::StageError;

#[derive(Debug)]
pub struct AppError {
    pub status: Status,
    pub error: anyhow::Error,
}

#[rocket::async_trait]
impl<'r, 'o: 'r> Responder<'r, 'o> for AppError {
    fn respond_to(self, _req: &'r Request<'_>) -> response::Result<'o> {
        let outer_msg = self.error.to_string();

        let chain: Vec<String> = self.error.chain().map(|e| e.to_string()).collect();

        let body = json!({
            "error": outer_msg,
            "chain": chain,
        })
        .to_string();

        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

impl<E> From<E> for AppError
where
    anyhow::Error: From<E>,
{
    fn from(err: E) -> Self {
        AppError {
            status: Status::InternalServerError,
            error: anyhow::Error::from(err),
        }
    }
}

impl AppError {
    pub fn not_found(error: anyhow::Error) -> Self {
        AppError {
            status: Status::NotFound,
            error,
        }
    }

    /// Map a failed pipeline stage onto an HTTP status. The external tools
    /// are upstream collaborators, so a non-zero exit is a bad gateway and a
    /// killed hang is a gateway timeout.
    pub fn from_stage(err: StageError) -> Self {
        let status = match &err {
            StageError::Failed { .. } => Status::BadGateway,
            StageError::TimedOut { .. } => Status::GatewayTimeout,
            StageError::Launch { .. } | StageError::MissingArtifact { .. } => {
                Status::InternalServerError
            }
        };
        AppError {
            status,
            error: anyhow::Error::from(err),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
