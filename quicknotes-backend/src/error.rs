//! Error kinds shared by the note store and the HTTP layer.
//!
//! `NotesError` renders itself as the `{code, message}` JSON body, so
//! controllers can propagate with `?`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use quicknotes_types::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    /// Malformed query string or request body
    #[error("{0}")]
    Bind(String),

    /// Missing or unusable path parameter / title
    #[error("{0}")]
    Validation(String),

    /// Front-matter missing, malformed, or of the wrong type
    #[error("invalid note {path:?}: {message}")]
    Parse { path: String, message: String },

    #[error("note not found: {0}")]
    NotFound(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type NotesResult<T> = Result<T, NotesError>;

impl NotesError {
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl ResponseError for NotesError {
    fn status_code(&self) -> StatusCode {
        match self {
            NotesError::Bind(_) | NotesError::Validation(_) => StatusCode::BAD_REQUEST,
            // Missing notes are reported like any other storage failure.
            NotesError::NotFound(_) | NotesError::Parse { .. } | NotesError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("[NOTES] {}", self);
        } else {
            log::warn!("[NOTES] {}", self);
        }
        HttpResponse::build(status).json(HttpError {
            code: status.as_u16(),
            message: self.to_string(),
        })
    }
}
