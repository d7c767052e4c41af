use std::fmt;

use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

use crate::infrastructure::utils::image::ImageError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    SessionExpired,
    MissingSession,
    Request { status: u16, message: Option<String> },
    Transport(String),
    InvalidResponse(String),
    InvalidInput(String),
    Storage(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::SessionExpired => write!(f, "Session expired"),
            AppError::MissingSession => write!(f, "No active session"),
            AppError::Request { status, message } => match message {
                Some(msg) => write!(f, "Request failed with status {}: {}", status, msg),
                None => write!(f, "Request failed with status {}", status),
            },
            AppError::Transport(msg) => write!(f, "{}", msg),
            AppError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Message supplied by the backend in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Request { message: Some(msg), .. } => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Server message when present, otherwise a description of the failure.
    pub fn detail(&self) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, AppError::SessionExpired)
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::ValidationError(errors) => errors,
            _ => &[],
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Valor inválido".to_string()),
                })
            })
            .collect();

        field_errors.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationError(field_errors)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::InvalidResponse(err.to_string())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum StorageError {
    #[display("Failed to read store: {_0}")]
    Read(String),

    #[display("Failed to write store: {_0}")]
    Write(String),

    #[display("Corrupted store: {_0}")]
    Corrupted(String),
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Write(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Corrupted(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
