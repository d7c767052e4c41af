use serde::Serialize;

use crate::errors::AppError;

pub mod auth;
pub mod browse_practicas;
pub mod create_practica;
pub mod manage_practicas;
pub mod practica_shell;
pub mod profile;

/// Navigation requested by a page, optionally after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: &'static str,
    pub delay_secs: u64,
}

impl Redirect {
    pub fn to(path: &'static str) -> Self {
        Redirect { to: path, delay_secs: 0 }
    }

    pub fn after(path: &'static str, delay_secs: u64) -> Self {
        Redirect { to: path, delay_secs }
    }
}

/// Outcome message shown to the user. Pages keep at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    pub fn text(&self) -> &str {
        match self {
            Banner::Success(text) | Banner::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Banner::Error(_))
    }
}

/// `"{prefix}: {server message}"`, or the bare prefix when the server sent none.
pub(crate) fn server_failure(prefix: &str, err: &AppError) -> String {
    match err.server_message() {
        Some(message) => format!("{}: {}", prefix, message),
        None => prefix.to_string(),
    }
}

/// `"{prefix}: {detail}"`, falling back to the error description.
pub(crate) fn detailed_failure(prefix: &str, err: &AppError) -> String {
    format!("{}: {}", prefix, err.detail())
}
