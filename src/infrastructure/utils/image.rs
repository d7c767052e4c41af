use std::path::Path;

use derive_more::Display;
use tokio::fs;

pub const MAX_PHOTO_SIZE: usize = 5 * 1024 * 1024;

/// Profile photo ready for multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePhoto {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ProfilePhoto {
    /// Sniffs the content; anything that is not an image is rejected.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::EmptyFile);
        }
        if bytes.len() > MAX_PHOTO_SIZE {
            return Err(ImageError::FileTooLarge);
        }

        let kind = infer::get(&bytes).ok_or(ImageError::UnknownType)?;
        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(ImageError::InvalidType(kind.mime_type().to_string()));
        }

        Ok(ProfilePhoto {
            file_name: file_name.into(),
            mime_type: kind.mime_type(),
            bytes,
        })
    }

    pub async fn load(path: &Path) -> Result<Self, ImageError> {
        let metadata = fs::metadata(path).await.map_err(|e| ImageError::Io(e.to_string()))?;
        if metadata.len() > MAX_PHOTO_SIZE as u64 {
            return Err(ImageError::FileTooLarge);
        }

        let bytes = fs::read(path).await.map_err(|e| ImageError::Io(e.to_string()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("foto")
            .to_string();

        Self::from_bytes(file_name, bytes)
    }
}

#[derive(Debug, Display, PartialEq)]
pub enum ImageError {
    #[display("El archivo está vacío.")]
    EmptyFile,

    #[display("El archivo supera el tamaño máximo permitido.")]
    FileTooLarge,

    #[display("No se pudo reconocer el tipo de archivo.")]
    UnknownType,

    #[display("El archivo debe ser una imagen (recibido {_0}).")]
    InvalidType(String),

    #[display("No se pudo leer el archivo: {_0}")]
    Io(String),
}

impl std::error::Error for ImageError {}
