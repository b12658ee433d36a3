use std::io::{Read, Seek, SeekFrom};

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use chrono::Utc;
use thiserror::Error;

use crate::domain::image::NewImage;
use crate::domain::types::{ImageName, StoredFileName, TypeConstraintError};
use crate::storage::stored_file_name;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpeg", "png", "jpg", "gif", "svg"];

/// Multipart body accepted by `POST /images`: one or more files plus shared
/// `name` and `enable` fields. The per-file limit mirrors the public upload
/// contract (2 MB, image types only).
#[derive(MultipartForm)]
pub struct UploadImagesForm {
    #[multipart(limit = "2MB")]
    pub file: Vec<TempFile>,
    pub name: Text<String>,
    pub enable: Text<String>,
}

/// Multipart body accepted by image update: new `name`, optional replacement
/// file.
#[derive(MultipartForm)]
pub struct UpdateImageForm {
    #[multipart(limit = "2MB")]
    pub file: Option<TempFile>,
    pub name: Text<String>,
    pub enable: Text<String>,
}

#[derive(Debug, Error)]
pub enum ImageFormError {
    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),
    #[error("No files to upload in the request")]
    MissingFile,
    #[error("uploaded file has no name")]
    UnnamedFile,
    #[error("uploaded file type is not one of jpeg, png, jpg, gif, svg")]
    UnsupportedType,
    #[error("enable must be a boolean")]
    InvalidEnable,
    #[error("failed to read uploaded file")]
    ReadFailed,
}

impl From<std::io::Error> for ImageFormError {
    fn from(_: std::io::Error) -> Self {
        Self::ReadFailed
    }
}

/// One uploaded file, fully read, with its generated stored name.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub stored_name: StoredFileName,
    pub bytes: Vec<u8>,
}

/// Validated payload for a batch image upload.
#[derive(Debug, Clone)]
pub struct UploadImagesFormPayload {
    pub name: ImageName,
    pub enable: bool,
    pub files: Vec<UploadedImage>,
}

impl UploadImagesFormPayload {
    /// Row shared across the batch for one uploaded file.
    pub fn new_image(&self, file: &UploadedImage) -> NewImage {
        let now = Utc::now().naive_utc();
        NewImage {
            name: self.name.clone(),
            file: file.stored_name.clone(),
            enable: self.enable,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated payload for an image update.
#[derive(Debug, Clone)]
pub struct UpdateImageFormPayload {
    pub name: ImageName,
    pub enable: bool,
    pub file: Option<UploadedImage>,
}

fn parse_enable(value: &str) -> Result<bool, ImageFormError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ImageFormError::InvalidEnable),
    }
}

fn validate_file_type(file: &TempFile) -> Result<&str, ImageFormError> {
    let Some(file_name) = file.file_name.as_deref() else {
        return Err(ImageFormError::UnnamedFile);
    };

    let extension_ok = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    if !extension_ok {
        return Err(ImageFormError::UnsupportedType);
    }

    if let Some(content_type) = file.content_type.as_ref() {
        let mime_ok = matches!(
            content_type.essence_str(),
            "image/jpeg" | "image/png" | "image/gif" | "image/svg+xml"
        );
        if !mime_ok {
            return Err(ImageFormError::UnsupportedType);
        }
    }

    Ok(file_name)
}

fn read_upload(file: &mut TempFile) -> Result<UploadedImage, ImageFormError> {
    let original_name = validate_file_type(file)?.to_string();

    let handle = file.file.as_file_mut();
    handle.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    handle.read_to_end(&mut bytes)?;

    Ok(UploadedImage {
        stored_name: StoredFileName::new(stored_file_name(&original_name))?,
        bytes,
    })
}

impl UploadImagesForm {
    /// Validate the multipart fields and read every uploaded file.
    pub fn parse(&mut self) -> Result<UploadImagesFormPayload, ImageFormError> {
        if self.file.is_empty() {
            return Err(ImageFormError::MissingFile);
        }

        let name = ImageName::new(self.name.as_str())?;
        let enable = parse_enable(&self.enable)?;

        let mut files = Vec::with_capacity(self.file.len());
        for file in &mut self.file {
            files.push(read_upload(file)?);
        }

        Ok(UploadImagesFormPayload {
            name,
            enable,
            files,
        })
    }
}

impl UpdateImageForm {
    /// Validate the multipart fields; the replacement file is optional.
    pub fn parse(&mut self) -> Result<UpdateImageFormPayload, ImageFormError> {
        let name = ImageName::new(self.name.as_str())?;
        let enable = parse_enable(&self.enable)?;

        let file = match self.file.as_mut() {
            Some(file) => Some(read_upload(file)?),
            None => None,
        };

        Ok(UpdateImageFormPayload { name, enable, file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_enable_tokens() {
        assert!(parse_enable("true").unwrap());
        assert!(parse_enable("1").unwrap());
        assert!(!parse_enable("false").unwrap());
        assert!(!parse_enable("0").unwrap());
        assert!(parse_enable("yes").is_err());
    }
}
