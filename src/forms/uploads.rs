use std::io::{Read, Seek, SeekFrom};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use thiserror::Error;

#[derive(MultipartForm)]
pub struct UploadPhotoForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
}

/// The uploaded file read back into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPhotoFormPayload {
    pub content_type: Option<String>,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum UploadPhotoFormError {
    #[error("Error reading uploaded file")]
    FileReadError,
}

impl From<std::io::Error> for UploadPhotoFormError {
    fn from(_: std::io::Error) -> Self {
        UploadPhotoFormError::FileReadError
    }
}

impl UploadPhotoForm {
    pub fn read(&mut self) -> Result<UploadPhotoFormPayload, UploadPhotoFormError> {
        let file = self.file.file.as_file_mut();
        file.seek(SeekFrom::Start(0))?;

        let mut bytes = Vec::with_capacity(self.file.size);
        file.read_to_end(&mut bytes)?;

        Ok(UploadPhotoFormPayload {
            content_type: self.file.content_type.as_ref().map(|mime| mime.to_string()),
            file_name: self.file.file_name.clone(),
            bytes,
        })
    }
}
