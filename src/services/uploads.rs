use uuid::Uuid;

use crate::backend::{AccessToken, StorageApi};
use crate::common::UploadError;

/// Bucket holding product pictures.
pub const PRODUCT_IMAGES_BUCKET: &str = "products";

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
}

/// Image field of a form that has not been submitted yet.
///
/// `idle → uploading → idle` with either a new URL or an error message; a
/// failed upload keeps whatever URL was there before.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageField {
    url: Option<String>,
    state: UploadState,
    error: Option<String>,
}

impl ImageField {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url: url.filter(|u| !u.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin(&mut self) -> Result<(), UploadError> {
        if self.state == UploadState::Uploading {
            return Err(UploadError::Busy);
        }
        self.state = UploadState::Uploading;
        self.error = None;
        Ok(())
    }

    pub fn finish(&mut self, result: &Result<String, UploadError>) {
        self.state = UploadState::Idle;
        match result {
            Ok(url) => self.url = Some(url.clone()),
            Err(UploadError::NoFile) => {}
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// A file as received from the browser.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Storage key for an uploaded file: a time-ordered UUID plus the file's
/// extension, so concurrent uploads never collide.
pub fn object_key(file_name: &str) -> String {
    let id = Uuid::now_v7();
    match extension(file_name) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

fn extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let valid = !ext.is_empty()
        && ext.len() <= 10
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

/// Sends files to object storage and resolves their public URL.
pub struct AssetUploader<'a, S: ?Sized> {
    storage: &'a S,
    token: &'a AccessToken,
    bucket: &'a str,
}

impl<'a, S: StorageApi + ?Sized> AssetUploader<'a, S> {
    pub fn new(storage: &'a S, token: &'a AccessToken) -> Self {
        Self {
            storage,
            token,
            bucket: PRODUCT_IMAGES_BUCKET,
        }
    }

    pub fn with_bucket(mut self, bucket: &'a str) -> Self {
        self.bucket = bucket;
        self
    }

    /// Uploads `file` and writes its public URL into `field`.
    pub async fn upload(
        &self,
        field: &mut ImageField,
        file: FileUpload,
    ) -> Result<String, UploadError> {
        field.begin()?;
        let result = self.store(file).await;
        if let Err(e) = &result {
            log::warn!("image upload failed: {e}");
        }
        field.finish(&result);
        result
    }

    async fn store(&self, file: FileUpload) -> Result<String, UploadError> {
        if file.bytes.is_empty() {
            return Err(UploadError::NoFile);
        }
        if file.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                size: file.bytes.len(),
                limit: MAX_UPLOAD_BYTES,
            });
        }

        let key = object_key(&file.file_name);
        let content_type = file
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");

        self.storage
            .upload(self.token, self.bucket, &key, file.bytes, content_type)
            .await?;
        let url = self.storage.public_url(self.bucket, &key)?;

        log::info!("stored {} in bucket {}", key, self.bucket);
        Ok(url)
    }
}
