use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use actix_multipart::{Field, Multipart};
use chrono::Utc;
use futures_util::StreamExt;
use log::{debug, error};
use rand::Rng;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::errors::AppError;
use crate::models::document::DocumentSlot;
use crate::utils::validation::{validate_file_size, validate_mime_type};

/// Upper bound for a single text part of the form.
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// Files written to the upload directory while handling one request.
#[derive(Debug)]
pub struct UploadBatch {
    dir: PathBuf,
    stored: HashMap<DocumentSlot, String>,
}

impl UploadBatch {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        UploadBatch {
            dir: dir.into(),
            stored: HashMap::new(),
        }
    }

    pub fn documents(&self) -> &HashMap<DocumentSlot, String> {
        &self.stored
    }

    async fn store(&mut self, slot: DocumentSlot, original_name: &str, field: &mut Field) -> Result<(), AppError> {
        let (stored_name, mut file) = loop {
            let candidate = stored_name_for(original_name);
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&candidate))
                .await
            {
                Ok(file) => break (candidate, file),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            }
        };
        // Registered before any bytes land so a failed write is still cleaned up.
        self.stored.insert(slot, stored_name.clone());

        let mut size = 0usize;
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| AppError::Upload(err.to_string()))?;
            size += chunk.len();
            validate_file_size(size)?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        debug!(
            "Stored {} upload {:?} as {} ({} bytes)",
            slot.field_name(),
            original_name,
            stored_name,
            size
        );
        Ok(())
    }

    /// Deletes every file in the batch. Failures are logged and otherwise ignored.
    pub async fn discard(self) {
        for name in self.stored.into_values() {
            let path = self.dir.join(&name);
            match fs::remove_file(&path).await {
                Ok(()) => debug!("Removed orphaned upload {}", path.display()),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => error!("File cleanup error for {}: {}", path.display(), err),
            }
        }
    }
}

/// Text fields and stored documents from one multipart submission.
#[derive(Debug)]
pub struct Submission {
    pub fields: HashMap<String, String>,
    pub uploads: UploadBatch,
}

/// Reads the whole multipart body, storing files under `upload_dir`.
///
/// On error nothing from this request is left on disk.
pub async fn receive(mut payload: Multipart, upload_dir: &Path) -> Result<Submission, AppError> {
    let mut fields = HashMap::new();
    let mut uploads = UploadBatch::new(upload_dir);

    match read_parts(&mut payload, &mut fields, &mut uploads).await {
        Ok(()) => Ok(Submission { fields, uploads }),
        Err(err) => {
            uploads.discard().await;
            Err(err)
        }
    }
}

async fn read_parts(
    payload: &mut Multipart,
    fields: &mut HashMap<String, String>,
    uploads: &mut UploadBatch,
) -> Result<(), AppError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|err| AppError::Upload(err.to_string()))?;
        let name = field
            .name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Upload("Form part without a field name".to_string()))?;
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match file_name {
            // Browsers send an empty file part for untouched file inputs.
            Some(original) if original.is_empty() => drain(&mut field).await?,
            Some(original) => {
                let slot = DocumentSlot::from_field_name(&name)
                    .ok_or_else(|| AppError::Upload(format!("Unexpected field: {}", name)))?;
                if uploads.stored.contains_key(&slot) {
                    return Err(AppError::Upload(format!("Unexpected field: {}", name)));
                }
                validate_mime_type(field.content_type().map(|mime| mime.essence_str()))?;
                uploads.store(slot, &original, &mut field).await?;
            }
            None => {
                let value = read_text(&mut field, &name).await?;
                fields.insert(name, value);
            }
        }
    }
    Ok(())
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, AppError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|err| AppError::BadRequest(err.to_string()))?;
        if bytes.len() + chunk.len() > MAX_TEXT_FIELD_SIZE {
            return Err(AppError::BadRequest(format!("Field {} is too large", name)));
        }
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes).map_err(|_| AppError::BadRequest(format!("Field {} is not valid UTF-8", name)))
}

async fn drain(field: &mut Field) -> Result<(), AppError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|err| AppError::Upload(err.to_string()))?;
    }
    Ok(())
}

/// `<unix millis>-<random>` plus the original extension, e.g. `1718000000000-48213377.pdf`.
pub fn stored_name_for(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 16 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}{}", Utc::now().timestamp_millis(), suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_keeps_extension() {
        let name = stored_name_for("Offer Letter.final.PDF");
        assert!(name.ends_with(".PDF"), "{name}");
        let (millis, rest) = name.split_once('-').unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
        let random = rest.trim_end_matches(".PDF");
        assert!(random.parse::<u32>().unwrap() < 1_000_000_000);
    }

    #[test]
    fn stored_name_drops_suspicious_extension() {
        assert!(!stored_name_for("resume").contains('.'));
        assert!(!stored_name_for("x.p/df").contains('/'));
        assert!(!stored_name_for("x.tar gz").contains(' '));
    }

    #[test]
    fn stored_names_do_not_repeat() {
        let a = stored_name_for("a.png");
        let b = stored_name_for("a.png");
        let c = stored_name_for("a.png");
        assert!(a != b || b != c);
    }

    #[actix_web::test]
    async fn discard_removes_every_file_and_tolerates_missing_ones() {
        let dir = tempfile::tempdir().unwrap();
        let mut batch = UploadBatch::new(dir.path());
        for (slot, name) in [(DocumentSlot::Resume, "1-1.pdf"), (DocumentSlot::IdProof, "1-2.png")] {
            std::fs::write(dir.path().join(name), b"data").unwrap();
            batch.stored.insert(slot, name.to_string());
        }
        batch.stored.insert(DocumentSlot::SalarySlip, "never-written.pdf".to_string());

        batch.discard().await;

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
