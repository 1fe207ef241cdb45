use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::web::Bytes;
use actix_web::HttpResponse;
use futures_util::stream::{self, Stream};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::errors::AppError;
use crate::utils::validation::is_plain_file_name;

const CHUNK_SIZE: usize = 64 * 1024;
const SNIFF_LEN: usize = 8192;

/// A stored document opened for streaming.
pub struct StoredFile {
    file: File,
    len: u64,
    content_type: String,
}

/// Path of `filename` inside `upload_dir`, or `None` if the name could escape it.
pub fn resolve(upload_dir: &Path, filename: &str) -> Option<PathBuf> {
    is_plain_file_name(filename).then(|| upload_dir.join(filename))
}

pub async fn is_present(upload_dir: &Path, filename: &str) -> bool {
    match resolve(upload_dir, filename) {
        Some(path) => tokio::fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false),
        None => false,
    }
}

impl StoredFile {
    pub async fn open(upload_dir: &Path, filename: &str) -> Result<Self, AppError> {
        let not_found = || AppError::NotFound("File not found".to_string());
        let path = resolve(upload_dir, filename).ok_or_else(not_found)?;

        let mut file = match File::open(&path).await {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(err) => return Err(err.into()),
        };
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(not_found());
        }

        let mut head = vec![0u8; SNIFF_LEN.min(metadata.len() as usize)];
        file.read_exact(&mut head).await?;
        file.seek(SeekFrom::Start(0)).await?;

        Ok(StoredFile {
            file,
            len: metadata.len(),
            content_type: content_type_for(&path, &head),
        })
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Streams the file with the given disposition and `filename` parameter.
    pub fn into_response(self, disposition: DispositionType, filename: &str) -> HttpResponse {
        HttpResponse::Ok()
            .content_type(self.content_type)
            .insert_header(ContentDisposition {
                disposition,
                parameters: vec![DispositionParam::Filename(filename.to_string())],
            })
            .no_chunking(self.len)
            .streaming(chunks(self.file))
    }
}

fn chunks(file: File) -> impl Stream<Item = Result<Bytes, std::io::Error>> {
    stream::try_unfold(file, |mut file| async move {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let read = file.read(&mut buf).await?;
        if read == 0 {
            return Ok::<_, std::io::Error>(None);
        }
        buf.truncate(read);
        Ok(Some((Bytes::from(buf), file)))
    })
}

/// Sniffs the leading bytes first and falls back to the extension.
pub fn content_type_for(path: &Path, head: &[u8]) -> String {
    if let Some(kind) = infer::get(head) {
        return kind.mime_type().to_string();
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    #[test]
    fn sniffed_type_wins_over_extension() {
        assert_eq!(content_type_for(Path::new("scan.pdf"), PNG_HEADER), "image/png");
    }

    #[test]
    fn extension_fallback() {
        assert_eq!(content_type_for(Path::new("notes.TXT"), b"hello"), "text/plain");
        assert_eq!(content_type_for(Path::new("blob"), b"hello"), "application/octet-stream");
    }

    #[test]
    fn resolve_rejects_traversal() {
        let dir = Path::new("/srv/uploads");
        assert_eq!(resolve(dir, "1-2.pdf"), Some(PathBuf::from("/srv/uploads/1-2.pdf")));
        assert_eq!(resolve(dir, "../etc/passwd"), None);
    }

    #[actix_web::test]
    async fn open_reports_missing_file_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            StoredFile::open(dir.path(), "nope.pdf").await,
            Err(AppError::NotFound(_))
        ));
        assert!(!is_present(dir.path(), "nope.pdf").await);
    }

    #[actix_web::test]
    async fn open_sniffs_and_rewinds() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pic.bin"), PNG_HEADER).unwrap();
        let stored = StoredFile::open(dir.path(), "pic.bin").await.unwrap();
        assert_eq!(stored.content_type(), "image/png");
        assert_eq!(stored.len, PNG_HEADER.len() as u64);
        assert!(is_present(dir.path(), "pic.bin").await);
    }
}
