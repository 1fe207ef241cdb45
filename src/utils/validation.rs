use crate::errors::AppError;

/// Largest document accepted per slot: 5 MiB.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

/// Checks the MIME type the client declared for an uploaded part.
pub fn validate_mime_type(mime_type: Option<&str>) -> Result<(), AppError> {
    match mime_type {
        Some(mime) if ALLOWED_MIME_TYPES.contains(&mime) => Ok(()),
        Some(mime) => Err(AppError::Upload(format!("Invalid file type: {}", mime))),
        None => Err(AppError::Upload("Invalid file type: missing content type".to_string())),
    }
}

pub fn validate_file_size(size: usize) -> Result<(), AppError> {
    if size > MAX_FILE_SIZE {
        return Err(AppError::Upload(format!(
            "File too large: limit is {} MiB",
            MAX_FILE_SIZE / (1024 * 1024)
        )));
    }
    Ok(())
}

/// A stored name must be a single plain path component.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_accepts_office_and_images() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(validate_mime_type(Some(mime)).is_ok(), "{mime} should be allowed");
        }
    }

    #[test]
    fn other_types_are_upload_errors() {
        assert!(matches!(
            validate_mime_type(Some("application/x-msdownload")),
            Err(AppError::Upload(msg)) if msg.contains("application/x-msdownload")
        ));
        assert!(matches!(validate_mime_type(None), Err(AppError::Upload(_))));
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(validate_file_size(MAX_FILE_SIZE).is_ok());
        assert!(matches!(validate_file_size(MAX_FILE_SIZE + 1), Err(AppError::Upload(_))));
    }

    #[test]
    fn plain_names_only() {
        assert!(is_plain_file_name("1718000000000-123456789.pdf"));
        assert!(!is_plain_file_name("../secret"));
        assert!(!is_plain_file_name("a/b.pdf"));
        assert!(!is_plain_file_name("a\\b.pdf"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name(""));
    }
}
