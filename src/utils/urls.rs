use actix_web::HttpRequest;
use url::Url;

use crate::errors::AppError;

/// Builds absolute `/uploads/<filename>` links for the host the request came in on.
#[derive(Debug, Clone)]
pub struct UploadUrls {
    base: Url,
}

impl UploadUrls {
    pub fn from_request(req: &HttpRequest) -> Result<Self, AppError> {
        let info = req.connection_info();
        Self::new(info.scheme(), info.host())
    }

    pub fn new(scheme: &str, host: &str) -> Result<Self, AppError> {
        let base = Url::parse(&format!("{}://{}/", scheme, host))
            .map_err(|_| AppError::BadRequest(format!("Invalid host: {}", host)))?;
        if base.cannot_be_a_base() {
            return Err(AppError::BadRequest(format!("Invalid host: {}", host)));
        }
        Ok(UploadUrls { base })
    }

    pub fn for_file(&self, filename: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("uploads").push(filename);
        }
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn builds_upload_link() {
        let urls = UploadUrls::new("http", "localhost:3420").unwrap();
        assert_eq!(
            urls.for_file("1718000000000-123.pdf"),
            "http://localhost:3420/uploads/1718000000000-123.pdf"
        );
    }

    #[test]
    fn escapes_unusual_names() {
        let urls = UploadUrls::new("https", "hr.example.com").unwrap();
        assert_eq!(urls.for_file("my cv#1.pdf"), "https://hr.example.com/uploads/my%20cv%231.pdf");
    }

    #[test]
    fn uses_request_host() {
        let req = TestRequest::default()
            .insert_header(("host", "10.0.0.5:8039"))
            .to_http_request();
        let urls = UploadUrls::from_request(&req).unwrap();
        assert_eq!(urls.for_file("a.png"), "http://10.0.0.5:8039/uploads/a.png");
    }
}
