pub mod files;
pub mod upload;
pub mod urls;
pub mod validation;
