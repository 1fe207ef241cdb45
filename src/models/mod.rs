pub mod document;
pub mod employee;
