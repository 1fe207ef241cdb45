pub mod document;
pub mod employee;
pub mod pool;
