pub mod decimal;
pub mod excel;
pub mod log_sanitizer;
