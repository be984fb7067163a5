//! Log sanitization utilities for masking sensitive data.
//!
//! Tokens, passwords and employee IDs never reach the log in full.

/// Mask an auth token for safe logging.
///
/// Shows only the first 4 characters followed by asterisks.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_token("c0ffee-1234"), "c0ff***");
/// ```
pub fn mask_token(token: &str) -> String {
    keep_prefix(token, 4)
}

/// Mask an employee ID for safe logging.
///
/// Shows only the first 3 characters followed by asterisks.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_employee_id("A123456"), "A12***");
/// assert_eq!(mask_employee_id("ab"), "ab***");
/// ```
pub fn mask_employee_id(id: &str) -> String {
    keep_prefix(id, 3)
}

fn keep_prefix(value: &str, visible: usize) -> String {
    let prefix: String = value.chars().take(visible).collect();
    format!("{}***", prefix)
}
