//! Phone number normalization.
//!
//! Conversations are keyed by the normalized counterpart number, so a thread
//! started by typing `555-123-4567` and a webhook arriving from
//! `+15551234567` land in the same place.

/// Map free-form input to an E.164-like key.
///
/// Input that cannot be normalized is returned unchanged; callers must
/// tolerate non-canonical keys.
pub fn normalize(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let has_plus = input.starts_with('+');

    if digits.len() == 11 && digits.starts_with('1') {
        format!("+{digits}")
    } else if digits.len() == 10 {
        format!("+1{digits}")
    } else if has_plus {
        format!("+{digits}")
    } else {
        input.to_string()
    }
}
