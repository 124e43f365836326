//! Centralized validation and helper functions.

/// Maximum number of participants allowed in a single roster
pub const MAX_PARTICIPANTS: usize = 10_000;

/// Maximum length of a participant name or contact address
pub const MAX_FIELD_LENGTH: usize = 254;

/// Validate that a string looks like a deliverable mail address.
///
/// This is intentionally shallow: one `@`, non-empty local part and domain,
/// and no whitespace or control characters. Rejecting line breaks keeps an
/// address from smuggling extra headers into the outgoing message.
///
/// # Examples
///
/// ```
/// use secret_santa::utils::validation::is_valid_address;
///
/// assert!(is_valid_address("louise@example.org"));
/// assert!(!is_valid_address("louise"));
/// assert!(!is_valid_address("louise@example.org\nBcc: everyone@example.org"));
/// ```
#[must_use]
pub fn is_valid_address(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_FIELD_LENGTH {
        return false;
    }
    if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Validate a participant name: non-empty after trimming, bounded length,
/// and free of control characters (names end up in mail bodies).
#[must_use]
pub fn is_valid_name(s: &str) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty() && trimmed.len() <= MAX_FIELD_LENGTH && !trimmed.chars().any(char::is_control)
}

/// Check if adding another participant would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new participant.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_participant_limit(count: usize) -> Option<String> {
    if count >= MAX_PARTICIPANTS {
        Some(format!(
            "Too many participants: adding another would exceed maximum of {MAX_PARTICIPANTS}"
        ))
    } else {
        None
    }
}
