//! Identifier rules for table and field names.
//!
//! Table and field names are interpolated into SQL as quoted identifiers, so
//! they are restricted to a conservative character set when the registry loads.

const MAX_IDENTIFIER_LEN: usize = 64;

/// Returns true when `name` is a non-empty ASCII identifier made of letters,
/// digits and underscores that does not start with a digit.
pub fn is_valid_identifier(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_IDENTIFIER_LEN {
        return false;
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
