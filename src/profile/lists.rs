//! Delimited list codec.
//!
//! List fields are stored as one delimited string (`"Peanuts, Shellfish"`)
//! and handled as `Vec<String>` everywhere else. Conversion happens only at
//! the store boundary.

/// Split `value` on `delimiter`, trim every piece and drop empty ones.
pub fn parse_list(value: &str, delimiter: &str) -> Vec<String> {
    value
        .split(delimiter)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join items for storage. Items are trimmed and empty ones skipped so the
/// stored string always parses back to the same list.
pub fn join_list<S: AsRef<str>>(items: &[S], separator: &str) -> String {
    items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
