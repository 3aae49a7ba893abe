//! Compact display of identifiers

/// Number of trailing characters kept by [`truncate_for_display`]
pub const DISPLAY_LEN: usize = 6;

/// Last six characters of an identifier, for logs and UI.
///
/// Inputs of six characters or fewer come back unchanged. Counting is by
/// `char`, so ids branded with [`crate::cast_to_id`] never split a code point.
pub fn truncate_for_display(id: &str) -> &str {
    match id.char_indices().rev().nth(DISPLAY_LEN - 1) {
        Some((start, _)) => &id[start..],
        None => id,
    }
}
