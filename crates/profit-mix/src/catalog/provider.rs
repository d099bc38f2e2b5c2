//! Provider derivation from fund display names.
//!
//! Upstream names follow the pattern "<provider> השתלמות <track>", e.g.
//! "כלל השתלמות כללי" or "ילין לפידות קרן השתלמות מסלול כללי". The managing
//! institution is everything before the program marker, minus a trailing
//! "קרן" connective.

const PROGRAM_MARKER: &str = "השתלמות";
const FUND_WORD: &str = "קרן";

/// Derive the managing institution from a fund's display name.
///
/// Falls back to the cleaned full name when the marker is absent or nothing
/// precedes it.
pub fn derive_provider(fund_name: &str) -> String {
    let cleaned = clean_name(fund_name);

    if let Some(pos) = cleaned.find(PROGRAM_MARKER) {
        let mut before = cleaned[..pos].trim().trim_end_matches(['-', ' ']);
        if let Some(stripped) = before.strip_suffix(FUND_WORD) {
            before = stripped.trim_end();
        }
        if !before.is_empty() {
            return before.to_string();
        }
    }

    cleaned
}

/// Strip BOM/zero-width characters and collapse runs of whitespace.
pub(crate) fn clean_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_is_text_before_marker() {
        assert_eq!(derive_provider("כלל השתלמות כללי"), "כלל");
    }

    #[test]
    fn trailing_fund_word_is_stripped() {
        assert_eq!(
            derive_provider("ילין לפידות קרן השתלמות מסלול כללי"),
            "ילין לפידות"
        );
    }

    #[test]
    fn name_without_marker_is_returned_cleaned() {
        assert_eq!(derive_provider("  אנליסט  מסלול  מניות "), "אנליסט מסלול מניות");
    }

    #[test]
    fn marker_with_empty_prefix_falls_back_to_full_name() {
        assert_eq!(derive_provider("השתלמות כללי"), "השתלמות כללי");
    }

    #[test]
    fn zero_width_characters_are_removed() {
        assert_eq!(derive_provider("\u{feff}מור השתלמות כללי"), "מור");
    }
}
