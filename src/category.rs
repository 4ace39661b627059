//! Helpers for the open-ended category vocabulary.
//!
//! Categories are free text. The well-known ones get a dedicated icon and
//! anything else falls into a default bucket instead of being rejected.

/// The icon used for categories without a dedicated one.
pub const DEFAULT_ICON: &str = "💰";

const KNOWN_ICONS: [(&str, &str); 9] = [
    ("food", "🍔"),
    ("transport", "🚗"),
    ("shopping", "🛍️"),
    ("entertainment", "🎬"),
    ("bills", "🏠"),
    ("rent", "🏢"),
    ("currentbill", "💡"),
    ("hospital", "🏥"),
    ("other", "📊"),
];

/// The icon for `category`, or [DEFAULT_ICON] for unknown categories.
///
/// Lookup is case-insensitive.
pub fn icon(category: &str) -> &'static str {
    let category = category.trim().to_lowercase();

    KNOWN_ICONS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// Upper case the first character of `text`, leaving the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_ICON, capitalize, icon};

    #[test]
    fn known_category_has_icon() {
        assert_eq!(icon("food"), "🍔");
        assert_eq!(icon("Rent"), "🏢");
    }

    #[test]
    fn unknown_category_gets_default_icon() {
        assert_eq!(icon("llama upkeep"), DEFAULT_ICON);
        assert_eq!(icon(""), DEFAULT_ICON);
    }

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(capitalize("expense"), "Expense");
        assert_eq!(capitalize("food and drink"), "Food and drink");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }
}
