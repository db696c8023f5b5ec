//! Case-insensitive text search over rendered entity fields.
use std::fmt::Display;

/// Whether any rendered field of `entity` contains `text`, ignoring case.
///
/// An absent entity never matches. The empty string is a substring of every
/// rendering, so an empty `text` matches any present entity.
pub fn matches_by_text<T>(
    entity: Option<&T>,
    text: &str,
    fields: &[&dyn Fn(&T) -> String],
) -> bool {
    let Some(entity) = entity else {
        return false;
    };
    let needle = text.to_lowercase();
    fields
        .iter()
        .any(|field| field(entity).to_lowercase().contains(&needle))
}

/// Renders a field with its `Display` implementation.
pub fn text_of<V: Display>(value: V) -> String {
    value.to_string()
}
