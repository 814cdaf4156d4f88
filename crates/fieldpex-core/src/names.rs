//! Serialized-name tag resolution.
//!
//! A name tag looks like `label`, `label,omitempty`, or `-`. Only the
//! leading component is a name; everything after the first comma is a
//! modifier and is ignored here.

/// Name tag value meaning "never include this field".
pub const OMIT_SENTINEL: &str = "-";

/// Returns the name component of a serialized-name tag.
///
/// # Examples
///
/// ```
/// use fieldpex_core::field_display_name;
///
/// assert_eq!(field_display_name("label,omitempty"), "label");
/// assert_eq!(field_display_name("label"), "label");
/// assert_eq!(field_display_name(""), "");
/// ```
pub fn field_display_name(tag: &str) -> &str {
    match tag.split_once(',') {
        Some((name, _modifiers)) => name,
        None => tag,
    }
}

/// Resolves the output key for a field.
///
/// Falls back to `declared` when the tag has no name component. Returns
/// `None` when the tag is the omit sentinel.
pub fn resolve_field_name<'a>(tag: Option<&'a str>, declared: &'a str) -> Option<&'a str> {
    let name = tag.map(field_display_name).unwrap_or_default();
    match name {
        OMIT_SENTINEL => None,
        "" => Some(declared),
        name => Some(name),
    }
}
