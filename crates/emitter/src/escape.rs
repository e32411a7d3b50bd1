use std::borrow::Cow;

/// Escapes embedded double quotes as `\"`.
///
/// Only quotes are handled. Backslashes, control characters and anything else
/// the consuming compiler treats specially pass through untouched, so a name
/// containing them would produce an invalid literal.
#[must_use]
pub fn escape_quotes(s: &str) -> Cow<'_, str> {
    if s.contains('"') { Cow::Owned(s.replace('"', "\\\"")) } else { Cow::Borrowed(s) }
}

/// Reverses [`escape_quotes`].
#[must_use]
pub fn unescape_quotes(s: &str) -> Cow<'_, str> {
    if s.contains("\\\"") { Cow::Owned(s.replace("\\\"", "\"")) } else { Cow::Borrowed(s) }
}
