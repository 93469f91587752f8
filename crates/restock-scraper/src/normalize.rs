//! Text cleanup for extracted page fragments.

/// Reduces raw node text to a single trimmed line.
///
/// Retailer markup pads titles and stock labels with newlines and indent
/// whitespace; embedded `\n`/`\r` are stripped outright and the result is
/// trimmed. Interior spacing is preserved — only line structure and edge
/// whitespace are noise.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.replace(['\n', '\r'], "").trim().to_owned()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
