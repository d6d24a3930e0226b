//! Minimal HTML element builder used by the emitter and the calendar.

/// Render a single element.
///
/// Empty children are skipped. An element without content is written self-closing.
/// Attribute values are escaped, children are inserted verbatim.
pub fn element<S: AsRef<str>>(tag: &str, children: &[S], attributes: &[(&str, &str)]) -> String {
    let contents: String = children
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|child| !child.is_empty())
        .collect();
    let attributes = attributes
        .iter()
        .map(|(name, value)| format!(r#"{name}="{}""#, escape(value)))
        .collect::<Vec<String>>()
        .join(" ");
    match (attributes.is_empty(), contents.is_empty()) {
        (false, false) => format!("<{tag} {attributes}>{contents}</{tag}>"),
        (false, true) => format!("<{tag} {attributes} />"),
        (true, false) => format!("<{tag}>{contents}</{tag}>"),
        (true, true) => format!("<{tag} />"),
    }
}

/// Escape text so it can be embedded in element content or attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            character => escaped.push(character),
        }
    }
    escaped
}
