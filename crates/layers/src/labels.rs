use compute::EnrichedOccurrence;

/// Popup annotation for one occurrence marker. Absent values render empty.
pub fn popup_text(record: &EnrichedOccurrence) -> String {
    format!(
        "Species: {}<br>IUCN: {}<br>Region: {}<br>Year: {}",
        escape_markup(record.species().unwrap_or_default()),
        escape_markup(record.iucn_category().unwrap_or_default()),
        escape_markup(record.region().unwrap_or_default()),
        record.year().map(|y| y.to_string()).unwrap_or_default(),
    )
}

/// Escapes text for HTML and SVG bodies and attributes.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
