use std::borrow::Cow;

/// UTF-8 punctuation that was decoded as Windows-1252 somewhere upstream.
/// Each entry maps the three-char mojibake back to the intended glyph.
const MOJIBAKE: &[(&str, &str)] = &[
    ("\u{e2}\u{20ac}\u{a2}", "•"),
    ("\u{e2}\u{20ac}\u{201c}", "–"),
    ("\u{e2}\u{20ac}\u{201d}", "—"),
    ("\u{e2}\u{20ac}\u{2122}", "’"),
    ("\u{e2}\u{20ac}\u{2DC}", "‘"),
    ("\u{e2}\u{20ac}\u{153}", "“"),
];

/// Mis-decoded form of the bullet glyph.
pub const MOJIBAKE_BULLET: &str = "\u{e2}\u{20ac}\u{a2}";
pub const BULLET: char = '•';

/// Drop a leading BOM and map known mojibake back to the real characters.
/// Borrows when the input is already clean.
pub fn repair_encoding(raw: &str) -> Cow<'_, str> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    if !text.contains('\u{e2}') {
        return Cow::Borrowed(text);
    }

    let mut repaired = text.to_string();
    for (broken, fixed) in MOJIBAKE {
        if repaired.contains(broken) {
            repaired = repaired.replace(broken, fixed);
        }
    }
    Cow::Owned(repaired)
}

/// "### Acme Corp" → "Acme Corp". Lines without a marker are only trimmed.
pub fn strip_heading(line: &str) -> &str {
    line.trim().trim_start_matches('#').trim()
}

/// Remove every `**` bold marker.
pub fn strip_bold(text: &str) -> String {
    text.replace("**", "").trim().to_string()
}

/// A "-" list item. Thematic breaks ("---") are not bullets.
pub fn is_bullet(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('-') && !is_thematic_break(line)
}

fn is_thematic_break(line: &str) -> bool {
    line.chars().filter(|c| *c == '-').count() >= 3 && line.chars().all(|c| c == '-' || c.is_whitespace())
}

/// "- Shipped v2" → "Shipped v2".
pub fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix('-').unwrap_or(line).trim()
}
