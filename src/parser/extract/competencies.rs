use crate::parser::links::clean;
use crate::parser::text::{is_bullet, strip_bullet, BULLET, MOJIBAKE_BULLET};

/// Competencies come either as one "•"-separated run of text or as "-"
/// bullet lines (or both). Every non-empty fragment is kept in order.
pub fn extract(section: &str) -> Vec<String> {
    let mut items = Vec::new();

    for line in section.lines() {
        let line = if is_bullet(line) { strip_bullet(line) } else { line.trim() };
        let line = line.replace(MOJIBAKE_BULLET, "•");
        items.extend(
            line.split(BULLET)
                .map(clean)
                .filter(|item| !item.is_empty()),
        );
    }

    items
}
