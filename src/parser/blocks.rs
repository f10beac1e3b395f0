use std::sync::LazyLock;

use regex::Regex;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

/// "June 2022", "Sep. 2019", "2015".
static PERIOD_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b(?:{MONTH}\s+)?\d{{4}}\b")).unwrap());
/// Same as the start token, or the literal "Present".
static PERIOD_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b(?:(?:{MONTH}\s+)?\d{{4}}|present)\b")).unwrap());
/// Trailing "| June 2022" on an award line.
pub static TRAILING_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\|\s*((?:{MONTH}\s+)?\d{{4}})\s*$")).unwrap());

/// Start/end labels pulled out of a free-text period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Period {
    pub start: String,
    pub end: String,
}

impl Period {
    /// First date token is the start; the next date token or "Present"
    /// after it is the end. Unmatched parts stay empty.
    pub fn parse(text: &str) -> Period {
        let Some(start) = PERIOD_START_RE.find(text) else {
            return Period::default();
        };
        let end = PERIOD_END_RE
            .find(&text[start.end()..])
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        Period {
            start: start.as_str().to_string(),
            end,
        }
    }

    pub fn looks_like(text: &str) -> bool {
        PERIOD_START_RE.is_match(text)
    }
}

/// Split a section into one block per `### ` heading line. Text before
/// the first heading is discarded, as are whitespace-only blocks.
pub fn split_blocks(section: &str) -> Vec<String> {
    let mut blocks: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for line in section.lines() {
        if line.starts_with("### ") {
            if let Some(done) = current.take() {
                blocks.push(done);
            }
            current = Some(String::new());
        }
        if let Some(block) = current.as_mut() {
            block.push_str(line);
            block.push('\n');
        }
    }
    blocks.extend(current);

    blocks.retain(|b| !b.trim().is_empty());
    blocks
}

/// Lines of a block with surrounding blank lines removed.
pub fn block_lines(block: &str) -> Vec<&str> {
    block.trim().lines().collect()
}

/// Index of the first non-blank line at or after `from`.
pub fn skip_blank(lines: &[&str], from: usize) -> usize {
    let mut i = from;
    while i < lines.len() && lines[i].trim().is_empty() {
        i += 1;
    }
    i
}

/// A "|"-delimited line that is not a bullet.
pub fn is_detail_line(line: &str) -> bool {
    line.contains('|') && !line.trim_start().starts_with('-')
}

/// Split on "|" into trimmed parts.
pub fn detail_parts(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}
