use crate::models::AwardsAndCertification;
use crate::parser::blocks::TRAILING_DATE_RE;
use crate::parser::links::clean;
use crate::parser::text::{is_bullet, strip_bullet};

/// One record per "-" line. A trailing "| <Month> <Year>" becomes the
/// acquired date; other lines are ignored.
pub fn extract(section: &str) -> Vec<AwardsAndCertification> {
    section
        .lines()
        .filter(|line| is_bullet(line))
        .map(|line| parse_award(&clean(strip_bullet(line))))
        .collect()
}

fn parse_award(text: &str) -> AwardsAndCertification {
    match TRAILING_DATE_RE.captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map_or(text.len(), |m| m.start());
            AwardsAndCertification {
                name: text[..whole].trim().to_string(),
                acquired_date: caps[1].to_string(),
            }
        }
        None => AwardsAndCertification {
            name: text.to_string(),
            acquired_date: String::new(),
        },
    }
}
