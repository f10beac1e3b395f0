use std::sync::LazyLock;

use regex::Regex;

use crate::models::Header;
use crate::parser::links::{normalize_links, LinkPreference};
use crate::parser::text::strip_heading;

/// "(555) 123-4567", "(+65) 8366 8579", "555-123-4567", "555.123.4567".
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\+?\d{1,4}\)\s*\d|\b\d{3}[-.\s]\d{3}[-.\s]\d{4}\b").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactField {
    Email,
    Phone,
    LeftDetail,
    RightDetail,
}

/// Classification rules, evaluated top to bottom for each contact item.
/// Order matters: a profile URL containing "@" is taken as an email
/// because the email rule runs first.
const CONTACT_RULES: &[(ContactField, fn(&str) -> bool)] = &[
    (ContactField::Email, looks_like_email),
    (ContactField::Phone, looks_like_phone),
    (ContactField::LeftDetail, looks_like_network),
    (ContactField::RightDetail, looks_like_site),
];

fn looks_like_email(item: &str) -> bool {
    item.contains('@')
}

fn looks_like_phone(item: &str) -> bool {
    PHONE_RE.is_match(item)
}

fn looks_like_network(item: &str) -> bool {
    item.to_lowercase().contains("linkedin")
}

fn looks_like_site(item: &str) -> bool {
    item.contains("www.") || item.contains("http")
}

impl ContactField {
    fn classify(item: &str) -> Option<ContactField> {
        CONTACT_RULES
            .iter()
            .find(|(_, matches)| matches(item))
            .map(|(field, _)| *field)
    }

    /// Contact values show the visible label; the network marker keeps
    /// only its literal text and falls back to the label when the item is
    /// nothing but a link.
    fn render(self, item: &str) -> String {
        match self {
            ContactField::LeftDetail => {
                let literal = normalize_links(item, LinkPreference::Drop).trim().to_string();
                if literal.is_empty() {
                    normalize_links(item, LinkPreference::Label).trim().to_string()
                } else {
                    literal
                }
            }
            _ => normalize_links(item, LinkPreference::Label).trim().to_string(),
        }
    }

    fn slot(self, header: &mut Header) -> &mut String {
        match self {
            ContactField::Email => &mut header.email,
            ContactField::Phone => &mut header.phone,
            ContactField::LeftDetail => &mut header.left_detail,
            ContactField::RightDetail => &mut header.right_detail,
        }
    }
}

pub fn extract(section: &str) -> Header {
    let mut lines = section.lines().map(str::trim).filter(|l| !l.is_empty());

    let mut header = Header {
        name: lines
            .next()
            .map(|l| normalize_links(strip_heading(l), LinkPreference::Label).trim().to_string())
            .unwrap_or_default(),
        ..Header::default()
    };

    let Some(contact_line) = lines.find(|l| l.contains('|')) else {
        return header;
    };

    for item in contact_line.split('|').map(str::trim).filter(|i| !i.is_empty()) {
        let Some(field) = ContactField::classify(item) else {
            continue;
        };
        let slot = field.slot(&mut header);
        if slot.is_empty() {
            *slot = field.render(item);
        }
    }

    header
}
