use std::fmt;
use std::ops::Index;

/// Top-level regions of a résumé document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Header,
    Profile,
    Competencies,
    Work,
    Education,
    AwardsAndCertifications,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Header,
        SectionKind::Profile,
        SectionKind::Competencies,
        SectionKind::Work,
        SectionKind::Education,
        SectionKind::AwardsAndCertifications,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Profile => "profile",
            SectionKind::Competencies => "competencies",
            SectionKind::Work => "work",
            SectionKind::Education => "education",
            SectionKind::AwardsAndCertifications => "awardsAndCertifications",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry of level-2 heading texts that open each section.
///
/// Matching is case-insensitive, so the upper-case legacy headings
/// ("## WORK EXPERIENCE") resolve without extra aliases. Aliases are
/// checked in insertion order; the first hit wins.
#[derive(Debug, Clone)]
pub struct Headings {
    aliases: Vec<(SectionKind, String)>,
}

impl Default for Headings {
    fn default() -> Self {
        Headings {
            aliases: vec![
                (SectionKind::Profile, "personal profile".to_string()),
                (SectionKind::Competencies, "core competencies".to_string()),
                (SectionKind::Work, "work experience".to_string()),
                (SectionKind::Education, "education".to_string()),
                (SectionKind::AwardsAndCertifications, "awards and certifications".to_string()),
            ],
        }
    }
}

impl Headings {
    /// Empty registry; every line stays in the header.
    pub fn none() -> Self {
        Headings { aliases: Vec::new() }
    }

    pub fn with_alias(mut self, kind: SectionKind, heading: &str) -> Self {
        self.push(kind, heading);
        self
    }

    pub fn push(&mut self, kind: SectionKind, heading: &str) {
        let heading = heading.trim().trim_start_matches('#').trim().to_lowercase();
        if heading.is_empty() || kind == SectionKind::Header {
            return;
        }
        if !self.aliases.iter().any(|(k, h)| *k == kind && *h == heading) {
            self.aliases.push((kind, heading));
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Section opened by `line`, if it is a recognized `## ` heading.
    /// Deeper headings (`###`) never match.
    pub fn classify(&self, line: &str) -> Option<SectionKind> {
        let text = line.trim_end().strip_prefix("## ")?.trim().to_lowercase();
        self.aliases
            .iter()
            .find(|(_, alias)| heading_matches(&text, alias))
            .map(|(kind, _)| *kind)
    }
}

/// Prefix match ending on a word boundary: "education" matches
/// "education:" and "education & training" but not "educational".
fn heading_matches(text: &str, alias: &str) -> bool {
    match text.strip_prefix(alias) {
        Some(rest) => rest.chars().next().map_or(true, |c| !c.is_alphanumeric()),
        None => false,
    }
}

/// Raw text of each section, keyed by [`SectionKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    texts: [String; 6],
}

impl SectionMap {
    pub fn get(&self, kind: SectionKind) -> &str {
        &self.texts[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &str)> {
        SectionKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    fn append_line(&mut self, kind: SectionKind, line: &str) {
        let text = &mut self.texts[kind.index()];
        text.push_str(line);
        text.push('\n');
    }
}

impl Index<SectionKind> for SectionMap {
    type Output = str;

    fn index(&self, kind: SectionKind) -> &str {
        self.get(kind)
    }
}

/// Single left-to-right pass: recognized headings switch the current
/// section and are consumed; every other line is appended to it.
pub fn split_sections(markdown: &str, headings: &Headings) -> SectionMap {
    let mut sections = SectionMap::default();
    let mut current = SectionKind::Header;

    for line in markdown.lines() {
        if let Some(kind) = headings.classify(line) {
            current = kind;
            continue;
        }
        sections.append_line(current, line);
    }

    sections
}

// ── Tests ──
