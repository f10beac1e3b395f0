pub mod blocks;
pub mod extract;
pub mod links;
pub mod sections;
pub mod text;

use tracing::debug;

use crate::models::Resume;
use sections::Headings;

/// Two-pass pipeline: markdown → sections → résumé record.
pub fn parse_resume(markdown: &str) -> Resume {
    parse_resume_with(markdown, &Headings::default())
}

/// Same as [`parse_resume`] with a caller-supplied heading registry.
pub fn parse_resume_with(markdown: &str, headings: &Headings) -> Resume {
    let markdown = text::repair_encoding(markdown);
    let sections = sections::split_sections(&markdown, headings);
    let resume = extract::extract_all(&sections);
    debug!(
        name = %resume.header.name,
        competencies = resume.competencies.len(),
        work = resume.work.len(),
        education = resume.education.len(),
        awards = resume.awards_and_certifications.len(),
        "parsed resume"
    );
    resume
}
