pub mod awards;
pub mod competencies;
pub mod education;
pub mod header;
pub mod work;

use super::sections::{SectionKind, SectionMap};
use crate::models::Resume;

/// Run every section extractor over its section's raw text.
pub fn extract_all(sections: &SectionMap) -> Resume {
    Resume {
        header: header::extract(sections.get(SectionKind::Header)),
        profile: sections.get(SectionKind::Profile).trim().to_string(),
        competencies: competencies::extract(sections.get(SectionKind::Competencies)),
        work: work::extract(sections.get(SectionKind::Work)),
        education: education::extract(sections.get(SectionKind::Education)),
        awards_and_certifications: awards::extract(sections.get(SectionKind::AwardsAndCertifications)),
    }
}

// ── Tests ──
