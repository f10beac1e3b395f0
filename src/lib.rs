pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod parser;

use std::fs;
use std::path::Path;

pub use error::{Error, Result};
pub use models::{AwardsAndCertification, Designation, Education, Header, Resume, Work};
pub use parser::sections::{Headings, SectionKind, SectionMap};
pub use parser::{parse_resume, parse_resume_with};

/// Read a markdown document from disk.
pub fn read_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| Error::Encoding(path.to_path_buf()))
}

/// Read and parse a résumé file.
pub fn parse_file(path: &Path, headings: &Headings) -> Result<Resume> {
    let markdown = read_document(path)?;
    Ok(parse_resume_with(&markdown, headings))
}
