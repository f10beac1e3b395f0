use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::parser::sections::{Headings, SectionKind};

const ENV_PREFIX: &str = "RESUME";
const DEFAULT_FILE: &str = "resume";

/// Runtime settings: an optional `resume.{toml,yaml,json}` file, then
/// `RESUME_*` environment variables (`__` separates nested keys).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub db_path: PathBuf,
    pub memory_name: String,
    pub description: String,
    pub log_level: String,
    pub headings: HeadingAliases,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            db_path: PathBuf::from("data/resume.sqlite"),
            memory_name: "resume-memory".to_string(),
            description: "Résumé".to_string(),
            log_level: "info".to_string(),
            headings: HeadingAliases::default(),
        }
    }
}

/// Extra section headings, appended after the built-in ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeadingAliases {
    pub profile: Vec<String>,
    pub competencies: Vec<String>,
    pub work: Vec<String>,
    pub education: Vec<String>,
    pub awards: Vec<String>,
}

impl HeadingAliases {
    fn entries(&self) -> [(SectionKind, &[String]); 5] {
        [
            (SectionKind::Profile, self.profile.as_slice()),
            (SectionKind::Competencies, self.competencies.as_slice()),
            (SectionKind::Work, self.work.as_slice()),
            (SectionKind::Education, self.education.as_slice()),
            (SectionKind::AwardsAndCertifications, self.awards.as_slice()),
        ]
    }
}

impl Settings {
    /// Load from `path` when given (must exist), otherwise from an optional
    /// `resume.*` file in the working directory. Environment wins over both.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };

        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("headings.profile")
            .with_list_parse_key("headings.competencies")
            .with_list_parse_key("headings.work")
            .with_list_parse_key("headings.education")
            .with_list_parse_key("headings.awards")
            .try_parsing(true);

        let settings = Config::builder().add_source(file).add_source(env).build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Built-in headings plus every configured alias.
    pub fn headings(&self) -> Headings {
        let mut headings = Headings::default();
        for (kind, aliases) in self.headings.entries() {
            for alias in aliases {
                headings.push(kind, alias);
            }
        }
        headings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Settings::load reads the process environment; tests touching it run one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_config(ext: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(ext).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.db_path, PathBuf::from("data/resume.sqlite"));
        assert_eq!(s.memory_name, "resume-memory");
        assert_eq!(s.headings().len(), Headings::default().len());
    }

    #[test]
    fn toml_file_overrides_and_extends() {
        let file = write_config(
            ".toml",
            r###"
            memory_name = "portfolio"

            [headings]
            work = ["Employment History", "## Experience"]
            "###,
        );
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let s = Settings::load(Some(file.path())).unwrap();
        assert_eq!(s.memory_name, "portfolio");
        assert_eq!(s.log_level, "info");

        let h = s.headings();
        assert_eq!(h.classify("## Experience"), Some(SectionKind::Work));
        assert_eq!(h.classify("## EMPLOYMENT HISTORY"), Some(SectionKind::Work));
        assert_eq!(h.classify("## Work Experience"), Some(SectionKind::Work));
    }

    #[test]
    fn json_file() {
        let file = write_config(".json", r#"{"db_path": "/tmp/r.sqlite", "headings": {"awards": ["Certifications"]}}"#);
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let s = Settings::load(Some(file.path())).unwrap();
        assert_eq!(s.db_path, PathBuf::from("/tmp/r.sqlite"));
        assert_eq!(s.headings().classify("## Certifications"), Some(SectionKind::AwardsAndCertifications));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        assert!(Settings::load(Some(Path::new("/nonexistent/resume.toml"))).is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = write_config(".toml", "db_path = \"from-file.sqlite\"\n");
        env::set_var("RESUME_DB_PATH", "/tmp/from-env.sqlite");
        env::set_var("RESUME_HEADINGS__WORK", "Experience,Employment");

        let loaded = Settings::load(Some(file.path()));
        env::remove_var("RESUME_DB_PATH");
        env::remove_var("RESUME_HEADINGS__WORK");

        let s = loaded.unwrap();
        assert_eq!(s.db_path, PathBuf::from("/tmp/from-env.sqlite"));
        assert_eq!(s.headings.work, vec!["Experience", "Employment"]);
        let h = s.headings();
        assert_eq!(h.classify("## Employment"), Some(SectionKind::Work));
        assert_eq!(h.classify("## Experience"), Some(SectionKind::Work));
    }
}
