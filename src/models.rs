use serde::{Deserialize, Serialize};

/// Structured résumé extracted from a markdown document.
///
/// Every field is always present. Missing structure shows up as an empty
/// string or an empty list, never as an absent value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub header: Header,
    pub profile: String,
    pub competencies: Vec<String>,
    pub work: Vec<Work>,
    pub education: Vec<Education>,
    pub awards_and_certifications: Vec<AwardsAndCertification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub name: String,
    /// No source line maps here; always empty.
    pub subtitle: String,
    pub email: String,
    pub phone: String,
    /// Professional network marker, e.g. "LinkedIn".
    pub left_detail: String,
    /// Personal site, e.g. "www.jane.dev".
    pub right_detail: String,
}

/// One role held at an employer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    pub title: String,
    pub start: String,
    pub end: String,
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub company: String,
    pub location: String,
    pub designations: Vec<Designation>,
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub qualification: Vec<String>,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honors_and_grade: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardsAndCertification {
    pub name: String,
    pub acquired_date: String,
}
