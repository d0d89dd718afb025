use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::matching::domain::{CandidateId, CandidateProfile};

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<CandidateProfile>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut profiles = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        profiles.push(row.into_profile());
    }

    Ok(profiles)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(rename = "College", default, deserialize_with = "empty_string_as_none")]
    college: Option<String>,
    #[serde(rename = "Branch", default, deserialize_with = "empty_string_as_none")]
    branch: Option<String>,
    #[serde(rename = "CGPA", default)]
    cgpa: Option<f64>,
    #[serde(rename = "Skills", default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(rename = "Experience", default)]
    experience: Option<f64>,
    #[serde(rename = "Resume", default, deserialize_with = "empty_string_as_none")]
    resume: Option<String>,
}

impl RosterRow {
    fn into_profile(self) -> CandidateProfile {
        CandidateProfile {
            id: CandidateId(self.id),
            name: self.name,
            email: self.email.unwrap_or_default(),
            college: self.college.unwrap_or_default(),
            branch: self.branch.unwrap_or_default(),
            cgpa: self.cgpa.unwrap_or_default(),
            skills: self.skills.as_deref().map(split_skills).unwrap_or_default(),
            experience: self.experience.unwrap_or_default(),
            projects: Vec::new(),
            resume: self.resume,
            phss_score: None,
        }
    }
}

/// Roster exports list skills in one cell, semicolon-separated.
fn split_skills(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|skill| skill.trim().to_string())
        .filter(|skill| !skill.is_empty())
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
pub(crate) fn split_skills_for_tests(raw: &str) -> Vec<String> {
    split_skills(raw)
}
