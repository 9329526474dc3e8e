//! The structured resume returned to clients.
//!
//! Field names follow the JSON contract (camelCase). Every field is read
//! through `models::lenient`, so deserializing any JSON object always yields
//! a record whose arrays are arrays and whose nested objects are present.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub birth_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub self_introduction: String,

    #[serde(default, deserialize_with = "lenient::vec")]
    pub educations: Vec<Education>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub careers: Vec<Career>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub certificates: Vec<Certificate>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub languages: Vec<LanguageSkill>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub computer_skills: Vec<ComputerSkill>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub specialties: Vec<Specialty>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub work_preferences: WorkPreferences,
    #[serde(default, deserialize_with = "lenient::object")]
    pub employment_preferences: EmploymentPreferences,

    #[serde(default, deserialize_with = "lenient::vec")]
    pub portfolios: Vec<Portfolio>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub awards: Vec<Award>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub activities: Vec<Activity>,

    /// Set by the extraction pipeline, never by the model.
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub has_profile_photo: bool,
}

impl ResumeRecord {
    /// Number of populated top-level fields, excluding `hasProfilePhoto`.
    /// Empty strings, empty arrays and `false` do not count.
    pub fn populated_section_count(&self) -> usize {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => fields
                .iter()
                .filter(|(key, value)| key.as_str() != "hasProfilePhoto" && is_populated(value))
                .count(),
            _ => 0,
        }
    }
}

fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, deserialize_with = "lenient::string")]
    pub school: String,
    /// One of 고등학교 / 대학(2,3년) / 대학(4년) / 대학원.
    #[serde(default, deserialize_with = "lenient::string")]
    pub degree: String,
    /// 석사 / 박사 for graduate school.
    #[serde(default, deserialize_with = "lenient::string")]
    pub sub_degree: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub major: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub entry_year: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub graduation_year: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub is_current: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub issuer: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub score: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkill {
    #[serde(default, deserialize_with = "lenient::string")]
    pub language: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub level: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub test_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub score: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerSkill {
    #[serde(default, deserialize_with = "lenient::string")]
    pub program: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub level: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}

/// `content` is requested as an empty string; whatever the model returns is
/// passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPreferences {
    #[serde(default, deserialize_with = "lenient::strings")]
    pub selected_jobs: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub work_type: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub work_period: String,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub work_days: Vec<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub work_location: WorkLocation,
    #[serde(default, deserialize_with = "lenient::string")]
    pub salary: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLocation {
    #[serde(default, deserialize_with = "lenient::strings")]
    pub regions: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub can_work_remote: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentPreferences {
    #[serde(default, deserialize_with = "lenient::string")]
    pub military: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub disability: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub veteran: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subsidy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// `link` or `file`.
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub issuer: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub organization: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}
