use serde::{Deserialize, Serialize};

use crate::{comparison::difference::ControlType, parser::ParsedItem};

#[derive(Debug, Serialize)]
pub struct SubjectOut {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SimilarSubjectsPayload {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectMatchOut {
    pub subject_id: i64,
    pub subject: String,
    pub score: f64,
}

/// Ranked registry matches for one candidate name. No matches means the
/// subject has to be created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarSubjectsOut {
    pub name: String,
    pub matches: Vec<SubjectMatchOut>,
}

#[derive(Debug, Serialize)]
pub struct SpecialtyOut {
    pub id: i64,
    pub name: String,
    pub faculty: String,
    pub degree: String,
    pub created_at: String,
}

/// A faculty or a degree level.
#[derive(Debug, Serialize)]
pub struct LookupOut {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RuleOut {
    pub id: i64,
    pub name: String,
    pub rule: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub specialty: i64,
    pub semester: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntryOut {
    pub id: i64,
    pub subject_id: i64,
    pub subject: String,
    pub semester: u32,
    pub control: ControlType,
    pub lecture: u32,
    pub laboratory: u32,
    pub practice: u32,
    pub total_hours: u64,
}

#[derive(Debug, Deserialize)]
pub struct AcademQuery {
    pub from_specialty: i64,
    pub from_semester: u32,
    pub to_specialty: i64,
    pub to_semester: u32,
}

#[derive(Debug, Serialize)]
pub struct DifferenceOut {
    pub differs: bool,
    pub entry: PlanEntryOut,
}

#[derive(Debug, Serialize)]
pub struct AcademReportOut {
    pub from_specialty: String,
    pub to_specialty: String,
    pub total: usize,
    pub differing: usize,
    pub items: Vec<DifferenceOut>,
}

#[derive(Debug, Deserialize)]
pub struct UploadParsePayload {
    pub rule_id: i64,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct UploadParseOut {
    pub subjects: Vec<SimilarSubjectsOut>,
    pub items: Vec<ParsedItem>,
}

#[derive(Debug, Deserialize)]
pub struct NewSpecialtyPayload {
    pub name: String,
    pub faculty_id: i64,
    pub degree_id: i64,
}

/// How one uploaded subject name is stored: as a new subject or as an
/// existing registry entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectChoicePayload {
    pub name: String,
    #[serde(default)]
    pub is_create: bool,
    pub existing_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanItemPayload {
    pub subject_index: usize,
    pub semester: u32,
    #[serde(default)]
    pub lecture: u32,
    #[serde(default)]
    pub laboratory: u32,
    #[serde(default)]
    pub practice: u32,
    pub control: ControlType,
}

#[derive(Debug, Deserialize)]
pub struct UploadCommitPayload {
    pub specialty: NewSpecialtyPayload,
    pub subjects: Vec<SubjectChoicePayload>,
    pub items: Vec<PlanItemPayload>,
}

#[derive(Debug, Serialize)]
pub struct UploadCommitOut {
    pub specialty_id: i64,
    pub created_subjects: usize,
    pub items: u64,
}
