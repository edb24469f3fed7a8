use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of the CV parsing pipeline. A failed parse keeps the raw file
/// so the candidate or HR can retry on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsingStatus {
    Pending,
    Completed,
    Failed,
}

impl ParsingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParsingStatus::Pending => "pending",
            ParsingStatus::Completed => "completed",
            ParsingStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cv {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub is_primary: bool,
    pub parsing_status: String,
    pub parsed_data: Option<JsonValue>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub parsed_at: Option<DateTime<Utc>>,
}

/// Structured record produced by the skill-extraction boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedCv {
    #[serde(default)]
    pub skills: ParsedSkills,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub years_of_experience: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedSkills {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
}

impl Cv {
    /// Extracted structured data, if parsing completed and the payload is well formed.
    pub fn parsed(&self) -> Option<ParsedCv> {
        self.parsed_data
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}
