use serde::{Deserialize, Serialize};

/// Canonical list shape every paginated endpoint is normalized into.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
}

/// Join entity between a student and a career; each enrollment carries its
/// own activity flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCareer {
    pub career_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub year_entry: Option<i64>,
    #[serde(default)]
    pub year_of_the_plan: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    #[serde(default)]
    pub dni: String,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub year_entry: Option<i64>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub country_id: Option<i64>,
    pub user: User,
    #[serde(default)]
    pub careers: Vec<StudentCareer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectState {
    Approved,
    Regularized,
    Free,
    Inprogress,
    Notattended,
    Retaking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCareerWithState {
    pub subject_id: i64,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub year: Option<i64>,
    pub subject_state: SubjectState,
    #[serde(default)]
    pub update_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutor {
    pub id: i64,
    #[serde(default)]
    pub dni: String,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub year_entry: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub dedication: Option<String>,
    #[serde(default)]
    pub dedication_days: Option<i64>,
    pub user: User,
    #[serde(default)]
    pub country_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorshipStudent {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorship {
    pub student: TutorshipStudent,
    #[serde(default)]
    pub tutor_id: Option<i64>,
}

/// Meeting as persisted by the backend. `status` / `computedStatus` are kept
/// as raw strings here; the status module owns their interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: i64,
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub computed_status: Option<String>,
    pub tutorship: Tutorship,
    #[serde(default)]
    pub report: Option<Report>,
}

/// Immutable once created; the backend keeps the legacy `topicos` wire name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    #[serde(default)]
    pub meeting_id: Option<i64>,
    #[serde(rename = "topicos", default)]
    pub topics: String,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub year_of_admission: Option<i64>,
    #[serde(default)]
    pub career: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub author_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
}
