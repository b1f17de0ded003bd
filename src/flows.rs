use crate::api::types::StudentCareer;

pub const REPORT_CONFIRM_WARNING: &str =
    "This action is permanent: once filed, the report can be viewed or deleted but never edited.";

/// What the report-creation form has collected so far.
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    pub topics: String,
    pub comments: Option<String>,
    pub career_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    TopicsRequired,
    CareerRequired,
    CareerNotActive,
    NoActiveCareer,
}

impl DraftError {
    pub fn message(&self) -> &'static str {
        match self {
            DraftError::TopicsRequired => "Topics are required",
            DraftError::CareerRequired => "Select one of the student's active careers",
            DraftError::CareerNotActive => "The selected career is not an active enrollment",
            DraftError::NoActiveCareer => "The student has no active career enrollment",
        }
    }
}

/// Career choice derived for the draft: implied when exactly one enrollment
/// is active, user-selected when several are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDraft {
    pub topics: String,
    pub comments: Option<String>,
    pub career_id: i64,
}

/// Client-side gate in front of the create call. Blocks before any network
/// traffic; the confirmation dialog only opens on a clean draft.
pub fn validate_draft(
    draft: &ReportDraft,
    careers: &[StudentCareer],
) -> Result<ResolvedDraft, DraftError> {
    if draft.topics.trim().is_empty() {
        return Err(DraftError::TopicsRequired);
    }
    let active: Vec<&StudentCareer> = careers.iter().filter(|c| c.active).collect();
    let career_id = match (active.len(), draft.career_id) {
        (0, _) => return Err(DraftError::NoActiveCareer),
        (1, None) => active[0].career_id,
        (_, None) => return Err(DraftError::CareerRequired),
        (_, Some(chosen)) => {
            if !active.iter().any(|c| c.career_id == chosen) {
                return Err(DraftError::CareerNotActive);
            }
            chosen
        }
    };
    Ok(ResolvedDraft {
        topics: draft.topics.trim().to_string(),
        comments: draft
            .comments
            .as_ref()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        career_id,
    })
}
