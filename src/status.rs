use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Status values the backend persists (or computes) for a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    Pending,
    Reportmissing,
    Confirmed,
}

impl MeetingStatus {
    pub fn parse(s: &str) -> Option<MeetingStatus> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Some(MeetingStatus::Pending),
            "REPORTMISSING" | "REPORT_MISSING" => Some(MeetingStatus::Reportmissing),
            "CONFIRMED" | "COMPLETED" => Some(MeetingStatus::Confirmed),
            _ => None,
        }
    }
}

/// The canonical three-way status the shell renders. Recomputed from the
/// backend snapshot on every fetch; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayStatus {
    Pending,
    Reportmissing,
    Completed,
}

impl DisplayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayStatus::Pending => "PENDING",
            DisplayStatus::Reportmissing => "REPORTMISSING",
            DisplayStatus::Completed => "COMPLETED",
        }
    }

    /// Badge label the shell shows in the meetings table.
    pub fn badge(self) -> &'static str {
        match self {
            DisplayStatus::Pending => "Pending",
            DisplayStatus::Reportmissing => "Report missing",
            DisplayStatus::Completed => "Completed",
        }
    }
}

/// Row actions gated by the derived status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MeetingAction {
    Edit,
    Delete,
    CreateReport,
    ViewReport,
}

/// Maps a meeting snapshot to its display status.
///
/// A filed report wins over everything else. Otherwise the backend's
/// `computedStatus` is trusted as-is when present; the local elapsed check
/// only applies to a plain PENDING meeting the backend has not recomputed.
pub fn derive_display_status(
    persisted: MeetingStatus,
    computed: Option<MeetingStatus>,
    report_exists: bool,
    elapsed: bool,
) -> DisplayStatus {
    if report_exists {
        return DisplayStatus::Completed;
    }
    match computed.unwrap_or(persisted) {
        MeetingStatus::Pending => {
            if computed.is_none() && elapsed {
                DisplayStatus::Reportmissing
            } else {
                DisplayStatus::Pending
            }
        }
        MeetingStatus::Reportmissing => DisplayStatus::Reportmissing,
        MeetingStatus::Confirmed => DisplayStatus::Completed,
    }
}

pub fn allowed_actions(status: DisplayStatus) -> &'static [MeetingAction] {
    match status {
        DisplayStatus::Pending => &[MeetingAction::Edit, MeetingAction::Delete],
        DisplayStatus::Reportmissing => &[
            MeetingAction::Edit,
            MeetingAction::Delete,
            MeetingAction::CreateReport,
        ],
        DisplayStatus::Completed => &[
            MeetingAction::Edit,
            MeetingAction::Delete,
            MeetingAction::ViewReport,
        ],
    }
}

/// True once the scheduled date + time lies behind `now`. The backend sends
/// both fields as strings; an unparseable schedule is treated as not yet
/// elapsed so the meeting stays PENDING instead of demanding a report.
pub fn schedule_elapsed(date: &str, time: &str, now: NaiveDateTime) -> bool {
    let Some(d) = parse_date(date) else {
        return false;
    };
    let t = parse_time(time).unwrap_or(NaiveTime::MIN);
    d.and_time(t) < now
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // Date-only or full ISO timestamp, both seen from the backend.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| s.get(0..10).and_then(|p| NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()))
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .ok()
        .or_else(|| NaiveTime::parse_from_str(s, "%H:%M").ok())
}
