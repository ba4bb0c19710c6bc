use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// Terminal task status; completed tasks are never overdue.
pub const COMPLETED_STATUS: &str = "Completed";

/// A unit of work inside a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub provisional_id: bool,
    pub name: String,
    /// Raw due date as sent by the backend (`YYYY-MM-DD` or RFC 3339).
    pub due_date: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub project_id: Option<EntityId>,
    /// Joined from the owning project during aggregation.
    pub project_name: Option<String>,
}

impl Task {
    /// Parse `due_date` into an instant. Date-only values mean midnight UTC.
    #[must_use]
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.due_date.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(COMPLETED_STATUS))
    }

    /// A task is overdue when its due instant is strictly before `now` and it
    /// is not completed. Tasks without a parseable due date are never overdue.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed() && self.due_at().is_some_and(|due| due < now)
    }

    /// `high` or `critical` priority, case-insensitive.
    #[must_use]
    pub fn is_high_priority(&self) -> bool {
        self.priority.as_deref().is_some_and(|p| {
            let p = p.trim();
            p.eq_ignore_ascii_case("high") || p.eq_ignore_ascii_case("critical")
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn task(due: Option<&str>, status: Option<&str>) -> Task {
        Task {
            id: EntityId::Number(1),
            provisional_id: false,
            name: "Write report".into(),
            due_date: due.map(str::to_string),
            status: status.map(str::to_string),
            priority: None,
            project_id: None,
            project_name: None,
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn yesterday_open_task_is_overdue() {
        assert!(task(Some("2026-03-09"), Some("In Progress")).is_overdue_at(noon()));
        assert!(task(Some("2026-03-09"), None).is_overdue_at(noon()));
    }

    #[test]
    fn completed_task_is_never_overdue() {
        assert!(!task(Some("2020-01-01"), Some("Completed")).is_overdue_at(noon()));
        assert!(!task(Some("2020-01-01"), Some("completed")).is_overdue_at(noon()));
    }

    #[test]
    fn future_task_is_not_overdue() {
        assert!(!task(Some("2026-03-11"), Some("Pending")).is_overdue_at(noon()));
    }

    #[test]
    fn boundary_is_strict() {
        let now = noon();
        let exact = task(Some("2026-03-10T12:00:00Z"), None);
        assert!(!exact.is_overdue_at(now));
        assert!(exact.is_overdue_at(now + Duration::seconds(1)));
    }

    #[test]
    fn unparseable_due_date_is_not_overdue() {
        assert!(!task(Some("next week"), None).is_overdue_at(noon()));
        assert!(!task(None, None).is_overdue_at(noon()));
    }

    #[test]
    fn due_at_accepts_naive_datetimes() {
        let t = task(Some("2026-03-09T08:30:00"), None);
        assert_eq!(
            t.due_at(),
            Some(Utc.with_ymd_and_hms(2026, 3, 9, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn high_priority_matches_high_and_critical() {
        let mut t = task(None, None);
        for (priority, expected) in [
            (Some("HIGH"), true),
            (Some("critical"), true),
            (Some("low"), false),
            (None, false),
        ] {
            t.priority = priority.map(str::to_string);
            assert_eq!(t.is_high_priority(), expected, "{priority:?}");
        }
    }
}
