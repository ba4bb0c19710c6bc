use serde::{Deserialize, Serialize};

use crate::EntityId;

/// A leave request filed by an employee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaveRequest {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub provisional_id: bool,
    pub status: Option<String>,
    pub leave_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reason: Option<String>,
}

impl LeaveRequest {
    /// Whether the request still awaits a decision (case-insensitive).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("pending"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(status: Option<&str>) -> LeaveRequest {
        LeaveRequest {
            id: EntityId::Number(1),
            provisional_id: false,
            status: status.map(str::to_string),
            leave_type: None,
            start_date: None,
            end_date: None,
            reason: None,
        }
    }

    #[test]
    fn pending_is_case_insensitive() {
        assert!(with_status(Some("pending")).is_pending());
        assert!(with_status(Some("PENDING")).is_pending());
        assert!(with_status(Some("Pending ")).is_pending());
        assert!(!with_status(Some("approved")).is_pending());
        assert!(!with_status(None).is_pending());
    }
}
