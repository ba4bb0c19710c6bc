use serde::{Deserialize, Serialize};

use crate::EntityId;

/// A project with its derived dashboard fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub provisional_id: bool,
    pub name: String,
    pub description: String,
    pub manager_id: Option<EntityId>,
    /// Joined from the employee collection during aggregation.
    pub manager_name: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub overdue_count: usize,
    #[serde(default)]
    pub members: Vec<MemberRef>,
}

/// A reference to a project member: an id, an email, or both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Project {
    /// Whether `user_id` or `email` appears among the members or as manager.
    ///
    /// Email comparison is case-insensitive.
    #[must_use]
    pub fn involves(&self, user_id: Option<&EntityId>, email: Option<&str>) -> bool {
        let email = email.map(str::trim).filter(|e| !e.is_empty());
        let by_id = user_id.is_some_and(|uid| {
            self.manager_id.as_ref() == Some(uid)
                || self.members.iter().any(|m| m.id.as_ref() == Some(uid))
        });
        let by_email = email.is_some_and(|wanted| {
            self.members
                .iter()
                .filter_map(|m| m.email.as_deref())
                .any(|e| e.eq_ignore_ascii_case(wanted))
        });
        by_id || by_email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(manager: Option<i64>, members: Vec<MemberRef>) -> Project {
        Project {
            id: EntityId::Number(1),
            provisional_id: false,
            name: "Apollo".into(),
            description: String::new(),
            manager_id: manager.map(EntityId::Number),
            manager_name: None,
            status: None,
            overdue_count: 0,
            members,
        }
    }

    #[test]
    fn involves_member_by_id() {
        let p = project(
            None,
            vec![MemberRef {
                id: Some(EntityId::Number(7)),
                email: None,
            }],
        );
        assert!(p.involves(Some(&EntityId::Number(7)), None));
        assert!(!p.involves(Some(&EntityId::Number(8)), None));
    }

    #[test]
    fn involves_member_by_email_ignoring_case() {
        let p = project(
            None,
            vec![MemberRef {
                id: None,
                email: Some("Ada@Example.com".into()),
            }],
        );
        assert!(p.involves(None, Some("ada@example.com")));
        assert!(!p.involves(None, Some("")));
    }

    #[test]
    fn involves_manager() {
        let p = project(Some(3), Vec::new());
        assert!(p.involves(Some(&EntityId::Number(3)), None));
        assert!(!p.involves(None, None));
    }
}
