use serde_json::Value;

use super::probe::{Probe, first_id, first_text, identity};
use crate::{MemberRef, Project};

const ID: &[&str] = &["id", "project_id", "pk"];

const NAME: &[Probe] = &[
    Probe::Field("name"),
    Probe::Field("title"),
    Probe::Field("project_name"),
];

const DESCRIPTION: &[Probe] = &[Probe::Field("description"), Probe::Field("summary")];

const MANAGER_ID: &[&str] = &["manager", "manager_id", "project_manager"];

const MANAGER_NAME: &[Probe] = &[Probe::Field("manager_name")];

const STATUS: &[Probe] = &[Probe::Field("status")];

const MEMBER_LISTS: &[&str] = &["assigned_members", "members", "team_members"];

const MEMBER_EMAIL: &[Probe] = &[
    Probe::Field("email"),
    Probe::Field("user.email"),
    Probe::Field("username"),
];

/// Normalize a project payload. Derived fields (`manager_name`,
/// `overdue_count`) are carried over when present so the result stays
/// idempotent.
#[must_use]
pub fn project(raw: &Value, position: usize) -> Project {
    let (id, provisional_id) = identity(raw, ID, position);
    let name = first_text(raw, NAME).unwrap_or_else(|| format!("Project #{id}"));
    let members = MEMBER_LISTS
        .iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_array))
        .map(|list| list.iter().filter_map(member_ref).collect())
        .unwrap_or_default();

    Project {
        id,
        provisional_id,
        name,
        description: first_text(raw, DESCRIPTION).unwrap_or_default(),
        manager_id: first_id(raw, MANAGER_ID),
        manager_name: first_text(raw, MANAGER_NAME),
        status: first_text(raw, STATUS),
        overdue_count: raw
            .get("overdue_count")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0),
        members,
    }
}

/// A member entry is either a bare id or an object carrying an id and/or email.
#[must_use]
pub fn member_ref(raw: &Value) -> Option<MemberRef> {
    let member = match raw {
        Value::Object(_) => MemberRef {
            id: first_id(raw, &["id", "user.id"]),
            email: first_text(raw, MEMBER_EMAIL),
        },
        scalar => MemberRef {
            id: crate::EntityId::from_value(scalar),
            email: None,
        },
    };
    (member.id.is_some() || member.email.is_some()).then_some(member)
}
