use serde_json::Value;

use super::probe::{Probe, first_id, first_text, identity};
use crate::Task;

const ID: &[&str] = &["id", "task_id", "pk"];

const NAME: &[Probe] = &[
    Probe::Field("name"),
    Probe::Field("title"),
    Probe::Field("task_name"),
];

const DUE: &[Probe] = &[
    Probe::Field("due_date"),
    Probe::Field("deadline"),
    Probe::Field("due"),
];

const PROJECT_ID: &[&str] = &["project_id", "project"];

const PROJECT_NAME: &[Probe] = &[Probe::Field("project_name"), Probe::Field("project.name")];

#[must_use]
pub fn task(raw: &Value, position: usize) -> Task {
    let (id, provisional_id) = identity(raw, ID, position);
    let name = first_text(raw, NAME).unwrap_or_else(|| format!("Task #{id}"));
    Task {
        id,
        provisional_id,
        name,
        due_date: first_text(raw, DUE),
        status: first_text(raw, &[Probe::Field("status")]),
        priority: first_text(raw, &[Probe::Field("priority")]),
        project_id: first_id(raw, PROJECT_ID),
        project_name: first_text(raw, PROJECT_NAME),
    }
}
