use serde_json::Value;

use super::probe::{Probe, first_text, identity};
use crate::Department;

const ID: &[&str] = &["id", "pk"];

const NAME: &[Probe] = &[
    Probe::Field("name"),
    Probe::Field("department_name"),
    Probe::Field("title"),
];

#[must_use]
pub fn department(raw: &Value, position: usize) -> Department {
    let (id, provisional_id) = identity(raw, ID, position);
    let name = first_text(raw, NAME).unwrap_or_else(|| format!("Department #{id}"));
    Department {
        id,
        provisional_id,
        name,
    }
}
