use serde_json::Value;

use super::probe::{Probe, first_id, first_text, identity};
use crate::Employee;

pub const UNKNOWN_EMPLOYEE: &str = "Unknown Employee";
pub const UNKNOWN_PHONE: &str = "N/A";

const ID: &[&str] = &["id", "pk"];

const DISPLAY_NAME: &[Probe] = &[
    Probe::Field("name"),
    Probe::Field("full_name"),
    Probe::Joined(&["first_name", "last_name"]),
    Probe::Joined(&["user.first_name", "user.last_name"]),
    Probe::Field("username"),
    Probe::Field("email"),
];

const PHONE: &[Probe] = &[
    Probe::Field("phone_number"),
    Probe::Field("phone"),
    Probe::Field("user.phone_number"),
    Probe::Field("user.phone"),
];

const EMPLOYEE_CODE: &[Probe] = &[Probe::Field("employee_code")];

const DEPARTMENT_ID: &[&str] = &["department", "department_id"];

const DEPARTMENT_NAME: &[Probe] = &[
    Probe::Field("department_name"),
    Probe::Field("department.name"),
];

/// Normalize an employee payload (flat or with a nested `user` object).
#[must_use]
pub fn employee(raw: &Value, position: usize) -> Employee {
    let (id, provisional_id) = identity(raw, ID, position);
    Employee {
        id,
        provisional_id,
        name: first_text(raw, DISPLAY_NAME).unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string()),
        phone_number: first_text(raw, PHONE).unwrap_or_else(|| UNKNOWN_PHONE.to_string()),
        employee_code: first_text(raw, EMPLOYEE_CODE),
        department_id: first_id(raw, DEPARTMENT_ID),
        department_name: first_text(raw, DEPARTMENT_NAME),
    }
}
