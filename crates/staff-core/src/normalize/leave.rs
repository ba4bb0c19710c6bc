use serde_json::Value;

use super::probe::{Probe, first_text, identity};
use crate::LeaveRequest;

const ID: &[&str] = &["id", "pk"];
const STATUS: &[Probe] = &[Probe::Field("status")];
const LEAVE_TYPE: &[Probe] = &[Probe::Field("leave_type"), Probe::Field("type")];
const START: &[Probe] = &[Probe::Field("start_date"), Probe::Field("start")];
const END: &[Probe] = &[Probe::Field("end_date"), Probe::Field("end")];
const REASON: &[Probe] = &[Probe::Field("reason"), Probe::Field("leave_reason")];

#[must_use]
pub fn leave_request(raw: &Value, position: usize) -> LeaveRequest {
    let (id, provisional_id) = identity(raw, ID, position);
    LeaveRequest {
        id,
        provisional_id,
        status: first_text(raw, STATUS),
        leave_type: first_text(raw, LEAVE_TYPE),
        start_date: first_text(raw, START),
        end_date: first_text(raw, END),
        reason: first_text(raw, REASON),
    }
}
