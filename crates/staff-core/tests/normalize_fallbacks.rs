//! Fallback-chain, totality, and idempotence tests for the entity normalizer.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use staff_core::normalize::{self, UNKNOWN_EMPLOYEE, UNKNOWN_PHONE};
use staff_core::{EntityId, MemberRef};

#[rstest]
#[case::explicit_name(json!({"name": "Ada", "full_name": "Ada L", "username": "ada"}), "Ada")]
#[case::full_name(json!({"full_name": "Ada Lovelace", "first_name": "X"}), "Ada Lovelace")]
#[case::first_and_last(json!({"first_name": "Ada", "last_name": "Lovelace", "username": "ada"}), "Ada Lovelace")]
#[case::first_only(json!({"first_name": "Ada", "username": "ada"}), "Ada")]
#[case::nested_user(json!({"user": {"first_name": "Ada", "last_name": "Lovelace"}, "username": "ada"}), "Ada Lovelace")]
#[case::username(json!({"username": "ada", "email": "ada@example.com"}), "ada")]
#[case::email(json!({"email": "ada@example.com"}), "ada@example.com")]
#[case::blank_name_skipped(json!({"name": "  ", "username": "ada"}), "ada")]
#[case::nothing(json!({"phone": "555"}), UNKNOWN_EMPLOYEE)]
#[case::nested_email_is_not_in_chain(json!({"user": {"email": "ada@example.com"}}), UNKNOWN_EMPLOYEE)]
fn employee_display_name_chain(#[case] raw: Value, #[case] expected: &str) {
    assert_eq!(normalize::employee(&raw, 1).name, expected);
}

#[rstest]
#[case::phone_number(json!({"phone_number": "111", "phone": "222"}), "111")]
#[case::phone(json!({"phone": "222", "user": {"phone_number": "333"}}), "222")]
#[case::nested_phone_number(json!({"user": {"phone_number": "333", "phone": "444"}}), "333")]
#[case::nested_phone(json!({"user": {"phone": "444"}}), "444")]
#[case::numeric(json!({"phone": 5550100}), "5550100")]
#[case::nothing(json!({}), UNKNOWN_PHONE)]
fn employee_phone_chain(#[case] raw: Value, #[case] expected: &str) {
    assert_eq!(normalize::employee(&raw, 1).phone_number, expected);
}

#[rstest]
#[case::name(json!({"id": 4, "name": "Apollo", "title": "T"}), "Apollo")]
#[case::title(json!({"id": 4, "title": "Gemini"}), "Gemini")]
#[case::project_name(json!({"id": 4, "project_name": "Mercury"}), "Mercury")]
#[case::synthesized(json!({"id": 4}), "Project #4")]
fn project_name_chain(#[case] raw: Value, #[case] expected: &str) {
    assert_eq!(normalize::project(&raw, 1).name, expected);
}

#[rstest]
#[case::null(Value::Null)]
#[case::number(json!(17))]
#[case::string(json!("not a record"))]
#[case::array(json!([1, 2, 3]))]
#[case::empty(json!({}))]
#[case::wrong_types(json!({"id": [], "name": {}, "user": "x", "members": "y", "overdue_count": "z"}))]
fn normalizers_are_total(#[case] raw: Value) {
    let employee = normalize::employee(&raw, 2);
    assert_eq!(employee.name, UNKNOWN_EMPLOYEE);
    assert_eq!(employee.phone_number, UNKNOWN_PHONE);
    assert_eq!(employee.id, EntityId::Number(2));
    assert!(employee.provisional_id);

    let project = normalize::project(&raw, 2);
    assert_eq!(project.name, "Project #2");
    assert_eq!(project.overdue_count, 0);
    assert!(project.members.is_empty());

    let task = normalize::task(&raw, 2);
    assert_eq!(task.name, "Task #2");

    let leave = normalize::leave_request(&raw, 2);
    assert!(!leave.is_pending());

    let department = normalize::department(&raw, 2);
    assert_eq!(department.name, "Department #2");
}

#[test]
fn collection_assigns_one_based_positions() {
    let raw = vec![json!({"name": "A"}), json!({"id": 10, "name": "B"}), json!({"name": "C"})];
    let employees = normalize::collection(&raw, normalize::employee);
    let ids: Vec<_> = employees.iter().map(|e| (e.id.clone(), e.provisional_id)).collect();
    assert_eq!(
        ids,
        vec![
            (EntityId::Number(1), true),
            (EntityId::Number(10), false),
            (EntityId::Number(3), true),
        ]
    );
}

#[test]
fn project_members_accept_ids_and_objects() {
    let raw = json!({
        "id": 1,
        "members": [5, "6", {"id": 7}, {"user": {"id": 8, "email": "h@x.io"}}, {"username": "kim"}, null]
    });
    let project = normalize::project(&raw, 1);
    assert_eq!(
        project.members,
        vec![
            MemberRef { id: Some(EntityId::Number(5)), email: None },
            MemberRef { id: Some(EntityId::Number(6)), email: None },
            MemberRef { id: Some(EntityId::Number(7)), email: None },
            MemberRef { id: Some(EntityId::Number(8)), email: Some("h@x.io".into()) },
            MemberRef { id: None, email: Some("kim".into()) },
        ]
    );
}

#[test]
fn assigned_members_take_precedence_over_members() {
    let raw = json!({"id": 1, "assigned_members": [1], "members": [2]});
    let project = normalize::project(&raw, 1);
    assert_eq!(project.members.len(), 1);
    assert_eq!(project.members[0].id, Some(EntityId::Number(1)));
}

#[test]
fn manager_accepts_reference_objects() {
    let raw = json!({"id": 1, "manager": {"id": 12, "name": "Grace"}});
    assert_eq!(normalize::project(&raw, 1).manager_id, Some(EntityId::Number(12)));
    let raw = json!({"id": 1, "manager_id": "12"});
    assert_eq!(normalize::project(&raw, 1).manager_id, Some(EntityId::Number(12)));
}

#[test]
fn employee_department_from_object_or_scalar() {
    let nested = normalize::employee(&json!({"id": 1, "department": {"id": 3, "name": "Ops"}}), 1);
    assert_eq!(nested.department_id, Some(EntityId::Number(3)));
    assert_eq!(nested.department_name.as_deref(), Some("Ops"));

    let flat = normalize::employee(&json!({"id": 1, "department": 3}), 1);
    assert_eq!(flat.department_id, Some(EntityId::Number(3)));
    assert_eq!(flat.department_name, None);
}

#[test]
fn leave_request_alternate_field_names() {
    let leave = normalize::leave_request(
        &json!({"id": 2, "type": "sick", "start": "2026-01-02", "end": "2026-01-03", "leave_reason": "flu", "status": "Pending"}),
        1,
    );
    assert_eq!(leave.leave_type.as_deref(), Some("sick"));
    assert_eq!(leave.start_date.as_deref(), Some("2026-01-02"));
    assert_eq!(leave.end_date.as_deref(), Some("2026-01-03"));
    assert_eq!(leave.reason.as_deref(), Some("flu"));
    assert!(leave.is_pending());
}

macro_rules! idempotent {
    ($name:ident, $normalize:path, $raw:expr) => {
        #[test]
        fn $name() {
            let raw: Value = $raw;
            let once = $normalize(&raw, 3);
            let reserialized = serde_json::to_value(&once).unwrap();
            let twice = $normalize(&reserialized, 3);
            assert_eq!(twice, once, "{} is not idempotent", stringify!($normalize));
        }
    };
}

idempotent!(
    employee_nested_user_is_idempotent,
    normalize::employee,
    json!({"pk": "8", "user": {"first_name": "Ada", "phone": "555"}, "department": {"id": 2, "name": "R&D"}, "employee_code": "E-8"})
);
idempotent!(employee_empty_is_idempotent, normalize::employee, json!({}));
idempotent!(
    project_is_idempotent,
    normalize::project,
    json!({"project_id": 4, "title": "Gemini", "summary": "s", "project_manager": {"id": 2}, "team_members": [1, {"email": "a@b.c"}], "overdue_count": 2, "manager_name": "Grace"})
);
idempotent!(project_without_id_is_idempotent, normalize::project, json!({"status": "On Hold"}));
idempotent!(
    task_is_idempotent,
    normalize::task,
    json!({"id": 1, "title": "Ship", "deadline": "2026-02-01", "project": {"id": 4, "name": "Gemini"}, "priority": "High"})
);
idempotent!(
    leave_is_idempotent,
    normalize::leave_request,
    json!({"type": "annual", "start": "2026-01-02", "leave_reason": "trip"})
);
idempotent!(department_is_idempotent, normalize::department, json!({"department_name": "Ops"}));
