use serde::{Deserialize, Serialize};

use crate::EntityId;

/// A staff member as shown in directories and joined into project rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: EntityId,
    /// Set when the backend sent no id and `id` is the record's 1-based
    /// position in its collection. Such ids are row keys only.
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub provisional_id: bool,
    pub name: String,
    pub phone_number: String,
    pub employee_code: Option<String>,
    pub department_id: Option<EntityId>,
    /// Joined from the department collection during aggregation.
    pub department_name: Option<String>,
}
