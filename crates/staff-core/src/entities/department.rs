use serde::{Deserialize, Serialize};

use crate::EntityId;

/// An organizational unit employees belong to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub provisional_id: bool,
    pub name: String,
}
