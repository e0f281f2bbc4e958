use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::UserRole;

/// The account a successful login resolves to.
///
/// Students carry their level so course listings can be scoped without a
/// second lookup. Teachers have no level.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoggedInUser {
    pub id: String,
    pub role: UserRole,
    pub level_code: Option<String>,
}

impl LoggedInUser {
    #[must_use]
    pub fn student(id: impl Into<String>, level_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: UserRole::Student,
            level_code: Some(level_code.into()),
        }
    }

    #[must_use]
    pub fn teacher(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: UserRole::Teacher,
            level_code: None,
        }
    }
}
