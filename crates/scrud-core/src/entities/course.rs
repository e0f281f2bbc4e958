use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A course declared for one academic level.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Course {
    pub id: String,
    pub name: String,
    /// ECTS credit weight. Non-negative.
    pub ects: f32,
    pub level_code: String,
    /// Owning teacher. `None` while the course is unassigned or after the
    /// teacher was deleted.
    pub teacher_id: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
