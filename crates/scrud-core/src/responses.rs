//! Response types rendered by the `scrud` CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response from `scrud report grades`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GradeReport {
    pub student_id: String,
    pub level_code: String,
    /// Credit-weighted average over graded courses of the student's level.
    pub level_average: f32,
    /// Credit-weighted average over every graded enrollment.
    pub enrolled_average: f32,
    pub graded_courses: u32,
    pub enrolled_courses: u32,
}
