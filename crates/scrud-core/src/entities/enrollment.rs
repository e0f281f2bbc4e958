use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::grading;

/// Join row between a student and a course, keyed by `(student_id, course_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Enrollment {
    pub student_id: String,
    pub course_id: String,
    /// Stored score. [`grading::UNGRADED_SCORE`] until a teacher grades it.
    pub score: f32,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    #[must_use]
    pub fn is_graded(&self) -> bool {
        grading::is_graded(self.score)
    }

    /// The score as an explicit optional grade: `None` while ungraded.
    #[must_use]
    pub fn grade(&self) -> Option<f32> {
        self.is_graded().then_some(self.score)
    }
}
