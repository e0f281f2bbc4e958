//! ID prefix constants.
//!
//! IDs are generated by the store as `{prefix}-{8 hex chars}`, e.g. `"stu-a3f8b2c1"`.
//! Enrollments have no ID of their own; they are keyed by `(student_id, course_id)`.

use crate::errors::CoreError;

pub const PREFIX_STUDENT: &str = "stu";
pub const PREFIX_TEACHER: &str = "tch";
pub const PREFIX_COURSE: &str = "crs";

pub const ALL_PREFIXES: [&str; 3] = [PREFIX_STUDENT, PREFIX_TEACHER, PREFIX_COURSE];

/// Whether `id` carries the given prefix followed by a dash.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('-') && rest.len() > 1)
}

/// Reject an ID that does not belong to the expected entity table.
///
/// Catches swapped arguments (a course ID where a student ID belongs) before
/// they reach the store as an opaque foreign-key failure.
pub fn require_prefix(id: &str, prefix: &str, field: &str) -> Result<(), CoreError> {
    if has_prefix(id, prefix) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} '{id}' should look like '{prefix}-xxxxxxxx'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_distinct() {
        let mut seen = ALL_PREFIXES.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), ALL_PREFIXES.len());
    }

    #[test]
    fn has_prefix_requires_dash_and_body() {
        assert!(has_prefix("stu-a3f8b2c1", PREFIX_STUDENT));
        assert!(!has_prefix("stu-", PREFIX_STUDENT));
        assert!(!has_prefix("stua3f8b2c1", PREFIX_STUDENT));
        assert!(!has_prefix("crs-a3f8b2c1", PREFIX_STUDENT));
    }

    #[test]
    fn require_prefix_names_the_field() {
        assert!(require_prefix("crs-a3f8b2c1", PREFIX_COURSE, "course_id").is_ok());
        let err = require_prefix("crs-a3f8b2c1", PREFIX_STUDENT, "student_id").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("student_id 'crs-a3f8b2c1'"));
    }
}
