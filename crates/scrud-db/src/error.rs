//! Store error types for scrud-db.

use thiserror::Error;

/// Errors from store operations.
///
/// Write operations return it directly. Live snapshots carry it as
/// `Arc<StoreError>` so one failure can be shared by every observer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A SQL query failed or returned data that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The student is already enrolled in the course.
    #[error("Student {student_id} is already enrolled in course {course_id}")]
    DuplicateEnrollment {
        student_id: String,
        course_id: String,
    },

    /// A uniqueness, foreign key, or check constraint rejected the write.
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// Scores must be finite and non-negative.
    #[error("Invalid score: {0}")]
    InvalidScore(f32),

    /// Password hashing or verification could not run.
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Reclassify a libSQL failure caused by a schema constraint.
    ///
    /// Anything that is not a constraint failure is passed through as
    /// [`StoreError::LibSql`].
    pub(crate) fn from_write(err: libsql::Error) -> Self {
        let message = err.to_string();
        if message.contains("constraint failed") {
            Self::Constraint(message)
        } else {
            Self::LibSql(err)
        }
    }

    /// Whether this is a uniqueness or primary key violation.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::Constraint(msg) if msg.contains("UNIQUE") || msg.contains("PRIMARY KEY"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_detection() {
        let err = StoreError::Constraint(
            "UNIQUE constraint failed: enrollments.student_id, enrollments.course_id".into(),
        );
        assert!(err.is_unique_violation());

        let err = StoreError::Constraint("FOREIGN KEY constraint failed".into());
        assert!(!err.is_unique_violation());
        assert!(!StoreError::NoResult.is_unique_violation());
    }

    #[test]
    fn duplicate_enrollment_message_names_both_ids() {
        let err = StoreError::DuplicateEnrollment {
            student_id: "stu-1".into(),
            course_id: "crs-1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("stu-1"));
        assert!(msg.contains("crs-1"));
    }
}
