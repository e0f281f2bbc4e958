//! Enrollment repository: joining, grading, and per-student/per-course views.

use chrono::Utc;
use tracing::debug;

use scrud_core::entities::{Enrollment, EnrollmentWithCourse, StudentWithScore};
use scrud_core::enums::EntityType;
use scrud_core::grading::UNGRADED_SCORE;

use crate::error::StoreError;
use crate::helpers::{get_f32, parse_datetime};
use crate::repos::course;
use crate::service::ScrudService;

const SELECT_COLS: &str = "student_id, course_id, score, enrolled_at";

const JOINED_COLS: &str = "e.student_id, e.course_id, e.score, e.enrolled_at";

const COL_COUNT: i32 = 4;

fn row_to_enrollment(row: &libsql::Row, base: i32) -> Result<Enrollment, StoreError> {
    Ok(Enrollment {
        student_id: row.get(base)?,
        course_id: row.get(base + 1)?,
        score: get_f32(row, base + 2)?,
        enrolled_at: parse_datetime(&row.get::<String>(base + 3)?)?,
    })
}

impl ScrudService {
    /// Enroll a student in a course, ungraded.
    ///
    /// A second enrollment of the same pair is rejected with
    /// [`StoreError::DuplicateEnrollment`] and leaves the existing row (and its
    /// score) untouched. The primary key decides, so concurrent attempts
    /// leave exactly one row.
    pub async fn enroll(&self, student_id: &str, course_id: &str) -> Result<Enrollment, StoreError> {
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO enrollments ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4)"),
                libsql::params![
                    student_id,
                    course_id,
                    f64::from(UNGRADED_SCORE),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| match StoreError::from_write(e) {
                err if err.is_unique_violation() => StoreError::DuplicateEnrollment {
                    student_id: student_id.to_string(),
                    course_id: course_id.to_string(),
                },
                err => err,
            })?;

        debug!(student_id, course_id, "enrolled");
        self.notify(&[EntityType::Enrollment]);

        Ok(Enrollment {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            score: UNGRADED_SCORE,
            enrolled_at: now,
        })
    }

    /// Record a score. Negative and non-finite scores are rejected. The upper
    /// end of the grading scale is the caller's concern.
    pub async fn update_score(
        &self,
        student_id: &str,
        course_id: &str,
        score: f32,
    ) -> Result<Enrollment, StoreError> {
        if !score.is_finite() || score < 0.0 {
            return Err(StoreError::InvalidScore(score));
        }

        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE enrollments SET score = ?1 WHERE student_id = ?2 AND course_id = ?3",
                libsql::params![f64::from(score), student_id, course_id],
            )
            .await?;
        if changed == 0 {
            return Err(StoreError::NoResult);
        }

        debug!(student_id, course_id, score, "updated score");
        self.notify(&[EntityType::Enrollment]);
        self.get_enrollment(student_id, course_id)
            .await?
            .ok_or(StoreError::NoResult)
    }

    pub async fn get_enrollment(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Enrollment>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM enrollments WHERE student_id = ?1 AND course_id = ?2"
                ),
                [student_id, course_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_enrollment(&row, 0).map(Some),
            None => Ok(None),
        }
    }

    pub async fn unenroll(&self, student_id: &str, course_id: &str) -> Result<(), StoreError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
                [student_id, course_id],
            )
            .await?;
        if changed == 0 {
            return Err(StoreError::NoResult);
        }

        debug!(student_id, course_id, "unenrolled");
        self.notify(&[EntityType::Enrollment]);
        Ok(())
    }

    pub async fn enrollments_by_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<Enrollment>, StoreError> {
        self.query_enrollments(
            &format!(
                "SELECT {SELECT_COLS} FROM enrollments WHERE student_id = ?1 \
                 ORDER BY enrolled_at, course_id"
            ),
            student_id,
        )
        .await
    }

    pub async fn enrollments_by_course(
        &self,
        course_id: &str,
    ) -> Result<Vec<Enrollment>, StoreError> {
        self.query_enrollments(
            &format!(
                "SELECT {SELECT_COLS} FROM enrollments WHERE course_id = ?1 \
                 ORDER BY enrolled_at, student_id"
            ),
            course_id,
        )
        .await
    }

    /// A student's enrollments joined with their courses, ordered by course name.
    pub async fn enrollments_with_courses(
        &self,
        student_id: &str,
    ) -> Result<Vec<EnrollmentWithCourse>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {JOINED_COLS}, {course_cols} FROM enrollments e \
                     JOIN courses c ON c.id = e.course_id \
                     WHERE e.student_id = ?1 ORDER BY c.name, c.id",
                    course_cols = course::JOINED_COLS,
                ),
                [student_id],
            )
            .await?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(EnrollmentWithCourse {
                enrollment: row_to_enrollment(&row, 0)?,
                course: course::row_to_course(&row, COL_COUNT)?,
            });
        }
        Ok(out)
    }

    /// Roster of a course with each student's current score.
    pub async fn students_with_scores_by_course(
        &self,
        course_id: &str,
    ) -> Result<Vec<StudentWithScore>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT s.id, s.first_name, s.last_name, e.score FROM enrollments e \
                 JOIN students s ON s.id = e.student_id \
                 WHERE e.course_id = ?1 ORDER BY s.last_name, s.first_name",
                [course_id],
            )
            .await?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(StudentWithScore {
                student_id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                score: get_f32(&row, 3)?,
            });
        }
        Ok(out)
    }

    async fn query_enrollments(&self, sql: &str, key: &str) -> Result<Vec<Enrollment>, StoreError> {
        let mut rows = self.db().conn().query(sql, [key]).await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(row_to_enrollment(&row, 0)?);
        }
        Ok(out)
    }
}
