//! Derived views: grade and availability derivations wired to the store.
//!
//! One-shot methods read a consistent pair of query results and run the
//! derivation once. `live_*` methods compose [`Live`] snapshots so the
//! derived value is recomputed whenever either input changes.

use scrud_core::availability::available_courses;
use scrud_core::entities::CourseWithTeacher;
use scrud_core::grading::{enrolled_average, level_average, to_display};
use scrud_core::responses::GradeReport;

use crate::error::StoreError;
use crate::live::Live;
use crate::service::ScrudService;

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl ScrudService {
    /// Courses of `level_code` the student can still enroll in, kept current.
    pub fn live_available_courses(
        &self,
        student_id: &str,
        level_code: &str,
    ) -> Live<Vec<CourseWithTeacher>> {
        self.live_courses_with_teacher_by_level(level_code)
            .combine_latest(
                self.live_enrollments_by_student(student_id),
                |courses, enrollments| available_courses(courses, enrollments),
            )
    }

    /// Credit-weighted average over every course the student is enrolled in.
    pub fn live_enrolled_average(&self, student_id: &str) -> Live<f64> {
        self.live_enrollments_with_courses(student_id)
            .map(|rows| enrolled_average(rows))
    }

    /// Credit-weighted average over the courses of `level_code`, kept current.
    pub fn live_final_grade(&self, student_id: &str, level_code: &str) -> Live<f64> {
        self.live_enrollments_by_student(student_id).combine_latest(
            self.live_courses_by_level(level_code),
            |enrollments, courses| level_average(enrollments, courses),
        )
    }

    /// Credit-weighted average over the courses of `level_code`.
    pub async fn final_grade(&self, student_id: &str, level_code: &str) -> Result<f64, StoreError> {
        let enrollments = self.enrollments_by_student(student_id).await?;
        let courses = self.courses_by_level(level_code).await?;
        Ok(level_average(&enrollments, &courses))
    }

    /// Courses of `level_code` the student can still enroll in.
    pub async fn available_courses_for(
        &self,
        student_id: &str,
        level_code: &str,
    ) -> Result<Vec<CourseWithTeacher>, StoreError> {
        let courses = self.courses_with_teacher_by_level(level_code).await?;
        let enrollments = self.enrollments_by_student(student_id).await?;
        Ok(available_courses(&courses, &enrollments))
    }

    /// Both averages for a student, at the student's own level.
    pub async fn grade_report(&self, student_id: &str) -> Result<GradeReport, StoreError> {
        let student = self.get_student(student_id).await?;
        let enrolled = self.enrollments_with_courses(student_id).await?;
        let courses = self.courses_by_level(&student.level_code).await?;

        let graded = enrolled.iter().filter(|row| row.enrollment.is_graded()).count();
        Ok(GradeReport {
            student_id: student.id,
            level_average: to_display(level_average(&enrolled, &courses)),
            enrolled_average: to_display(enrolled_average(&enrolled)),
            graded_courses: count(graded),
            enrolled_courses: count(enrolled.len()),
            level_code: student.level_code,
        })
    }
}
