//! Course repository: CRUD, level and teacher listings, joined views.

use chrono::Utc;
use tracing::debug;

use scrud_core::entities::{Course, CourseWithStudents, CourseWithTeacher};
use scrud_core::enums::EntityType;
use scrud_core::ids::PREFIX_COURSE;

use crate::error::StoreError;
use crate::helpers::{get_f32, get_opt_string, parse_datetime, require_text};
use crate::repos::{student, teacher};
use crate::service::ScrudService;
use crate::updates::course::CourseUpdate;

pub(crate) const SELECT_COLS: &str =
    "id, name, ects, level_code, teacher_id, description, created_at";

/// `SELECT_COLS` qualified for joins against `courses c`.
pub(crate) const JOINED_COLS: &str =
    "c.id, c.name, c.ects, c.level_code, c.teacher_id, c.description, c.created_at";

/// Number of columns `row_to_course` consumes.
pub(crate) const COL_COUNT: i32 = 7;

/// Parse a course starting at column `base`.
pub(crate) fn row_to_course(row: &libsql::Row, base: i32) -> Result<Course, StoreError> {
    Ok(Course {
        id: row.get(base)?,
        name: row.get(base + 1)?,
        ects: get_f32(row, base + 2)?,
        level_code: row.get(base + 3)?,
        teacher_id: get_opt_string(row, base + 4)?,
        description: get_opt_string(row, base + 5)?,
        created_at: parse_datetime(&row.get::<String>(base + 6)?)?,
    })
}

fn check_ects(ects: f32) -> Result<(), StoreError> {
    if !ects.is_finite() || ects < 0.0 {
        return Err(StoreError::Constraint(format!(
            "ects must be a non-negative number, got {ects}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub ects: f32,
    pub level_code: String,
    pub teacher_id: Option<String>,
    pub description: Option<String>,
}

impl ScrudService {
    pub async fn create_course(&self, new: NewCourse) -> Result<Course, StoreError> {
        require_text("name", &new.name)?;
        require_text("level_code", &new.level_code)?;
        check_ects(new.ects)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_COURSE).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO courses ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                libsql::params![
                    id.as_str(),
                    new.name.as_str(),
                    f64::from(new.ects),
                    new.level_code.as_str(),
                    new.teacher_id.as_deref(),
                    new.description.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(StoreError::from_write)?;

        debug!(course_id = %id, level = %new.level_code, ects = new.ects, "created course");
        self.notify(&[EntityType::Course]);

        Ok(Course {
            id,
            name: new.name,
            ects: new.ects,
            level_code: new.level_code,
            teacher_id: new.teacher_id,
            description: new.description,
            created_at: now,
        })
    }

    pub async fn get_course(&self, id: &str) -> Result<Course, StoreError> {
        self.find_course(id).await?.ok_or(StoreError::NoResult)
    }

    /// Course by id, `None` when absent.
    pub async fn find_course(&self, id: &str) -> Result<Option<Course>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM courses WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_course(&row, 0).map(Some),
            None => Ok(None),
        }
    }

    pub async fn update_course(
        &self,
        course_id: &str,
        update: CourseUpdate,
    ) -> Result<Course, StoreError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            require_text("name", name)?;
            sets.push(format!("name = ?{idx}"));
            params.push(name.clone().into());
            idx += 1;
        }
        if let Some(ects) = update.ects {
            check_ects(ects)?;
            sets.push(format!("ects = ?{idx}"));
            params.push(f64::from(ects).into());
            idx += 1;
        }
        if let Some(ref level_code) = update.level_code {
            require_text("level_code", level_code)?;
            sets.push(format!("level_code = ?{idx}"));
            params.push(level_code.clone().into());
            idx += 1;
        }
        if let Some(ref teacher_id) = update.teacher_id {
            sets.push(format!("teacher_id = ?{idx}"));
            params.push(teacher_id.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_course(course_id).await;
        }

        params.push(course_id.into());
        let sql = format!("UPDATE courses SET {} WHERE id = ?{idx}", sets.join(", "));
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(StoreError::from_write)?;
        if changed == 0 {
            return Err(StoreError::NoResult);
        }

        debug!(course_id, ?update, "updated course");
        self.notify(&[EntityType::Course]);
        self.get_course(course_id).await
    }

    /// Delete a course. Enrollments in it go with it.
    pub async fn delete_course(&self, course_id: &str) -> Result<(), StoreError> {
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM courses WHERE id = ?1", [course_id])
            .await?;
        if changed == 0 {
            return Err(StoreError::NoResult);
        }

        debug!(course_id, "deleted course");
        self.notify(&[EntityType::Course, EntityType::Enrollment]);
        Ok(())
    }

    /// Courses ordered by name.
    pub async fn list_courses(&self, limit: u32) -> Result<Vec<Course>, StoreError> {
        self.query_courses(
            &format!("SELECT {SELECT_COLS} FROM courses ORDER BY name, id LIMIT {limit}"),
            (),
        )
        .await
    }

    /// Every course declared for `level_code`, ordered by name.
    pub async fn courses_by_level(&self, level_code: &str) -> Result<Vec<Course>, StoreError> {
        self.query_courses(
            &format!("SELECT {SELECT_COLS} FROM courses WHERE level_code = ?1 ORDER BY name, id"),
            [level_code],
        )
        .await
    }

    /// Courses owned by `teacher_id`, ordered by name.
    pub async fn courses_by_teacher(&self, teacher_id: &str) -> Result<Vec<Course>, StoreError> {
        self.query_courses(
            &format!("SELECT {SELECT_COLS} FROM courses WHERE teacher_id = ?1 ORDER BY name, id"),
            [teacher_id],
        )
        .await
    }

    /// Courses of a level with their teacher resolved. Unassigned courses are
    /// included with `teacher: None`.
    pub async fn courses_with_teacher_by_level(
        &self,
        level_code: &str,
    ) -> Result<Vec<CourseWithTeacher>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {JOINED_COLS}, {teacher_cols} FROM courses c \
                     LEFT JOIN teachers t ON t.id = c.teacher_id \
                     WHERE c.level_code = ?1 ORDER BY c.name, c.id",
                    teacher_cols = teacher::JOINED_COLS,
                ),
                [level_code],
            )
            .await?;

        let mut courses = Vec::new();
        while let Some(row) = rows.next().await? {
            let course = row_to_course(&row, 0)?;
            let teacher = match row.get::<Option<String>>(COL_COUNT)? {
                Some(_) => Some(teacher::row_to_teacher(&row, COL_COUNT)?),
                None => None,
            };
            courses.push(CourseWithTeacher { course, teacher });
        }
        Ok(courses)
    }

    /// A course and every student enrolled in it, ordered by name.
    pub async fn course_with_students(
        &self,
        course_id: &str,
    ) -> Result<CourseWithStudents, StoreError> {
        let course = self.get_course(course_id).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {student_cols} FROM students s \
                     JOIN enrollments e ON e.student_id = s.id \
                     WHERE e.course_id = ?1 ORDER BY s.last_name, s.first_name",
                    student_cols = student::JOINED_COLS,
                ),
                [course_id],
            )
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(student::row_to_student(&row, 0)?);
        }
        Ok(CourseWithStudents { course, students })
    }

    /// Distinct non-blank level codes that have at least one course.
    pub async fn list_levels(&self) -> Result<Vec<String>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT DISTINCT level_code FROM courses \
                 WHERE trim(level_code) <> '' ORDER BY level_code",
                (),
            )
            .await?;

        let mut levels = Vec::new();
        while let Some(row) = rows.next().await? {
            levels.push(row.get::<String>(0)?);
        }
        Ok(levels)
    }

    async fn query_courses(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Course>, StoreError> {
        let mut rows = self.db().conn().query(sql, params).await?;
        let mut courses = Vec::new();
        while let Some(row) = rows.next().await? {
            courses.push(row_to_course(&row, 0)?);
        }
        Ok(courses)
    }
}
