//! Student repository: CRUD and credential checks.

use chrono::{NaiveDate, Utc};
use tracing::debug;

use scrud_core::entities::Student;
use scrud_core::enums::{EntityType, Gender};
use scrud_core::ids::PREFIX_STUDENT;

use crate::credentials::{hash_password, verify_password};
use crate::error::StoreError;
use crate::helpers::{parse_date, parse_datetime, parse_enum, require_text};
use crate::service::ScrudService;
use crate::updates::student::StudentUpdate;

pub(crate) const SELECT_COLS: &str =
    "id, first_name, last_name, email, date_of_birth, gender, level_code, registered_at";

/// `SELECT_COLS` qualified for joins against `students s`.
pub(crate) const JOINED_COLS: &str = "s.id, s.first_name, s.last_name, s.email, \
     s.date_of_birth, s.gender, s.level_code, s.registered_at";

/// Parse a student starting at column `base`.
pub(crate) fn row_to_student(row: &libsql::Row, base: i32) -> Result<Student, StoreError> {
    Ok(Student {
        id: row.get(base)?,
        first_name: row.get(base + 1)?,
        last_name: row.get(base + 2)?,
        email: row.get(base + 3)?,
        date_of_birth: parse_date(&row.get::<String>(base + 4)?)?,
        gender: parse_enum(&row.get::<String>(base + 5)?)?,
        level_code: row.get(base + 6)?,
        registered_at: parse_datetime(&row.get::<String>(base + 7)?)?,
    })
}

/// Registration input. The password is hashed before it reaches the store.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub level_code: String,
}

impl ScrudService {
    pub async fn create_student(&self, new: NewStudent) -> Result<Student, StoreError> {
        require_text("first_name", &new.first_name)?;
        require_text("last_name", &new.last_name)?;
        require_text("email", &new.email)?;
        require_text("level_code", &new.level_code)?;
        let password_hash = hash_password(&new.password)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_STUDENT).await?;
        let date_of_birth = new.date_of_birth.format("%Y-%m-%d").to_string();

        self.db()
            .conn()
            .execute(
                "INSERT INTO students (id, first_name, last_name, email, password_hash, \
                 date_of_birth, gender, level_code, registered_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    id.as_str(),
                    new.first_name.as_str(),
                    new.last_name.as_str(),
                    new.email.as_str(),
                    password_hash,
                    date_of_birth,
                    new.gender.as_str(),
                    new.level_code.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(StoreError::from_write)?;

        debug!(student_id = %id, level = %new.level_code, "created student");
        self.notify(&[EntityType::Student]);

        Ok(Student {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            date_of_birth: new.date_of_birth,
            gender: new.gender,
            level_code: new.level_code,
            registered_at: now,
        })
    }

    pub async fn get_student(&self, id: &str) -> Result<Student, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM students WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        row_to_student(&row, 0)
    }

    pub async fn update_student(
        &self,
        student_id: &str,
        update: StudentUpdate,
    ) -> Result<Student, StoreError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref first_name) = update.first_name {
            require_text("first_name", first_name)?;
            sets.push(format!("first_name = ?{idx}"));
            params.push(first_name.clone().into());
            idx += 1;
        }
        if let Some(ref last_name) = update.last_name {
            require_text("last_name", last_name)?;
            sets.push(format!("last_name = ?{idx}"));
            params.push(last_name.clone().into());
            idx += 1;
        }
        if let Some(ref email) = update.email {
            require_text("email", email)?;
            sets.push(format!("email = ?{idx}"));
            params.push(email.clone().into());
            idx += 1;
        }
        if let Some(date_of_birth) = update.date_of_birth {
            sets.push(format!("date_of_birth = ?{idx}"));
            params.push(date_of_birth.format("%Y-%m-%d").to_string().into());
            idx += 1;
        }
        if let Some(gender) = update.gender {
            sets.push(format!("gender = ?{idx}"));
            params.push(gender.as_str().into());
            idx += 1;
        }
        if let Some(ref level_code) = update.level_code {
            require_text("level_code", level_code)?;
            sets.push(format!("level_code = ?{idx}"));
            params.push(level_code.clone().into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_student(student_id).await;
        }

        params.push(student_id.into());
        let sql = format!("UPDATE students SET {} WHERE id = ?{idx}", sets.join(", "));
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(StoreError::from_write)?;
        if changed == 0 {
            return Err(StoreError::NoResult);
        }

        debug!(student_id, ?update, "updated student");
        self.notify(&[EntityType::Student]);
        self.get_student(student_id).await
    }

    /// Delete a student. Their enrollments go with them.
    pub async fn delete_student(&self, student_id: &str) -> Result<(), StoreError> {
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM students WHERE id = ?1", [student_id])
            .await?;
        if changed == 0 {
            return Err(StoreError::NoResult);
        }

        debug!(student_id, "deleted student");
        self.notify(&[EntityType::Student, EntityType::Enrollment]);
        Ok(())
    }

    /// Students ordered by last name, then first name.
    pub async fn list_students(&self, limit: u32) -> Result<Vec<Student>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM students \
                     ORDER BY last_name, first_name LIMIT {limit}"
                ),
                (),
            )
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row, 0)?);
        }
        Ok(students)
    }

    /// The student with this email, if the password matches.
    pub async fn authenticate_student(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Student>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS}, password_hash FROM students WHERE email = ?1"),
                [email],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let stored: String = row.get(8)?;
        if !verify_password(password, &stored) {
            return Ok(None);
        }
        row_to_student(&row, 0).map(Some)
    }
}
