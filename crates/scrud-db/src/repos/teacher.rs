//! Teacher repository: CRUD and credential checks.

use chrono::Utc;
use tracing::debug;

use scrud_core::entities::Teacher;
use scrud_core::enums::{EntityType, Gender};
use scrud_core::ids::PREFIX_TEACHER;

use crate::credentials::{hash_password, verify_password};
use crate::error::StoreError;
use crate::helpers::{parse_datetime, parse_enum, require_text};
use crate::service::ScrudService;
use crate::updates::teacher::TeacherUpdate;

pub(crate) const SELECT_COLS: &str =
    "id, first_name, last_name, email, gender, registered_at";

/// `SELECT_COLS` qualified for joins against `teachers t`.
pub(crate) const JOINED_COLS: &str =
    "t.id, t.first_name, t.last_name, t.email, t.gender, t.registered_at";

/// Parse a teacher starting at column `base`.
pub(crate) fn row_to_teacher(row: &libsql::Row, base: i32) -> Result<Teacher, StoreError> {
    Ok(Teacher {
        id: row.get(base)?,
        first_name: row.get(base + 1)?,
        last_name: row.get(base + 2)?,
        email: row.get(base + 3)?,
        gender: parse_enum(&row.get::<String>(base + 4)?)?,
        registered_at: parse_datetime(&row.get::<String>(base + 5)?)?,
    })
}

#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub gender: Gender,
}

impl ScrudService {
    pub async fn create_teacher(&self, new: NewTeacher) -> Result<Teacher, StoreError> {
        require_text("first_name", &new.first_name)?;
        require_text("last_name", &new.last_name)?;
        require_text("email", &new.email)?;
        let password_hash = hash_password(&new.password)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_TEACHER).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO teachers (id, first_name, last_name, email, password_hash, \
                 gender, registered_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    id.as_str(),
                    new.first_name.as_str(),
                    new.last_name.as_str(),
                    new.email.as_str(),
                    password_hash,
                    new.gender.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(StoreError::from_write)?;

        debug!(teacher_id = %id, "created teacher");
        self.notify(&[EntityType::Teacher]);

        Ok(Teacher {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            gender: new.gender,
            registered_at: now,
        })
    }

    pub async fn get_teacher(&self, id: &str) -> Result<Teacher, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM teachers WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        row_to_teacher(&row, 0)
    }

    pub async fn update_teacher(
        &self,
        teacher_id: &str,
        update: TeacherUpdate,
    ) -> Result<Teacher, StoreError> {
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
        if let Some(gender) = update.gender {
            sets.push(format!("gender = ?{idx}"));
            params.push(gender.as_str().into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_teacher(teacher_id).await;
        }

        params.push(teacher_id.into());
        let sql = format!("UPDATE teachers SET {} WHERE id = ?{idx}", sets.join(", "));
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
            .map_err(StoreError::from_write)?;
        if changed == 0 {
            return Err(StoreError::NoResult);
        }

        debug!(teacher_id, ?update, "updated teacher");
        self.notify(&[EntityType::Teacher]);
        self.get_teacher(teacher_id).await
    }

    /// Delete a teacher. Their courses stay, unassigned.
    pub async fn delete_teacher(&self, teacher_id: &str) -> Result<(), StoreError> {
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM teachers WHERE id = ?1", [teacher_id])
            .await?;
        if changed == 0 {
            return Err(StoreError::NoResult);
        }

        debug!(teacher_id, "deleted teacher");
        self.notify(&[EntityType::Teacher, EntityType::Course]);
        Ok(())
    }

    /// Teachers ordered by last name, then first name.
    pub async fn list_teachers(&self, limit: u32) -> Result<Vec<Teacher>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM teachers \
                     ORDER BY last_name, first_name LIMIT {limit}"
                ),
                (),
            )
            .await?;

        let mut teachers = Vec::new();
        while let Some(row) = rows.next().await? {
            teachers.push(row_to_teacher(&row, 0)?);
        }
        Ok(teachers)
    }

    /// The teacher with this email, if the password matches.
    pub async fn authenticate_teacher(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Teacher>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS}, password_hash FROM teachers WHERE email = ?1"),
                [email],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let stored: String = row.get(6)?;
        if !verify_password(password, &stored) {
            return Ok(None);
        }
        row_to_teacher(&row, 0).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{PASSWORD, seed_course, seed_teacher, test_service};
    use crate::updates::teacher::TeacherUpdateBuilder;

    #[tokio::test]
    async fn create_teacher_roundtrip() {
        let svc = test_service().await;
        let teacher = seed_teacher(&svc, "Alan").await;

        assert!(teacher.id.starts_with("tch-"));
        let fetched = svc.get_teacher(&teacher.id).await.unwrap();
        assert_eq!(fetched, Teacher { registered_at: fetched.registered_at, ..teacher });
    }

    #[tokio::test]
    async fn update_teacher_partial() {
        let svc = test_service().await;
        let teacher = seed_teacher(&svc, "Alan").await;

        let update = TeacherUpdateBuilder::new().last_name("Turing").build();
        let updated = svc.update_teacher(&teacher.id, update).await.unwrap();
        assert_eq!(updated.full_name(), "Alan Turing");
    }

    #[tokio::test]
    async fn delete_teacher_unassigns_courses() {
        let svc = test_service().await;
        let teacher = seed_teacher(&svc, "Alan").await;
        let course = seed_course(&svc, "Logic", 4.0, "B1", Some(&teacher.id)).await;

        let mut feed = svc.change_feed().subscribe();
        svc.delete_teacher(&teacher.id).await.unwrap();

        let course = svc.get_course(&course.id).await.unwrap();
        assert_eq!(course.teacher_id, None);
        assert_eq!(feed.recv().await.unwrap(), EntityType::Teacher);
        assert_eq!(feed.recv().await.unwrap(), EntityType::Course);
    }

    #[tokio::test]
    async fn list_teachers() {
        let svc = test_service().await;
        seed_teacher(&svc, "Alan").await;
        seed_teacher(&svc, "Ada").await;

        let teachers = svc.list_teachers(10).await.unwrap();
        let names: Vec<_> = teachers.iter().map(|t| t.first_name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Alan"]);
    }

    #[tokio::test]
    async fn authenticate_teacher_checks_password() {
        let svc = test_service().await;
        let teacher = seed_teacher(&svc, "Alan").await;

        let ok = svc
            .authenticate_teacher("alan@staff.test", PASSWORD)
            .await
            .unwrap();
        assert_eq!(ok.map(|t| t.id), Some(teacher.id));
        assert!(
            svc.authenticate_teacher("alan@staff.test", "wrong")
                .await
                .unwrap()
                .is_none()
        );
    }
}
