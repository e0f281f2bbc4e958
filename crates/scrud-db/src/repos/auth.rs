//! Login and password changes across both account tables.

use tracing::{debug, info};

use scrud_core::enums::UserRole;
use scrud_core::identity::LoggedInUser;

use crate::credentials::hash_password;
use crate::error::StoreError;
use crate::service::ScrudService;

impl ScrudService {
    /// Resolve a login. `None` covers both "no such email" and "wrong
    /// password" so callers cannot tell them apart.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<Option<LoggedInUser>, StoreError> {
        let user = match role {
            UserRole::Student => self
                .authenticate_student(email, password)
                .await?
                .map(|s| LoggedInUser::student(s.id, s.level_code)),
            UserRole::Teacher => self
                .authenticate_teacher(email, password)
                .await?
                .map(|t| LoggedInUser::teacher(t.id)),
        };
        match &user {
            Some(user) => info!(user_id = %user.id, %role, "login succeeded"),
            None => debug!(%role, "login rejected"),
        }
        Ok(user)
    }

    /// Replace an account's password.
    pub async fn change_password(
        &self,
        role: UserRole,
        id: &str,
        new_password: &str,
    ) -> Result<(), StoreError> {
        let password_hash = hash_password(new_password)?;
        let table = match role {
            UserRole::Student => "students",
            UserRole::Teacher => "teachers",
        };
        let changed = self
            .db()
            .conn()
            .execute(
                &format!("UPDATE {table} SET password_hash = ?1 WHERE id = ?2"),
                libsql::params![password_hash, id],
            )
            .await?;
        if changed == 0 {
            return Err(StoreError::NoResult);
        }
        debug!(id, %role, "password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{PASSWORD, seed_student, seed_teacher, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn student_login_carries_level() {
        let svc = test_service().await;
        let student = seed_student(&svc, "Grace", "B1").await;

        let user = svc
            .login("grace@school.test", PASSWORD, UserRole::Student)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user, LoggedInUser::student(student.id, "B1"));
    }

    #[tokio::test]
    async fn teacher_login_has_no_level() {
        let svc = test_service().await;
        let teacher = seed_teacher(&svc, "Alan").await;

        let user = svc
            .login("alan@staff.test", PASSWORD, UserRole::Teacher)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, teacher.id);
        assert_eq!(user.level_code, None);
    }

    #[tokio::test]
    async fn role_selects_the_account_table() {
        let svc = test_service().await;
        seed_student(&svc, "Grace", "B1").await;

        let user = svc
            .login("grace@school.test", PASSWORD, UserRole::Teacher)
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn change_password_invalidates_old_one() {
        let svc = test_service().await;
        let teacher = seed_teacher(&svc, "Alan").await;

        svc.change_password(UserRole::Teacher, &teacher.id, "new-pass")
            .await
            .unwrap();

        assert!(
            svc.login("alan@staff.test", PASSWORD, UserRole::Teacher)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            svc.login("alan@staff.test", "new-pass", UserRole::Teacher)
                .await
                .unwrap()
                .is_some()
        );
        assert!(matches!(
            svc.change_password(UserRole::Student, "stu-missing", "x").await,
            Err(StoreError::NoResult)
        ));
    }
}
