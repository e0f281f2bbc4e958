//! Teacher update builder.

use serde::Serialize;
use scrud_core::enums::Gender;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeacherUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

pub struct TeacherUpdateBuilder(TeacherUpdate);

impl TeacherUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TeacherUpdate::default())
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.0.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.0.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.0.email = Some(email.into());
        self
    }

    #[must_use]
    pub const fn gender(mut self, gender: Gender) -> Self {
        self.0.gender = Some(gender);
        self
    }

    #[must_use]
    pub fn build(self) -> TeacherUpdate {
        self.0
    }
}

impl Default for TeacherUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
