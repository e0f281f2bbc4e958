//! Course update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ects: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

pub struct CourseUpdateBuilder(CourseUpdate);

impl CourseUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(CourseUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn ects(mut self, ects: f32) -> Self {
        self.0.ects = Some(ects);
        self
    }

    #[must_use]
    pub fn level_code(mut self, level_code: impl Into<String>) -> Self {
        self.0.level_code = Some(level_code.into());
        self
    }

    /// Assign (`Some`) or unassign (`None`) the owning teacher.
    #[must_use]
    pub fn teacher_id(mut self, teacher_id: Option<String>) -> Self {
        self.0.teacher_id = Some(teacher_id);
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn build(self) -> CourseUpdate {
        self.0
    }
}

impl Default for CourseUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_teacher_is_distinct_from_leaving_it() {
        let untouched = CourseUpdateBuilder::new().name("Algebra").build();
        assert_eq!(untouched.teacher_id, None);

        let cleared = CourseUpdateBuilder::new().teacher_id(None).build();
        assert_eq!(cleared.teacher_id, Some(None));

        let json = serde_json::to_value(&cleared).unwrap();
        assert_eq!(json, serde_json::json!({ "teacher_id": null }));
    }
}
