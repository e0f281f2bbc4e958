//! Gender, role, and entity-type enums for Scrud.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the value stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Gender recorded on student and teacher profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Which account table a login is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Teacher,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Persisted entity kinds. Also the unit of change notification for live queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Student,
    Teacher,
    Course,
    Enrollment,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Course => "course",
            Self::Enrollment => "enrollment",
        }
    }

    /// SQL table backing this entity.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Student => "students",
            Self::Teacher => "teachers",
            Self::Course => "courses",
            Self::Enrollment => "enrollments",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(gender_male, Gender, Gender::Male, "male");
    test_serde_roundtrip!(gender_female, Gender, Gender::Female, "female");

    test_serde_roundtrip!(role_student, UserRole, UserRole::Student, "student");
    test_serde_roundtrip!(role_teacher, UserRole, UserRole::Teacher, "teacher");

    test_serde_roundtrip!(
        entity_enrollment,
        EntityType,
        EntityType::Enrollment,
        "enrollment"
    );
    test_serde_roundtrip!(entity_course, EntityType, EntityType::Course, "course");

    #[test]
    fn tables_are_plural_names() {
        assert_eq!(EntityType::Student.table(), "students");
        assert_eq!(EntityType::Teacher.table(), "teachers");
        assert_eq!(EntityType::Course.table(), "courses");
        assert_eq!(EntityType::Enrollment.table(), "enrollments");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", Gender::Female), "female");
        assert_eq!(format!("{}", UserRole::Teacher), "teacher");
        assert_eq!(format!("{}", EntityType::Enrollment), "enrollment");
    }
}
