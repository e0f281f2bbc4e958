//! Joined read models produced by multi-table queries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Course, Enrollment, Student, Teacher};

/// An enrollment together with the course it references.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EnrollmentWithCourse {
    pub enrollment: Enrollment,
    pub course: Course,
}

/// A course with its owning teacher resolved (`None` when unassigned).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CourseWithTeacher {
    pub course: Course,
    pub teacher: Option<Teacher>,
}

/// Roster line for a course: who is enrolled and their current score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudentWithScore {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub score: f32,
}

/// A course with every enrolled student.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CourseWithStudents {
    pub course: Course,
    pub students: Vec<Student>,
}
