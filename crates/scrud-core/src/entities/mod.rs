//! Entity structs for all Scrud domain objects.
//!
//! Each entity maps to a table in the libSQL store. Joined read models live in
//! `views`. All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! JSON roundtrip and schema validation.

mod course;
mod enrollment;
mod student;
mod teacher;
mod views;

pub use course::Course;
pub use enrollment::Enrollment;
pub use student::Student;
pub use teacher::Teacher;
pub use views::{CourseWithStudents, CourseWithTeacher, EnrollmentWithCourse, StudentWithScore};
