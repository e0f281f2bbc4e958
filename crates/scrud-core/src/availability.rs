//! Course availability: which courses of a level a student can still join.

use std::collections::HashSet;

use crate::entities::{Course, CourseWithTeacher};
use crate::grading::CourseRef;

/// A listing row that wraps a course.
pub trait CourseItem {
    fn course(&self) -> &Course;
}

impl CourseItem for Course {
    fn course(&self) -> &Course {
        self
    }
}

impl CourseItem for CourseWithTeacher {
    fn course(&self) -> &Course {
        &self.course
    }
}

/// Courses of `all_at_level` the student is not enrolled in.
///
/// Order of `all_at_level` is preserved. Enrollments referencing courses that
/// are not listed (other levels, deleted courses) have nothing to exclude and
/// are ignored.
pub fn available_courses<C, E>(all_at_level: &[C], enrollments: &[E]) -> Vec<C>
where
    C: CourseItem + Clone,
    E: CourseRef,
{
    let enrolled: HashSet<&str> = enrollments.iter().map(CourseRef::course_id).collect();
    all_at_level
        .iter()
        .filter(|item| !enrolled.contains(item.course().id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::{Enrollment, Teacher};
    use crate::enums::Gender;

    fn course(id: &str) -> Course {
        Course {
            id: id.into(),
            name: format!("Course {id}"),
            ects: 5.0,
            level_code: "B1".into(),
            teacher_id: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    fn enrollment(course_id: &str) -> Enrollment {
        Enrollment {
            student_id: "stu-00000001".into(),
            course_id: course_id.into(),
            score: 0.0,
            enrolled_at: Utc::now(),
        }
    }

    fn ids<C: CourseItem>(items: &[C]) -> Vec<&str> {
        items.iter().map(|c| c.course().id.as_str()).collect()
    }

    #[test]
    fn excludes_enrolled_courses_in_order() {
        let all = [course("crs-a"), course("crs-b"), course("crs-c")];
        let available = available_courses(&all, &[enrollment("crs-a")]);
        assert_eq!(ids(&available), vec!["crs-b", "crs-c"]);
    }

    #[test]
    fn foreign_enrollment_has_no_effect() {
        let all = [course("crs-a"), course("crs-b")];
        let available = available_courses(&all, &[enrollment("crs-elsewhere")]);
        assert_eq!(ids(&available), vec!["crs-a", "crs-b"]);
    }

    #[test]
    fn never_reorders() {
        let all = [
            course("crs-e"),
            course("crs-a"),
            course("crs-d"),
            course("crs-b"),
            course("crs-c"),
        ];
        let available = available_courses(&all, &[enrollment("crs-d"), enrollment("crs-e")]);
        assert_eq!(ids(&available), vec!["crs-a", "crs-b", "crs-c"]);
    }

    #[test]
    fn empty_inputs() {
        let none: [Course; 0] = [];
        assert!(available_courses(&none, &[enrollment("crs-a")]).is_empty());

        let all = [course("crs-a")];
        let no_enrollments: [Enrollment; 0] = [];
        assert_eq!(ids(&available_courses(&all, &no_enrollments)), vec!["crs-a"]);
    }

    #[test]
    fn idempotent_for_identical_snapshots() {
        let all = [course("crs-a"), course("crs-b"), course("crs-c")];
        let enrollments = [enrollment("crs-b")];
        assert_eq!(
            available_courses(&all, &enrollments),
            available_courses(&all, &enrollments)
        );
    }

    #[test]
    fn works_over_courses_with_teacher() {
        let teacher = Teacher {
            id: "tch-00000001".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.org".into(),
            gender: Gender::Female,
            registered_at: Utc::now(),
        };
        let all = [
            CourseWithTeacher {
                course: course("crs-a"),
                teacher: Some(teacher),
            },
            CourseWithTeacher {
                course: course("crs-b"),
                teacher: None,
            },
        ];
        let available = available_courses(&all, &[enrollment("crs-a")]);
        assert_eq!(ids(&available), vec!["crs-b"]);
        assert!(available[0].teacher.is_none());
    }
}
