//! Credit-weighted grade aggregation.
//!
//! A student's average is `Σ(score × ects) / Σ(ects)` over the graded
//! enrollments whose course is in the candidate set. Accumulation happens in
//! `f64`; callers narrow with [`to_display`] when rendering.
//!
//! An empty candidate set, or one whose weights sum to zero, yields `0.0`.
//! That value is the "no information" result and not an error.

use std::collections::HashMap;

use crate::availability::CourseItem;
use crate::entities::{Enrollment, EnrollmentWithCourse};

/// Stored score of an enrollment nobody has graded yet.
///
/// The store does not distinguish "ungraded" from an earned zero: both are
/// `0.0`, and both are left out of every average. [`Enrollment::grade`] is
/// the explicit optional view over the same value.
pub const UNGRADED_SCORE: f32 = 0.0;

/// Whether a stored score counts as a grade.
#[must_use]
pub fn is_graded(score: f32) -> bool {
    score > UNGRADED_SCORE
}

/// Anything that references a course by ID.
pub trait CourseRef {
    fn course_id(&self) -> &str;
}

/// A course reference carrying a score.
pub trait Graded: CourseRef {
    fn score(&self) -> f32;
}

impl CourseRef for Enrollment {
    fn course_id(&self) -> &str {
        &self.course_id
    }
}

impl Graded for Enrollment {
    fn score(&self) -> f32 {
        self.score
    }
}

impl CourseRef for EnrollmentWithCourse {
    fn course_id(&self) -> &str {
        &self.enrollment.course_id
    }
}

impl Graded for EnrollmentWithCourse {
    fn score(&self) -> f32 {
        self.enrollment.score
    }
}

/// Credit-weighted average of `enrollments`.
///
/// `weight_of` maps a course ID to its credit weight, returning `None` for
/// courses outside the candidate set. Included are enrollments that are
/// graded, have a finite score, and resolve to a finite non-negative weight.
/// Everything else is skipped.
pub fn weighted_average<'a, E, I, W>(enrollments: I, weight_of: W) -> f64
where
    E: Graded + 'a,
    I: IntoIterator<Item = &'a E>,
    W: Fn(&str) -> Option<f32>,
{
    let mut weighted_sum = 0.0_f64;
    let mut weight_sum = 0.0_f64;

    for enrollment in enrollments {
        let score = enrollment.score();
        if !score.is_finite() || !is_graded(score) {
            continue;
        }
        let Some(weight) = weight_of(enrollment.course_id()) else {
            continue;
        };
        if !weight.is_finite() || weight < 0.0 {
            continue;
        }
        weighted_sum += f64::from(score) * f64::from(weight);
        weight_sum += f64::from(weight);
    }

    if weight_sum > 0.0 {
        weighted_sum / weight_sum
    } else {
        0.0
    }
}

/// Average restricted to the courses of one level.
///
/// Enrollments in courses outside `courses_at_level` do not count.
pub fn level_average<E, C>(enrollments: &[E], courses_at_level: &[C]) -> f64
where
    E: Graded,
    C: CourseItem,
{
    let weights: HashMap<&str, f32> = courses_at_level
        .iter()
        .map(|item| (item.course().id.as_str(), item.course().ects))
        .collect();
    weighted_average(enrollments, |course_id| weights.get(course_id).copied())
}

/// Average over every enrollment, weighted by the joined course.
pub fn enrolled_average(enrollments: &[EnrollmentWithCourse]) -> f64 {
    let weights: HashMap<&str, f32> = enrollments
        .iter()
        .map(|row| (row.course.id.as_str(), row.course.ects))
        .collect();
    weighted_average(enrollments, |course_id| weights.get(course_id).copied())
}

/// Narrow an accumulated average to single precision for display.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_display(average: f64) -> f32 {
    average as f32
}
