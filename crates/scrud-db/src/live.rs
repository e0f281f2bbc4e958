//! Push-based snapshots of store queries.
//!
//! A [`Live`] holds the latest result of a query and wakes its observers when
//! the result is recomputed. Each `Live` is backed by a producer task:
//!
//! - query producers re-run their SQL whenever the change feed announces one of
//!   the entity types they read, or, when the service polls for external
//!   commits, whenever another connection has committed to the database;
//! - [`Live::map`] and [`Live::combine_latest`] producers recompute from the
//!   upstream snapshots they own.
//!
//! The producer is aborted when the last clone of its `Live` is dropped.
//! Producers own their upstream `Live`s, so dropping a derived view tears down
//! the whole chain.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, warn};

use scrud_core::entities::{
    Course, CourseWithTeacher, Enrollment, EnrollmentWithCourse, Student, StudentWithScore,
    Teacher,
};
use scrud_core::enums::EntityType;

use crate::error::StoreError;
use crate::service::ScrudService;

/// One emitted value: a result, or the error the recomputation hit.
pub type Snapshot<T> = Result<T, Arc<StoreError>>;

struct TaskGuard(JoinHandle<()>);

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A live snapshot subscription.
pub struct Live<T> {
    rx: watch::Receiver<Option<Snapshot<T>>>,
    producer: Arc<TaskGuard>,
}

impl<T> Clone for Live<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<T> std::fmt::Debug for Live<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Live")
            .field("has_value", &self.rx.borrow().is_some())
            .finish_non_exhaustive()
    }
}

impl<T> Live<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from_parts(rx: watch::Receiver<Option<Snapshot<T>>>, handle: JoinHandle<()>) -> Self {
        Self {
            rx,
            producer: Arc::new(TaskGuard(handle)),
        }
    }

    /// Wait for the next snapshot this observer has not seen.
    ///
    /// Returns `None` once the producer has stopped and every snapshot has
    /// been observed.
    pub async fn next(&mut self) -> Option<Snapshot<T>> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            if let Some(snapshot) = self.rx.borrow_and_update().clone() {
                return Some(snapshot);
            }
        }
    }

    /// The current snapshot, without waiting. `None` before the first emission.
    #[must_use]
    pub fn latest(&self) -> Option<Snapshot<T>> {
        self.rx.borrow().clone()
    }

    /// A live view of `f` applied to every snapshot. Errors pass through.
    pub fn map<U, F>(self, f: F) -> Live<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(&T) -> U + Send + 'static,
    {
        let (tx, rx) = watch::channel(None);
        let mut upstream = self;
        let handle = tokio::spawn(async move {
            loop {
                let mapped = upstream
                    .rx
                    .borrow_and_update()
                    .as_ref()
                    .map(|snapshot| snapshot.as_ref().map(&f).map_err(Arc::clone));
                if let Some(value) = mapped {
                    if tx.send(Some(value)).is_err() {
                        return;
                    }
                }
                tokio::select! {
                    changed = upstream.rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                    () = tx.closed() => return,
                }
            }
        });
        Live::from_parts(rx, handle)
    }

    /// Recompute `f` from the latest values of `self` and `other` whenever
    /// either emits.
    ///
    /// Nothing is emitted until both sides have a snapshot. An error on
    /// either side is emitted as the combined snapshot.
    pub fn combine_latest<U, V, F>(self, other: Live<U>, f: F) -> Live<V>
    where
        U: Clone + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
        F: Fn(&T, &U) -> V + Send + 'static,
    {
        let (tx, rx) = watch::channel(None);
        let mut left = self;
        let mut right = other;
        let handle = tokio::spawn(async move {
            loop {
                let combined = {
                    let l = left.rx.borrow_and_update();
                    let r = right.rx.borrow_and_update();
                    match (l.as_ref(), r.as_ref()) {
                        (Some(Err(e)), _) | (_, Some(Err(e))) => Some(Err(Arc::clone(e))),
                        (Some(Ok(a)), Some(Ok(b))) => Some(Ok(f(a, b))),
                        _ => None,
                    }
                };
                if let Some(value) = combined {
                    if tx.send(Some(value)).is_err() {
                        return;
                    }
                }
                tokio::select! {
                    changed = left.rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                    changed = right.rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                    () = tx.closed() => return,
                }
            }
        });
        Live::from_parts(rx, handle)
    }
}

/// Wait for the next poll tick. Never completes when polling is off.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Read `data_version` when polling is on. A failed read is logged and
/// treated as unknown, so the next successful read triggers a re-run.
async fn external_version(svc: &ScrudService, polling: bool, name: &'static str) -> Option<i64> {
    if !polling {
        return None;
    }
    match svc.db().data_version().await {
        Ok(version) => Some(version),
        Err(error) => {
            warn!(query = name, %error, "could not read data_version");
            None
        }
    }
}

/// Start a producer that runs `query` now and again after every change to
/// one of `deps`, including commits made by other connections when the
/// service polls for them.
fn spawn_query<T, F, Fut>(
    svc: &ScrudService,
    name: &'static str,
    deps: &'static [EntityType],
    query: F,
) -> Live<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(ScrudService) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
{
    let (tx, rx) = watch::channel(None);
    // Subscribe before the first read so no write can fall between them.
    let mut changes = svc.change_feed().subscribe();
    let svc = svc.clone();
    let handle = tokio::spawn(async move {
        let mut ticker = svc.external_poll().map(|period| {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        let polling = ticker.is_some();
        loop {
            // Read the version before the query so a commit landing in
            // between is seen on the next tick.
            let mut seen = external_version(&svc, polling, name).await;
            let result = query(svc.clone()).await.map_err(Arc::new);
            if let Err(e) = &result {
                warn!(query = name, error = %e, "live query failed");
            }
            if tx.send(Some(result)).is_err() {
                return;
            }

            loop {
                tokio::select! {
                    () = tx.closed() => return,
                    msg = changes.recv() => match msg {
                        Ok(entity) if deps.contains(&entity) => break,
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(query = name, skipped, "change feed lagged, re-running");
                            break;
                        }
                        Err(broadcast::error::RecvError::Closed) => return,
                    },
                    () = next_tick(&mut ticker) => {
                        let current = external_version(&svc, polling, name).await;
                        match (seen, current) {
                            (Some(before), Some(now)) if before != now => {
                                debug!(query = name, "external commit detected");
                                break;
                            }
                            (None, Some(_)) => break,
                            _ => seen = current.or(seen),
                        }
                    }
                }
            }
            // Coalesce a burst of writes into one re-run.
            while !matches!(
                changes.try_recv(),
                Err(broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed)
            ) {}
            debug!(query = name, "re-running live query");
        }
    });
    Live::from_parts(rx, handle)
}

impl ScrudService {
    /// Live student list. Must be called within a Tokio runtime, like every
    /// `live_*` method.
    pub fn live_students(&self, limit: u32) -> Live<Vec<Student>> {
        spawn_query(self, "students", &[EntityType::Student], move |svc| async move {
            svc.list_students(limit).await
        })
    }

    pub fn live_teachers(&self, limit: u32) -> Live<Vec<Teacher>> {
        spawn_query(self, "teachers", &[EntityType::Teacher], move |svc| async move {
            svc.list_teachers(limit).await
        })
    }

    pub fn live_courses(&self, limit: u32) -> Live<Vec<Course>> {
        spawn_query(self, "courses", &[EntityType::Course], move |svc| async move {
            svc.list_courses(limit).await
        })
    }

    pub fn live_courses_by_level(&self, level_code: &str) -> Live<Vec<Course>> {
        let level_code = level_code.to_string();
        spawn_query(self, "courses_by_level", &[EntityType::Course], move |svc| {
            let level_code = level_code.clone();
            async move { svc.courses_by_level(&level_code).await }
        })
    }

    pub fn live_courses_by_teacher(&self, teacher_id: &str) -> Live<Vec<Course>> {
        let teacher_id = teacher_id.to_string();
        spawn_query(self, "courses_by_teacher", &[EntityType::Course], move |svc| {
            let teacher_id = teacher_id.clone();
            async move { svc.courses_by_teacher(&teacher_id).await }
        })
    }

    pub fn live_courses_with_teacher_by_level(
        &self,
        level_code: &str,
    ) -> Live<Vec<CourseWithTeacher>> {
        let level_code = level_code.to_string();
        spawn_query(
            self,
            "courses_with_teacher_by_level",
            &[EntityType::Course, EntityType::Teacher],
            move |svc| {
                let level_code = level_code.clone();
                async move { svc.courses_with_teacher_by_level(&level_code).await }
            },
        )
    }

    pub fn live_enrollments_by_student(&self, student_id: &str) -> Live<Vec<Enrollment>> {
        let student_id = student_id.to_string();
        spawn_query(
            self,
            "enrollments_by_student",
            &[EntityType::Enrollment],
            move |svc| {
                let student_id = student_id.clone();
                async move { svc.enrollments_by_student(&student_id).await }
            },
        )
    }

    pub fn live_enrollments_with_courses(
        &self,
        student_id: &str,
    ) -> Live<Vec<EnrollmentWithCourse>> {
        let student_id = student_id.to_string();
        spawn_query(
            self,
            "enrollments_with_courses",
            &[EntityType::Enrollment, EntityType::Course],
            move |svc| {
                let student_id = student_id.clone();
                async move { svc.enrollments_with_courses(&student_id).await }
            },
        )
    }

    pub fn live_students_with_scores_by_course(
        &self,
        course_id: &str,
    ) -> Live<Vec<StudentWithScore>> {
        let course_id = course_id.to_string();
        spawn_query(
            self,
            "students_with_scores_by_course",
            &[EntityType::Enrollment, EntityType::Student],
            move |svc| {
                let course_id = course_id.clone();
                async move { svc.students_with_scores_by_course(&course_id).await }
            },
        )
    }

    pub fn live_levels(&self) -> Live<Vec<String>> {
        spawn_query(self, "levels", &[EntityType::Course], |svc| async move {
            svc.list_levels().await
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_support::helpers::{
        next_matching, next_ok, seed_course, seed_student, seed_teacher, test_service,
        wait_for_no_subscribers,
    };
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn emits_initial_snapshot() {
        let svc = test_service().await;
        seed_course(&svc, "Logic", 4.0, "B1", None).await;

        let mut live = svc.live_courses_by_level("B1");
        let courses = next_ok(&mut live).await;
        assert_eq!(courses.len(), 1);
        assert!(live.latest().is_some());
    }

    #[tokio::test]
    async fn reruns_on_relevant_change() {
        let svc = test_service().await;
        let mut live = svc.live_levels();
        assert!(next_ok(&mut live).await.is_empty());

        seed_course(&svc, "Logic", 4.0, "B2", None).await;
        let levels = next_matching(&mut live, |l| !l.is_empty()).await;
        assert_eq!(levels, vec!["B2"]);
    }

    #[tokio::test]
    async fn ignores_unrelated_changes() {
        let svc = test_service().await;
        let mut live = svc.live_courses(10);
        next_ok(&mut live).await;

        seed_student(&svc, "Grace", "B1").await;
        let waited = tokio::time::timeout(Duration::from_millis(100), live.next()).await;
        assert!(waited.is_err(), "student writes should not re-run a course query");
    }

    #[tokio::test]
    async fn teacher_delete_reaches_course_views() {
        let svc = test_service().await;
        let teacher = seed_teacher(&svc, "Alan").await;
        seed_course(&svc, "Logic", 4.0, "B1", Some(&teacher.id)).await;

        let mut live = svc.live_courses_with_teacher_by_level("B1");
        let rows = next_ok(&mut live).await;
        assert!(rows[0].teacher.is_some());

        svc.delete_teacher(&teacher.id).await.unwrap();
        let rows = next_matching(&mut live, |rows| rows[0].teacher.is_none()).await;
        assert_eq!(rows[0].course.teacher_id, None);
    }

    #[tokio::test]
    async fn map_derives_and_follows_upstream() {
        let svc = test_service().await;
        let mut count = svc.live_students(100).map(Vec::len);
        assert_eq!(next_ok(&mut count).await, 0);

        seed_student(&svc, "Grace", "B1").await;
        assert_eq!(next_matching(&mut count, |n| *n == 1).await, 1);
    }

    #[tokio::test]
    async fn combine_latest_waits_for_both_sides() {
        let svc = test_service().await;
        seed_course(&svc, "Logic", 4.0, "B1", None).await;
        seed_teacher(&svc, "Alan").await;

        let mut combined = svc
            .live_courses(10)
            .combine_latest(svc.live_teachers(10), |c, t| (c.len(), t.len()));
        assert_eq!(next_ok(&mut combined).await, (1, 1));

        seed_teacher(&svc, "Ada").await;
        assert_eq!(next_matching(&mut combined, |v| v.1 == 2).await, (1, 2));
    }

    #[tokio::test]
    async fn clones_share_the_producer() {
        let svc = test_service().await;
        let mut first = svc.live_levels();
        let mut second = first.clone();
        next_ok(&mut first).await;

        seed_course(&svc, "Logic", 4.0, "C1", None).await;
        assert_eq!(next_matching(&mut first, |l| !l.is_empty()).await, vec!["C1"]);
        assert_eq!(next_matching(&mut second, |l| !l.is_empty()).await, vec!["C1"]);
        assert_eq!(svc.change_feed().receiver_count(), 1);
    }

    #[tokio::test]
    async fn dropping_last_observer_cancels_producer() {
        let svc = test_service().await;
        let live = svc.live_courses(10);
        let clone = live.clone();
        assert_eq!(svc.change_feed().receiver_count(), 1);

        drop(live);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(svc.change_feed().receiver_count(), 1, "a clone is still observing");

        drop(clone);
        wait_for_no_subscribers(&svc).await;
    }

    #[tokio::test]
    async fn dropping_derived_view_cancels_upstream() {
        let svc = test_service().await;
        let combined = svc
            .live_courses(10)
            .combine_latest(svc.live_students(10).map(Vec::len), |c, n| c.len() + n);
        assert_eq!(svc.change_feed().receiver_count(), 2);

        drop(combined);
        wait_for_no_subscribers(&svc).await;
    }

    #[tokio::test]
    async fn lagged_feed_triggers_rerun() {
        let db = crate::ScrudDb::open_local(":memory:").await.unwrap();
        let svc = ScrudService::from_db(db, 1);
        let mut live = svc.live_courses(100);
        assert!(next_ok(&mut live).await.is_empty());

        for name in ["A", "B", "C", "D"] {
            seed_course(&svc, name, 1.0, "B1", None).await;
        }
        let courses = next_matching(&mut live, |c| c.len() == 4).await;
        assert_eq!(courses.len(), 4);
    }

    #[tokio::test]
    async fn query_errors_are_emitted_as_snapshots() {
        let svc = test_service().await;
        svc.db()
            .conn()
            .execute("DROP TABLE enrollments", ())
            .await
            .unwrap();

        let mut live = svc.live_enrollments_by_student("stu-any");
        let snapshot = tokio::time::timeout(Duration::from_secs(5), live.next())
            .await
            .unwrap()
            .unwrap();
        assert!(snapshot.is_err());

        let mut mapped = live.map(Vec::len);
        let snapshot = tokio::time::timeout(Duration::from_secs(5), mapped.next())
            .await
            .unwrap()
            .unwrap();
        assert!(snapshot.is_err());
    }
}
