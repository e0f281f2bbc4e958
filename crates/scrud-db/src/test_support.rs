//! Shared test utilities for scrud-db tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::time::Duration;

    use chrono::NaiveDate;
    use scrud_core::entities::{Course, Student, Teacher};
    use scrud_core::enums::Gender;

    use crate::live::Live;
    use crate::repos::course::NewCourse;
    use crate::repos::student::NewStudent;
    use crate::repos::teacher::NewTeacher;
    use crate::service::{DEFAULT_CHANGE_FEED_CAPACITY, ScrudService};

    pub const PASSWORD: &str = "s3cret-pass";

    /// Create an in-memory `ScrudService`.
    pub async fn test_service() -> ScrudService {
        ScrudService::new_local(":memory:", DEFAULT_CHANGE_FEED_CAPACITY)
            .await
            .unwrap()
    }

    pub fn new_student(first_name: &str, level_code: &str) -> NewStudent {
        NewStudent {
            first_name: first_name.into(),
            last_name: "Tester".into(),
            email: format!("{}@school.test", first_name.to_lowercase()),
            password: PASSWORD.into(),
            date_of_birth: NaiveDate::from_ymd_opt(2005, 3, 14).unwrap(),
            gender: Gender::Female,
            level_code: level_code.into(),
        }
    }

    pub async fn seed_student(svc: &ScrudService, first_name: &str, level_code: &str) -> Student {
        svc.create_student(new_student(first_name, level_code))
            .await
            .unwrap()
    }

    pub async fn seed_teacher(svc: &ScrudService, first_name: &str) -> Teacher {
        svc.create_teacher(NewTeacher {
            first_name: first_name.into(),
            last_name: "Teacher".into(),
            email: format!("{}@staff.test", first_name.to_lowercase()),
            password: PASSWORD.into(),
            gender: Gender::Male,
        })
        .await
        .unwrap()
    }

    pub async fn seed_course(
        svc: &ScrudService,
        name: &str,
        ects: f32,
        level_code: &str,
        teacher_id: Option<&str>,
    ) -> Course {
        svc.create_course(NewCourse {
            name: name.into(),
            ects,
            level_code: level_code.into(),
            teacher_id: teacher_id.map(String::from),
            description: None,
        })
        .await
        .unwrap()
    }

    /// Wait for the next successful snapshot, failing the test after 5s.
    pub async fn next_ok<T: Clone + Send + Sync + 'static>(live: &mut Live<T>) -> T {
        tokio::time::timeout(Duration::from_secs(5), live.next())
            .await
            .expect("timed out waiting for snapshot")
            .expect("producer stopped")
            .expect("snapshot was an error")
    }

    /// Skip snapshots until one satisfies `pred`. Re-runs may emit
    /// intermediate states, so tests assert on the state they wait for.
    pub async fn next_matching<T: Clone + Send + Sync + 'static>(live: &mut Live<T>, pred: impl Fn(&T) -> bool) -> T {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let value = live
                    .next()
                    .await
                    .expect("producer stopped")
                    .expect("snapshot was an error");
                if pred(&value) {
                    return value;
                }
            }
        })
        .await
        .expect("timed out waiting for matching snapshot")
    }

    /// Wait until every live subscription to the feed has been dropped.
    pub async fn wait_for_no_subscribers(svc: &ScrudService) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while svc.change_feed().receiver_count() > 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("live producers were not cancelled");
    }
}
