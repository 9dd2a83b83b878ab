//! One-shot fetch of everything the dashboard shows, for headless use.

use crate::api::DashboardApi;
use crate::api::error::ApiError;
use crate::models::{Stats, Student, Supervisor, Topic};

/// Results of one full sync, each independent of the others.
#[derive(Debug)]
pub struct Snapshot {
    pub stats: Result<Stats, ApiError>,
    pub students: Result<Vec<Student>, ApiError>,
    pub topics: Result<Vec<Topic>, ApiError>,
    pub supervisors: Result<Vec<Supervisor>, ApiError>,
}

impl Snapshot {
    /// Issues the four reads concurrently and waits for all of them.
    pub async fn fetch(api: &dyn DashboardApi) -> Self {
        let (stats, students, topics, supervisors) = futures::join!(
            api.get_stats(),
            api.get_students(false),
            api.get_topics(),
            api.get_supervisors()
        );
        Self {
            stats,
            students,
            topics,
            supervisors,
        }
    }

    pub fn failures(&self) -> usize {
        [
            self.stats.is_err(),
            self.students.is_err(),
            self.topics.is_err(),
            self.supervisors.is_err(),
        ]
        .into_iter()
        .filter(|failed| *failed)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockDashboardApi;

    #[tokio::test]
    async fn failures_are_counted_per_resource() {
        let mut api = MockDashboardApi::new();
        api.expect_get_stats().returning(|| Ok(Stats::default()));
        api.expect_get_students().returning(|_| Ok(vec![]));
        api.expect_get_topics().returning(|| {
            Err(ApiError::Http {
                status: 502,
                message: String::new(),
            })
        });
        api.expect_get_supervisors().returning(|| Ok(vec![]));

        let snapshot = Snapshot::fetch(&api).await;
        assert_eq!(snapshot.failures(), 1);
        assert!(snapshot.students.is_ok());
    }
}
