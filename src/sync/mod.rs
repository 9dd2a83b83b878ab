//! Data synchronization with the backend
//!
//! Reads run as independent tokio tasks and report back over a channel as soon
//! as their own response arrives. There is no join between them, no retry and no
//! cancellation: a failed or hung request only affects its own view.

mod assignment;
mod details;
pub mod generation;
pub mod snapshot;

pub use generation::{Generation, RequestCounters, Resource};

use crate::api::DashboardApi;
use crate::api::error::ApiError;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, Source};
use crate::models::{Stats, Student, Supervisor, Topic};
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A successfully fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Stats(Stats),
    Students(Vec<Student>),
    Topics(Vec<Topic>),
    Supervisors(Vec<Supervisor>),
}

impl Payload {
    pub fn resource(&self) -> Resource {
        match self {
            Payload::Stats(_) => Resource::Stats,
            Payload::Students(_) => Resource::Students,
            Payload::Topics(_) => Resource::Topics,
            Payload::Supervisors(_) => Resource::Supervisors,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    Assigned,
    Rejected,
}

/// Messages from request tasks to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Loaded {
        generation: Generation,
        payload: Payload,
    },
    /// Student options for the assignment form opened with `modal_generation`.
    StudentOptions {
        modal_generation: u64,
        students: Vec<Student>,
    },
    /// Answer to the assignment sent from the form opening `modal_generation`.
    AssignmentFinished {
        modal_generation: u64,
        outcome: AssignmentOutcome,
    },
    Log(Event),
}

impl Resource {
    pub fn source(self) -> Source {
        match self {
            Resource::Stats => Source::Stats,
            Resource::Students => Source::Students,
            Resource::Topics => Source::Topics,
            Resource::Supervisors => Source::Supervisors,
        }
    }
}

/// Issues backend requests on behalf of the dashboard.
#[derive(Clone)]
pub struct DataSync {
    api: Arc<dyn DashboardApi>,
    updates: mpsc::Sender<Update>,
    classifier: ErrorClassifier,
}

impl Debug for DataSync {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSync")
            .field("environment", self.api.environment())
            .finish_non_exhaustive()
    }
}

impl DataSync {
    pub fn new(api: Arc<dyn DashboardApi>, updates: mpsc::Sender<Update>) -> Self {
        Self {
            api,
            updates,
            classifier: ErrorClassifier::new(),
        }
    }

    pub fn api(&self) -> &Arc<dyn DashboardApi> {
        &self.api
    }

    /// Starts the four reads of a full sync. Each one renders on its own arrival.
    pub fn load_data(&self, counters: &mut RequestCounters) -> Vec<JoinHandle<()>> {
        Resource::ALL
            .into_iter()
            .map(|resource| {
                let generation = counters.issue(resource);
                let api = Arc::clone(&self.api);
                match resource {
                    Resource::Stats => self.spawn_read(
                        resource,
                        generation,
                        async move { api.get_stats().await },
                        Payload::Stats,
                    ),
                    Resource::Students => self.spawn_read(
                        resource,
                        generation,
                        async move { api.get_students(false).await },
                        Payload::Students,
                    ),
                    Resource::Topics => self.spawn_read(
                        resource,
                        generation,
                        async move { api.get_topics().await },
                        Payload::Topics,
                    ),
                    Resource::Supervisors => self.spawn_read(
                        resource,
                        generation,
                        async move { api.get_supervisors().await },
                        Payload::Supervisors,
                    ),
                }
            })
            .collect()
    }

    fn spawn_read<T, F>(
        &self,
        resource: Resource,
        generation: Generation,
        request: F,
        wrap: fn(T) -> Payload,
    ) -> JoinHandle<()>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let updates = self.updates.clone();
        let classifier = self.classifier.clone();
        tokio::spawn(async move {
            let update = match request.await {
                Ok(value) => Update::Loaded {
                    generation,
                    payload: wrap(value),
                },
                Err(e) => Update::Log(Event::error(
                    resource.source(),
                    format!("Ошибка загрузки ({}): {}", resource, e),
                    classifier.classify_read_error(&e),
                )),
            };
            // The receiver is gone only when the dashboard is shutting down.
            let _ = updates.send(update).await;
        })
    }

    /// Loads `withoutTopic=true` students for the assignment form.
    pub fn load_student_options(&self, modal_generation: u64) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let updates = self.updates.clone();
        let classifier = self.classifier.clone();
        tokio::spawn(async move {
            let update = match api.get_students(true).await {
                Ok(students) => Update::StudentOptions {
                    modal_generation,
                    students,
                },
                Err(e) => Update::Log(Event::error(
                    Source::AssignForm,
                    format!("Ошибка загрузки студентов: {}", e),
                    classifier.classify_read_error(&e),
                )),
            };
            let _ = updates.send(update).await;
        })
    }

    async fn send(updates: &mpsc::Sender<Update>, update: Update) {
        let _ = updates.send(update).await;
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::drain;
    use super::*;
    use crate::api::MockDashboardApi;
    use crate::environment::Environment;
    use crate::models::EntityId;

    fn mock_with_environment() -> MockDashboardApi {
        let mut api = MockDashboardApi::new();
        api.expect_environment().return_const(Environment::Local);
        api
    }

    fn student(id: &str) -> Student {
        Student {
            id: EntityId::new(id),
            full_name: format!("Student {id}"),
            topic: None,
            supervisor: None,
        }
    }

    #[tokio::test]
    async fn full_sync_issues_four_reads() {
        let mut api = mock_with_environment();
        api.expect_get_stats().times(1).returning(|| {
            Ok(Stats {
                total_students: Some(3),
                ..Stats::default()
            })
        });
        api.expect_get_students()
            .withf(|without_topic| !*without_topic)
            .times(1)
            .returning(|_| Ok(vec![student("1")]));
        api.expect_get_topics().times(1).returning(|| Ok(vec![]));
        api.expect_get_supervisors().times(1).returning(|| Ok(vec![]));

        let (sender, mut receiver) = mpsc::channel(16);
        let sync = DataSync::new(Arc::new(api), sender);
        let mut counters = RequestCounters::new();
        let updates = drain(sync.load_data(&mut counters), &mut receiver).await;

        let mut resources: Vec<Resource> = updates
            .iter()
            .filter_map(|u| match u {
                Update::Loaded {
                    generation,
                    payload,
                } => {
                    assert_eq!(*generation, 1);
                    Some(payload.resource())
                }
                _ => None,
            })
            .collect();
        resources.sort_by_key(|r| r.to_string());
        assert_eq!(
            resources,
            vec![
                Resource::Stats,
                Resource::Students,
                Resource::Supervisors,
                Resource::Topics
            ]
        );
    }

    #[tokio::test]
    async fn one_failing_read_does_not_block_the_others() {
        let mut api = mock_with_environment();
        api.expect_get_stats().returning(|| {
            Err(ApiError::Http {
                status: 500,
                message: "down".to_string(),
            })
        });
        api.expect_get_students().returning(|_| Ok(vec![]));
        api.expect_get_topics().returning(|| Ok(vec![]));
        api.expect_get_supervisors().returning(|| Ok(vec![]));

        let (sender, mut receiver) = mpsc::channel(16);
        let sync = DataSync::new(Arc::new(api), sender);
        let updates = drain(
            sync.load_data(&mut RequestCounters::new()),
            &mut receiver,
        )
        .await;

        let loaded = updates
            .iter()
            .filter(|u| matches!(u, Update::Loaded { .. }))
            .count();
        assert_eq!(loaded, 3);
        assert!(updates.iter().any(|u| matches!(
            u,
            Update::Log(event) if event.source == Source::Stats && event.msg.contains("500")
        )));
    }

    #[tokio::test]
    async fn student_options_use_the_without_topic_filter() {
        let mut api = mock_with_environment();
        api.expect_get_students()
            .withf(|without_topic| *without_topic)
            .times(1)
            .returning(|_| Ok(vec![student("4")]));

        let (sender, mut receiver) = mpsc::channel(4);
        let sync = DataSync::new(Arc::new(api), sender);
        let updates = drain(vec![sync.load_student_options(7)], &mut receiver).await;
        assert_eq!(
            updates,
            vec![Update::StudentOptions {
                modal_generation: 7,
                students: vec![student("4")],
            }]
        );
    }
}
