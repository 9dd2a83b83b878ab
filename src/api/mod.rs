use crate::api::error::ApiError;
use crate::environment::Environment;
use crate::models::{AssignmentRequest, AssignmentResult, Stats, Student, Supervisor, Topic};

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

/// The backend endpoints the dashboard consumes.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// `GET /api/stats`
    async fn get_stats(&self) -> Result<Stats, ApiError>;

    /// `GET /api/students`, or `GET /api/students?withoutTopic=true` when filtered.
    async fn get_students(&self, without_topic: bool) -> Result<Vec<Student>, ApiError>;

    /// `GET /api/topics`
    async fn get_topics(&self) -> Result<Vec<Topic>, ApiError>;

    /// `GET /api/topics/{id}`
    async fn get_topic(&self, topic_id: &str) -> Result<Topic, ApiError>;

    /// `GET /api/supervisors`
    async fn get_supervisors(&self) -> Result<Vec<Supervisor>, ApiError>;

    /// `POST /api/assign-topic`
    async fn assign_topic(
        &self,
        request: &AssignmentRequest,
    ) -> Result<AssignmentResult, ApiError>;
}
