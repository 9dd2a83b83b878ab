//! Backend API Client
//!
//! A JSON-over-HTTP client for the `/api/...` endpoints behind the dashboard.

use crate::api::DashboardApi;
use crate::api::error::ApiError;
use crate::environment::Environment;
use crate::models::{AssignmentRequest, AssignmentResult, Stats, Student, Supervisor, Topic};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("starosta-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    /// Only the connect phase is bounded; a request that hangs afterwards stays pending.
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_request<B: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<AssignmentResult, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        if response_bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(AssignmentResult::Null);
        }
        Self::decode_response(&response_bytes)
    }

    fn students_endpoint(without_topic: bool) -> &'static str {
        if without_topic {
            "api/students?withoutTopic=true"
        } else {
            "api/students"
        }
    }
}

#[async_trait::async_trait]
impl DashboardApi for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn get_stats(&self) -> Result<Stats, ApiError> {
        self.get_request("api/stats").await
    }

    async fn get_students(&self, without_topic: bool) -> Result<Vec<Student>, ApiError> {
        self.get_request(Self::students_endpoint(without_topic))
            .await
    }

    async fn get_topics(&self) -> Result<Vec<Topic>, ApiError> {
        self.get_request("api/topics").await
    }

    async fn get_topic(&self, topic_id: &str) -> Result<Topic, ApiError> {
        let topic_path = urlencoding::encode(topic_id).into_owned();
        self.get_request(&format!("api/topics/{}", topic_path))
            .await
    }

    async fn get_supervisors(&self) -> Result<Vec<Supervisor>, ApiError> {
        self.get_request("api/supervisors").await
    }

    async fn assign_topic(
        &self,
        request: &AssignmentRequest,
    ) -> Result<AssignmentResult, ApiError> {
        self.post_request("api/assign-topic", request).await
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live backend to run.
mod live_backend_tests {
    use crate::api::DashboardApi;
    use crate::environment::Environment;

    #[tokio::test]
    #[ignore] // This test requires a live backend instance.
    /// Should return the dashboard counters.
    async fn test_get_stats() {
        let client = super::ApiClient::new(Environment::Local).unwrap();
        match client.get_stats().await {
            Ok(stats) => println!("Stats: {:?}", stats),
            Err(e) => panic!("Failed to get stats: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live backend instance.
    /// Should return only students without a topic.
    async fn test_get_students_without_topic() {
        let client = super::ApiClient::new(Environment::Local).unwrap();
        let students = client.get_students(true).await.unwrap();
        assert!(students.iter().all(|s| !s.has_topic()));
    }
}
