//! Topic assignment request

use super::{AssignmentOutcome, DataSync, Update};
use crate::events::{Event, Source};
use crate::models::AssignmentRequest;
use std::sync::Arc;
use tokio::task::JoinHandle;

impl DataSync {
    /// Sends the assignment as read from the form. No client-side validation:
    /// whether the topic is still free is decided by the backend.
    pub fn assign_topic(&self, request: AssignmentRequest, modal_generation: u64) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let updates = self.updates.clone();
        let classifier = self.classifier.clone();
        tokio::spawn(async move {
            let outcome = match api.assign_topic(&request).await {
                Ok(result) => {
                    let event = Event::success(
                        Source::Assignment,
                        format!(
                            "Тема {} назначена студенту {} (руководитель {})",
                            request.topic_id, request.student_id, request.supervisor_id
                        ),
                    );
                    log::debug!("assignment result: {}", result);
                    Self::send(&updates, Update::Log(event)).await;
                    AssignmentOutcome::Assigned
                }
                Err(e) => {
                    let event = Event::error(
                        Source::Assignment,
                        format!("Ошибка назначения темы: {}", e),
                        classifier.classify_write_error(&e),
                    );
                    Self::send(&updates, Update::Log(event)).await;
                    AssignmentOutcome::Rejected
                }
            };
            Self::send(
                &updates,
                Update::AssignmentFinished {
                    modal_generation,
                    outcome,
                },
            )
            .await;
        })
    }
}
