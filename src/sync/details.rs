//! Topic details lookup
//!
//! There is no detail view yet; the fetched topic only goes to the activity log.

use super::{DataSync, Update};
use crate::events::{Event, Source};
use crate::models::EntityId;
use std::sync::Arc;
use tokio::task::JoinHandle;

impl DataSync {
    pub fn view_topic_details(&self, topic_id: EntityId) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let updates = self.updates.clone();
        let classifier = self.classifier.clone();
        tokio::spawn(async move {
            let event = match api.get_topic(topic_id.as_str()).await {
                Ok(topic) => Event::info(
                    Source::TopicDetails,
                    format!(
                        "Детали темы {}: «{}», {}, {}, {}",
                        topic.id,
                        topic.title,
                        topic.subject.as_deref().unwrap_or("-"),
                        topic.work_type.as_deref().unwrap_or("-"),
                        topic.status.label()
                    ),
                ),
                Err(e) => Event::error(
                    Source::TopicDetails,
                    format!("Ошибка загрузки деталей темы {}: {}", topic_id, e),
                    classifier.classify_read_error(&e),
                ),
            };
            Self::send(&updates, Update::Log(event)).await;
        })
    }
}
