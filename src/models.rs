//! Backend records as the dashboard sees them.
//!
//! These are transient projections of server state: nothing here is created or
//! mutated locally, every change is observed through a re-fetch.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of a backend entity.
///
/// The backend is free to send ids as JSON strings or numbers; both are kept as
/// their textual form so that form values and row actions compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// Returns the field as displayed in a table cell: empty or missing becomes a dash.
pub fn display_or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: EntityId,
    #[serde(default)]
    pub full_name: String,
    /// Title of the topic the student holds, if any.
    #[serde(default)]
    pub topic: Option<String>,
    /// Name of the supervisor, if one was assigned.
    #[serde(default)]
    pub supervisor: Option<String>,
}

impl Student {
    /// Topic title, treating an empty string as no topic.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref().filter(|t| !t.is_empty())
    }

    pub fn supervisor(&self) -> Option<&str> {
        self.supervisor.as_deref().filter(|s| !s.is_empty())
    }

    pub fn has_topic(&self) -> bool {
        self.topic().is_some()
    }

    pub fn status(&self) -> StudentStatus {
        match (self.topic(), self.supervisor()) {
            (Some(_), Some(_)) => StudentStatus::Assigned,
            (Some(_), None) => StudentStatus::Taken,
            _ => StudentStatus::Free,
        }
    }
}

/// Status badge of a student row, derived from topic and supervisor presence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StudentStatus {
    /// No topic.
    Free,
    /// Topic without a supervisor.
    Taken,
    /// Topic and supervisor.
    Assigned,
}

impl StudentStatus {
    pub fn label(self) -> &'static str {
        match self {
            StudentStatus::Free => "Свободен",
            StudentStatus::Taken => "Тема занята",
            StudentStatus::Assigned => "Назначена",
        }
    }

    pub fn badge(self) -> Badge {
        match self {
            StudentStatus::Free => Badge::Free,
            StudentStatus::Taken => Badge::Taken,
            StudentStatus::Assigned => Badge::Assigned,
        }
    }
}

/// Visual class of a status badge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Badge {
    Free,
    Taken,
    Assigned,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicStatus {
    Free,
    Assigned,
    /// Anything the backend reports that is neither free nor assigned.
    #[default]
    Taken,
}

impl<'de> Deserialize<'de> for TopicStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("free") => TopicStatus::Free,
            Some("assigned") => TopicStatus::Assigned,
            _ => TopicStatus::Taken,
        })
    }
}

impl TopicStatus {
    pub fn label(self) -> &'static str {
        match self {
            TopicStatus::Free => "Свободна",
            TopicStatus::Assigned => "Назначена",
            TopicStatus::Taken => "Занята",
        }
    }

    pub fn badge(self) -> Badge {
        match self {
            TopicStatus::Free => Badge::Free,
            TopicStatus::Assigned => Badge::Assigned,
            TopicStatus::Taken => Badge::Taken,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub work_type: Option<String>,
    #[serde(default)]
    pub status: TopicStatus,
}

impl Topic {
    pub fn is_free(&self) -> bool {
        self.status == TopicStatus::Free
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supervisor {
    pub id: EntityId,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub department: String,
}

impl Supervisor {
    /// Dropdown label: `"{fullName} ({department})"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.full_name, self.department)
    }
}

/// Summary counters shown in the stat cards. Missing counters count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub total_students: Option<u64>,
    #[serde(default)]
    pub assigned_topics: Option<u64>,
    #[serde(default)]
    pub free_topics: Option<u64>,
    #[serde(default)]
    pub available_supervisors: Option<u64>,
}

/// Body of `POST /api/assign-topic`. The backend alone decides whether it is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub topic_id: String,
    pub student_id: String,
    pub supervisor_id: String,
}

/// Whatever the backend answers on a successful assignment.
pub type AssignmentResult = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;

    fn student(topic: Option<&str>, supervisor: Option<&str>) -> Student {
        Student {
            id: EntityId::new("1"),
            full_name: "Ivanov A.".to_string(),
            topic: topic.map(str::to_string),
            supervisor: supervisor.map(str::to_string),
        }
    }

    #[test]
    fn student_status_follows_topic_and_supervisor() {
        assert_eq!(student(None, None).status().label(), "Свободен");
        assert_eq!(student(Some("Compilers"), None).status().label(), "Тема занята");
        assert_eq!(
            student(Some("Compilers"), Some("Petrova E.")).status().label(),
            "Назначена"
        );
    }

    #[test]
    fn empty_topic_counts_as_no_topic() {
        let s = student(Some(""), Some("Petrova E."));
        assert!(!s.has_topic());
        assert_eq!(s.status(), StudentStatus::Free);
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        let students: Vec<Student> = serde_json::from_str(
            r#"[{"id": 7, "fullName": "A"}, {"id": "s-8", "fullName": "B", "topic": null}]"#,
        )
        .unwrap();
        assert_eq!(students[0].id.as_str(), "7");
        assert_eq!(students[1].id.as_str(), "s-8");
        assert!(!students[1].has_topic());
    }

    #[test]
    fn unknown_topic_status_is_taken() {
        let topics: Vec<Topic> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "A", "subject": "Math", "workType": "Course", "status": "free"},
                {"id": 2, "title": "B", "status": "assigned"},
                {"id": 3, "title": "C", "status": "taken"},
                {"id": 4, "title": "D", "status": "archived"},
                {"id": 5, "title": "E"}
            ]"#,
        )
        .unwrap();
        let statuses: Vec<_> = topics.iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            vec![
                TopicStatus::Free,
                TopicStatus::Assigned,
                TopicStatus::Taken,
                TopicStatus::Taken,
                TopicStatus::Taken
            ]
        );
    }

    #[test]
    fn stats_tolerate_missing_and_null_counters() {
        let stats: Stats =
            serde_json::from_str(r#"{"totalStudents": 12, "freeTopics": null}"#).unwrap();
        assert_eq!(stats.total_students, Some(12));
        assert_eq!(stats.free_topics, None);
        assert_eq!(stats.assigned_topics, None);
    }

    #[test]
    fn assignment_request_uses_camel_case() {
        let request = AssignmentRequest {
            topic_id: "3".to_string(),
            student_id: "7".to_string(),
            supervisor_id: "2".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"topicId": "3", "studentId": "7", "supervisorId": "2"})
        );
    }

    #[test]
    fn supervisor_label_includes_department() {
        let supervisor = Supervisor {
            id: EntityId::new("2"),
            full_name: "Petrova E.".to_string(),
            department: "Applied Math".to_string(),
        };
        assert_eq!(supervisor.label(), "Petrova E. (Applied Math)");
    }

    #[test]
    fn dash_placeholder_for_missing_text() {
        assert_eq!(display_or_dash(None), "-");
        assert_eq!(display_or_dash(Some("  ")), "-");
        assert_eq!(display_or_dash(Some("Lab")), "Lab");
    }
}
