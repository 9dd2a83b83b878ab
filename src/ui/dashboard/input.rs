//! Keyboard and mouse handling
//!
//! Maps terminal input onto the dashboard controls: quick actions, table
//! search, row actions and the assignment form.

use super::state::{DashboardState, InputMode};
use super::utils::modal_area;

use crate::events::{Event, Source};
use crate::models::EntityId;
use crate::ui::modal::ModalField;
use crate::ui::table::{RowAction, TableId};
use crate::ui::views::filter_table;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};

/// What the UI loop should do after an input event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

impl DashboardState {
    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Control::Quit;
        }

        if self.views.modal.is_open() {
            self.handle_modal_key(key);
            return Control::Continue;
        }

        match self.input_mode {
            InputMode::Search(table) => {
                self.handle_search_key(table, key);
                Control::Continue
            }
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
            KeyCode::Char('s') => self.focus = TableId::Students,
            KeyCode::Char('t') => self.focus = TableId::Topics,
            KeyCode::Tab => self.focus = self.focus.other(),
            KeyCode::Down | KeyCode::Char('j') => self.views.table_mut(self.focus).select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.views.table_mut(self.focus).select_previous(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search(self.focus),
            KeyCode::Char('a') => self.assign_from_selected_row(),
            KeyCode::Char('v') => self.view_selected_topic(),
            KeyCode::Char('r') => self.load_data(),
            _ => {}
        }
        Control::Continue
    }

    fn handle_search_key(&mut self, table: TableId, key: KeyEvent) {
        let mut query = self.views.table(table).query.clone();
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                return;
            }
            KeyCode::Backspace => {
                query.pop();
            }
            KeyCode::Char(c) => query.push(c),
            _ => return,
        }
        filter_table(&mut self.views, &query, table);
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let modal = &mut self.views.modal;
        match key.code {
            KeyCode::Esc => self.close_assign_modal(),
            KeyCode::Enter => self.submit_assignment(),
            KeyCode::Tab => modal.focus_next(),
            KeyCode::BackTab => modal.focus_previous(),
            KeyCode::Backspace => modal.backspace(),
            KeyCode::Down => match modal.focus {
                ModalField::Student => modal.students.select_next(),
                ModalField::Supervisor => self.views.supervisors.select_next(),
                ModalField::TopicId => modal.focus_next(),
            },
            KeyCode::Up => match modal.focus {
                ModalField::Student => modal.students.select_previous(),
                ModalField::Supervisor => self.views.supervisors.select_previous(),
                ModalField::TopicId => {}
            },
            KeyCode::Char(c) => modal.type_char(c),
            _ => {}
        }
    }

    /// A click on the backdrop, outside the form, closes the modal.
    pub fn handle_click(&mut self, column: u16, row: u16, frame_area: Rect) {
        if !self.views.modal.is_open() {
            return;
        }
        if !modal_area(frame_area).contains(Position::new(column, row)) {
            self.close_assign_modal();
        }
    }

    fn assign_from_selected_row(&mut self) {
        let Some(row) = self.views.table(self.focus).selected_row() else {
            return;
        };
        match row.enabled_action(|a| {
            matches!(a, RowAction::AssignToStudent(_) | RowAction::AssignTopic(_))
        }) {
            Some(RowAction::AssignToStudent(id)) => {
                let id = id.clone();
                self.open_assign_modal_for_student(&id);
            }
            Some(RowAction::AssignTopic(id)) => {
                let id = id.clone();
                self.open_assign_modal_for_topic(&id);
            }
            _ => {}
        }
    }

    fn view_selected_topic(&mut self) {
        if self.focus != TableId::Topics {
            return;
        }
        let topic_id = self
            .views
            .topics
            .selected_row()
            .and_then(|row| row.enabled_action(|a| matches!(a, RowAction::ViewTopicDetails(_))))
            .and_then(|action| match action {
                RowAction::ViewTopicDetails(id) => Some(id.clone()),
                _ => None,
            });
        if let Some(id) = topic_id {
            self.sync().view_topic_details(id);
        }
    }

    pub fn open_assign_modal_for_student(&mut self, student_id: &EntityId) {
        let generation = self.views.modal.open_for_student(student_id);
        self.sync().load_student_options(generation);
    }

    pub fn open_assign_modal_for_topic(&mut self, topic_id: &EntityId) {
        let generation = self.views.modal.open_for_topic(topic_id);
        self.sync().load_student_options(generation);
    }

    pub fn close_assign_modal(&mut self) {
        self.views.modal.close();
    }

    /// Sends the form as it stands. The modal stays open until the backend answers.
    pub fn submit_assignment(&mut self) {
        let Some(modal_generation) = self.views.modal.begin_submit() else {
            if self.views.modal.has_pending_submission() && !self.views.modal.is_submitting() {
                self.add_to_activity_log(Event::info(
                    Source::Assignment,
                    "Предыдущее назначение ещё не завершено",
                ));
            }
            return;
        };
        let request = self.views.assignment_request();
        self.add_to_activity_log(Event::refresh(
            Source::Assignment,
            format!(
                "Отправка назначения: тема {:?}, студент {:?}, руководитель {:?}",
                request.topic_id, request.student_id, request.supervisor_id
            ),
        ));
        self.sync().assign_topic(request, modal_generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockDashboardApi;
    use crate::api::error::ApiError;
    use crate::environment::Environment;
    use crate::logging::LogLevel;
    use crate::models::{AssignmentRequest, Stats, Student, Topic, TopicStatus};
    use crate::sync::{DataSync, Update};
    use crate::ui::app::UIConfig;
    use crate::ui::modal::ModalState;
    use crate::ui::notifications::Severity;
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn student(id: &str, name: &str, topic: Option<&str>) -> Student {
        Student {
            id: EntityId::new(id),
            full_name: name.to_string(),
            topic: topic.map(str::to_string),
            supervisor: None,
        }
    }

    fn topic(id: &str, status: TopicStatus) -> Topic {
        Topic {
            id: EntityId::new(id),
            title: format!("Topic {id}"),
            subject: None,
            work_type: None,
            status,
        }
    }

    fn base_api() -> MockDashboardApi {
        let mut api = MockDashboardApi::new();
        api.expect_environment().return_const(Environment::Local);
        api
    }

    fn dashboard(api: MockDashboardApi) -> (DashboardState, mpsc::Receiver<Update>) {
        let (sender, receiver) = mpsc::channel(64);
        let sync = DataSync::new(Arc::new(api), sender);
        let state = DashboardState::new(sync, UIConfig::new(false, LogLevel::Info));
        (state, receiver)
    }

    /// Feeds exactly `n` updates from request tasks into the dashboard.
    async fn pump(state: &mut DashboardState, receiver: &mut mpsc::Receiver<Update>, n: usize, now: Instant) {
        for _ in 0..n {
            let update = tokio::time::timeout(Duration::from_secs(5), receiver.recv())
                .await
                .expect("update in time")
                .expect("channel open");
            state.add_update(update);
        }
        state.update(now);
    }

    #[test]
    fn quick_actions_move_focus() {
        let (mut state, _rx) = dashboard(base_api());
        state.handle_key(key(KeyCode::Char('t')));
        assert_eq!(state.focus, TableId::Topics);
        state.handle_key(key(KeyCode::Char('s')));
        assert_eq!(state.focus, TableId::Students);
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), Control::Quit);
    }

    #[test]
    fn typing_in_search_filters_the_focused_table() {
        let (mut state, _rx) = dashboard(base_api());
        crate::ui::renderers::populate_students_table(
            &mut state.views.students,
            &[student("1", "Ivanov A.", None), student("2", "Petrov B.", None)],
        );

        state.handle_key(key(KeyCode::Char('/')));
        for c in "IVAN".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        let visible: Vec<bool> = state.views.students.rows.iter().map(|r| r.visible).collect();
        assert_eq!(visible, vec![true, false]);

        // 'q' is search text here, not quit
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), Control::Continue);
        for _ in 0..5 {
            state.handle_key(key(KeyCode::Backspace));
        }
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.views.students.visible_count(), 2);
    }

    #[tokio::test]
    async fn opening_from_topic_row_prefills_and_lists_free_students() {
        let mut api = base_api();
        api.expect_get_students()
            .withf(|without_topic| *without_topic)
            .times(1)
            .returning(|_| Ok(vec![student("1", "Ivanov A.", None)]));
        let (mut state, mut rx) = dashboard(api);
        crate::ui::renderers::populate_topics_table(
            &mut state.views.topics,
            &[topic("10", TopicStatus::Assigned), topic("11", TopicStatus::Free)],
        );

        state.handle_key(key(KeyCode::Char('t')));
        // The first topic is not free: its assign action is disabled.
        state.handle_key(key(KeyCode::Char('a')));
        assert!(!state.views.modal.is_open());

        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Char('a')));
        assert_eq!(state.views.modal.state(), &ModalState::OpenForTopic);
        assert_eq!(state.views.modal.topic_id, "11");

        pump(&mut state, &mut rx, 1, Instant::now()).await;
        let values: Vec<&str> = state
            .views
            .modal
            .students
            .options()
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["", "1"]);
    }

    #[tokio::test]
    async fn successful_assignment_closes_modal_resyncs_and_toasts() {
        let mut api = base_api();
        api.expect_get_students()
            .withf(|without_topic| *without_topic)
            .times(1)
            .returning(|_| Ok(vec![student("7", "Petrov B.", None)]));
        api.expect_assign_topic()
            .withf(|r: &AssignmentRequest| {
                r.topic_id.is_empty() && r.student_id == "7" && r.supervisor_id.is_empty()
            })
            .times(1)
            .returning(|_| Ok(serde_json::Value::Null));
        api.expect_get_stats().times(1).returning(|| Ok(Stats::default()));
        api.expect_get_students()
            .withf(|without_topic| !*without_topic)
            .times(1)
            .returning(|_| Ok(vec![]));
        api.expect_get_topics().times(1).returning(|| Ok(vec![]));
        api.expect_get_supervisors().times(1).returning(|| Ok(vec![]));

        let (mut state, mut rx) = dashboard(api);
        let now = Instant::now();
        state.open_assign_modal_for_student(&EntityId::new("7"));
        pump(&mut state, &mut rx, 1, now).await;
        assert_eq!(state.views.modal.students.value(), "7");

        state.handle_key(key(KeyCode::Enter));
        assert!(state.views.modal.is_submitting());
        // success log + finished
        pump(&mut state, &mut rx, 2, now).await;
        assert!(!state.views.modal.is_open());

        // the four reads of the refresh
        pump(&mut state, &mut rx, 4, now).await;
        assert_eq!(state.counters().last_applied(crate::sync::Resource::Topics), 1);

        let toasts = state.views.toasts.visible(now + Duration::from_secs(1));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].1.severity, Severity::Success);
        assert_eq!(toasts[0].1.message, "Тема успешно назначена!");
    }

    #[tokio::test]
    async fn failed_assignment_keeps_modal_open_with_error_toast() {
        let mut api = base_api();
        api.expect_get_students().returning(|_| Ok(vec![]));
        api.expect_assign_topic().times(1).returning(|_| {
            Err(ApiError::Http {
                status: 409,
                message: "Тема уже занята".to_string(),
            })
        });
        api.expect_get_stats().never();
        api.expect_get_topics().never();
        api.expect_get_supervisors().never();

        let (mut state, mut rx) = dashboard(api);
        let now = Instant::now();
        state.open_assign_modal_for_topic(&EntityId::new("3"));
        pump(&mut state, &mut rx, 1, now).await;

        state.submit_assignment();
        pump(&mut state, &mut rx, 2, now).await;

        assert!(state.views.modal.is_open());
        assert!(!state.views.modal.is_submitting());
        let toasts = state.views.toasts.visible(now + Duration::from_secs(1));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].1.severity, Severity::Error);
        assert_eq!(
            toasts[0].1.message,
            "Ошибка при назначении темы: Ошибка назначения темы"
        );
        assert!(
            state
                .activity_logs
                .iter()
                .any(|e| e.msg.contains("Тема уже занята"))
        );
    }

    #[tokio::test]
    async fn late_success_for_a_closed_form_leaves_the_reopened_form_alone() {
        let mut api = base_api();
        api.expect_get_students().returning(|_| Ok(vec![]));
        api.expect_assign_topic()
            .withf(|r: &AssignmentRequest| r.topic_id == "3")
            .times(1)
            .returning(|_| Ok(serde_json::Value::Null));
        api.expect_get_stats().times(1).returning(|| Ok(Stats::default()));
        api.expect_get_topics().times(1).returning(|| Ok(vec![]));
        api.expect_get_supervisors().times(1).returning(|| Ok(vec![]));

        let (mut state, mut rx) = dashboard(api);
        let now = Instant::now();
        state.open_assign_modal_for_topic(&EntityId::new("3"));
        pump(&mut state, &mut rx, 1, now).await;
        state.submit_assignment();
        state.handle_key(key(KeyCode::Esc));

        state.open_assign_modal_for_topic(&EntityId::new("5"));
        assert!(!state.views.modal.is_submitting());
        // student options of the second opening, success log, finished
        pump(&mut state, &mut rx, 3, now).await;

        assert!(state.views.modal.is_open());
        assert_eq!(state.views.modal.topic_id, "5");
        assert!(!state.views.modal.is_submitting());
        let toasts = state.views.toasts.visible(now + Duration::from_secs(1));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].1.severity, Severity::Success);

        // the refresh still runs
        pump(&mut state, &mut rx, 4, now).await;
        assert_eq!(state.counters().last_applied(crate::sync::Resource::Stats), 1);
    }

    #[tokio::test]
    async fn failed_read_is_logged_without_a_toast() {
        let mut api = base_api();
        api.expect_get_stats().returning(|| {
            Err(ApiError::Http {
                status: 500,
                message: "down".to_string(),
            })
        });
        api.expect_get_students().returning(|_| Ok(vec![]));
        api.expect_get_topics().returning(|| Ok(vec![]));
        api.expect_get_supervisors().returning(|| Ok(vec![]));

        let (mut state, mut rx) = dashboard(api);
        let now = Instant::now();
        state.load_data();
        pump(&mut state, &mut rx, 4, now).await;

        assert!(state.views.toasts.is_empty());
        assert!(state.activity_logs.iter().any(|e| {
            e.source == Source::Stats && e.event_type == crate::events::EventType::Error
        }));
    }

    #[test]
    fn supervisor_choice_survives_a_resync() {
        let (mut state, _rx) = dashboard(base_api());
        let supervisors = |ids: &[&str]| {
            crate::sync::Payload::Supervisors(
                ids.iter()
                    .map(|id| crate::models::Supervisor {
                        id: EntityId::new(*id),
                        full_name: format!("Supervisor {id}"),
                        department: "ИВТ".to_string(),
                    })
                    .collect(),
            )
        };
        let mut counters = crate::sync::RequestCounters::new();
        state.add_update(Update::Loaded {
            generation: counters.issue(crate::sync::Resource::Supervisors),
            payload: supervisors(&["1", "2"]),
        });
        state.update(Instant::now());
        state.views.supervisors.select_value("2");

        state.add_update(Update::Loaded {
            generation: counters.issue(crate::sync::Resource::Supervisors),
            payload: supervisors(&["2", "3"]),
        });
        state.update(Instant::now());
        assert_eq!(state.views.supervisors.value(), "2");

        state.add_update(Update::Loaded {
            generation: counters.issue(crate::sync::Resource::Supervisors),
            payload: supervisors(&["3"]),
        });
        state.update(Instant::now());
        assert_eq!(state.views.supervisors.value(), "");
    }

    #[test]
    fn stale_sync_response_is_not_rendered() {
        let (mut state, _rx) = dashboard(base_api());
        let mut counters = crate::sync::RequestCounters::new();
        let old = counters.issue(crate::sync::Resource::Students);
        let new = counters.issue(crate::sync::Resource::Students);

        state.add_update(Update::Loaded {
            generation: new,
            payload: crate::sync::Payload::Students(vec![student("2", "Fresh", None)]),
        });
        state.add_update(Update::Loaded {
            generation: old,
            payload: crate::sync::Payload::Students(vec![student("1", "Stale", None)]),
        });
        state.update(Instant::now());

        assert_eq!(state.views.students.rows.len(), 1);
        assert_eq!(state.views.students.rows[0].cells[0], "Fresh");
    }

    #[tokio::test]
    async fn backdrop_click_closes_modal() {
        let mut api = base_api();
        api.expect_get_students().returning(|_| Ok(vec![]));
        let (mut state, _rx) = dashboard(api);
        let frame = Rect::new(0, 0, 120, 40);

        state.open_assign_modal_for_topic(&EntityId::new("3"));
        let inside = modal_area(frame);
        state.handle_click(inside.x + 1, inside.y + 1, frame);
        assert!(state.views.modal.is_open());

        state.handle_click(0, 0, frame);
        assert!(!state.views.modal.is_open());
    }

    #[tokio::test]
    async fn escape_cancels_modal_without_quitting() {
        let mut api = base_api();
        api.expect_get_students().returning(|_| Ok(vec![]));
        let (mut state, _rx) = dashboard(api);
        state.open_assign_modal_for_topic(&EntityId::new("3"));
        assert_eq!(state.handle_key(key(KeyCode::Esc)), Control::Continue);
        assert!(!state.views.modal.is_open());
    }
}
