//! Dashboard state update logic
//!
//! Applies responses coming back from request tasks and drives the
//! assignment workflow once the backend has answered.

use super::state::DashboardState;

use crate::consts::cli_consts::messages::{
    ASSIGN_FAILED_PREFIX, ASSIGN_FAILED_REASON, ASSIGN_SUCCESS,
};
use crate::events::{Event, Source};
use crate::models::Student;
use crate::sync::{AssignmentOutcome, Payload, Update};
use crate::ui::modal::StudentOptionsOutcome;
use crate::ui::notifications::Severity;
use crate::ui::renderers::{
    populate_students_table, populate_supervisors_dropdown, populate_topics_table,
    update_statistics,
};

use std::time::Instant;

impl DashboardState {
    /// Apply queued responses and expire old toasts.
    pub fn update(&mut self, now: Instant) {
        while let Some(update) = self.pending_updates.pop_front() {
            self.process_update(update, now);
        }

        self.views.toasts.prune(now);
    }

    /// Initial load, manual refresh and post-assignment refresh all go through here.
    pub fn load_data(&mut self) {
        self.add_to_activity_log(Event::refresh(
            Source::Dashboard,
            "Загрузка данных с сервера...",
        ));
        self.start_full_sync();
    }

    /// Process a single response and update the views it concerns
    fn process_update(&mut self, update: Update, now: Instant) {
        match update {
            Update::Loaded {
                generation,
                payload,
            } => self.apply_payload(generation, payload),
            Update::StudentOptions {
                modal_generation,
                students,
            } => self.apply_student_options(modal_generation, &students),
            Update::AssignmentFinished {
                modal_generation,
                outcome,
            } => self.finish_assignment(modal_generation, outcome, now),
            Update::Log(event) => self.add_to_activity_log(event),
        }
    }

    fn apply_payload(&mut self, generation: u64, payload: Payload) {
        let resource = payload.resource();
        if !self.accept_response(resource, generation) {
            self.add_to_activity_log(Event::refresh(
                resource.source(),
                format!(
                    "Устаревший ответ #{} отброшен, показан #{}",
                    generation,
                    self.counters().last_applied(resource)
                ),
            ));
            return;
        }

        let count = match &payload {
            Payload::Stats(stats) => {
                update_statistics(&mut self.views.stats, stats);
                None
            }
            Payload::Students(students) => {
                populate_students_table(&mut self.views.students, students);
                Some(students.len())
            }
            Payload::Topics(topics) => {
                populate_topics_table(&mut self.views.topics, topics);
                Some(topics.len())
            }
            Payload::Supervisors(supervisors) => {
                // A resync can land under an open form; keep the user's choice.
                let previous = self.views.supervisors.value().to_string();
                populate_supervisors_dropdown(&mut self.views.supervisors, supervisors);
                if !previous.is_empty() && !self.views.supervisors.select_value(&previous) {
                    self.add_to_activity_log(Event::refresh(
                        Source::Supervisors,
                        format!("Руководитель {} больше не в списке", previous),
                    ));
                }
                Some(supervisors.len())
            }
        };

        let msg = match count {
            Some(n) => format!("Загружено записей: {}", n),
            None => "Статистика обновлена".to_string(),
        };
        self.add_to_activity_log(Event::refresh(resource.source(), msg));
    }

    fn apply_student_options(&mut self, modal_generation: u64, students: &[Student]) {
        match self
            .views
            .modal
            .populate_students(modal_generation, students)
        {
            StudentOptionsOutcome::Applied => {}
            // Kept silent on screen: the placeholder simply stays selected.
            StudentOptionsOutcome::PreselectMissing => {
                self.add_to_activity_log(Event::refresh(
                    Source::AssignForm,
                    "Выбранный студент отсутствует в списке студентов без темы",
                ));
            }
            StudentOptionsOutcome::Stale => {
                log::debug!(
                    "dropping student options for modal generation {}",
                    modal_generation
                );
            }
        }
    }

    /// The form is closed only if it is still the opening that was submitted.
    /// Resync and toast happen either way.
    fn finish_assignment(&mut self, modal_generation: u64, outcome: AssignmentOutcome, now: Instant) {
        let same_opening = self.views.modal.finish_submit(modal_generation);
        match outcome {
            AssignmentOutcome::Assigned => {
                if same_opening {
                    self.views.modal.close();
                }
                self.load_data();
                self.views
                    .toasts
                    .show_notification(ASSIGN_SUCCESS, Severity::Success, now);
            }
            AssignmentOutcome::Rejected => {
                self.views.toasts.show_notification(
                    format!("{}{}", ASSIGN_FAILED_PREFIX, ASSIGN_FAILED_REASON),
                    Severity::Error,
                    now,
                );
            }
        }
    }
}
