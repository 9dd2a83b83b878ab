//! Assignment modal
//!
//! A small state machine around the assign-topic form. The student select is
//! filled asynchronously; every opening bumps a generation so that a late list
//! or a late assignment answer belonging to an earlier opening only touches
//! that opening.

use crate::consts::cli_consts::messages::STUDENT_PLACEHOLDER;
use crate::models::{EntityId, Student};
use crate::ui::views::Dropdown;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    /// Opened from a topic row; the topic id is pre-filled.
    OpenForTopic,
    /// Opened from a student row; the student is pre-selected once the list loads.
    OpenForStudent { student_id: EntityId },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModalField {
    TopicId,
    Student,
    Supervisor,
}

impl ModalField {
    pub fn next(self) -> Self {
        match self {
            ModalField::TopicId => ModalField::Student,
            ModalField::Student => ModalField::Supervisor,
            ModalField::Supervisor => ModalField::TopicId,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ModalField::TopicId => ModalField::Supervisor,
            ModalField::Student => ModalField::TopicId,
            ModalField::Supervisor => ModalField::Student,
        }
    }
}

/// Outcome of feeding a student list into the modal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StudentOptionsOutcome {
    /// Options were replaced; the pre-selected student, if any, was found.
    Applied,
    /// Options were replaced but the pre-selected student is not among them.
    PreselectMissing,
    /// The list belongs to an earlier opening or the modal is closed.
    Stale,
}

#[derive(Debug)]
pub struct AssignModal {
    state: ModalState,
    /// Raw contents of the topic id field.
    pub topic_id: String,
    pub students: Dropdown,
    pub focus: ModalField,
    /// Opening whose assignment request is in flight. At most one at a time,
    /// even across a close and reopen.
    in_flight: Option<u64>,
    generation: u64,
}

impl AssignModal {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            topic_id: String::new(),
            students: Dropdown::new(STUDENT_PLACEHOLDER),
            focus: ModalField::Student,
            in_flight: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    /// Whether this opening of the form was submitted and awaits an answer.
    pub fn is_submitting(&self) -> bool {
        self.is_open() && self.in_flight == Some(self.generation)
    }

    /// Whether any assignment request is still in flight.
    pub fn has_pending_submission(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Opens the form for a topic row. Returns the generation the student list
    /// request must carry.
    pub fn open_for_topic(&mut self, topic_id: &EntityId) -> u64 {
        self.open(ModalState::OpenForTopic, topic_id.to_string(), ModalField::Student)
    }

    /// Opens the form for a student row. The topic field starts empty.
    pub fn open_for_student(&mut self, student_id: &EntityId) -> u64 {
        self.open(
            ModalState::OpenForStudent {
                student_id: student_id.clone(),
            },
            String::new(),
            ModalField::TopicId,
        )
    }

    fn open(&mut self, state: ModalState, topic_id: String, focus: ModalField) -> u64 {
        self.generation += 1;
        self.state = state;
        self.topic_id = topic_id;
        self.students.reset(STUDENT_PLACEHOLDER);
        self.focus = focus;
        self.generation
    }

    /// Hides the form. A request already sent keeps running.
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    /// Fills the student select from a `withoutTopic=true` fetch.
    ///
    /// Students that still report a topic are skipped. When the pre-selected id
    /// is absent nothing is marked selected and the placeholder stays.
    pub fn populate_students(&mut self, generation: u64, students: &[Student]) -> StudentOptionsOutcome {
        if !self.is_open() || generation != self.generation {
            return StudentOptionsOutcome::Stale;
        }

        let preselect = match &self.state {
            ModalState::OpenForStudent { student_id } => Some(student_id.clone()),
            _ => None,
        };

        self.students.reset(STUDENT_PLACEHOLDER);
        let mut found = false;
        for student in students.iter().filter(|s| !s.has_topic()) {
            let selected = preselect.as_ref() == Some(&student.id);
            found |= selected;
            self.students
                .push(student.id.as_str(), student.full_name.clone(), selected);
        }

        if preselect.is_some() && !found {
            StudentOptionsOutcome::PreselectMissing
        } else {
            StudentOptionsOutcome::Applied
        }
    }

    /// Marks the form as submitted and returns the opening the answer belongs to.
    ///
    /// `None` when the form is closed or an earlier request has not been answered.
    pub fn begin_submit(&mut self) -> Option<u64> {
        if !self.is_open() || self.in_flight.is_some() {
            return None;
        }
        self.in_flight = Some(self.generation);
        Some(self.generation)
    }

    /// Records the answer to the request sent from opening `generation`.
    ///
    /// Returns true when that opening is still on screen, i.e. the caller may
    /// close it on success or leave it editable on failure.
    pub fn finish_submit(&mut self, generation: u64) -> bool {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
        }
        self.is_open() && generation == self.generation
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn type_char(&mut self, c: char) {
        if self.focus == ModalField::TopicId && !self.is_submitting() {
            self.topic_id.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.focus == ModalField::TopicId && !self.is_submitting() {
            self.topic_id.pop();
        }
    }
}

impl Default for AssignModal {
    fn default() -> Self {
        Self::new()
    }
}
