//! The rendering surface the controllers draw on.
//!
//! A page (browser DOM, terminal, test double) implements [`RenderContext`];
//! controllers receive it at construction and never touch global state.

use std::sync::{Mutex, MutexGuard};

use slotbook_common::FormField;

/// One entry of the records area. `booking_id` is the delete action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine {
    pub text: String,
    pub booking_id: Option<i64>,
}

/// One entry of the admin user list, with view/delete actions keyed by
/// `telegram_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCard {
    pub telegram_id: i64,
    pub title: String,
    pub details: String,
}

pub trait RenderContext: Send + Sync {
    /// Replace the status line.
    fn set_status(&self, text: &str);

    fn set_welcome(&self, text: &str);

    /// Fill the read-only name/phone fields from the user record.
    fn fill_profile(&self, name: &str, phone: &str);

    fn set_submit_enabled(&self, enabled: bool);

    fn set_selected_date(&self, date: &str);

    /// Dates that have any availability; all others are disabled.
    fn set_available_dates(&self, dates: &[String]);

    /// Replace the time selector's options. An empty slice clears it.
    fn set_time_options(&self, times: &[String]);

    fn show_records(&self, records: &[RecordLine]);

    /// Replace the records area with a single message.
    fn show_records_message(&self, text: &str);

    fn focus(&self, field: FormField);

    fn show_users(&self, users: &[UserCard]);

    /// Replace the user list with a single message.
    fn show_users_message(&self, text: &str);

    /// Modal notice.
    fn alert(&self, text: &str);

    /// Modal yes/no question; `true` means proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Everything a [`MemoryView`] has been told, in order where order matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryState {
    pub status: Option<String>,
    pub status_history: Vec<String>,
    pub welcome: Option<String>,
    pub profile: Option<(String, String)>,
    pub submit_enabled: Option<bool>,
    pub selected_date: Option<String>,
    pub available_dates: Vec<String>,
    pub time_options: Vec<String>,
    pub records: Vec<RecordLine>,
    pub records_message: Option<String>,
    pub focused: Option<FormField>,
    pub users: Vec<UserCard>,
    pub users_message: Option<String>,
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
}

/// A headless render context that keeps what was rendered.
///
/// Useful wherever the page must run without a screen; `confirm` answers
/// with a fixed value.
#[derive(Debug)]
pub struct MemoryView {
    state: Mutex<MemoryState>,
    confirm_answer: bool,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryView {
    /// A view that answers every confirmation with "yes".
    pub fn new() -> Self {
        Self::confirming(true)
    }

    pub fn confirming(answer: bool) -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            confirm_answer: answer,
        }
    }

    pub fn snapshot(&self) -> MemoryState {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RenderContext for MemoryView {
    fn set_status(&self, text: &str) {
        let mut state = self.state();
        state.status = Some(text.to_string());
        state.status_history.push(text.to_string());
    }

    fn set_welcome(&self, text: &str) {
        self.state().welcome = Some(text.to_string());
    }

    fn fill_profile(&self, name: &str, phone: &str) {
        self.state().profile = Some((name.to_string(), phone.to_string()));
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.state().submit_enabled = Some(enabled);
    }

    fn set_selected_date(&self, date: &str) {
        self.state().selected_date = Some(date.to_string());
    }

    fn set_available_dates(&self, dates: &[String]) {
        self.state().available_dates = dates.to_vec();
    }

    fn set_time_options(&self, times: &[String]) {
        self.state().time_options = times.to_vec();
    }

    fn show_records(&self, records: &[RecordLine]) {
        let mut state = self.state();
        state.records = records.to_vec();
        state.records_message = None;
    }

    fn show_records_message(&self, text: &str) {
        let mut state = self.state();
        state.records.clear();
        state.records_message = Some(text.to_string());
    }

    fn focus(&self, field: FormField) {
        self.state().focused = Some(field);
    }

    fn show_users(&self, users: &[UserCard]) {
        let mut state = self.state();
        state.users = users.to_vec();
        state.users_message = None;
    }

    fn show_users_message(&self, text: &str) {
        let mut state = self.state();
        state.users.clear();
        state.users_message = Some(text.to_string());
    }

    fn alert(&self, text: &str) {
        self.state().alerts.push(text.to_string());
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.state().confirmations.push(prompt.to_string());
        self.confirm_answer
    }
}
