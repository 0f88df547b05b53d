// File: services/slotbook_cli/src/terminal.rs
use inquire::Confirm;
use slotbook_client::format::format_slots_table;
use slotbook_client::{RecordLine, RenderContext, UserCard};
use slotbook_common::FormField;
use tracing::{debug, warn};

/// Renders the booking page as lines on stdout.
#[derive(Debug, Default)]
pub struct TerminalView {
    assume_yes: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every confirmation with "yes" without prompting.
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }
}

impl RenderContext for TerminalView {
    fn set_status(&self, text: &str) {
        println!("{}", text);
    }

    fn set_welcome(&self, text: &str) {
        println!("{}", text);
    }

    fn fill_profile(&self, name: &str, phone: &str) {
        println!("👤 {} ({})", name, if phone.is_empty() { "-" } else { phone });
    }

    fn set_submit_enabled(&self, enabled: bool) {
        debug!(enabled, "Submit toggled");
    }

    fn set_selected_date(&self, date: &str) {
        println!("📆 {}", date);
    }

    fn set_available_dates(&self, dates: &[String]) {
        if dates.is_empty() {
            println!("📆 No dates with free slots");
        } else {
            println!("📆 Dates with free slots: {}", dates.join(", "));
        }
    }

    fn set_time_options(&self, times: &[String]) {
        // the selector is cleared before every load; nothing to print then
        if !times.is_empty() {
            print!("{}", format_slots_table(times));
        }
    }

    fn show_records(&self, records: &[RecordLine]) {
        for record in records {
            match record.booking_id {
                Some(id) => println!("{}  [#{}]", record.text, id),
                None => println!("{}", record.text),
            }
        }
    }

    fn show_records_message(&self, text: &str) {
        println!("{}", text);
    }

    fn focus(&self, field: FormField) {
        println!("➡️ Please fill in: {}", field.label());
    }

    fn show_users(&self, users: &[UserCard]) {
        for user in users {
            println!("{}\n    {}", user.title, user.details);
        }
    }

    fn show_users_message(&self, text: &str) {
        println!("{}", text);
    }

    fn alert(&self, text: &str) {
        println!("{}", text);
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match Confirm::new(prompt).with_default(false).prompt() {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Confirmation prompt failed: {}", e);
                false
            }
        }
    }
}
