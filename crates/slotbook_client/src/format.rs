//! Text formatting for bookings, slots, users and Mini App links.

use chrono::{NaiveDate, Utc};
use slotbook_common::models::{Booking, Record, User};

use crate::messages::NO_USER_BOOKINGS;
use crate::view::{RecordLine, UserCard};

const SLOTS_PER_ROW: usize = 3;
const SLOT_CELL_WIDTH: usize = 8;

/// `"📅 2025-11-20 at 10:00"`
pub fn booking_line(date: &str, time: &str) -> String {
    format!("📅 {} at {}", date, time)
}

/// One line per booking, each carrying its delete action when the service
/// returned an id.
pub fn booking_lines(bookings: &[Booking]) -> Vec<RecordLine> {
    bookings
        .iter()
        .map(|b| RecordLine {
            text: booking_line(&b.date, &b.time),
            booking_id: b.id,
        })
        .collect()
}

/// Records from the name lookup have no identity, so no delete action.
pub fn record_lines(records: &[Record]) -> Vec<RecordLine> {
    records
        .iter()
        .map(|r| RecordLine {
            text: booking_line(&r.date, &r.time),
            booking_id: None,
        })
        .collect()
}

/// Alert-style summary of a user's bookings.
pub fn bookings_summary(bookings: &[Booking]) -> String {
    if bookings.is_empty() {
        return NO_USER_BOOKINGS.to_string();
    }
    bookings
        .iter()
        .map(|b| booking_line(&b.date, &b.time))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn user_card(user: &User) -> UserCard {
    UserCard {
        telegram_id: user.telegram_id,
        title: format!("{} ({})", user.name, user.phone.as_deref().unwrap_or("-")),
        details: format!(
            "ID: {} | Role: {}",
            user.telegram_id,
            user.role.as_deref().unwrap_or("-")
        ),
    }
}

/// Slots laid out three per row, each centred in an 8-column cell.
///
/// ```
/// use slotbook_client::format::format_slots_table;
///
/// let table = format_slots_table(&["10:00".to_string(), "11:00".to_string()]);
/// assert!(table.contains(" 10:00   |  11:00  "));
/// ```
pub fn format_slots_table(slots: &[String]) -> String {
    let mut table = String::from("🗓️ Available slots:\n\n");
    for row in slots.chunks(SLOTS_PER_ROW) {
        let cells: Vec<String> = row
            .iter()
            .map(|slot| format!("{:^width$}", slot, width = SLOT_CELL_WIDTH))
            .collect();
        table.push_str(&cells.join(" | "));
        table.push('\n');
    }
    table
}

/// Strict `YYYY-MM-DD` calendar date.
pub fn is_valid_date(date: &str) -> bool {
    let shape_ok = date.len() == 10
        && date.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    shape_ok && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Today's date (UTC) as `YYYY-MM-DD`, the page's default selection.
pub fn today_iso() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Builds the Mini App link the bot hands out: `base?name=...&user_id=...`.
pub fn mini_app_link(base: &str, name: &str, user_id: i64) -> String {
    let user_id = user_id.to_string();
    let query = serde_urlencoded::to_string([("name", name), ("user_id", user_id.as_str())])
        .unwrap_or_default();
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}
