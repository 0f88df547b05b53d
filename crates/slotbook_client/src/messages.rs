// Status texts shown by the booking page and the admin panel.

pub use slotbook_common::{CONNECTION_ERROR_TEXT, UNRESOLVED_USER_TEXT};

pub const GUEST_NAME: &str = "Guest";

// --- Page ---
pub const LOADING_SLOTS: &str = "⏳ Loading slots...";
pub const SLOTS_LOADED: &str = "✅ Slots loaded";
pub const NO_SLOTS: &str = "⚠️ No slots available";
pub const SLOTS_FAILED: &str = "❌ Failed to load slots";
pub const DATES_FAILED: &str = "❌ Failed to load available dates";
pub const BOOKED: &str = "✅ You are booked!";
pub const BOOKING_FAILED: &str = "⚠️ Booking failed";
pub const NO_BOOKINGS: &str = "ℹ️ You have no bookings";
pub const BOOKINGS_FAILED: &str = "⚠️ Failed to load bookings";
pub const RECORDS_FAILED: &str = "❌ Failed to load records";
pub const BOOKING_DELETED: &str = "🗑️ Booking deleted";
pub const BOOKING_DELETE_FAILED: &str = "⚠️ Failed to delete booking";
pub const PROFILE_LOADED: &str = "✅ Profile loaded";
pub const PROFILE_CREATED: &str = "✅ Profile created";
pub const PROFILE_CREATE_FAILED: &str = "⚠️ Could not create profile";

// --- Admin ---
pub const USERS_FAILED: &str = "⚠️ Failed to load users";
pub const NO_USERS: &str = "ℹ️ No users";
pub const NO_USER_BOOKINGS: &str = "ℹ️ No bookings";
pub const CONFIRM_DELETE_USER: &str = "Delete user?";
pub const USER_DELETED: &str = "🗑️ Deleted";
pub const USER_DELETE_FAILED: &str = "⚠️ Failed to delete user";
pub const GENERATE_FAILED: &str = "⚠️ Failed to generate slots";

pub fn slots_generated(count: u32) -> String {
    format!("✅ Generated {} slots", count)
}

pub fn welcome(display_name: &str) -> String {
    format!("👋 Hello, {}!", display_name)
}
