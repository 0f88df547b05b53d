// --- File: crates/slotbook_client/src/lib.rs ---
// Declare modules within this crate
pub mod admin;
pub mod context;
pub mod format;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod messages;
pub mod service;
pub mod view;

pub use admin::AdminPanel;
pub use context::{HostUser, UserContext};
pub use logic::{BookingClient, BookingForm, EnsuredUser};
pub use service::HttpBookingApi;
pub use view::{MemoryView, RecordLine, RenderContext, UserCard};
