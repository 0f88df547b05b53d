// --- File: crates/slotbook_client/src/admin.rs ---
//! Admin variant of the page: user management and slot generation.

use std::sync::Arc;

use slotbook_common::models::{Booking, User, UserQuery};
use slotbook_common::{log_error, BookingApi, BookingError};
use tracing::info;

use crate::format::{bookings_summary, user_card};
use crate::messages;
use crate::view::{RenderContext, UserCard};

pub struct AdminPanel {
    api: Arc<dyn BookingApi>,
    view: Arc<dyn RenderContext>,
}

impl AdminPanel {
    pub fn new(api: Arc<dyn BookingApi>, view: Arc<dyn RenderContext>) -> Self {
        Self { api, view }
    }

    pub async fn load_users(&self) -> Result<Vec<User>, BookingError> {
        let result = self.api.list_users().await;
        self.render_users(result, "Failed to load users")
    }

    /// Filtered user list. An empty query lists everyone.
    pub async fn find_users(&self, query: &UserQuery) -> Result<Vec<User>, BookingError> {
        if query.is_empty() {
            return self.load_users().await;
        }
        let result = self.api.find_users(query).await;
        self.render_users(result, "Failed to find users")
    }

    fn render_users(
        &self,
        result: Result<Vec<User>, BookingError>,
        context: &str,
    ) -> Result<Vec<User>, BookingError> {
        match result {
            Ok(users) if users.is_empty() => {
                self.view.show_users_message(messages::NO_USERS);
                Ok(users)
            }
            Ok(users) => {
                let cards: Vec<UserCard> = users.iter().map(user_card).collect();
                self.view.show_users(&cards);
                Ok(users)
            }
            Err(e) => {
                log_error(&e, context);
                self.view
                    .show_users_message(&e.display_text(messages::USERS_FAILED));
                Err(e)
            }
        }
    }

    /// Shows the user's bookings as a single alert.
    pub async fn view_bookings(&self, telegram_id: i64) -> Result<Vec<Booking>, BookingError> {
        match self.api.list_bookings(telegram_id).await {
            Ok(bookings) => {
                self.view.alert(&bookings_summary(&bookings));
                Ok(bookings)
            }
            Err(e) => {
                log_error(&e, "Failed to load user bookings");
                self.view.alert(&e.display_text(messages::BOOKINGS_FAILED));
                Err(e)
            }
        }
    }

    /// Asks first; returns `Ok(false)` when the admin declined.
    pub async fn delete_user(&self, telegram_id: i64) -> Result<bool, BookingError> {
        if !self.view.confirm(messages::CONFIRM_DELETE_USER) {
            info!(telegram_id, "User deletion declined");
            return Ok(false);
        }

        match self.api.delete_user(telegram_id).await {
            Ok(()) => {
                info!(telegram_id, "User deleted");
                self.view.alert(messages::USER_DELETED);
                let _ = self.load_users().await;
                Ok(true)
            }
            Err(e) => {
                log_error(&e, "Failed to delete user");
                self.view.alert(&e.display_text(messages::USER_DELETE_FAILED));
                Err(e)
            }
        }
    }

    pub async fn generate_slots(&self) -> Result<u32, BookingError> {
        match self.api.generate_slots().await {
            Ok(count) => {
                info!(count, "Slots generated");
                self.view.set_status(&messages::slots_generated(count));
                Ok(count)
            }
            Err(e) => {
                log_error(&e, "Failed to generate slots");
                self.view.set_status(&e.display_text(messages::GENERATE_FAILED));
                Err(e)
            }
        }
    }
}
