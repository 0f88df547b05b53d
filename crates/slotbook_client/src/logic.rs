// --- File: crates/slotbook_client/src/logic.rs ---
//! The booking page controller.
//!
//! [`BookingClient`] owns one page load: the resolved [`UserContext`], the
//! API it calls and the view it renders into. Each operation renders its own
//! outcome (status line, selector, records) and also returns it, so callers
//! can chain operations or report an exit status.

use std::sync::Arc;

use slotbook_common::models::{Booking, BookingRequest, NewUser, Record, User, DEFAULT_PHONE};
use slotbook_common::{log_error, validation_error, BookingApi, BookingError, FormField};
use slotbook_config::{AppConfig, BookingPayload};
use tracing::{info, warn};

use crate::context::UserContext;
use crate::format::{booking_lines, is_valid_date, record_lines};
use crate::messages;
use crate::view::RenderContext;

/// Values of the booking form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub date: String,
    pub time: String,
    /// Contact name; empty means "use the page context's name"
    pub name: String,
    pub phone: String,
}

impl BookingForm {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            ..Self::default()
        }
    }

    pub fn with_contact(mut self, name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.name = name.into();
        self.phone = phone.into();
        self
    }
}

/// How [`BookingClient::ensure_user`] resolved the user record.
#[derive(Debug, Clone, PartialEq)]
pub enum EnsuredUser {
    Found(User),
    Created(NewUser),
}

pub struct BookingClient {
    api: Arc<dyn BookingApi>,
    view: Arc<dyn RenderContext>,
    context: UserContext,
    payload: BookingPayload,
}

impl BookingClient {
    pub fn new(
        api: Arc<dyn BookingApi>,
        view: Arc<dyn RenderContext>,
        context: UserContext,
        payload: BookingPayload,
    ) -> Self {
        Self {
            api,
            view,
            context,
            payload,
        }
    }

    pub fn from_config(
        api: Arc<dyn BookingApi>,
        view: Arc<dyn RenderContext>,
        context: UserContext,
        config: &AppConfig,
    ) -> Self {
        Self::new(api, view, context, config.booking.payload)
    }

    pub fn context(&self) -> &UserContext {
        &self.context
    }

    /// Whether the submit action is available for this context.
    pub fn can_submit(&self) -> bool {
        match self.payload {
            BookingPayload::UserId => self.context.is_resolved(),
            BookingPayload::Contact => true,
        }
    }

    /// Greets the user and toggles the submit action.
    pub fn render_context(&self) {
        self.view
            .set_welcome(&messages::welcome(self.context.display_name()));
        let can_submit = self.can_submit();
        self.view.set_submit_enabled(can_submit);
        if !can_submit {
            self.view.set_status(messages::UNRESOLVED_USER_TEXT);
        }
    }

    /// Full page load: context, profile, dates, today's slots, then the
    /// user's bookings (or records by name when no id is known).
    ///
    /// The slot load reports progress on the status line; an unresolved
    /// context or a failed profile creation is shown again once it is done.
    pub async fn load(&self, today: &str) {
        info!(user_id = ?self.context.user_id(), "Loading booking page");
        self.render_context();
        self.view.set_selected_date(today);

        let mut pending_status = None;
        if !self.can_submit() {
            pending_status = Some(messages::UNRESOLVED_USER_TEXT.to_string());
        } else if self.context.is_resolved() {
            if let Err(e) = self.ensure_user().await {
                pending_status = Some(e.display_text(messages::PROFILE_CREATE_FAILED));
            }
        }
        let _ = self.load_dates().await;
        let _ = self.load_slots(today).await;
        if let Some(status) = pending_status {
            self.view.set_status(&status);
        }
        self.refresh_bookings().await;
    }

    /// Looks the user up and creates the record when the lookup fails.
    pub async fn ensure_user(&self) -> Result<EnsuredUser, BookingError> {
        let Some(user_id) = self.context.user_id() else {
            self.view.set_status(messages::UNRESOLVED_USER_TEXT);
            return Err(BookingError::UnresolvedUser);
        };

        match self.api.get_user(user_id).await {
            Ok(user) => {
                self.view
                    .fill_profile(&user.name, user.phone.as_deref().unwrap_or(""));
                self.view.set_status(messages::PROFILE_LOADED);
                return Ok(EnsuredUser::Found(user));
            }
            Err(e) => warn!(user_id, "User lookup failed, creating user: {}", e),
        }

        let new_user = NewUser::with_defaults(user_id, self.context.display_name());
        match self.api.create_user(&new_user).await {
            Ok(()) => {
                self.view.fill_profile(&new_user.name, DEFAULT_PHONE);
                self.view.set_status(messages::PROFILE_CREATED);
                Ok(EnsuredUser::Created(new_user))
            }
            Err(e) => {
                log_error(&e, "Failed to create user");
                self.view
                    .set_status(&e.display_text(messages::PROFILE_CREATE_FAILED));
                Err(e)
            }
        }
    }

    /// Fetches the dates that have any availability.
    pub async fn load_dates(&self) -> Result<Vec<String>, BookingError> {
        match self.api.available_dates().await {
            Ok(dates) => {
                self.view.set_available_dates(&dates);
                Ok(dates)
            }
            Err(e) => {
                log_error(&e, "Failed to load available dates");
                self.view.set_status(&e.display_text(messages::DATES_FAILED));
                Err(e)
            }
        }
    }

    /// Fills the time selector for `date`.
    pub async fn load_slots(&self, date: &str) -> Result<Vec<String>, BookingError> {
        self.view.set_time_options(&[]);
        self.view.set_status(messages::LOADING_SLOTS);

        match self.api.list_slots(date).await {
            Ok(slots) if slots.is_empty() => {
                self.view.set_status(messages::NO_SLOTS);
                Ok(slots)
            }
            Ok(slots) => {
                self.view.set_time_options(&slots);
                self.view.set_status(messages::SLOTS_LOADED);
                Ok(slots)
            }
            Err(e) => {
                log_error(&e, "Failed to load slots");
                self.view.set_status(&e.display_text(messages::SLOTS_FAILED));
                Err(e)
            }
        }
    }

    /// Validates the form and sends the booking.
    ///
    /// Nothing is sent when validation fails. On success the records area is
    /// refreshed.
    pub async fn submit(&self, form: &BookingForm) -> Result<(), BookingError> {
        let request = match self.build_request(form) {
            Ok(request) => request,
            Err(e) => {
                match &e {
                    BookingError::Validation(fields) => {
                        if let Some(first) = fields.first() {
                            self.view.focus(*first);
                        }
                    }
                    BookingError::InvalidDate(_) => self.view.focus(FormField::Date),
                    _ => {}
                }
                self.view.set_status(&e.display_text(messages::BOOKING_FAILED));
                return Err(e);
            }
        };

        match self.api.create_booking(&request).await {
            Ok(()) => {
                self.view.set_status(messages::BOOKED);
                self.refresh_bookings().await;
                Ok(())
            }
            Err(e) => {
                log_error(&e, "Failed to create booking");
                self.view.set_status(&e.display_text(messages::BOOKING_FAILED));
                Err(e)
            }
        }
    }

    fn build_request(&self, form: &BookingForm) -> Result<BookingRequest, BookingError> {
        let date = form.date.trim();
        let time = form.time.trim();

        let mut missing = Vec::new();
        if date.is_empty() {
            missing.push(FormField::Date);
        }
        if time.is_empty() {
            missing.push(FormField::Time);
        }

        match self.payload {
            BookingPayload::UserId => {
                let user_id = self.context.user_id().ok_or(BookingError::UnresolvedUser)?;
                check_fields(missing, date)?;
                Ok(BookingRequest::ByUser {
                    user_id,
                    date: date.to_string(),
                    time: time.to_string(),
                })
            }
            BookingPayload::Contact => {
                let name = match form.name.trim() {
                    "" => self.context.name(),
                    name => name,
                };
                if name.is_empty() {
                    missing.push(FormField::Name);
                }
                check_fields(missing, date)?;
                Ok(BookingRequest::ByContact {
                    name: name.to_string(),
                    phone: form.phone.trim().to_string(),
                    date: date.to_string(),
                    time: time.to_string(),
                })
            }
        }
    }

    /// Re-renders the records area for whoever this page belongs to.
    pub async fn refresh_bookings(&self) {
        if let Some(user_id) = self.context.user_id() {
            let _ = self.load_bookings(user_id).await;
        } else if !self.context.name().is_empty() {
            let _ = self.load_records(self.context.name()).await;
        }
    }

    pub async fn load_bookings(&self, user_id: i64) -> Result<Vec<Booking>, BookingError> {
        match self.api.list_bookings(user_id).await {
            Ok(bookings) if bookings.is_empty() => {
                self.view.show_records_message(messages::NO_BOOKINGS);
                Ok(bookings)
            }
            Ok(bookings) => {
                self.view.show_records(&booking_lines(&bookings));
                Ok(bookings)
            }
            Err(e) => {
                log_error(&e, "Failed to load bookings");
                self.view
                    .show_records_message(&e.display_text(messages::BOOKINGS_FAILED));
                Err(e)
            }
        }
    }

    /// Unauthenticated lookup by name.
    pub async fn load_records(&self, name: &str) -> Result<Vec<Record>, BookingError> {
        match self.api.records_by_name(name).await {
            Ok(records) if records.is_empty() => {
                self.view.show_records_message(messages::NO_BOOKINGS);
                Ok(records)
            }
            Ok(records) => {
                self.view.show_records(&record_lines(&records));
                Ok(records)
            }
            Err(e) => {
                log_error(&e, "Failed to load records");
                self.view
                    .show_records_message(&e.display_text(messages::RECORDS_FAILED));
                Err(e)
            }
        }
    }

    /// Deletes a booking; the list is refreshed only after the service
    /// confirmed the deletion.
    pub async fn delete_booking(&self, booking_id: i64) -> Result<(), BookingError> {
        match self.api.delete_booking(booking_id).await {
            Ok(()) => {
                self.view.set_status(messages::BOOKING_DELETED);
                self.refresh_bookings().await;
                Ok(())
            }
            Err(e) => {
                log_error(&e, "Failed to delete booking");
                self.view
                    .set_status(&e.display_text(messages::BOOKING_DELETE_FAILED));
                Err(e)
            }
        }
    }
}

/// Missing fields are reported before a malformed date.
fn check_fields(missing: Vec<FormField>, date: &str) -> Result<(), BookingError> {
    if !missing.is_empty() {
        return Err(validation_error(missing));
    }
    if !is_valid_date(date) {
        return Err(BookingError::InvalidDate(date.to_string()));
    }
    Ok(())
}
