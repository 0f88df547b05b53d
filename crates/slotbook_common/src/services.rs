// --- File: crates/slotbook_common/src/services.rs ---
//! Service abstraction for the external booking API.
//!
//! Controllers depend on this trait rather than on an HTTP client, so a page
//! can be driven against the real service, a stub server, or a mock.

use async_trait::async_trait;

use crate::error::BookingError;
use crate::models::{Booking, BookingRequest, NewUser, Record, User, UserQuery};

/// Operations offered by the booking service.
///
/// Every method is a single request: nothing is retried and nothing is
/// cached. Implementations map failures onto [`BookingError`] following the
/// shared response contract in [`crate::http`].
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// `GET /api/users`. A non-array answer is an error.
    async fn list_users(&self) -> Result<Vec<User>, BookingError>;

    /// `GET /api/users?telegram_id=&phone=`.
    async fn find_users(&self, query: &UserQuery) -> Result<Vec<User>, BookingError>;

    /// `GET /api/users/{id}`. An `error` marker in the body is an error.
    async fn get_user(&self, telegram_id: i64) -> Result<User, BookingError>;

    /// `POST /api/users`; succeeds only on HTTP 201.
    async fn create_user(&self, user: &NewUser) -> Result<(), BookingError>;

    /// `DELETE /api/users/{id}`; succeeds only on HTTP 200.
    async fn delete_user(&self, telegram_id: i64) -> Result<(), BookingError>;

    /// Bookings of one user, by query or by path depending on deployment.
    async fn list_bookings(&self, user_id: i64) -> Result<Vec<Booking>, BookingError>;

    /// `GET /api/slots?date=`; a missing list is an empty list.
    async fn list_slots(&self, date: &str) -> Result<Vec<String>, BookingError>;

    /// `GET /api/available-dates`.
    async fn available_dates(&self) -> Result<Vec<String>, BookingError>;

    /// Creates a booking; HTTP 201 or a `{success: true}` body is success.
    async fn create_booking(&self, request: &BookingRequest) -> Result<(), BookingError>;

    /// `DELETE /api/bookings/{id}`; succeeds only on HTTP 200.
    async fn delete_booking(&self, booking_id: i64) -> Result<(), BookingError>;

    /// `POST /api/generate-slots`; returns how many slots were generated.
    async fn generate_slots(&self) -> Result<u32, BookingError>;

    /// `GET /api/myrecord?name=`.
    async fn records_by_name(&self, name: &str) -> Result<Vec<Record>, BookingError>;
}
