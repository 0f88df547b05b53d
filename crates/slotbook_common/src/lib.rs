// --- File: crates/slotbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod models;    // Wire types shared with the booking service
pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod services;  // Booking API abstraction
pub mod logging;   // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    BookingError,
    FormField,
    CONNECTION_ERROR_TEXT,
    UNRESOLVED_USER_TEXT,
    HttpStatusCode,
    config_error,
    validation_error,
};

// Re-export HTTP utilities for easier access
pub use http::{
    read_json,
    expect_status,
    error_from_response,
    client::{
        HTTP_CLIENT,
        create_client,
    },
};

// Re-export logging utilities for easier access
pub use logging::{
    init,
    init_with_level,
    parse_level,
    log_error,
    log_result,
};

pub use services::BookingApi;
#[cfg(feature = "mock")]
pub use services::MockBookingApi;

// This crate provides what every slotbook crate shares: the wire models of the
// booking service, the error taxonomy, the API trait and HTTP/logging helpers.
