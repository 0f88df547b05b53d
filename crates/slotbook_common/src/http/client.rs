// --- File: crates/slotbook_common/src/http/client.rs ---
use once_cell::sync::Lazy;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// A shared HTTP client that can be reused across the application.
///
/// It carries no request timeout of its own: a pending request waits as long
/// as the transport allows.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - Optional whole-request timeout in seconds
///
/// # Returns
///
/// A new reqwest::Client instance with the specified configuration
pub fn create_client(timeout_secs: Option<u64>) -> Result<Client, ReqwestError> {
    let builder = Client::builder();
    let builder = match timeout_secs {
        Some(secs) => builder.timeout(Duration::from_secs(secs)),
        None => builder,
    };
    builder.build()
}
