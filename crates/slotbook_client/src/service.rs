//! HTTP implementation of the booking API.
//!
//! This module provides an implementation of the `BookingApi` trait that
//! talks JSON over HTTP to the booking worker.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use slotbook_common::http::error_field;
use slotbook_common::models::{
    AvailableDatesResponse, Booking, BookingRequest, GenerateSlotsResponse, NewUser, Record,
    RecordsResponse, SlotsResponse, StatusBody, User, UserQuery,
};
use slotbook_common::{
    config_error, create_client, error_from_response, expect_status, read_json, BookingApi,
    BookingError, HTTP_CLIENT,
};
use slotbook_config::{AppConfig, BookingLookup};
use tracing::{debug, error, info};

/// Booking service client over HTTP.
#[derive(Clone)]
pub struct HttpBookingApi {
    client: Client,
    base_url: String,
    lookup: BookingLookup,
}

impl HttpBookingApi {
    /// Create a client for `base_url` (without the `/api` suffix).
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            lookup: BookingLookup::default(),
        }
    }

    /// Create a client from the application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, BookingError> {
        let client = match config.api.request_timeout_secs {
            Some(secs) => create_client(Some(secs))
                .map_err(|e| config_error(format!("failed to build HTTP client: {}", e)))?,
            None => HTTP_CLIENT.clone(),
        };
        Ok(Self::new(client, config.api.normalized_base_url()).with_lookup(config.booking.lookup))
    }

    /// Select the route used to list a user's bookings.
    pub fn with_lookup(mut self, lookup: BookingLookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn url_with_query<Q: Serialize>(&self, path: &str, query: &Q) -> Result<String, BookingError> {
        let encoded = serde_urlencoded::to_string(query)
            .map_err(|e| BookingError::Parse(format!("failed to encode query: {}", e)))?;
        if encoded.is_empty() {
            Ok(self.url(path))
        } else {
            Ok(format!("{}?{}", self.url(path), encoded))
        }
    }

    /// Sends a request; every transport failure is logged here once.
    async fn send(&self, request: RequestBuilder) -> Result<Response, BookingError> {
        match request.send().await {
            Ok(response) => {
                debug!(status = response.status().as_u16(), url = %response.url(), "Booking service responded");
                Ok(response)
            }
            Err(e) => {
                error!("Booking service request failed: {}", e);
                Err(e.into())
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, BookingError> {
        debug!("GET {}", url);
        let response = self.send(self.client.get(&url)).await?;
        read_json(response).await
    }

    /// GET a JSON array; any other JSON shape is a service error.
    async fn get_list<T: DeserializeOwned>(&self, url: String) -> Result<Vec<T>, BookingError> {
        debug!("GET {}", url);
        let response = self.send(self.client.get(&url)).await?;
        let status = response.status().as_u16();
        let value: Value = read_json(response).await?;
        match value {
            Value::Array(_) => Ok(serde_json::from_value(value)?),
            other => Err(BookingError::service(status, error_field(&other))),
        }
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn list_users(&self) -> Result<Vec<User>, BookingError> {
        self.get_list(self.url("users")).await
    }

    async fn find_users(&self, query: &UserQuery) -> Result<Vec<User>, BookingError> {
        let url = self.url_with_query("users", query)?;
        self.get_list(url).await
    }

    async fn get_user(&self, telegram_id: i64) -> Result<User, BookingError> {
        self.get_json(self.url(&format!("users/{}", telegram_id))).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), BookingError> {
        let url = self.url("users");
        debug!("POST {}", url);
        let response = self.send(self.client.post(&url).json(user)).await?;
        expect_status(response, StatusCode::CREATED).await?;
        info!(telegram_id = user.telegram_id, "User created");
        Ok(())
    }

    async fn delete_user(&self, telegram_id: i64) -> Result<(), BookingError> {
        let url = self.url(&format!("users/{}", telegram_id));
        debug!("DELETE {}", url);
        let response = self.send(self.client.delete(&url)).await?;
        expect_status(response, StatusCode::OK).await?;
        info!(telegram_id, "User deleted");
        Ok(())
    }

    async fn list_bookings(&self, user_id: i64) -> Result<Vec<Booking>, BookingError> {
        let url = match self.lookup {
            BookingLookup::Query => self.url_with_query("bookings", &[("user_id", user_id)])?,
            BookingLookup::Path => self.url(&format!("bookings/by-user/{}", user_id)),
        };
        self.get_list(url).await
    }

    async fn list_slots(&self, date: &str) -> Result<Vec<String>, BookingError> {
        let url = self.url_with_query("slots", &[("date", date)])?;
        let slots: SlotsResponse = self.get_json(url).await?;
        Ok(slots.available)
    }

    async fn available_dates(&self) -> Result<Vec<String>, BookingError> {
        let dates: AvailableDatesResponse = self.get_json(self.url("available-dates")).await?;
        Ok(dates.dates)
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<(), BookingError> {
        let path = match request {
            BookingRequest::ByUser { .. } => "bookings",
            BookingRequest::ByContact { .. } => "book",
        };
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self.send(self.client.post(&url).json(request)).await?;
        let status = response.status();
        if status == StatusCode::CREATED {
            info!(date = request.date(), time = request.time(), "Booking created");
            return Ok(());
        }
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }
        // 2xx without 201: only an explicit `{success: true}` counts
        let body: StatusBody = read_json(response).await?;
        if body.success == Some(true) {
            info!(date = request.date(), time = request.time(), "Booking created");
            Ok(())
        } else {
            Err(BookingError::service(status.as_u16(), body.error))
        }
    }

    async fn delete_booking(&self, booking_id: i64) -> Result<(), BookingError> {
        let url = self.url(&format!("bookings/{}", booking_id));
        debug!("DELETE {}", url);
        let response = self.send(self.client.delete(&url)).await?;
        expect_status(response, StatusCode::OK).await?;
        info!(booking_id, "Booking deleted");
        Ok(())
    }

    async fn generate_slots(&self) -> Result<u32, BookingError> {
        let url = self.url("generate-slots");
        debug!("POST {}", url);
        let response = self.send(self.client.post(&url)).await?;
        let status = response.status().as_u16();
        let body: GenerateSlotsResponse = read_json(response).await?;
        if body.ok {
            info!(generated = body.generated, "Slots generated");
            Ok(body.generated)
        } else {
            Err(BookingError::service(status, body.error))
        }
    }

    async fn records_by_name(&self, name: &str) -> Result<Vec<Record>, BookingError> {
        let url = self.url_with_query("myrecord", &[("name", name)])?;
        let records: RecordsResponse = self.get_json(url).await?;
        Ok(records.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_built_under_api_prefix() {
        let api = HttpBookingApi::new(Client::new(), "https://worker.example.dev/");
        assert_eq!(api.base_url(), "https://worker.example.dev");
        assert_eq!(api.url("users/5"), "https://worker.example.dev/api/users/5");
        assert_eq!(
            api.url_with_query("myrecord", &[("name", "Anna Lee")]).unwrap(),
            "https://worker.example.dev/api/myrecord?name=Anna+Lee"
        );
        assert_eq!(
            api.url_with_query("users", &UserQuery::default()).unwrap(),
            "https://worker.example.dev/api/users"
        );
    }

    #[test]
    fn test_from_config_uses_lookup_and_base() {
        let mut config = AppConfig::for_base_url("https://worker.example.dev//");
        config.booking.lookup = BookingLookup::Path;
        let api = HttpBookingApi::from_config(&config).unwrap();
        assert_eq!(api.base_url(), "https://worker.example.dev");
        assert_eq!(api.lookup, BookingLookup::Path);
    }
}
