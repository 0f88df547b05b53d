#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;
    use mockall::Sequence;
    use slotbook_common::models::{Booking, BookingRequest, Record, User, DEFAULT_PHONE, DEFAULT_ROLE};
    use slotbook_common::{BookingError, FormField, MockBookingApi, CONNECTION_ERROR_TEXT};
    use slotbook_config::BookingPayload;

    use crate::context::UserContext;
    use crate::logic::{BookingClient, BookingForm, EnsuredUser};
    use crate::messages;
    use crate::view::{MemoryView, RenderContext};

    fn client_with(
        api: MockBookingApi,
        context: UserContext,
        payload: BookingPayload,
    ) -> (BookingClient, Arc<MemoryView>) {
        let view = Arc::new(MemoryView::new());
        let render: Arc<dyn RenderContext> = view.clone();
        (BookingClient::new(Arc::new(api), render, context, payload), view)
    }

    fn anna() -> UserContext {
        UserContext::new("Anna", Some(42))
    }

    fn booking(id: i64, date: &str, time: &str) -> Booking {
        Booking {
            id: Some(id),
            user_id: Some(42),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_without_user_id_makes_no_call() {
        let mut api = MockBookingApi::new();
        api.expect_create_booking().never();

        let (client, view) = client_with(api, UserContext::new("Anna", None), BookingPayload::UserId);
        client.render_context();
        let result = client.submit(&BookingForm::new("2025-11-20", "10:00")).await;

        assert!(matches!(result, Err(BookingError::UnresolvedUser)));
        let state = view.snapshot();
        assert_eq!(state.status.as_deref(), Some(messages::UNRESOLVED_USER_TEXT));
        assert_eq!(state.submit_enabled, Some(false));
    }

    #[tokio::test]
    async fn test_empty_slots_show_no_slots_and_clear_selector() {
        let mut api = MockBookingApi::new();
        api.expect_list_slots()
            .withf(|date| date == "2025-11-20")
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        view.set_time_options(&["09:00".to_string()]);
        let slots = client.load_slots("2025-11-20").await.unwrap();

        assert!(slots.is_empty());
        let state = view.snapshot();
        assert_eq!(state.status.as_deref(), Some(messages::NO_SLOTS));
        assert!(state.time_options.is_empty());
    }

    #[tokio::test]
    async fn test_slots_fill_selector() {
        let mut api = MockBookingApi::new();
        api.expect_list_slots()
            .returning(|_| Ok(vec!["10:00".to_string(), "11:00".to_string()]));

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        client.load_slots("2025-11-20").await.unwrap();

        let state = view.snapshot();
        assert_eq!(state.time_options, vec!["10:00", "11:00"]);
        assert_eq!(
            state.status_history,
            vec![messages::LOADING_SLOTS, messages::SLOTS_LOADED]
        );
    }

    #[tokio::test]
    async fn test_successful_booking_refreshes_list_afterwards() {
        let mut api = MockBookingApi::new();
        let mut seq = Sequence::new();
        api.expect_create_booking()
            .withf(|request| {
                *request
                    == BookingRequest::ByUser {
                        user_id: 42,
                        date: "2025-11-20".to_string(),
                        time: "10:00".to_string(),
                    }
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        api.expect_list_bookings()
            .with(eq(42_i64))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![booking(7, "2025-11-20", "10:00")]));

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        client
            .submit(&BookingForm::new("2025-11-20", "10:00"))
            .await
            .unwrap();

        let state = view.snapshot();
        assert_eq!(state.status.as_deref(), Some(messages::BOOKED));
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.records[0].text, "📅 2025-11-20 at 10:00");
        assert_eq!(state.records[0].booking_id, Some(7));
    }

    #[tokio::test]
    async fn test_service_conflict_message_is_shown() {
        let mut api = MockBookingApi::new();
        api.expect_create_booking()
            .returning(|_| Err(BookingError::service(409, Some("conflict".to_string()))));
        api.expect_list_bookings().never();

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        let result = client.submit(&BookingForm::new("2025-11-20", "10:00")).await;

        assert!(result.is_err());
        let status = view.snapshot().status.unwrap_or_default();
        assert!(status.contains("conflict"), "status was {status:?}");
    }

    #[tokio::test]
    async fn test_service_error_without_message_uses_fallback() {
        let mut api = MockBookingApi::new();
        api.expect_create_booking()
            .returning(|_| Err(BookingError::service(500, None)));

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        let _ = client.submit(&BookingForm::new("2025-11-20", "10:00")).await;

        assert_eq!(
            view.snapshot().status.as_deref(),
            Some(messages::BOOKING_FAILED)
        );
    }

    #[tokio::test]
    async fn test_failed_lookup_creates_user_with_defaults() {
        let mut api = MockBookingApi::new();
        api.expect_get_user()
            .with(eq(42_i64))
            .times(1)
            .returning(|_| Err(BookingError::service(404, Some("not found".to_string()))));
        api.expect_create_user()
            .withf(|user| {
                user.telegram_id == 42
                    && user.name == "Anna"
                    && user.phone == DEFAULT_PHONE
                    && user.role == DEFAULT_ROLE
            })
            .times(1)
            .returning(|_| Ok(()));

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        let ensured = client.ensure_user().await.unwrap();

        match ensured {
            EnsuredUser::Created(user) => assert_eq!(user.phone, "00000000"),
            other => panic!("expected a created user, got {other:?}"),
        }
        let state = view.snapshot();
        assert_eq!(
            state.profile,
            Some(("Anna".to_string(), DEFAULT_PHONE.to_string()))
        );
        assert_eq!(state.status.as_deref(), Some(messages::PROFILE_CREATED));
    }

    #[tokio::test]
    async fn test_found_user_fills_profile() {
        let mut api = MockBookingApi::new();
        api.expect_get_user().returning(|id| {
            Ok(User {
                id: Some(1),
                telegram_id: id,
                name: "Anna Lee".to_string(),
                phone: Some("+37120000000".to_string()),
                role: Some("user".to_string()),
                created_at: None,
            })
        });
        api.expect_create_user().never();

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        let ensured = client.ensure_user().await.unwrap();

        assert!(matches!(ensured, EnsuredUser::Found(ref user) if user.telegram_id == 42));
        assert_eq!(
            view.snapshot().profile,
            Some(("Anna Lee".to_string(), "+37120000000".to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_shows_connection_error() {
        let mut api = MockBookingApi::new();
        api.expect_list_slots()
            .returning(|_| Err(BookingError::Transport("connection refused".to_string())));
        api.expect_create_booking()
            .returning(|_| Err(BookingError::Parse("expected value".to_string())));

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);

        assert!(client.load_slots("2025-11-20").await.is_err());
        assert_eq!(view.snapshot().status.as_deref(), Some(CONNECTION_ERROR_TEXT));

        assert!(client
            .submit(&BookingForm::new("2025-11-20", "10:00"))
            .await
            .is_err());
        assert_eq!(view.snapshot().status.as_deref(), Some(CONNECTION_ERROR_TEXT));
    }

    #[tokio::test]
    async fn test_missing_fields_focus_first_and_send_nothing() {
        let mut api = MockBookingApi::new();
        api.expect_create_booking().never();

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);

        let result = client.submit(&BookingForm::new("2025-11-20", " ")).await;
        assert!(matches!(result, Err(BookingError::Validation(ref f)) if f == &vec![FormField::Time]));
        assert_eq!(view.snapshot().focused, Some(FormField::Time));

        let result = client.submit(&BookingForm::new("", "")).await;
        assert!(
            matches!(result, Err(BookingError::Validation(ref f)) if f == &vec![FormField::Date, FormField::Time])
        );
        let state = view.snapshot();
        assert_eq!(state.focused, Some(FormField::Date));
        assert_eq!(state.status.as_deref(), Some("⚠️ Required fields: date, time"));
    }

    #[tokio::test]
    async fn test_non_calendar_date_is_invalid_not_missing() {
        let mut api = MockBookingApi::new();
        api.expect_create_booking().never();

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);

        let result = client.submit(&BookingForm::new("2025-02-30", "10:00")).await;
        assert!(matches!(result, Err(BookingError::InvalidDate(ref d)) if d == "2025-02-30"));
        let state = view.snapshot();
        assert_eq!(state.focused, Some(FormField::Date));
        assert_eq!(
            state.status.as_deref(),
            Some("⚠️ Invalid date: 2025-02-30 (expected YYYY-MM-DD)")
        );

        let result = client.submit(&BookingForm::new("20-11-2025", "")).await;
        assert!(matches!(result, Err(BookingError::Validation(ref f)) if f == &vec![FormField::Time]));
    }

    #[tokio::test]
    async fn test_contact_payload_uses_context_name() {
        let mut api = MockBookingApi::new();
        api.expect_create_booking()
            .withf(|request| {
                matches!(request, BookingRequest::ByContact { name, phone, .. }
                    if name == "Ivo" && phone == "+371")
            })
            .times(1)
            .returning(|_| Ok(()));
        api.expect_records_by_name()
            .withf(|name| name == "Ivo")
            .times(1)
            .returning(|_| {
                Ok(vec![Record {
                    date: "2025-11-21".to_string(),
                    time: "12:00".to_string(),
                }])
            });

        let (client, view) = client_with(api, UserContext::new("Ivo", None), BookingPayload::Contact);
        assert!(client.can_submit());
        client
            .submit(&BookingForm::new("2025-11-21", "12:00").with_contact("", "+371"))
            .await
            .unwrap();

        let state = view.snapshot();
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.records[0].booking_id, None);
    }

    #[tokio::test]
    async fn test_contact_payload_requires_name() {
        let mut api = MockBookingApi::new();
        api.expect_create_booking().never();

        let (client, view) = client_with(api, UserContext::default(), BookingPayload::Contact);
        let result = client.submit(&BookingForm::new("2025-11-21", "12:00")).await;

        assert!(matches!(result, Err(BookingError::Validation(ref f)) if f == &vec![FormField::Name]));
        assert_eq!(view.snapshot().focused, Some(FormField::Name));
    }

    #[tokio::test]
    async fn test_load_runs_every_step() {
        let mut api = MockBookingApi::new();
        api.expect_get_user().returning(|id| {
            Ok(User {
                id: None,
                telegram_id: id,
                name: "Anna".to_string(),
                phone: None,
                role: None,
                created_at: None,
            })
        });
        api.expect_available_dates()
            .times(1)
            .returning(|| Ok(vec!["2025-11-20".to_string()]));
        api.expect_list_slots()
            .withf(|date| date == "2025-11-20")
            .times(1)
            .returning(|_| Ok(vec!["10:00".to_string()]));
        api.expect_list_bookings()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        client.load("2025-11-20").await;

        let state = view.snapshot();
        assert_eq!(state.welcome.as_deref(), Some("👋 Hello, Anna!"));
        assert_eq!(state.submit_enabled, Some(true));
        assert_eq!(state.selected_date.as_deref(), Some("2025-11-20"));
        assert_eq!(state.available_dates, vec!["2025-11-20"]);
        assert_eq!(state.time_options, vec!["10:00"]);
        assert_eq!(state.records_message.as_deref(), Some(messages::NO_BOOKINGS));
    }

    #[tokio::test]
    async fn test_unresolved_load_skips_user_calls() {
        let mut api = MockBookingApi::new();
        api.expect_get_user().never();
        api.expect_create_user().never();
        api.expect_list_bookings().never();
        api.expect_records_by_name().never();
        api.expect_available_dates().returning(|| Ok(Vec::new()));
        api.expect_list_slots().returning(|_| Ok(Vec::new()));

        let (client, view) = client_with(api, UserContext::default(), BookingPayload::UserId);
        client.load("2025-11-20").await;

        let state = view.snapshot();
        assert_eq!(state.welcome.as_deref(), Some("👋 Hello, Guest!"));
        assert_eq!(state.submit_enabled, Some(false));
        assert_eq!(state.status.as_deref(), Some(messages::UNRESOLVED_USER_TEXT));
        assert!(state
            .status_history
            .contains(&messages::NO_SLOTS.to_string()));
    }

    #[tokio::test]
    async fn test_profile_failure_outlasts_slot_status() {
        let mut api = MockBookingApi::new();
        api.expect_get_user()
            .returning(|_| Err(BookingError::service(404, None)));
        api.expect_create_user()
            .times(1)
            .returning(|_| Err(BookingError::service(500, Some("db down".to_string()))));
        api.expect_available_dates()
            .returning(|| Ok(vec!["2025-11-20".to_string()]));
        api.expect_list_slots()
            .returning(|_| Ok(vec!["10:00".to_string()]));
        api.expect_list_bookings().returning(|_| Ok(Vec::new()));

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        client.load("2025-11-20").await;

        let state = view.snapshot();
        assert_eq!(state.time_options, vec!["10:00"]);
        assert!(state
            .status_history
            .contains(&messages::SLOTS_LOADED.to_string()));
        assert_eq!(state.status.as_deref(), Some("⚠️ db down"));
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_refresh() {
        let mut api = MockBookingApi::new();
        api.expect_delete_booking()
            .with(eq(7_i64))
            .returning(|_| Err(BookingError::service(404, None)));
        api.expect_list_bookings().never();

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        assert!(client.delete_booking(7).await.is_err());
        assert_eq!(
            view.snapshot().status.as_deref(),
            Some(messages::BOOKING_DELETE_FAILED)
        );
    }

    #[tokio::test]
    async fn test_delete_refreshes_list() {
        let mut api = MockBookingApi::new();
        let mut seq = Sequence::new();
        api.expect_delete_booking()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        api.expect_list_bookings()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Vec::new()));

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        client.delete_booking(7).await.unwrap();

        let state = view.snapshot();
        assert!(state
            .status_history
            .contains(&messages::BOOKING_DELETED.to_string()));
        assert_eq!(state.records_message.as_deref(), Some(messages::NO_BOOKINGS));
    }

    #[tokio::test]
    async fn test_bookings_failure_replaces_records() {
        let mut api = MockBookingApi::new();
        api.expect_list_bookings()
            .returning(|_| Err(BookingError::service(500, Some("db down".to_string()))));

        let (client, view) = client_with(api, anna(), BookingPayload::UserId);
        assert!(client.load_bookings(42).await.is_err());
        assert_eq!(
            view.snapshot().records_message.as_deref(),
            Some("⚠️ db down")
        );
    }
}
