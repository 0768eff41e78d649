// libs/booking-cell/tests/supabase_store_test.rs
//
// The PostgREST gateway against a mocked Supabase server.
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::models::{AppointmentDraft, DentalService};
use booking_cell::services::store::{BookingStore, SupabaseBookingStore};
use shared_config::AppConfig;

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        supabase_url: server.uri(),
        supabase_anon_key: "test-anon-key".to_string(),
        supabase_jwt_secret: "test-secret".to_string(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn free_slots_subtracts_booked_times() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("date", "eq.2025-06-10"))
        .and(query_param("status", "neq.cancelled"))
        .and(query_param("select", "time_slot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "time_slot": "10:00" },
            { "time_slot": "14:00" }
        ])))
        .mount(&server)
        .await;

    let store = SupabaseBookingStore::new(&test_config(&server));
    let candidates: Vec<String> = vec!["09:00".into(), "10:00".into(), "14:00".into()];

    let free = store.free_slots(date(2025, 6, 10), &candidates).await.unwrap();
    assert_eq!(free, vec!["09:00".to_string()]);
}

#[tokio::test]
async fn is_slot_free_checks_the_exact_slot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("date", "eq.2025-06-10"))
        .and(query_param("time_slot", "eq.10:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "x" }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("time_slot", "eq.09:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = SupabaseBookingStore::new(&test_config(&server));

    assert!(!store.is_slot_free(date(2025, 6, 10), "10:00").await.unwrap());
    assert!(store.is_slot_free(date(2025, 6, 10), "09:00").await.unwrap());
}

#[tokio::test]
async fn create_posts_the_masked_draft_and_parses_the_representation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .and(body_partial_json(json!({
            "name": "Maria Silva",
            "phone": "(69) 99602-1979",
            "service": "cleaning",
            "date": "2025-06-10",
            "time_slot": "09:00",
            "status": "pending"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Maria Silva",
            "phone": "(69) 99602-1979",
            "service": "cleaning",
            "date": "2025-06-10",
            "time_slot": "09:00",
            "message": null,
            "status": "pending",
            "created_at": "2025-06-02T12:00:00Z"
        }])))
        .mount(&server)
        .await;

    let store = SupabaseBookingStore::new(&test_config(&server));
    let draft = AppointmentDraft {
        name: " Maria Silva ".to_string(),
        phone: "69996021979".to_string(),
        service: Some(DentalService::Cleaning),
        date: Some(date(2025, 6, 10)),
        time_slot: Some("09:00".to_string()),
        message: String::new(),
        consent: true,
    };

    let appointment = store.create(&draft).await.unwrap();
    assert_eq!(appointment.name, "Maria Silva");
    assert_eq!(appointment.time_slot, "09:00");
    assert!(appointment.message.is_none());
}

#[tokio::test]
async fn create_refuses_an_incomplete_draft_without_a_request() {
    let server = MockServer::start().await;
    let store = SupabaseBookingStore::new(&test_config(&server));

    // No mock mounted: a request would fail the test with a 404
    let result = store.create(&AppointmentDraft::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn closure_lookup_maps_presence_and_absence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/closure_dates"))
        .and(query_param("date", "eq.2025-06-19"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "660e8400-e29b-41d4-a716-446655440001",
            "date": "2025-06-19",
            "description": "Corpus Christi"
        }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/closure_dates"))
        .and(query_param("date", "eq.2025-06-20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = SupabaseBookingStore::new(&test_config(&server));

    let closure = store.closure_on(date(2025, 6, 19)).await.unwrap().unwrap();
    assert_eq!(closure.description, "Corpus Christi");

    assert!(store.closure_on(date(2025, 6, 20)).await.unwrap().is_none());
}
