// libs/booking-cell/tests/availability_test.rs
mod support;

use std::sync::Arc;

use chrono::NaiveDate;

use booking_cell::models::ClosureReason;
use booking_cell::{slot_template, AvailabilityService};
use support::InMemoryStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn empty_date_resolves_fully_available() {
    let store = Arc::new(InMemoryStore::default());
    let resolver = AvailabilityService::new(store);

    let day = resolver.resolve(date(2025, 6, 10), None).await.unwrap();

    assert_eq!(day.slots.len(), slot_template().len());
    assert!(day.closure.is_none());
    assert!(day.slots.iter().all(|slot| slot.is_available));
}

#[tokio::test]
async fn booked_slot_is_the_only_unavailable_one() {
    let store = Arc::new(InMemoryStore::default());
    let target = date(2025, 6, 10);
    store.seed_appointment(target, "10:00");

    let resolver = AvailabilityService::new(store);
    let day = resolver.resolve(target, None).await.unwrap();

    for slot in &day.slots {
        assert_eq!(slot.id, slot.time);
        assert_eq!(slot.is_available, slot.id != "10:00", "slot {}", slot.id);
    }
}

#[tokio::test]
async fn weekend_resolves_closed_without_touching_the_store() {
    let store = Arc::new(InMemoryStore::default());
    // A store error would surface if the resolver queried it
    store
        .fail_reads
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let resolver = AvailabilityService::new(store);
    let day = resolver.resolve(date(2025, 6, 7), None).await.unwrap(); // Saturday

    assert_eq!(day.closure, Some(ClosureReason::Weekend));
    assert!(day.slots.iter().all(|slot| !slot.is_available));
}

#[tokio::test]
async fn declared_closure_resolves_closed_with_its_description() {
    let store = Arc::new(InMemoryStore::default());
    let holiday = date(2025, 6, 19);
    store.seed_closure(holiday, "Corpus Christi");

    let resolver = AvailabilityService::new(store);
    let day = resolver.resolve(holiday, None).await.unwrap();

    assert_eq!(
        day.closure,
        Some(ClosureReason::Closed {
            description: "Corpus Christi".to_string()
        })
    );
    assert!(day.slots.iter().all(|slot| !slot.is_available));
}

#[tokio::test]
async fn excluded_slot_stays_available_while_editing() {
    let store = Arc::new(InMemoryStore::default());
    let target = date(2025, 6, 10);
    store.seed_appointment(target, "10:00");
    store.seed_appointment(target, "11:00");

    let resolver = AvailabilityService::new(store);
    let day = resolver.resolve(target, Some("10:00")).await.unwrap();

    let ten = day.slots.iter().find(|s| s.id == "10:00").unwrap();
    let eleven = day.slots.iter().find(|s| s.id == "11:00").unwrap();
    assert!(ten.is_available, "the appointment's own slot is not taken");
    assert!(!eleven.is_available);
}
