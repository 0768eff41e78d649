// Shared test double: an in-memory BookingStore with the same
// check-then-create semantics as the Supabase gateway.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use booking_cell::models::{
    Appointment, AppointmentDraft, AppointmentStatus, BookingError, ClosureDate,
};
use booking_cell::services::store::BookingStore;
use booking_cell::services::validation::format_phone;

#[derive(Default)]
pub struct InMemoryStore {
    pub appointments: Mutex<Vec<Appointment>>,
    pub closures: Mutex<Vec<ClosureDate>>,
    pub fail_reads: AtomicBool,
    pub fail_create: AtomicBool,
}

impl InMemoryStore {
    pub fn seed_appointment(&self, date: NaiveDate, slot: &str) {
        self.appointments.lock().unwrap().push(Appointment {
            id: Uuid::new_v4(),
            name: "Seed".to_string(),
            phone: "(69) 99999-0000".to_string(),
            service: booking_cell::models::DentalService::Cleaning,
            date,
            time_slot: slot.to_string(),
            message: None,
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        });
    }

    pub fn seed_closure(&self, date: NaiveDate, description: &str) {
        self.closures.lock().unwrap().push(ClosureDate {
            id: Uuid::new_v4(),
            date,
            description: description.to_string(),
        });
    }

    pub fn booked_count(&self) -> usize {
        self.appointments.lock().unwrap().len()
    }

    fn check_reads(&self) -> Result<(), BookingError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(BookingError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn is_slot_free(&self, date: NaiveDate, slot: &str) -> Result<bool, BookingError> {
        self.check_reads()?;
        let taken = self.appointments.lock().unwrap().iter().any(|a| {
            a.date == date && a.time_slot == slot && a.status != AppointmentStatus::Cancelled
        });
        Ok(!taken)
    }

    async fn free_slots(
        &self,
        date: NaiveDate,
        candidates: &[String],
    ) -> Result<Vec<String>, BookingError> {
        self.check_reads()?;
        let appointments = self.appointments.lock().unwrap();
        Ok(candidates
            .iter()
            .filter(|candidate| {
                !appointments.iter().any(|a| {
                    a.date == date
                        && &a.time_slot == *candidate
                        && a.status != AppointmentStatus::Cancelled
                })
            })
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &AppointmentDraft) -> Result<Appointment, BookingError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(BookingError::DatabaseError("connection refused".to_string()));
        }

        let (service, date, time_slot) = match (draft.service, draft.date, &draft.time_slot) {
            (Some(service), Some(date), Some(slot)) => (service, date, slot.clone()),
            _ => {
                return Err(BookingError::ValidationError(
                    "Draft is missing service, date or time slot".to_string(),
                ))
            }
        };

        let appointment = Appointment {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            phone: format_phone(&draft.phone),
            service,
            date,
            time_slot,
            message: if draft.message.trim().is_empty() {
                None
            } else {
                Some(draft.message.trim().to_string())
            },
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        };

        self.appointments.lock().unwrap().push(appointment.clone());
        Ok(appointment)
    }

    async fn closure_on(&self, date: NaiveDate) -> Result<Option<ClosureDate>, BookingError> {
        self.check_reads()?;
        Ok(self
            .closures
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.date == date)
            .cloned())
    }
}
