// libs/booking-cell/src/services/availability.rs
use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{ClosureReason, DayAvailability, TimeSlot};
use crate::services::store::BookingStore;
use crate::services::validation::is_weekend;

pub const OPENING_HOUR: u32 = 8;
pub const CLOSING_HOUR: u32 = 18;

/// The fixed daily grid: one slot per hour, 08:00 through 18:00 inclusive.
pub fn slot_template() -> Vec<String> {
    (OPENING_HOUR..=CLOSING_HOUR)
        .map(|hour| format!("{:02}:00", hour))
        .collect()
}

/// Computes the free/busy grid for one calendar date by subtracting booked
/// slots from the fixed template.
pub struct AvailabilityService<S: BookingStore> {
    store: Arc<S>,
}

impl<S: BookingStore> AvailabilityService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolve the slot grid for `date`.
    ///
    /// Weekends and declared closures return the full template with every
    /// slot unavailable plus the closure reason for display; the date-field
    /// validator is what rejects them, a fully booked weekday stays
    /// selectable. `exclude_slot` keeps an appointment's own slot from
    /// showing as taken while it is being edited.
    pub async fn resolve(
        &self,
        date: NaiveDate,
        exclude_slot: Option<&str>,
    ) -> Result<DayAvailability, crate::models::BookingError> {
        let template = slot_template();

        if is_weekend(date) {
            return Ok(Self::closed_day(date, template, ClosureReason::Weekend));
        }

        if let Some(closure) = self.store.closure_on(date).await? {
            debug!("{} is a declared closure: {}", date, closure.description);
            return Ok(Self::closed_day(
                date,
                template,
                ClosureReason::Closed {
                    description: closure.description,
                },
            ));
        }

        let free: HashSet<String> = self
            .store
            .free_slots(date, &template)
            .await?
            .into_iter()
            .collect();

        let slots = template
            .into_iter()
            .map(|time| {
                let is_available =
                    free.contains(&time) || exclude_slot == Some(time.as_str());
                TimeSlot {
                    id: time.clone(),
                    time,
                    is_available,
                }
            })
            .collect();

        Ok(DayAvailability {
            date,
            slots,
            closure: None,
        })
    }

    fn closed_day(
        date: NaiveDate,
        template: Vec<String>,
        reason: ClosureReason,
    ) -> DayAvailability {
        let slots = template
            .into_iter()
            .map(|time| TimeSlot {
                id: time.clone(),
                time,
                is_available: false,
            })
            .collect();

        DayAvailability {
            date,
            slots,
            closure: Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_runs_hourly_from_open_to_close() {
        let template = slot_template();
        assert_eq!(template.len(), 11);
        assert_eq!(template.first().map(String::as_str), Some("08:00"));
        assert_eq!(template.last().map(String::as_str), Some("18:00"));
        assert!(template.contains(&"09:00".to_string()));
    }
}
