pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use services::availability::{slot_template, AvailabilityService};
pub use services::store::{BookingStore, SupabaseBookingStore};
pub use services::wizard::BookingWizard;
