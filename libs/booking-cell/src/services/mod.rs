pub mod admin;
pub mod availability;
pub mod booking;
pub mod store;
pub mod validation;
pub mod wizard;
