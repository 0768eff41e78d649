// libs/booking-cell/src/services/validation.rs
//
// Pure field validation. Everything here is a function of its arguments so
// the wizard (and the HTTP path) can be exercised without a UI harness.
use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{
    AppointmentDraft, BookingField, ClosureReason, DentalService, TimeSlot, WizardState,
};

pub const WEEKEND_MESSAGE: &str = "Não atendemos aos finais de semana";

/// Strip everything but ASCII digits.
pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Apply the Brazilian display mask. Idempotent: formatting an already
/// formatted number yields the same string.
///
/// 11 digits -> `(DD) DDDDD-DDDD`, 10 digits -> `(DD) DDDD-DDDD`; anything
/// else is returned as its bare digits.
pub fn format_phone(input: &str) -> String {
    let d = digits(input);
    match d.len() {
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => d,
    }
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Informe seu nome".to_string());
    }
    if trimmed.chars().count() < 3 {
        return Err("O nome deve ter pelo menos 3 caracteres".to_string());
    }
    Ok(())
}

/// Mobile numbers only: DDD plus nine digits.
pub fn validate_phone(phone: &str) -> Result<(), String> {
    if digits(phone).len() == 11 {
        Ok(())
    } else {
        Err("Informe um celular válido com DDD (11 dígitos)".to_string())
    }
}

pub fn validate_service(service: Option<DentalService>) -> Result<(), String> {
    service
        .map(|_| ())
        .ok_or_else(|| "Selecione um serviço".to_string())
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Date-field rule: today or later, weekday, not a declared closure.
/// `closure` is the resolver's verdict for this date, when already known.
pub fn validate_date(
    date: Option<NaiveDate>,
    today: NaiveDate,
    closure: Option<&ClosureReason>,
) -> Result<(), String> {
    let date = date.ok_or_else(|| "Escolha uma data".to_string())?;
    if date < today {
        return Err("Escolha uma data a partir de hoje".to_string());
    }
    if is_weekend(date) {
        return Err(WEEKEND_MESSAGE.to_string());
    }
    if let Some(reason @ ClosureReason::Closed { .. }) = closure {
        return Err(reason.notice());
    }
    Ok(())
}

/// A slot must be selected and still available in the current grid.
pub fn validate_slot(slot: Option<&str>, slots: &[TimeSlot]) -> Result<(), String> {
    let slot = slot.ok_or_else(|| "Escolha um horário".to_string())?;
    match slots.iter().find(|s| s.id == slot) {
        Some(s) if s.is_available => Ok(()),
        Some(_) => Err("Esse horário não está mais disponível".to_string()),
        None => Err("Escolha um horário".to_string()),
    }
}

pub fn validate_consent(consent: bool) -> Result<(), String> {
    if consent {
        Ok(())
    } else {
        Err("É preciso autorizar o contato para agendar".to_string())
    }
}

/// Fields owned by each wizard step.
pub fn step_fields(state: WizardState) -> &'static [BookingField] {
    match state {
        WizardState::Contact => &[BookingField::Name, BookingField::Phone],
        WizardState::Schedule => &[
            BookingField::Service,
            BookingField::Date,
            BookingField::TimeSlot,
        ],
        WizardState::Confirm | WizardState::Submitting | WizardState::Succeeded => {
            &[BookingField::Consent]
        }
    }
}

fn check_field(
    field: BookingField,
    draft: &AppointmentDraft,
    today: NaiveDate,
    slots: &[TimeSlot],
    closure: Option<&ClosureReason>,
) -> Result<(), String> {
    match field {
        BookingField::Name => validate_name(&draft.name),
        BookingField::Phone => validate_phone(&draft.phone),
        BookingField::Service => validate_service(draft.service),
        BookingField::Date => validate_date(draft.date, today, closure),
        BookingField::TimeSlot => validate_slot(draft.time_slot.as_deref(), slots),
        BookingField::Consent => validate_consent(draft.consent),
    }
}

/// The error map for a draft snapshot. Only touched fields report; a field
/// the user has not reached yet stays silent.
pub fn validate_draft(
    draft: &AppointmentDraft,
    touched: &HashSet<BookingField>,
    today: NaiveDate,
    slots: &[TimeSlot],
    closure: Option<&ClosureReason>,
) -> BTreeMap<BookingField, String> {
    let mut errors = BTreeMap::new();
    for field in BookingField::all() {
        if !touched.contains(field) {
            continue;
        }
        if let Err(message) = check_field(*field, draft, today, slots, closure) {
            errors.insert(*field, message);
        }
    }
    errors
}
