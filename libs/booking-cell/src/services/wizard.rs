// libs/booking-cell/src/services/wizard.rs
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::models::{
    Appointment, AppointmentDraft, BookingError, BookingField, ClosureReason, DayAvailability,
    FieldPatch, Notice, TimeSlot, WizardState,
};
use crate::services::availability::AvailabilityService;
use crate::services::store::BookingStore;
use crate::services::validation;

/// The three-step booking form state machine.
///
/// Owns the transient [`AppointmentDraft`] for one booking session and
/// exposes exactly what a presentation layer needs to bind to: current
/// state, per-field errors, the slot grid, loading/notice flags, and the
/// actions (`apply`, `blur`, `advance`, `back`, `submit`). Dropping the
/// wizard is the close action; nothing is persisted on abandonment.
///
/// `today` is injected so date rules are a pure function of the session,
/// not of the wall clock at assertion time.
pub struct BookingWizard<S: BookingStore> {
    store: Arc<S>,
    resolver: AvailabilityService<S>,
    today: NaiveDate,
    state: WizardState,
    draft: AppointmentDraft,
    touched: HashSet<BookingField>,
    errors: BTreeMap<BookingField, String>,
    availability: Option<DayAvailability>,
    loading_slots: bool,
    notice: Option<Notice>,
    created: Option<Appointment>,
}

impl<S: BookingStore> BookingWizard<S> {
    pub fn open(store: Arc<S>, today: NaiveDate) -> Self {
        Self {
            resolver: AvailabilityService::new(Arc::clone(&store)),
            store,
            today,
            state: WizardState::Contact,
            draft: AppointmentDraft::default(),
            touched: HashSet::new(),
            errors: BTreeMap::new(),
            availability: None,
            loading_slots: false,
            notice: None,
            created: None,
        }
    }

    // ------------------------------------------------------------------
    // State exposed to the presentation layer
    // ------------------------------------------------------------------

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    pub fn errors(&self) -> &BTreeMap<BookingField, String> {
        &self.errors
    }

    pub fn slots(&self) -> &[TimeSlot] {
        self.grid_slots()
    }

    /// Why the currently selected date is unbookable, if it is.
    pub fn closure_notice(&self) -> Option<&ClosureReason> {
        self.current_grid().and_then(|day| day.closure.as_ref())
    }

    pub fn is_loading_slots(&self) -> bool {
        self.loading_slots
    }

    /// One-shot notification; the caller consumes it.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn created(&self) -> Option<&Appointment> {
        self.created.as_ref()
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Reducer for field updates. Marks the field touched and re-validates
    /// the touched set against the new draft snapshot.
    pub fn apply(&mut self, patch: FieldPatch) {
        if matches!(self.state, WizardState::Submitting | WizardState::Succeeded) {
            return;
        }

        let field = patch.field();

        match patch {
            FieldPatch::Name(value) => self.draft.name = value,
            FieldPatch::Phone(value) => self.draft.phone = value,
            FieldPatch::Service(value) => self.draft.service = value,
            FieldPatch::Date(value) => {
                // A new date invalidates the chosen slot and the grid
                self.draft.date = value;
                self.draft.time_slot = None;
                self.availability = None;
            }
            FieldPatch::TimeSlot(value) => self.draft.time_slot = value,
            FieldPatch::Message(value) => self.draft.message = value,
            FieldPatch::Consent(value) => self.draft.consent = value,
        }

        if let Some(field) = field {
            self.touched.insert(field);
        }
        self.revalidate();
    }

    /// A field lost focus without necessarily changing.
    pub fn blur(&mut self, field: BookingField) {
        self.touched.insert(field);
        self.revalidate();
    }

    /// Set the date and resolve its slot grid in one step.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        self.apply(FieldPatch::Date(Some(date)));
        self.refresh_slots().await
    }

    /// Re-resolve the grid for the draft's current date.
    pub async fn refresh_slots(&mut self) -> Result<(), BookingError> {
        let Some(date) = self.draft.date else {
            return Ok(());
        };

        self.loading_slots = true;
        let resolved = self.resolver.resolve(date, None).await;
        self.loading_slots = false;

        match resolved {
            Ok(day) => {
                self.availability = Some(day);
                self.revalidate();
                Ok(())
            }
            Err(err) => {
                warn!("Slot resolution failed for {}: {}", date, err);
                self.notice = Some(Notice::BackendFailure);
                Err(err)
            }
        }
    }

    /// Try to move to the next step. Touches the current step's fields so
    /// their errors become visible, and advances only when the step is
    /// clean. Returns whether the transition happened.
    pub fn advance(&mut self) -> bool {
        let next = match self.state {
            WizardState::Contact => WizardState::Schedule,
            WizardState::Schedule => WizardState::Confirm,
            // Confirm advances through submit(), terminal states not at all
            _ => return false,
        };

        let fields = validation::step_fields(self.state);
        self.touched.extend(fields.iter().copied());
        self.revalidate();

        if fields.iter().any(|field| self.errors.contains_key(field)) {
            debug!("Step {:?} blocked by validation", self.state);
            return false;
        }

        self.state = next;
        true
    }

    pub fn back(&mut self) {
        self.state = match self.state {
            WizardState::Schedule => WizardState::Contact,
            WizardState::Confirm => WizardState::Schedule,
            other => other,
        };
    }

    /// Final submission: full re-validation, then the pre-write availability
    /// re-check, then the insert.
    ///
    /// A conflict sends the user back to the schedule step with a fresh
    /// grid; a store failure keeps the draft on the confirm step for a
    /// manual retry. Neither path persists anything.
    pub async fn submit(&mut self) -> Result<(), BookingError> {
        if self.state != WizardState::Confirm {
            return Err(BookingError::ValidationError(
                "Submission is only possible from the confirmation step".to_string(),
            ));
        }

        // Every field counts now, touched or not
        self.touched.extend(BookingField::all().iter().copied());
        self.revalidate();

        if !self.errors.is_empty() {
            return Err(BookingError::ValidationError(
                "O formulário contém campos inválidos".to_string(),
            ));
        }

        let (Some(date), Some(slot)) = (self.draft.date, self.draft.time_slot.clone()) else {
            return Err(BookingError::ValidationError(
                "Escolha uma data e um horário".to_string(),
            ));
        };

        self.state = WizardState::Submitting;

        // Race check: the slot may have been taken since it was selected.
        // Anything faster than this window is an accepted gap.
        match self.store.is_slot_free(date, &slot).await {
            Ok(true) => {}
            Ok(false) => {
                info!("Slot {} on {} taken between selection and submit", slot, date);
                self.state = WizardState::Schedule;
                self.draft.time_slot = None;
                // Best effort: show the caller an up-to-date grid
                let _ = self.refresh_slots().await;
                self.notice = Some(Notice::SlotConflict);
                return Err(BookingError::SlotTaken);
            }
            Err(err) => {
                self.state = WizardState::Confirm;
                self.notice = Some(Notice::BackendFailure);
                return Err(err);
            }
        }

        match self.store.create(&self.draft).await {
            Ok(appointment) => {
                info!(
                    "Appointment {} booked for {} at {}",
                    appointment.id, appointment.date, appointment.time_slot
                );
                self.created = Some(appointment);
                self.state = WizardState::Succeeded;
                Ok(())
            }
            Err(err) => {
                warn!("Appointment creation failed: {}", err);
                self.state = WizardState::Confirm;
                self.notice = Some(Notice::BackendFailure);
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn current_grid(&self) -> Option<&DayAvailability> {
        self.availability
            .as_ref()
            .filter(|day| Some(day.date) == self.draft.date)
    }

    fn grid_slots(&self) -> &[TimeSlot] {
        self.current_grid()
            .map(|day| day.slots.as_slice())
            .unwrap_or(&[])
    }

    fn revalidate(&mut self) {
        let errors = validation::validate_draft(
            &self.draft,
            &self.touched,
            self.today,
            self.grid_slots(),
            self.current_grid().and_then(|day| day.closure.as_ref()),
        );
        self.errors = errors;
    }
}
