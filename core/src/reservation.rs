//! Reservation intake: the booking form as a state machine.
//!
//! # Design
//! `ReservationForm` owns the draft, the per-field errors and the submission
//! status. It never performs I/O and never reads a clock:
//!
//! 1. `submit` validates against the caller's `today` and either records the
//!    errors or moves to `Submitting` and returns the one request to send.
//! 2. The host executes that request and feeds the parsed outcome to
//!    `complete`, which moves to `Confirmed` or back to `Editing`.
//! 3. After `RESET_DELAY` the host calls `reset`; the host owns that timer.
//!
//! While `Submitting`, further submits are rejected rather than queued.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::client::CafeClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::types::{GuestCount, Reservation, ReservationPayload};
use crate::validation::{has_min_chars, is_valid_email, FieldErrors};

/// How long the confirmation stays on screen before the form clears.
pub const RESET_DELAY: Duration = Duration::from_secs(5);

/// Bookable half-hour slots, 08:00 through 21:30.
pub const TIME_SLOTS: [&str; 28] = [
    "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30",
    "13:00", "13:30", "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
    "18:00", "18:30", "19:00", "19:30", "20:00", "20:30", "21:00", "21:30",
];

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PHONE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Date,
    Time,
    Guests,
    SpecialRequests,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Date => "date",
            Field::Time => "time",
            Field::Guests => "guests",
            Field::SpecialRequests => "special_requests",
        }
    }
}

/// One user edit. `Guests` carries the selector's raw value (`"4"`, `"10+"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Email(String),
    Phone(String),
    Date(Option<NaiveDate>),
    Time(String),
    Guests(String),
    SpecialRequests(String),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Name(_) => Field::Name,
            FieldUpdate::Email(_) => Field::Email,
            FieldUpdate::Phone(_) => Field::Phone,
            FieldUpdate::Date(_) => Field::Date,
            FieldUpdate::Time(_) => Field::Time,
            FieldUpdate::Guests(_) => Field::Guests,
            FieldUpdate::SpecialRequests(_) => Field::SpecialRequests,
        }
    }
}

/// The form's contents exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub guests: String,
    pub special_requests: String,
}

impl ReservationDraft {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::Phone(v) => self.phone = v,
            FieldUpdate::Date(v) => self.date = v,
            FieldUpdate::Time(v) => self.time = v,
            FieldUpdate::Guests(v) => self.guests = v,
            FieldUpdate::SpecialRequests(v) => self.special_requests = v,
        }
    }

    /// Checks every required field and returns all failures at once.
    /// `special_requests` is never checked.
    pub fn validate(&self, today: NaiveDate) -> Result<ReservationPayload, FieldErrors<Field>> {
        let mut errors = FieldErrors::new();

        if !has_min_chars(&self.name, MIN_NAME_CHARS) {
            errors.insert(Field::Name, "Name is required (min 2 characters)");
        }
        if !is_valid_email(&self.email) {
            errors.insert(Field::Email, "Valid email is required");
        }
        if !has_min_chars(&self.phone, MIN_PHONE_CHARS) {
            errors.insert(Field::Phone, "Valid phone number is required");
        }
        match self.date {
            None => errors.insert(Field::Date, "Please select a date"),
            Some(date) if date < today => errors.insert(Field::Date, "Date cannot be in the past"),
            Some(_) => {}
        }
        if !TIME_SLOTS.contains(&self.time.as_str()) {
            errors.insert(Field::Time, "Please select a time");
        }
        let guests = self.guests.parse::<GuestCount>().ok();
        if guests.is_none() {
            errors.insert(Field::Guests, "Please select number of guests");
        }

        match (self.date, guests) {
            (Some(date), Some(guests)) if errors.is_empty() => Ok(ReservationPayload {
                name: self.name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                date,
                time: self.time.clone(),
                guests,
                special_requests: self.special_requests.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// What the confirmation view shows after a successful booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub name: String,
    pub guests: GuestCount,
    pub date: NaiveDate,
    pub time: String,
    /// Id assigned by the service, when it echoed the stored booking.
    pub reference: Option<Uuid>,
}

impl Confirmation {
    fn new(payload: ReservationPayload, stored: Option<Reservation>) -> Self {
        Self {
            name: payload.name,
            guests: payload.guests,
            date: payload.date,
            time: payload.time,
            reference: stored.map(|r| r.id),
        }
    }

    /// `November 2, 2026`
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    pub fn message(&self) -> String {
        format!(
            "Thank you, {}! We've received your reservation request for {} guest(s) on {} at {}.",
            self.name,
            self.guests,
            self.display_date(),
            self.time
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting(ReservationPayload),
    Confirmed(Confirmation),
}

/// Short user-facing notice for each outcome of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ValidationFailed,
    Submitted,
    SubmissionFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::ValidationFailed => "Please fill in all required fields correctly",
            Notice::Submitted => "Reservation submitted successfully! We'll confirm shortly.",
            Notice::SubmissionFailed => {
                "Something went wrong. Please try again or call us directly."
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Local validation failed; nothing was sent.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors<Field>),

    /// A submission is already outstanding.
    #[error("a reservation is already being submitted")]
    InFlight,

    /// The confirmation is showing; the form is read-only until it resets.
    #[error("reservation already confirmed")]
    Confirmed,

    /// `complete` was called with no submission outstanding.
    #[error("no reservation submission is outstanding")]
    NotInFlight,

    /// The service or the transport failed; the draft is untouched.
    #[error("reservation submission failed: {0}")]
    Failed(#[from] ApiError),
}

impl SubmitError {
    /// The notice to show, if this outcome warrants one.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SubmitError::Invalid(_) => Some(Notice::ValidationFailed),
            SubmitError::Failed(_) => Some(Notice::SubmissionFailed),
            SubmitError::InFlight | SubmitError::Confirmed | SubmitError::NotInFlight => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationForm {
    draft: ReservationDraft,
    errors: FieldErrors<Field>,
    status: FormStatus,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationForm {
    pub fn new() -> Self {
        Self {
            draft: ReservationDraft::default(),
            errors: FieldErrors::new(),
            status: FormStatus::Editing,
        }
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors<Field> {
        &self.errors
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, FormStatus::Submitting(_))
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match &self.status {
            FormStatus::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self.status, FormStatus::Editing)
    }

    /// Sets one field and clears its error. Returns `false` when the form is
    /// not editable (submitting or showing a confirmation).
    pub fn update_field(&mut self, update: FieldUpdate) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.errors.clear(update.field());
        self.draft.apply(update);
        true
    }

    /// Validates the draft and, when it passes, returns the single request to
    /// execute. The form stays in `Submitting` until `complete` is called.
    pub fn submit(
        &mut self,
        client: &CafeClient,
        today: NaiveDate,
    ) -> Result<HttpRequest, SubmitError> {
        match self.status {
            FormStatus::Editing => {}
            FormStatus::Submitting(_) => return Err(SubmitError::InFlight),
            FormStatus::Confirmed(_) => return Err(SubmitError::Confirmed),
        }

        let payload = match self.draft.validate(today) {
            Ok(payload) => payload,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };
        self.errors = FieldErrors::new();

        let request = client.build_create_reservation(&payload)?;
        self.status = FormStatus::Submitting(payload);
        Ok(request)
    }

    /// Resolves the outstanding submission. On success the confirmation is
    /// returned and the form becomes read-only; on failure the draft is kept.
    pub fn complete(
        &mut self,
        outcome: Result<Option<Reservation>, ApiError>,
    ) -> Result<Confirmation, SubmitError> {
        let payload = match std::mem::replace(&mut self.status, FormStatus::Editing) {
            FormStatus::Submitting(payload) => payload,
            other => {
                self.status = other;
                return Err(SubmitError::NotInFlight);
            }
        };

        match outcome {
            Ok(stored) => {
                let confirmation = Confirmation::new(payload, stored);
                self.status = FormStatus::Confirmed(confirmation.clone());
                Ok(confirmation)
            }
            Err(e) => Err(SubmitError::Failed(e)),
        }
    }

    /// Back to a fresh, empty form.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
