//! Reservation form bound to a transport and a runtime.
//!
//! # Design
//! The form state sits behind a `Mutex` shared with the reset timer. The lock
//! is never held across an `.await`: it is taken once to start the
//! submission and once to resolve it.
//!
//! `ResetTimer` owns the spawned post-confirmation reset and aborts it when
//! dropped, so tearing down the view cancels any pending reset.
//! `PendingSubmission` resolves the form even if the submitting future is
//! dropped mid-request, so the in-flight flag always clears.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cafe_core::{
    ApiError, CafeClient, Confirmation, Field, FieldErrors, FieldUpdate, Reservation,
    ReservationForm, SubmitError, RESET_DELAY,
};
use chrono::NaiveDate;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::transport::Transport;

fn lock(form: &Mutex<ReservationForm>) -> MutexGuard<'_, ReservationForm> {
    form.lock().unwrap_or_else(PoisonError::into_inner)
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Aborts the scheduled reset when dropped.
struct ResetTimer(JoinHandle<()>);

impl Drop for ResetTimer {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Resolves the outstanding submission exactly once: explicitly through
/// `finish`, or as a cancelled transport failure when dropped unfinished.
struct PendingSubmission<'a> {
    form: &'a Mutex<ReservationForm>,
    done: bool,
}

impl PendingSubmission<'_> {
    fn finish(
        mut self,
        outcome: Result<Option<Reservation>, ApiError>,
    ) -> Result<Confirmation, SubmitError> {
        self.done = true;
        lock(self.form).complete(outcome)
    }
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if !self.done {
            warn!("reservation submission dropped before completion");
            let _ = lock(self.form).complete(Err(ApiError::Transport(
                "submission cancelled".to_string(),
            )));
        }
    }
}

pub struct ReservationView {
    client: CafeClient,
    transport: Arc<dyn Transport>,
    form: Arc<Mutex<ReservationForm>>,
    reset: Option<ResetTimer>,
    today: fn() -> NaiveDate,
}

impl ReservationView {
    pub fn new(client: CafeClient, transport: Arc<dyn Transport>) -> Self {
        Self {
            client,
            transport,
            form: Arc::new(Mutex::new(ReservationForm::new())),
            reset: None,
            today: local_today,
        }
    }

    /// Replaces the local-calendar date used to reject past bookings.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Snapshot of the current form state.
    pub fn form(&self) -> ReservationForm {
        lock(&self.form).clone()
    }

    /// The shared form state, as seen by the reset timer.
    pub fn form_handle(&self) -> Arc<Mutex<ReservationForm>> {
        Arc::clone(&self.form)
    }

    pub fn errors(&self) -> FieldErrors<Field> {
        lock(&self.form).errors().clone()
    }

    pub fn is_submitting(&self) -> bool {
        lock(&self.form).is_submitting()
    }

    pub fn can_submit(&self) -> bool {
        lock(&self.form).can_submit()
    }

    pub fn update_field(&self, update: FieldUpdate) -> bool {
        lock(&self.form).update_field(update)
    }

    /// Validates, sends at most one request, and on success schedules the
    /// form reset after `RESET_DELAY`.
    pub async fn submit(&mut self) -> Result<Confirmation, SubmitError> {
        let request = lock(&self.form)
            .submit(&self.client, (self.today)())
            .inspect_err(|e| debug!(error = %e, "reservation not sent"))?;
        let pending = PendingSubmission {
            form: &self.form,
            done: false,
        };

        let outcome = match self.transport.execute(request).await {
            Ok(response) => self.client.parse_create_reservation(response),
            Err(e) => Err(e),
        };

        let result = pending.finish(outcome);
        match &result {
            Ok(confirmation) => {
                info!(
                    date = %confirmation.date,
                    time = %confirmation.time,
                    guests = %confirmation.guests,
                    "reservation submitted"
                );
                self.schedule_reset();
            }
            Err(e) => error!(error = %e, "reservation submission failed"),
        }
        result
    }

    fn schedule_reset(&mut self) {
        let form = Arc::clone(&self.form);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(RESET_DELAY).await;
            lock(&form).reset();
            debug!("reservation form reset");
        });
        // Replacing an older timer aborts it.
        self.reset = Some(ResetTimer(handle));
    }
}
