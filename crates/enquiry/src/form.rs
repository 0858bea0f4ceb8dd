use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use crate::{ContactFormValues, EnquiryInput, FieldErrors, SubmitEnquiry};

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Validating,
    Submitting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed; see [`ContactForm::errors`].
    Invalid,
    Submitted(String),
    Failed,
    /// The same enquiry is already being submitted.
    Busy,
}

/// Submissions currently waiting on the collaborator, shared by every form instance.
#[derive(Clone, Default)]
pub struct InFlight(Arc<Mutex<HashSet<String>>>);

impl InFlight {
    pub fn claim(&self, input: &EnquiryInput) -> Option<InFlightGuard> {
        let key = input.fingerprint();
        let mut keys = self.0.lock().unwrap_or_else(PoisonError::into_inner);

        if !keys.insert(key.to_owned()) {
            return None;
        }

        Some(InFlightGuard {
            keys: self.0.clone(),
            key,
        })
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Releases its claim when dropped.
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// State of one contact form across a submission cycle.
#[derive(Default, Debug)]
pub struct ContactForm {
    pub values: ContactFormValues,
    pub errors: FieldErrors,
    status: FormStatus,
}

impl ContactForm {
    pub fn new(values: ContactFormValues) -> Self {
        Self {
            values,
            errors: FieldErrors::default(),
            status: FormStatus::Idle,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Runs one submission cycle and always leaves the form [`FormStatus::Idle`].
    ///
    /// Values are cleared only on success. The collaborator is called at most once and
    /// never when validation fails or the same enquiry is already in flight.
    #[tracing::instrument(skip_all)]
    pub async fn submit<S: SubmitEnquiry + ?Sized>(
        &mut self,
        submitter: &S,
        in_flight: &InFlight,
        timeout: Duration,
    ) -> SubmitOutcome {
        self.status = FormStatus::Validating;

        let input = match self.values.validate_input() {
            Ok(input) => input,
            Err(errors) => {
                tracing::debug!(fields = errors.len(), "Enquiry rejected by validation");
                self.errors = errors;
                self.status = FormStatus::Idle;

                return SubmitOutcome::Invalid;
            }
        };

        self.errors = FieldErrors::default();

        let Some(_guard) = in_flight.claim(&input) else {
            tracing::warn!("Enquiry already in flight, ignoring duplicate submit");
            self.status = FormStatus::Idle;

            return SubmitOutcome::Busy;
        };

        self.status = FormStatus::Submitting;
        let result = tokio::time::timeout(timeout, submitter.submit(&input)).await;
        self.status = FormStatus::Idle;

        match result {
            Ok(Ok(id)) => {
                tracing::info!(enquiry.id = %id, "Enquiry submitted");
                self.values = ContactFormValues::default();

                SubmitOutcome::Submitted(id)
            }
            Ok(Err(err)) => {
                tracing::error!("Failed to submit enquiry: {err}");

                SubmitOutcome::Failed
            }
            Err(_) => {
                tracing::error!(
                    timeout_ms = timeout.as_millis() as u64,
                    "Enquiry submission timed out"
                );

                SubmitOutcome::Failed
            }
        }
    }
}
