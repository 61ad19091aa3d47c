//! Submission lifecycle state for the admin forms.
//!
//! Every admin action follows the same shape: a mutable field record is
//! turned into exactly one request, and the outcome lands in one of two
//! terminal states (success or error feedback). Feedback clears itself
//! after a fixed interval, and create/delete schedule a delayed redirect.
//! All deadlines take the current `Instant` from the caller so tests never
//! sleep, and a form that leaves the screen cancels its timers instead of
//! firing them against a disposed view.

use std::time::{Duration, Instant};

use shared::protocol::{ApproveChallengeRequest, ChallengeDetail, CreateChallengeRequest};

use crate::ClientError;

pub const FEEDBACK_TTL: Duration = Duration::from_millis(5000);
pub const CREATE_REDIRECT_DELAY: Duration = Duration::from_millis(2000);
pub const DELETE_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// The editable challenge record, exactly as the inputs hold it. `points`
/// stays a string until the create payload is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeFields {
    pub photo_url: String,
    pub name: String,
    pub points: String,
    pub description: String,
    pub added_by: String,
}

impl ChallengeFields {
    /// Payload for the create endpoint. The numeric parse is deliberately
    /// unchecked: a non-numeric `points` entry serializes as `null` rather
    /// than being rejected here. Flagged under test, kept for parity with
    /// the deployed behavior.
    pub fn create_request(&self) -> CreateChallengeRequest {
        CreateChallengeRequest {
            challenge_name: self.name.clone(),
            points: self.points.trim().parse::<i64>().ok(),
            description: self.description.clone(),
            photo_url: self.photo_url.clone(),
        }
    }

    /// Payload for the approve endpoint: the full editable record, all
    /// fields as strings.
    pub fn approve_request(&self) -> ApproveChallengeRequest {
        ApproveChallengeRequest {
            photo_url: self.photo_url.clone(),
            name: self.name.clone(),
            points: self.points.clone(),
            description: self.description.clone(),
            added_by: self.added_by.clone(),
        }
    }

    /// Input gating for the submit control; the controller itself does not
    /// re-validate before sending.
    pub fn required_complete(&self) -> bool {
        !self.photo_url.trim().is_empty()
            && !self.name.trim().is_empty()
            && !self.points.trim().is_empty()
            && !self.description.trim().is_empty()
    }

    /// Field-by-field populate with empty-string fallbacks so absent server
    /// fields never leave an input undefined.
    pub fn populate(&mut self, detail: &ChallengeDetail) {
        self.photo_url = detail.photo_url.clone().unwrap_or_default();
        self.name = detail.name.clone().unwrap_or_default();
        self.points = detail.points.map(|p| p.to_string()).unwrap_or_default();
        self.description = detail.description.clone().unwrap_or_default();
        self.added_by = detail.added_by.clone().unwrap_or_default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub is_error: bool,
    clear_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Populated,
    LoadError,
}

/// Outcome of one submission request, as reported by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { status: u16, body: String },
    TransportFailed,
}

impl SubmitOutcome {
    pub fn from_result(result: &Result<(), ClientError>) -> Self {
        match result {
            Ok(()) => Self::Accepted,
            Err(ClientError::Rejected { status, body }) => Self::Rejected {
                status: *status,
                body: body.clone(),
            },
            Err(_) => Self::TransportFailed,
        }
    }
}

/// Per-form submission controller.
///
/// `R` is whatever the host uses as a navigation target; the form only
/// holds it until the redirect comes due. Overlapping submissions are
/// prevented by disabling the trigger while `loading` is set — the form
/// itself does not reject a second call.
#[derive(Debug)]
pub struct ChallengeForm<R> {
    pub fields: ChallengeFields,
    pub loading: bool,
    load_state: LoadState,
    confirming_delete: bool,
    feedback: Option<Feedback>,
    pending_redirect: Option<(Instant, R)>,
}

impl<R> Default for ChallengeForm<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ChallengeForm<R> {
    pub fn new() -> Self {
        Self {
            fields: ChallengeFields::default(),
            loading: false,
            load_state: LoadState::Idle,
            confirming_delete: false,
            feedback: None,
            pending_redirect: None,
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub fn redirect_pending(&self) -> bool {
        self.pending_redirect.is_some()
    }

    pub fn begin_submit(&mut self) {
        self.loading = true;
        self.feedback = None;
    }

    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub fn loaded(&mut self, detail: &ChallengeDetail) {
        self.fields.populate(detail);
        self.load_state = LoadState::Populated;
    }

    pub fn load_failed(&mut self, now: Instant) {
        self.load_state = LoadState::LoadError;
        self.set_feedback(now, "Failed to load challenge data".to_string(), true);
    }

    pub fn request_delete(&mut self) {
        self.confirming_delete = true;
    }

    /// Declining the prompt aborts with no side effects and no state change.
    pub fn decline_delete(&mut self) {
        self.confirming_delete = false;
    }

    /// Returns true when the caller should dispatch the delete request.
    pub fn confirm_delete(&mut self) -> bool {
        if !self.confirming_delete {
            return false;
        }
        self.confirming_delete = false;
        self.begin_submit();
        true
    }

    pub fn finish_create(&mut self, now: Instant, outcome: SubmitOutcome, redirect: R) {
        self.loading = false;
        match outcome {
            SubmitOutcome::Accepted => {
                self.fields = ChallengeFields::default();
                self.set_feedback(now, "Challenge added successfully!".to_string(), false);
                self.pending_redirect = Some((now + CREATE_REDIRECT_DELAY, redirect));
            }
            SubmitOutcome::Rejected { body, .. } => {
                // The create path surfaces the server's own message when the
                // body carries one.
                let message = if body.trim().is_empty() {
                    "Failed to add challenge.".to_string()
                } else {
                    body
                };
                self.set_feedback(now, message, true);
            }
            SubmitOutcome::TransportFailed => {
                self.set_feedback(now, "Error submitting challenge.".to_string(), true);
            }
        }
    }

    pub fn finish_approve(&mut self, now: Instant, outcome: SubmitOutcome) {
        self.loading = false;
        match outcome {
            SubmitOutcome::Accepted => {
                self.fields = ChallengeFields::default();
                self.set_feedback(now, "Challenge approved successfully!".to_string(), false);
            }
            SubmitOutcome::Rejected { .. } => {
                self.set_feedback(now, "Failed to approve challenge.".to_string(), true);
            }
            SubmitOutcome::TransportFailed => {
                self.set_feedback(now, "Error approving challenge.".to_string(), true);
            }
        }
    }

    pub fn finish_delete(&mut self, now: Instant, outcome: SubmitOutcome, redirect: R) {
        self.loading = false;
        match outcome {
            SubmitOutcome::Accepted => {
                self.fields = ChallengeFields::default();
                self.set_feedback(now, "Challenge deleted successfully!".to_string(), false);
                self.pending_redirect = Some((now + DELETE_REDIRECT_DELAY, redirect));
            }
            SubmitOutcome::Rejected { .. } => {
                self.set_feedback(now, "Failed to delete challenge.".to_string(), true);
            }
            SubmitOutcome::TransportFailed => {
                self.set_feedback(now, "Error deleting challenge.".to_string(), true);
            }
        }
    }

    /// Advances the form's timers: clears expired feedback and hands back a
    /// redirect that has come due. The caller performs the navigation.
    pub fn tick(&mut self, now: Instant) -> Option<R> {
        if self.feedback.as_ref().is_some_and(|f| now >= f.clear_at) {
            self.feedback = None;
        }
        if self
            .pending_redirect
            .as_ref()
            .is_some_and(|(due, _)| now >= *due)
        {
            return self.pending_redirect.take().map(|(_, target)| target);
        }
        None
    }

    /// Teardown guard: timers belonging to a form that left the screen must
    /// become no-ops, not fire against the next view.
    pub fn cancel_scheduled(&mut self) {
        self.feedback = None;
        self.pending_redirect = None;
    }

    fn set_feedback(&mut self, now: Instant, message: String, is_error: bool) {
        self.feedback = Some(Feedback {
            message,
            is_error,
            clear_at: now + FEEDBACK_TTL,
        });
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
