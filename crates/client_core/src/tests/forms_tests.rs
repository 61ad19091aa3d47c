use std::time::{Duration, Instant};

use super::*;
use shared::protocol::ChallengeDetail;

fn sample_fields() -> ChallengeFields {
    ChallengeFields {
        photo_url: "data:image/png;base64,abc".to_string(),
        name: "Run 5k".to_string(),
        points: "10".to_string(),
        description: "desc".to_string(),
        added_by: String::new(),
    }
}

#[test]
fn create_request_converts_points_to_integer() {
    let request = sample_fields().create_request();
    assert_eq!(request.challenge_name, "Run 5k");
    assert_eq!(request.points, Some(10));
    assert_eq!(request.description, "desc");
    assert_eq!(request.photo_url, "data:image/png;base64,abc");
}

// Deployed behavior, not a contract we endorse: junk in the points input
// passes through the unchecked parse and lands on the wire as null.
#[test]
fn non_numeric_points_serializes_as_null() {
    let mut fields = sample_fields();
    fields.points = "ten".to_string();

    let json = serde_json::to_value(fields.create_request()).expect("serialize");
    assert_eq!(json["points"], serde_json::Value::Null);
}

#[test]
fn required_complete_needs_every_field_but_added_by() {
    assert!(sample_fields().required_complete());

    let mut missing_points = sample_fields();
    missing_points.points = "  ".to_string();
    assert!(!missing_points.required_complete());

    let mut no_author = sample_fields();
    no_author.added_by = String::new();
    assert!(no_author.required_complete());
}

#[test]
fn create_success_resets_fields_and_redirects_after_two_seconds() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();
    form.fields = sample_fields();

    form.begin_submit();
    assert!(form.loading);
    assert!(form.feedback().is_none());

    form.finish_create(start, SubmitOutcome::Accepted, "active-challenges");
    assert!(!form.loading);
    assert_eq!(form.fields, ChallengeFields::default());
    let feedback = form.feedback().expect("feedback");
    assert_eq!(feedback.message, "Challenge added successfully!");
    assert!(!feedback.is_error);

    assert_eq!(form.tick(start + Duration::from_millis(1999)), None);
    assert_eq!(
        form.tick(start + Duration::from_millis(2000)),
        Some("active-challenges")
    );
    // Fire-once: the redirect is consumed.
    assert_eq!(form.tick(start + Duration::from_millis(2001)), None);
}

#[test]
fn feedback_clears_at_five_seconds_not_before() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();

    form.begin_submit();
    form.finish_approve(
        start,
        SubmitOutcome::Rejected {
            status: 500,
            body: String::new(),
        },
    );

    form.tick(start + Duration::from_millis(4999));
    assert!(form.feedback().is_some());
    form.tick(start + Duration::from_millis(5000));
    assert!(form.feedback().is_none());
}

#[test]
fn create_rejection_prefers_response_body_text() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();

    form.begin_submit();
    form.finish_create(
        start,
        SubmitOutcome::Rejected {
            status: 400,
            body: "Challenge name already exists".to_string(),
        },
        "active-challenges",
    );

    let feedback = form.feedback().expect("feedback");
    assert_eq!(feedback.message, "Challenge name already exists");
    assert!(feedback.is_error);
    assert!(!form.redirect_pending());
}

#[test]
fn create_rejection_with_blank_body_falls_back_to_static_message() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();

    form.begin_submit();
    form.finish_create(
        start,
        SubmitOutcome::Rejected {
            status: 500,
            body: "  ".to_string(),
        },
        "active-challenges",
    );

    assert_eq!(
        form.feedback().expect("feedback").message,
        "Failed to add challenge."
    );
}

#[test]
fn create_transport_failure_uses_submit_wording() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();

    form.begin_submit();
    form.finish_create(start, SubmitOutcome::TransportFailed, "active-challenges");

    let feedback = form.feedback().expect("feedback");
    assert_eq!(feedback.message, "Error submitting challenge.");
    assert!(feedback.is_error);
}

#[test]
fn approve_failure_is_static_keeps_fields_and_never_navigates() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();
    form.fields = sample_fields();

    form.begin_submit();
    form.finish_approve(
        start,
        SubmitOutcome::Rejected {
            status: 500,
            body: "internal error text the UI must not show".to_string(),
        },
    );

    let feedback = form.feedback().expect("feedback");
    assert_eq!(feedback.message, "Failed to approve challenge.");
    assert!(feedback.is_error);
    assert!(!form.loading);
    assert!(!form.redirect_pending());
    assert_eq!(form.fields, sample_fields());
}

#[test]
fn approve_success_resets_fields_without_redirect() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();
    form.fields = sample_fields();

    form.begin_submit();
    form.finish_approve(start, SubmitOutcome::Accepted);

    assert_eq!(
        form.feedback().expect("feedback").message,
        "Challenge approved successfully!"
    );
    assert_eq!(form.fields, ChallengeFields::default());
    assert!(!form.redirect_pending());
}

#[test]
fn delete_success_redirects_after_fifteen_hundred_millis() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();
    form.fields = sample_fields();

    form.request_delete();
    assert!(form.confirm_delete());
    form.finish_delete(start, SubmitOutcome::Accepted, "pending-challenges");

    assert_eq!(
        form.feedback().expect("feedback").message,
        "Challenge deleted successfully!"
    );
    assert_eq!(form.tick(start + Duration::from_millis(1499)), None);
    assert_eq!(
        form.tick(start + Duration::from_millis(1500)),
        Some("pending-challenges")
    );
}

#[test]
fn delete_failure_wording_is_static() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();

    form.request_delete();
    form.confirm_delete();
    form.finish_delete(
        start,
        SubmitOutcome::Rejected {
            status: 409,
            body: "conflict".to_string(),
        },
        "pending-challenges",
    );
    assert_eq!(
        form.feedback().expect("feedback").message,
        "Failed to delete challenge."
    );

    form.tick(start + Duration::from_millis(5000));
    form.request_delete();
    form.confirm_delete();
    form.finish_delete(
        start,
        SubmitOutcome::TransportFailed,
        "pending-challenges",
    );
    assert_eq!(
        form.feedback().expect("feedback").message,
        "Error deleting challenge."
    );
}

#[test]
fn declining_delete_confirmation_changes_nothing() {
    let mut form: ChallengeForm<&str> = ChallengeForm::new();
    form.fields = sample_fields();

    form.request_delete();
    assert!(form.confirming_delete());
    form.decline_delete();

    assert!(!form.confirming_delete());
    assert!(!form.loading);
    assert!(form.feedback().is_none());
    assert_eq!(form.fields, sample_fields());
    // Once declined there is nothing left to dispatch.
    assert!(!form.confirm_delete());
}

#[test]
fn confirm_delete_dispatches_exactly_once() {
    let mut form: ChallengeForm<&str> = ChallengeForm::new();

    form.request_delete();
    assert!(form.confirm_delete());
    assert!(form.loading);
    assert!(!form.confirm_delete());
}

#[test]
fn populate_substitutes_empty_strings_for_absent_fields() {
    let detail = ChallengeDetail {
        photo_url: Some("http://img".to_string()),
        name: Some("Run 5k".to_string()),
        points: Some(10),
        description: None,
        added_by: None,
    };

    let mut form: ChallengeForm<&str> = ChallengeForm::new();
    form.begin_load();
    assert_eq!(form.load_state(), LoadState::Loading);
    form.loaded(&detail);

    assert_eq!(form.load_state(), LoadState::Populated);
    assert_eq!(form.fields.photo_url, "http://img");
    assert_eq!(form.fields.name, "Run 5k");
    assert_eq!(form.fields.points, "10");
    assert_eq!(form.fields.description, "");
    assert_eq!(form.fields.added_by, "");
}

#[test]
fn load_failure_keeps_default_fields_and_reports() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();

    form.begin_load();
    form.load_failed(start);

    assert_eq!(form.load_state(), LoadState::LoadError);
    assert_eq!(form.fields, ChallengeFields::default());
    let feedback = form.feedback().expect("feedback");
    assert_eq!(feedback.message, "Failed to load challenge data");
    assert!(feedback.is_error);
}

#[test]
fn cancel_scheduled_makes_timers_no_ops() {
    let start = Instant::now();
    let mut form: ChallengeForm<&str> = ChallengeForm::new();

    form.begin_submit();
    form.finish_create(start, SubmitOutcome::Accepted, "active-challenges");
    form.cancel_scheduled();

    assert!(form.feedback().is_none());
    assert_eq!(form.tick(start + Duration::from_secs(10)), None);
}

#[test]
fn outcome_from_result_maps_error_variants() {
    assert_eq!(
        SubmitOutcome::from_result(&Ok(())),
        SubmitOutcome::Accepted
    );
    assert_eq!(
        SubmitOutcome::from_result(&Err(ClientError::Rejected {
            status: 400,
            body: "nope".to_string(),
        })),
        SubmitOutcome::Rejected {
            status: 400,
            body: "nope".to_string(),
        }
    );
    let url_err = ClientError::InvalidBaseUrl("::".parse::<url::Url>().unwrap_err());
    assert_eq!(
        SubmitOutcome::from_result(&Err(url_err)),
        SubmitOutcome::TransportFailed
    );
}
