//! Integration tests for the session state machine.
//!
//! Tests cover:
//! - Startup: Initializing until both models resolve, then NoImage
//! - Image selection and the ImageSelected shape
//! - Precondition violations (scan without image/models, re-entrant scan,
//!   double model load, reset outside ResultsShown)
//! - Reset restoring the exact NoImage shape

mod common;

use common::*;
use dualscan::inference::ScanOutcome;

#[test]
fn new_session_is_initializing() {
    let session = Session::new();

    assert_eq!(session.state(), SessionState::Initializing);
    assert!(!session.models_ready());
    assert!(session.image().is_none());
    assert!(!session.scanned());
    assert!(session.label_predictions().is_empty());
    assert!(session.detection_predictions().is_empty());
}

#[test]
fn models_loaded_reaches_no_image() {
    // The loader resolved both capabilities.
    let mut session = Session::new();
    session.models_loaded(cat_models()).unwrap();

    assert_eq!(session.state(), SessionState::NoImage);
    assert!(session.models_ready());
    assert!(session.image().is_none());
}

#[test]
fn models_load_only_once() {
    let mut session = ready_session(cat_models());

    let err = session.models_loaded(cat_models()).unwrap_err();
    assert_eq!(err, SessionError::ModelsAlreadyLoaded);
    assert_eq!(session.state(), SessionState::NoImage);
}

#[test]
fn selecting_image_reaches_image_selected() {
    // Handle stored, prediction sequences still empty.
    let mut session = ready_session(cat_models());
    session.select_image(test_handle()).unwrap();

    assert_eq!(session.state(), SessionState::ImageSelected);
    assert!(session.image().is_some());
    assert!(session.label_predictions().is_empty());
    assert!(session.detection_predictions().is_empty());
    assert!(!session.scanned());
}

#[test]
fn selecting_image_requires_models() {
    let mut session = Session::new();

    let err = session.select_image(test_handle()).unwrap_err();
    assert_eq!(err, SessionError::ModelsNotReady);
    assert_eq!(session.state(), SessionState::Initializing);
}

#[test]
fn no_image_swap_without_reset() {
    let mut session = ready_session(cat_models());
    session.select_image(test_handle()).unwrap();

    let err = session.select_image(test_handle()).unwrap_err();
    assert_eq!(err, SessionError::ImageAlreadySelected);
}

#[test]
fn scan_requires_selected_image() {
    let mut session = ready_session(cat_models());

    let err = session.begin_scan().unwrap_err();
    assert_eq!(err, SessionError::NoImageSelected);
    assert_eq!(session.state(), SessionState::NoImage);
}

#[test]
fn scan_requires_models() {
    let mut session = Session::new();

    let err = session.begin_scan().unwrap_err();
    assert_eq!(err, SessionError::ModelsNotReady);
}

#[test]
fn reentrant_scan_is_rejected() {
    // Only one inference round may be in flight per session.
    let mut session = ready_session(cat_models());
    session.select_image(test_handle()).unwrap();

    let _job = session.begin_scan().unwrap();
    assert_eq!(session.state(), SessionState::Scanning);

    let err = session.begin_scan().unwrap_err();
    assert_eq!(err, SessionError::ScanInFlight);
    assert_eq!(session.state(), SessionState::Scanning);
}

#[test]
fn scan_after_results_is_rejected() {
    let mut session = ready_session(cat_models());
    session.select_image(test_handle()).unwrap();
    let _job = session.begin_scan().unwrap();
    session
        .complete_scan(ScanOutcome {
            labels: vec![LabelPrediction::new("tabby cat", 0.91)],
            detections: vec![DetectionPrediction::new("cat", 0.88)],
        })
        .unwrap();

    let err = session.begin_scan().unwrap_err();
    assert_eq!(err, SessionError::AlreadyScanned);
    assert_eq!(session.state(), SessionState::ResultsShown);
}

#[test]
fn completed_scan_writes_both_sequences_together() {
    let mut session = ready_session(cat_models());
    session.select_image(test_handle()).unwrap();
    let _job = session.begin_scan().unwrap();

    // Nothing visible while scanning.
    assert!(session.label_predictions().is_empty());
    assert!(session.detection_predictions().is_empty());
    assert!(!session.scanned());

    session
        .complete_scan(ScanOutcome {
            labels: vec![LabelPrediction::new("tabby cat", 0.91)],
            detections: vec![DetectionPrediction::new("cat", 0.88)],
        })
        .unwrap();

    assert_eq!(session.state(), SessionState::ResultsShown);
    assert!(session.scanned());
    assert_eq!(session.label_predictions().len(), 1);
    assert_eq!(session.detection_predictions().len(), 1);
}

#[test]
fn complete_scan_requires_in_flight_round() {
    let mut session = ready_session(cat_models());
    session.select_image(test_handle()).unwrap();

    let err = session
        .complete_scan(ScanOutcome {
            labels: vec![],
            detections: vec![],
        })
        .unwrap_err();
    assert_eq!(err, SessionError::NoScanInFlight);
}

#[test]
fn failed_scan_keeps_image_selected_shape() {
    // Failure at the state-machine level: nothing stored, prior shape
    // stays active, error surfaced.
    let mut session = ready_session(cat_models());
    session.select_image(test_handle()).unwrap();
    let _job = session.begin_scan().unwrap();

    session
        .fail_scan(InferenceError::Detection("stub failure".into()))
        .unwrap();

    assert_eq!(session.state(), SessionState::ImageSelected);
    assert!(session.image().is_some());
    assert!(session.label_predictions().is_empty());
    assert!(session.detection_predictions().is_empty());
    assert!(!session.scanned());
    assert!(session.last_scan_error().is_some());
}

#[test]
fn scan_error_cleared_when_next_round_starts() {
    let mut session = ready_session(cat_models());
    session.select_image(test_handle()).unwrap();
    let _job = session.begin_scan().unwrap();
    session
        .fail_scan(InferenceError::Classification("stub failure".into()))
        .unwrap();
    assert!(session.last_scan_error().is_some());

    let _job = session.begin_scan().unwrap();
    assert!(session.last_scan_error().is_none());
}

#[test]
fn reset_restores_exact_no_image_shape() {
    // The reset transition, plus the full shape check: empty handle, empty
    // sequences, not scanned, models untouched.
    let mut session = ready_session(cat_models());
    session.select_image(test_handle()).unwrap();
    let _job = session.begin_scan().unwrap();
    session
        .complete_scan(ScanOutcome {
            labels: vec![LabelPrediction::new("tabby cat", 0.91)],
            detections: vec![DetectionPrediction::new("cat", 0.88)],
        })
        .unwrap();
    assert_eq!(session.state(), SessionState::ResultsShown);

    session.reset().unwrap();

    assert_eq!(session.state(), SessionState::NoImage);
    assert!(session.image().is_none());
    assert!(session.label_predictions().is_empty());
    assert!(session.detection_predictions().is_empty());
    assert!(!session.scanned());
    assert!(session.models_ready());
}

#[test]
fn reset_valid_only_with_results_shown() {
    let mut session = ready_session(cat_models());

    let err = session.reset().unwrap_err();
    assert_eq!(err, SessionError::NoResultsShown);

    session.select_image(test_handle()).unwrap();
    let err = session.reset().unwrap_err();
    assert_eq!(err, SessionError::NoResultsShown);
    assert_eq!(session.state(), SessionState::ImageSelected);
}
