//! Inference coordination: one classify call and one detect call against
//! the same image handle, gathered into a single all-or-nothing outcome.
//!
//! The two calls address independent capabilities and run concurrently on
//! blocking tasks; their relative order is unspecified. Either failure
//! fails the whole round, so the session only ever applies both prediction
//! sequences together or neither.

use crate::error::InferenceError;
use crate::ingest::ImageHandle;
use crate::models::{DetectionPrediction, LabelPrediction};
use crate::provider::ModelSet;

/// Everything one scan round needs, cloned out of the session so the round
/// can run without holding the session. Produced by
/// [`Session::begin_scan`](crate::session::Session::begin_scan).
#[derive(Debug, Clone)]
pub struct ScanJob {
    pub image: ImageHandle,
    pub models: ModelSet,
}

/// Both prediction sequences from one round, in the order the respective
/// capability returned them.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub labels: Vec<LabelPrediction>,
    pub detections: Vec<DetectionPrediction>,
}

/// Run both inference calls and wait for both to complete.
///
/// Returns only after both calls have fully resolved; on any failure the
/// outcome is dropped wholesale and the caller leaves its state untouched.
pub async fn scan(job: ScanJob) -> Result<ScanOutcome, InferenceError> {
    let classify_image = job.image.clone();
    let classifier = job.models.classifier.clone();
    let classify = tokio::task::spawn_blocking(move || classifier.classify(&classify_image));

    let detect_image = job.image;
    let detector = job.models.detector;
    let detect = tokio::task::spawn_blocking(move || detector.detect(&detect_image));

    let (labels, detections) = tokio::try_join!(classify, detect)
        .map_err(|e| InferenceError::TaskFailed(e.to_string()))?;

    Ok(ScanOutcome {
        labels: labels?,
        detections: detections?,
    })
}
