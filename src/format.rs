//! Display formatting for prediction results.
//!
//! Pure projection: no reordering, no filtering. Display order equals the
//! order the respective inference call returned. Values are rounded to
//! three decimals for display only; the stored predictions keep full
//! precision.

use crate::models::{DetectionPrediction, LabelPrediction};

pub fn label_row(prediction: &LabelPrediction) -> String {
    format!(
        "Prediction: {} - Probability: {:.3}",
        prediction.label, prediction.probability
    )
}

pub fn detection_row(prediction: &DetectionPrediction) -> String {
    format!(
        "Prediction: {} - Probability: {:.3}",
        prediction.label, prediction.score
    )
}

pub fn label_rows(predictions: &[LabelPrediction]) -> Vec<String> {
    predictions.iter().map(label_row).collect()
}

pub fn detection_rows(predictions: &[DetectionPrediction]) -> Vec<String> {
    predictions.iter().map(detection_row).collect()
}
