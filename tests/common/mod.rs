mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from dualscan for tests
pub use dualscan::{
    BoundingBox, DetectionPrediction, ImageHandle, InferenceError, LabelPrediction, ModelSet,
    Session, SessionError, SessionState,
};
