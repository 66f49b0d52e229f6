pub mod error;
pub mod format;
pub mod inference;
pub mod ingest;
pub mod models;
pub mod provider;
pub mod session;

pub use error::{IngestError, InferenceError, ModelLoadError, SessionError};
pub use inference::{ScanJob, ScanOutcome};
pub use ingest::ImageHandle;
pub use models::{BoundingBox, DetectionPrediction, LabelPrediction};
pub use provider::{Classifier, Detector, MobilenetVariant, ModelSet, ProviderConfig};
pub use session::{Session, SessionState};

#[cfg(feature = "gui")]
pub mod gui;
