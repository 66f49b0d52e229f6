//! Error types for dualscan.
//!
//! Each failure class gets its own enum: model loading is fatal to the
//! session, inference failures are recoverable, and `SessionError` covers
//! caller mistakes (commands issued in a state that does not accept them).
//! Nothing here is retried internally; state is left consistent and the
//! caller decides what to do next.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while acquiring the classifier capabilities. Fatal: the session
/// cannot progress past its initial state.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error(
        "model file not found: {path}\n\
         Place the .rten model files and their label vocabularies in the \
         model directory (see --model-dir)"
    )]
    MissingModel { path: PathBuf },

    #[error("label vocabulary not found: {path}")]
    MissingLabels { path: PathBuf },

    #[error("failed to read label vocabulary {path}: {source}")]
    LabelsIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to load model {path}: {message}")]
    Runtime { path: PathBuf, message: String },

    #[error("model loading task aborted: {0}")]
    TaskFailed(String),

    #[error("could not locate a home directory for the default model cache")]
    NoHomeDir,
}

/// Failure while decoding a user-selected file into an image handle.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open image {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Failure of a scan round. Recoverable: the session keeps its selected
/// image and no partial results are stored. `Clone` so the rendering
/// boundary can hold the last error while the session moves on.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    #[error("classification failed: {0}")]
    Classification(String),

    #[error("detection failed: {0}")]
    Detection(String),

    #[error("inference task aborted: {0}")]
    TaskFailed(String),
}

/// A command was issued in a state that does not accept it. These are
/// caller errors: the caller is expected to gate commands on the session
/// state rather than handle these by retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("models are already loaded")]
    ModelsAlreadyLoaded,

    #[error("models are not loaded yet")]
    ModelsNotReady,

    #[error("no image selected")]
    NoImageSelected,

    #[error("an image is already selected")]
    ImageAlreadySelected,

    #[error("a scan is already in flight")]
    ScanInFlight,

    #[error("no scan is in flight")]
    NoScanInFlight,

    #[error("image was already scanned")]
    AlreadyScanned,

    #[error("no results to reset from")]
    NoResultsShown,
}
