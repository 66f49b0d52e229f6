//! The session state machine.
//!
//! `Session` is the sole mutable aggregate of the pipeline and the only
//! place with transition logic. Every transition is a method; there are no
//! ad-hoc field writes, so the state tag reported by [`Session::state`] can
//! never disagree with the fields. Asynchronous work (model loading, a scan
//! round) happens outside the session and is applied here as one atomic
//! update when it resolves.
//!
//! ```text
//! Initializing -> NoImage -> ImageSelected -> Scanning -> ResultsShown
//!                    ^                           |             |
//!                    |                     (failure: back      |
//!                    |                      to ImageSelected)  |
//!                    +--------------- reset -------------------+
//! ```

use crate::error::{InferenceError, SessionError};
use crate::inference::{ScanJob, ScanOutcome};
use crate::ingest::ImageHandle;
use crate::models::{DetectionPrediction, LabelPrediction};
use crate::provider::ModelSet;

/// Where the session currently is. Derived from the aggregate fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Models are still loading; no input is accepted.
    Initializing,
    /// Models ready, waiting for an image.
    NoImage,
    /// An image is selected and can be scanned.
    ImageSelected,
    /// A scan round is in flight. Further scan commands are rejected.
    Scanning,
    /// Both prediction sequences are populated.
    ResultsShown,
}

#[derive(Debug, Default)]
pub struct Session {
    models: Option<ModelSet>,
    image: Option<ImageHandle>,
    label_predictions: Vec<LabelPrediction>,
    detection_predictions: Vec<DetectionPrediction>,
    scanned: bool,
    scanning: bool,
    last_scan_error: Option<InferenceError>,
}

impl Session {
    /// A fresh session: no models, no image, nothing scanned.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.models.is_none() {
            SessionState::Initializing
        } else if self.image.is_none() {
            SessionState::NoImage
        } else if self.scanning {
            SessionState::Scanning
        } else if self.scanned {
            SessionState::ResultsShown
        } else {
            SessionState::ImageSelected
        }
    }

    pub fn models_ready(&self) -> bool {
        self.models.is_some()
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    pub fn scanned(&self) -> bool {
        self.scanned
    }

    /// Stored at full precision; empty unless [`Session::scanned`].
    pub fn label_predictions(&self) -> &[LabelPrediction] {
        &self.label_predictions
    }

    pub fn detection_predictions(&self) -> &[DetectionPrediction] {
        &self.detection_predictions
    }

    /// The failure of the most recent scan round, if it failed. Cleared
    /// when the next round starts.
    pub fn last_scan_error(&self) -> Option<&InferenceError> {
        self.last_scan_error.as_ref()
    }

    /// Initializing → NoImage, on the model loader resolving. Happens at
    /// most once per session; a failed load leaves the session in
    /// Initializing for good.
    pub fn models_loaded(&mut self, models: ModelSet) -> Result<(), SessionError> {
        if self.models.is_some() {
            return Err(SessionError::ModelsAlreadyLoaded);
        }
        self.models = Some(models);
        Ok(())
    }

    /// NoImage → ImageSelected. Stores the handle, leaves both prediction
    /// sequences empty. There is no path that swaps the image without a
    /// reset in between.
    pub fn select_image(&mut self, image: ImageHandle) -> Result<(), SessionError> {
        if self.models.is_none() {
            return Err(SessionError::ModelsNotReady);
        }
        if self.image.is_some() {
            return Err(SessionError::ImageAlreadySelected);
        }
        self.image = Some(image);
        Ok(())
    }

    /// ImageSelected → Scanning. Hands out everything the scan round needs;
    /// the caller runs [`crate::inference::scan`] and reports back with
    /// [`Session::complete_scan`] or [`Session::fail_scan`]. Only one round
    /// may be in flight per session.
    pub fn begin_scan(&mut self) -> Result<ScanJob, SessionError> {
        if self.scanning {
            return Err(SessionError::ScanInFlight);
        }
        let Some(models) = &self.models else {
            return Err(SessionError::ModelsNotReady);
        };
        let Some(image) = &self.image else {
            return Err(SessionError::NoImageSelected);
        };
        if self.scanned {
            return Err(SessionError::AlreadyScanned);
        }

        self.scanning = true;
        self.last_scan_error = None;
        Ok(ScanJob {
            image: image.clone(),
            models: models.clone(),
        })
    }

    /// Scanning → ResultsShown. Writes both sequences and the scanned flag
    /// as one update; readers never see one sequence without the other.
    pub fn complete_scan(&mut self, outcome: ScanOutcome) -> Result<(), SessionError> {
        if !self.scanning {
            return Err(SessionError::NoScanInFlight);
        }
        self.label_predictions = outcome.labels;
        self.detection_predictions = outcome.detections;
        self.scanned = true;
        self.scanning = false;
        Ok(())
    }

    /// Scanning → ImageSelected. Nothing is stored; the selected image and
    /// the pre-scan shape stay exactly as they were, and the error is kept
    /// for the rendering boundary to surface.
    pub fn fail_scan(&mut self, error: InferenceError) -> Result<(), SessionError> {
        if !self.scanning {
            return Err(SessionError::NoScanInFlight);
        }
        self.scanning = false;
        self.last_scan_error = Some(error);
        Ok(())
    }

    /// ResultsShown → NoImage. Releases the image handle, clears both
    /// sequences and the scanned flag. Model state is untouched.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if !self.scanned {
            return Err(SessionError::NoResultsShown);
        }
        self.image = None;
        self.label_predictions = Vec::new();
        self.detection_predictions = Vec::new();
        self.scanned = false;
        self.last_scan_error = None;
        Ok(())
    }
}
