//! Model provider boundary.
//!
//! The session core only ever sees the two capability traits defined here;
//! the concrete rten-backed implementation lives in the `rten` submodule.
//! Capabilities are shared as `Arc<dyn …>`: read-only, invocation-only,
//! concurrently callable for the whole session.

pub mod rten;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::ValueEnum;

use crate::error::{InferenceError, ModelLoadError};
use crate::ingest::ImageHandle;
use crate::models::{DetectionPrediction, LabelPrediction};

/// Whole-image label prediction capability.
pub trait Classifier: Send + Sync {
    fn classify(&self, image: &ImageHandle) -> Result<Vec<LabelPrediction>, InferenceError>;
}

/// Multi-object detection capability.
pub trait Detector: Send + Sync {
    fn detect(&self, image: &ImageHandle) -> Result<Vec<DetectionPrediction>, InferenceError>;
}

/// Both loaded capabilities. Cloning shares the underlying models.
#[derive(Clone)]
pub struct ModelSet {
    pub classifier: Arc<dyn Classifier>,
    pub detector: Arc<dyn Detector>,
}

impl std::fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ModelSet")
    }
}

/// Which classifier variant to load from the model directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MobilenetVariant {
    #[default]
    V1,
    V2,
}

impl MobilenetVariant {
    fn file_stem(self) -> &'static str {
        match self {
            MobilenetVariant::V1 => "mobilenet-v1",
            MobilenetVariant::V2 => "mobilenet-v2",
        }
    }
}

impl std::fmt::Display for MobilenetVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MobilenetVariant::V1 => write!(f, "v1"),
            MobilenetVariant::V2 => write!(f, "v2"),
        }
    }
}

/// Provider-specific configuration: where the model files live and which
/// classifier variant to use.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub model_dir: PathBuf,
    pub variant: MobilenetVariant,
    pub verbose: bool,
}

impl ProviderConfig {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            variant: MobilenetVariant::default(),
            verbose: false,
        }
    }

    /// Standard cache location, `~/.cache/dualscan`.
    pub fn default_model_dir() -> Result<PathBuf, ModelLoadError> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| ModelLoadError::NoHomeDir)?;
        Ok(Path::new(&home).join(".cache/dualscan"))
    }

    pub fn with_variant(mut self, variant: MobilenetVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub(crate) fn classifier_model_path(&self) -> PathBuf {
        self.model_dir
            .join(format!("{}.rten", self.variant.file_stem()))
    }

    pub(crate) fn classifier_labels_path(&self) -> PathBuf {
        self.model_dir.join("imagenet-labels.txt")
    }

    pub(crate) fn detector_model_path(&self) -> PathBuf {
        self.model_dir.join("ssd-detector.rten")
    }

    pub(crate) fn detector_labels_path(&self) -> PathBuf {
        self.model_dir.join("coco-labels.txt")
    }
}

/// Acquire both capabilities. Invoked exactly once per session, at startup.
///
/// Both loads are started together and both must complete before this
/// resolves; no partial readiness is observable. Either failure fails the
/// whole load, which is fatal to the session (no retry, no fallback, no
/// timeout beyond what the runtime imposes).
pub async fn load(config: &ProviderConfig) -> Result<ModelSet, ModelLoadError> {
    let classifier_config = config.clone();
    let detector_config = config.clone();

    let classifier = tokio::task::spawn_blocking(move || {
        rten::RtenClassifier::load(&classifier_config).map(|c| Arc::new(c) as Arc<dyn Classifier>)
    });
    let detector = tokio::task::spawn_blocking(move || {
        rten::RtenDetector::load(&detector_config).map(|d| Arc::new(d) as Arc<dyn Detector>)
    });

    let (classifier, detector) = tokio::try_join!(classifier, detector)
        .map_err(|e| ModelLoadError::TaskFailed(e.to_string()))?;

    Ok(ModelSet {
        classifier: classifier?,
        detector: detector?,
    })
}
