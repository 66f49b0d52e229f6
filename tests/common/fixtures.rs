use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dualscan::{
    Classifier, DetectionPrediction, Detector, ImageHandle, InferenceError, LabelPrediction,
    ModelSet, Session,
};
use image::{DynamicImage, ImageBuffer, Rgb};
use tempfile::NamedTempFile;

/// Creates a 100x100 red test image and returns the temp file.
/// The file will be automatically cleaned up when dropped.
pub fn create_test_image() -> NamedTempFile {
    let img = ImageBuffer::from_fn(100, 100, |_, _| Rgb([255u8, 0u8, 0u8]));
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// An already-decoded handle, for tests that skip the file boundary.
pub fn test_handle() -> ImageHandle {
    let img = ImageBuffer::from_fn(64, 64, |_, _| Rgb([0u8, 128u8, 255u8]));
    ImageHandle::from_image(DynamicImage::ImageRgb8(img))
}

/// Classifier stub returning a fixed prediction sequence and counting calls.
pub struct StubClassifier {
    pub predictions: Vec<LabelPrediction>,
    pub calls: AtomicUsize,
}

impl Classifier for StubClassifier {
    fn classify(&self, _image: &ImageHandle) -> Result<Vec<LabelPrediction>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.predictions.clone())
    }
}

/// Detector stub returning a fixed prediction sequence and counting calls.
pub struct StubDetector {
    pub predictions: Vec<DetectionPrediction>,
    pub calls: AtomicUsize,
}

impl Detector for StubDetector {
    fn detect(&self, _image: &ImageHandle) -> Result<Vec<DetectionPrediction>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.predictions.clone())
    }
}

pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn classify(&self, _image: &ImageHandle) -> Result<Vec<LabelPrediction>, InferenceError> {
        Err(InferenceError::Classification("stub failure".into()))
    }
}

pub struct FailingDetector;

impl Detector for FailingDetector {
    fn detect(&self, _image: &ImageHandle) -> Result<Vec<DetectionPrediction>, InferenceError> {
        Err(InferenceError::Detection("stub failure".into()))
    }
}

/// A ModelSet around arbitrary capability implementations.
pub fn model_set(
    classifier: impl Classifier + 'static,
    detector: impl Detector + 'static,
) -> ModelSet {
    ModelSet {
        classifier: Arc::new(classifier),
        detector: Arc::new(detector),
    }
}

/// Capabilities that always find a cat: classify says "tabby cat" at 0.91,
/// detect says "cat" at 0.88.
pub fn cat_models() -> ModelSet {
    model_set(
        StubClassifier {
            predictions: vec![LabelPrediction::new("tabby cat", 0.91)],
            calls: AtomicUsize::new(0),
        },
        StubDetector {
            predictions: vec![DetectionPrediction::new("cat", 0.88)],
            calls: AtomicUsize::new(0),
        },
    )
}

/// A session that already finished model loading.
pub fn ready_session(models: ModelSet) -> Session {
    let mut session = Session::new();
    session
        .models_loaded(models)
        .expect("fresh session accepts models");
    session
}
