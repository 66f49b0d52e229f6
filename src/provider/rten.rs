//! rten-backed capabilities.
//!
//! Models are plain `.rten` files in the configured model directory, each
//! with a newline-separated label vocabulary beside it. The classifier is a
//! MobileNet-style network taking a normalized `[1,3,S,S]` tensor and
//! producing one logit per label. The detector is an SSD-style network with
//! three outputs: boxes `[1,N,4]` (normalized corners), scores `[1,N]` and
//! class indices `[1,N]`.

use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;
use rten::{Model, NodeId};
use rten_tensor::NdTensor;
use rten_tensor::prelude::*;

use crate::error::{InferenceError, ModelLoadError};
use crate::ingest::ImageHandle;
use crate::models::{BoundingBox, DetectionPrediction, LabelPrediction};
use crate::provider::{Classifier, Detector, ProviderConfig};

/// How many label predictions a classify call returns.
const CLASSIFY_TOP_K: usize = 3;

/// Detections below this score are dropped by the provider.
const DETECT_SCORE_THRESHOLD: f32 = 0.5;

const CLASSIFIER_INPUT_SIZE: u32 = 224;
const DETECTOR_INPUT_SIZE: u32 = 300;

pub struct RtenClassifier {
    model: Model,
    labels: Vec<String>,
}

impl RtenClassifier {
    pub fn load(config: &ProviderConfig) -> Result<Self, ModelLoadError> {
        let model_path = config.classifier_model_path();
        let labels = read_labels(&config.classifier_labels_path())?;

        if config.verbose {
            println!("Loading classifier: {}", model_path.display());
        }
        let model = load_model(&model_path)?;

        Ok(Self { model, labels })
    }
}

impl Classifier for RtenClassifier {
    fn classify(&self, image: &ImageHandle) -> Result<Vec<LabelPrediction>, InferenceError> {
        let input = image_to_tensor(image.image(), CLASSIFIER_INPUT_SIZE);

        let output = self
            .model
            .run_one(input.view().into(), None)
            .map_err(|e| InferenceError::Classification(e.to_string()))?;
        let logits: NdTensor<f32, 2> = output
            .try_into()
            .map_err(|_| InferenceError::Classification("unexpected output shape".into()))?;

        // Batch size is 1, so the flattened tensor is the single row.
        let probabilities = softmax(logits.iter().copied().collect());

        // Rank by probability, keep the top K that have a known label.
        let mut indices: Vec<usize> = (0..probabilities.len()).collect();
        indices.sort_by(|&a, &b| probabilities[b].total_cmp(&probabilities[a]));

        Ok(indices
            .into_iter()
            .filter_map(|i| {
                self.labels
                    .get(i)
                    .map(|label| LabelPrediction::new(label.clone(), probabilities[i]))
            })
            .take(CLASSIFY_TOP_K)
            .collect())
    }
}

pub struct RtenDetector {
    model: Model,
    labels: Vec<String>,
}

impl RtenDetector {
    pub fn load(config: &ProviderConfig) -> Result<Self, ModelLoadError> {
        let model_path = config.detector_model_path();
        let labels = read_labels(&config.detector_labels_path())?;

        if config.verbose {
            println!("Loading detector: {}", model_path.display());
        }
        let model = load_model(&model_path)?;

        Ok(Self { model, labels })
    }

    fn io_ids(&self) -> Result<(NodeId, Vec<NodeId>), InferenceError> {
        let input_id = self
            .model
            .input_ids()
            .first()
            .copied()
            .ok_or_else(|| InferenceError::Detection("model has no inputs".into()))?;
        let output_ids = self.model.output_ids().to_vec();
        if output_ids.len() != 3 {
            return Err(InferenceError::Detection(format!(
                "expected 3 outputs (boxes, scores, classes), model has {}",
                output_ids.len()
            )));
        }
        Ok((input_id, output_ids))
    }
}

impl Detector for RtenDetector {
    fn detect(&self, image: &ImageHandle) -> Result<Vec<DetectionPrediction>, InferenceError> {
        let input = image_to_tensor(image.image(), DETECTOR_INPUT_SIZE);
        let (input_id, output_ids) = self.io_ids()?;

        let mut outputs = self
            .model
            .run(vec![(input_id, input.view().into())], &output_ids, None)
            .map_err(|e| InferenceError::Detection(e.to_string()))?;

        let classes: NdTensor<f32, 2> = outputs
            .remove(2)
            .try_into()
            .map_err(|_| InferenceError::Detection("unexpected classes shape".into()))?;
        let scores: NdTensor<f32, 2> = outputs
            .remove(1)
            .try_into()
            .map_err(|_| InferenceError::Detection("unexpected scores shape".into()))?;
        let boxes: NdTensor<f32, 3> = outputs
            .remove(0)
            .try_into()
            .map_err(|_| InferenceError::Detection("unexpected boxes shape".into()))?;

        let (img_w, img_h) = (image.width() as f32, image.height() as f32);
        let mut detections = Vec::new();

        for i in 0..scores.size(1) {
            let score = scores[[0, i]];
            if score < DETECT_SCORE_THRESHOLD {
                continue;
            }
            let class = classes[[0, i]] as usize;
            let Some(label) = self.labels.get(class) else {
                continue;
            };

            // Boxes are normalized [y1, x1, y2, x2]; map to pixel
            // coordinates of the original image. The geometry is carried
            // through to the caller, never consumed here.
            let (y1, x1, y2, x2) = (
                boxes[[0, i, 0]],
                boxes[[0, i, 1]],
                boxes[[0, i, 2]],
                boxes[[0, i, 3]],
            );
            let bbox = BoundingBox {
                x: x1 * img_w,
                y: y1 * img_h,
                width: (x2 - x1) * img_w,
                height: (y2 - y1) * img_h,
            };

            detections.push(DetectionPrediction::new(label.clone(), score).with_bbox(bbox));
        }

        Ok(detections)
    }
}

fn load_model(path: &Path) -> Result<Model, ModelLoadError> {
    if !path.exists() {
        return Err(ModelLoadError::MissingModel {
            path: path.to_path_buf(),
        });
    }
    Model::load_file(path).map_err(|e| ModelLoadError::Runtime {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_labels(path: &Path) -> Result<Vec<String>, ModelLoadError> {
    if !path.exists() {
        return Err(ModelLoadError::MissingLabels {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| ModelLoadError::LabelsIo {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Resize to the model's square input and normalize RGB to [-1, 1], NCHW.
fn image_to_tensor(image: &DynamicImage, size: u32) -> NdTensor<f32, 4> {
    let resized = image::imageops::resize(&image.to_rgb8(), size, size, FilterType::CatmullRom);

    let mut tensor = NdTensor::zeros([1, 3, size as usize, size as usize]);
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, c, y as usize, x as usize]] = pixel[c] as f32 / 127.5 - 1.0;
        }
    }
    tensor
}

fn softmax(logits: Vec<f32>) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|v| v / sum).collect()
}
