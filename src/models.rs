/// Bounding box reported by the object detector, in pixel coordinates of
/// the scanned image. Carried through to the rendering boundary unmodified;
/// the session core never interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Whole-image classification output: a category name with its probability.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPrediction {
    pub label: String,
    /// In [0, 1]. Stored at full precision; rounding happens at display time.
    pub probability: f32,
}

/// Object detection output: a category name, its confidence, and where the
/// detector found it.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionPrediction {
    pub label: String,
    /// In [0, 1]. Stored at full precision; rounding happens at display time.
    pub score: f32,
    pub bbox: Option<BoundingBox>,
}

impl LabelPrediction {
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

impl DetectionPrediction {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
            bbox: None,
        }
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }
}
