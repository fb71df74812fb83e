mod preprocess;
mod utils;

pub mod dataset;
pub mod detection;
pub mod evaluation;
pub mod report;

use anyhow::bail;
use opencv::{
    core::Mat,
    imgcodecs::{imread, IMREAD_COLOR},
    prelude::*,
};
use rand::Rng;

use dataset::{read_inria_annotations, DatasetEntry};
use evaluation::{compute_tp_fp, MatchCounts, RunStatistics};

pub use detection::{
    bounding_box::{BoundingBox, Detection},
    classifier::{LinearClassifier, SvmClassifier, WindowClassifier},
    nms::{non_max_suppression, MAX_DETECTIONS_PER_IMAGE, NMS_OVERLAP_THRESHOLD},
    params::{CellGrid, DetectorParams, WindowSize},
    pyramid::detect_pyramid,
};
pub use preprocess::to_grayscale;

/// Multi-scale LBP detector followed by non-maximum suppression.
pub struct DetectorSystem<C: WindowClassifier> {
    classifier: C,
    params: DetectorParams,
}

impl<C: WindowClassifier> DetectorSystem<C> {
    pub fn new(classifier: C, params: DetectorParams) -> anyhow::Result<Self> {
        params.validate()?;
        if let Some(len) = classifier.descriptor_len() {
            log::info!("Descriptor dimension: {len}");
        }

        Ok(Self { classifier, params })
    }

    /// Detects objects in a colour or gray image. At most
    /// [`MAX_DETECTIONS_PER_IMAGE`] detections are returned, best first.
    pub fn process_image(&self, img: &Mat) -> anyhow::Result<Vec<Detection>> {
        let gray = to_grayscale(img)?;
        let candidates = detect_pyramid(&gray, &self.classifier, &self.params)?;
        let kept = non_max_suppression(
            &candidates,
            self.params.threshold,
            NMS_OVERLAP_THRESHOLD,
            MAX_DETECTIONS_PER_IMAGE,
        );
        log::debug!("{} candidates, {} after NMS", candidates.len(), kept.len());

        Ok(kept.into_iter().map(|i| candidates[i]).collect())
    }

    /// Loads one dataset entry, detects on its image and scores the detections
    /// against its annotations. `stats` is only updated when every step succeeds.
    pub fn evaluate_entry(
        &self,
        entry: &DatasetEntry,
        iou_threshold: f32,
        stats: &mut RunStatistics,
    ) -> anyhow::Result<EntryEvaluation> {
        let image = imread(&entry.image.to_string_lossy(), IMREAD_COLOR)?;
        if image.empty() {
            bail!("could not open image '{}'", entry.image.display());
        }
        let annotations = read_inria_annotations(&entry.annotations)?;

        log::info!("Processing image: '{}'", entry.image.display());
        let detections = self.process_image(&image)?;
        log::info!("done!");
        for det in &detections {
            log::info!("{} {}", det.bbox, det.score);
        }

        let counts = compute_tp_fp(&annotations, &detections, iou_threshold);
        log::info!("#ann: {} tp: {} fp: {}", annotations.len(), counts.true_positives, counts.false_positives);
        stats.record(annotations.len(), counts);

        Ok(EntryEvaluation { image, annotations, detections, counts })
    }
}

/// Outcome of one dataset entry.
pub struct EntryEvaluation {
    pub image: Mat,
    pub annotations: Vec<BoundingBox>,
    pub detections: Vec<Detection>,
    pub counts: MatchCounts,
}

impl EntryEvaluation {
    /// Copy of the image with the ground truth and the detections drawn on it.
    pub fn annotated<R: Rng>(&self, rng: &mut R) -> anyhow::Result<Mat> {
        let mut img = self.image.try_clone()?;
        report::draw_ground_truth(&mut img, &self.annotations)?;
        report::draw_detections(&mut img, &self.detections, rng)?;

        Ok(img)
    }
}
