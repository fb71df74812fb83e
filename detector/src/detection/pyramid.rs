use anyhow::bail;
use itertools::Itertools;
use nalgebra::DMatrix;
use opencv::{
    core::{Mat, Size},
    imgproc::{resize, INTER_LINEAR},
    prelude::*,
};
use rayon::prelude::*;

use super::{
    bounding_box::{BoundingBox, Detection},
    classifier::WindowClassifier,
    lbp::{descriptor_len, lbp_image, window_descriptor},
    params::DetectorParams,
};
use crate::utils::mat_to_dmatrix;

/// Runs the sliding window detector over an image pyramid built from `gray`
/// and returns every window scoring above the threshold, in original image
/// coordinates.
pub fn detect_pyramid<C: WindowClassifier + ?Sized>(
    gray: &Mat,
    classifier: &C,
    params: &DetectorParams,
) -> anyhow::Result<Vec<Detection>> {
    params.validate()?;
    check_descriptor_len(classifier, params)?;

    let rows = gray.rows();
    let cols = gray.cols();
    let mut detections = Vec::new();

    for level in 0..params.levels {
        let scale = params.factor.powi(level as i32);
        let level_rows = (rows as f64 * scale).round() as i32;
        let level_cols = (cols as f64 * scale).round() as i32;
        if (level_rows as usize) < params.window.rows || (level_cols as usize) < params.window.cols {
            log::debug!("Pyramid level {level} ({level_cols}x{level_rows}) is smaller than the window, stopping");
            break;
        }

        let level_img = if level == 0 {
            mat_to_dmatrix(gray)?
        } else {
            let mut resized = Mat::default();
            resize(gray, &mut resized, Size::new(level_cols, level_rows), 0.0, 0.0, INTER_LINEAR)?;
            mat_to_dmatrix(&resized)?
        };

        let found = scan_level(&level_img, classifier, params)?;
        log::debug!("Pyramid level {level} (scale {scale:.3}): {} candidates", found.len());

        detections.extend(found.into_iter().map(|d| {
            Detection::new(d.bbox.scaled(1.0 / scale).clipped(cols, rows), d.score)
        }));
    }

    Ok(detections)
}

/// Scans a single pyramid level. Boxes are in the level's own coordinates.
/// `params` must already be validated.
pub(crate) fn scan_level<C: WindowClassifier + ?Sized>(
    img: &DMatrix<u8>,
    classifier: &C,
    params: &DetectorParams,
) -> anyhow::Result<Vec<Detection>> {
    let win = params.window;
    if img.nrows() < win.rows || img.ncols() < win.cols {
        return Ok(Vec::new());
    }

    let lbp = lbp_image(img);
    let positions = (0..=img.nrows() - win.rows)
        .step_by(params.stride)
        .cartesian_product((0..=img.ncols() - win.cols).step_by(params.stride))
        .collect_vec();

    let descriptors: Vec<Vec<f32>> = positions
        .par_iter()
        .map(|&(top, left)| window_descriptor(&lbp, top, left, win.rows, win.cols, &params.cells))
        .collect();

    let mut detections = Vec::new();
    for ((top, left), descriptor) in positions.into_iter().zip(descriptors) {
        let score = classifier.score(&descriptor)?;
        if score > params.threshold {
            let bbox = BoundingBox::new(left as i32, top as i32, win.cols as i32, win.rows as i32);
            detections.push(Detection::new(bbox, score));
        }
    }

    Ok(detections)
}

fn check_descriptor_len<C: WindowClassifier + ?Sized>(classifier: &C, params: &DetectorParams) -> anyhow::Result<()> {
    let expected = descriptor_len(&params.cells);
    match classifier.descriptor_len() {
        Some(len) if len != expected => bail!(
            "Classifier expects descriptors of {len} values but a {}x{} cell grid produces {expected}",
            params.cells.rows,
            params.cells.cols
        ),
        _ => Ok(()),
    }
}
