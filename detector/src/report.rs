use std::path::Path;

use anyhow::Context;
use opencv::{
    core::{Mat, Scalar, Vector},
    highgui, imgcodecs,
    imgproc::{rectangle, LINE_8},
};
use rand::Rng;

use crate::detection::bounding_box::{BoundingBox, Detection};

pub const BOX_THICKNESS: i32 = 3;
pub const WINDOW_NAME: &str = "Detection";

fn ground_truth_colour() -> Scalar {
    Scalar::new(0.0, 255.0, 0.0, 0.0)
}

/// Random colour without a green component, so detections never look like ground truth.
pub fn detection_colour<R: Rng>(rng: &mut R) -> Scalar {
    let b = rng.gen_range(0..254);
    let r = rng.gen_range(0..254);
    Scalar::new(b as f64, 0.0, r as f64, 0.0)
}

pub fn draw_ground_truth(img: &mut Mat, boxes: &[BoundingBox]) -> anyhow::Result<()> {
    for b in boxes {
        rectangle(img, (*b).into(), ground_truth_colour(), BOX_THICKNESS, LINE_8, 0)?;
    }

    Ok(())
}

pub fn draw_detections<R: Rng>(img: &mut Mat, detections: &[Detection], rng: &mut R) -> anyhow::Result<()> {
    for det in detections {
        rectangle(img, det.bbox.into(), detection_colour(rng), BOX_THICKNESS, LINE_8, 0)?;
    }

    Ok(())
}

/// Shows the image and blocks until a key is pressed.
pub fn show_and_wait(img: &Mat) -> anyhow::Result<()> {
    highgui::imshow(WINDOW_NAME, img)?;
    highgui::wait_key(0)?;

    Ok(())
}

/// Writes the annotated image to `dir`, keeping the source file name.
pub fn save_annotated(img: &Mat, dir: &Path, image_path: &Path) -> anyhow::Result<()> {
    let filename = image_path
        .file_name()
        .with_context(|| format!("'{}' has no file name", image_path.display()))?;
    let out = dir.join(filename);
    let written = imgcodecs::imwrite(&out.to_string_lossy(), img, &Vector::new())?;
    if !written {
        anyhow::bail!("could not write '{}'", out.display());
    }
    log::debug!("Saved annotated image to '{}'", out.display());

    Ok(())
}
