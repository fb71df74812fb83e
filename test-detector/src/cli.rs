use std::path::PathBuf;

use clap::Parser;
use detector::DetectorParams;

#[derive(Debug, Parser)]
#[clap(name = "test-detector", about = "Detects objects with a LBP-based detector.")]
pub struct Cli {
    /// Path to the model file
    #[clap(short, long, default_value = "model_svm.yml")]
    pub model: PathBuf,

    /// Stride of the sliding window, in pixels
    #[clap(short, long, default_value_t = 25)]
    pub stride: usize,

    /// Detection threshold
    #[clap(short = 't', long, default_value_t = 0.0)]
    pub thrdet: f32,

    /// Number of levels of the pyramid search
    #[clap(short, long, default_value_t = 3)]
    pub levels: usize,

    /// Scale factor between pyramid levels
    #[clap(short, long, default_value_t = 0.5)]
    pub factor: f64,

    /// IoU threshold to accept a detection as a true positive
    #[clap(long = "iou_th", default_value_t = 0.5)]
    pub iou_th: f32,

    /// Do not show the detections nor wait for a key after every image
    #[clap(long)]
    pub no_display: bool,

    /// Save annotated images in this directory
    #[clap(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,

    /// File with test images, one `<image> <annotations>` pair per line
    pub test_dataset: PathBuf,
}

impl Cli {
    pub fn detector_params(&self) -> DetectorParams {
        DetectorParams {
            stride: self.stride,
            levels: self.levels,
            factor: self.factor,
            threshold: self.thrdet,
            ..DetectorParams::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_detector_defaults() {
        let cli = Cli::parse_from(["test-detector", "test.txt"]);
        assert_eq!(cli.model, PathBuf::from("model_svm.yml"));
        assert_eq!(cli.iou_th, 0.5);
        assert!(!cli.no_display);
        assert_eq!(cli.detector_params(), DetectorParams::default());
    }

    #[test]
    fn parses_short_and_long_flags() {
        let cli = Cli::parse_from([
            "test-detector", "-m", "svm.xml", "-s", "8", "-t", "0.3", "-l", "4", "-f", "0.7", "--iou_th", "0.6",
            "--no-display", "-o", "out", "test.txt",
        ]);
        let params = cli.detector_params();
        assert_eq!(cli.model, PathBuf::from("svm.xml"));
        assert_eq!(params.stride, 8);
        assert_eq!(params.threshold, 0.3);
        assert_eq!(params.levels, 4);
        assert_eq!(params.factor, 0.7);
        assert_eq!(cli.iou_th, 0.6);
        assert!(cli.no_display);
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.test_dataset, PathBuf::from("test.txt"));
    }

    #[test]
    fn dataset_is_required() {
        assert!(Cli::try_parse_from(["test-detector"]).is_err());
    }
}
