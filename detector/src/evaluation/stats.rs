use std::fmt;

use super::matching::MatchCounts;

/// Totals accumulated over a whole evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub images: usize,
    pub annotations: usize,
    pub true_positives: usize,
    pub false_positives: usize,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the result of one image.
    pub fn record(&mut self, annotations: usize, counts: MatchCounts) {
        self.images += 1;
        self.annotations += annotations;
        self.true_positives += counts.true_positives;
        self.false_positives += counts.false_positives;
    }

    /// Share of annotated objects that were detected, `None` without annotations.
    pub fn detection_rate(&self) -> Option<f64> {
        if self.annotations == 0 {
            return None;
        }
        Some(self.true_positives as f64 / self.annotations as f64)
    }

    /// False positives per image, `None` when no image was processed.
    pub fn false_positives_per_image(&self) -> Option<f64> {
        if self.images == 0 {
            return None;
        }
        Some(self.false_positives as f64 / self.images as f64)
    }
}

fn fmt_rate(rate: Option<f64>) -> String {
    rate.map(|r| format!("{r:.4}")).unwrap_or_else(|| "n/a".to_string())
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\t\t### SUMMARY ####")?;
        writeln!(f, "#images     : {}", self.images)?;
        writeln!(f, "#annotations: {}", self.annotations)?;
        writeln!(f, "tp          : {}", self.true_positives)?;
        writeln!(f, "fp          : {}", self.false_positives)?;
        writeln!(f, "%detection  : {}", fmt_rate(self.detection_rate()))?;
        write!(f, "FPPI        : {}", fmt_rate(self.false_positives_per_image()))
    }
}
