use anyhow::bail;
use nalgebra::DVector;

use super::WindowClassifier;

/// `w . x + b` decision function.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    weights: DVector<f32>,
    bias: f32,
}

impl LinearClassifier {
    pub fn new(weights: DVector<f32>, bias: f32) -> Self {
        Self { weights, bias }
    }
}

impl WindowClassifier for LinearClassifier {
    fn descriptor_len(&self) -> Option<usize> {
        Some(self.weights.len())
    }

    fn score(&self, descriptor: &[f32]) -> anyhow::Result<f32> {
        if descriptor.len() != self.weights.len() {
            bail!(
                "Descriptor has {} values but the classifier expects {}",
                descriptor.len(),
                self.weights.len()
            );
        }

        let dot: f32 = self.weights.iter().zip(descriptor).map(|(w, x)| w * x).sum();
        Ok(dot + self.bias)
    }
}
