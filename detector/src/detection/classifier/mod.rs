pub mod linear;
pub mod svm;

pub use linear::LinearClassifier;
pub use svm::SvmClassifier;

/// Scores a window descriptor. Higher scores mean the window is more likely to
/// contain the object.
pub trait WindowClassifier {
    /// Descriptor length the classifier was trained with, when it is known.
    fn descriptor_len(&self) -> Option<usize>;

    fn score(&self, descriptor: &[f32]) -> anyhow::Result<f32>;
}
