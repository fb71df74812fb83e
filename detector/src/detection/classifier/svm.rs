use std::path::Path;

use anyhow::{bail, Context};
use opencv::{
    core::{Mat, Ptr},
    ml::{StatModelTraitConst, StatModel_RAW_OUTPUT, SVM},
    prelude::*,
};

use super::WindowClassifier;

/// Binary SVM persisted by OpenCV (`.yml`/`.xml`).
pub struct SvmClassifier {
    svm: Ptr<SVM>,
}

impl SvmClassifier {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            bail!("Model file '{}' does not exist", path.display());
        }
        let filename = path.to_string_lossy();
        let svm = SVM::load(&filename).with_context(|| format!("Failed to load SVM model from '{filename}'"))?;
        if !svm.is_trained()? {
            bail!("Model '{filename}' is not trained");
        }

        log::info!("Model loaded from: {filename}");
        Ok(Self { svm })
    }
}

impl WindowClassifier for SvmClassifier {
    fn descriptor_len(&self) -> Option<usize> {
        self.svm.get_var_count().ok().map(|n| n as usize)
    }

    // OpenCV's raw decision value is positive for the smaller class label, so
    // it is negated to make the object class (the larger label) score high.
    fn score(&self, descriptor: &[f32]) -> anyhow::Result<f32> {
        let sample = Mat::from_slice(descriptor)?.try_clone()?;
        let mut results = Mat::default();
        let raw = self.svm.predict(&sample, &mut results, StatModel_RAW_OUTPUT)?;

        Ok(-raw)
    }
}

#[cfg(test)]
mod tests {
    use opencv::{
        core::{CV_32F, CV_32S},
        ml::{self, SVM_KernelTypes, SVM_Types},
    };

    use super::*;

    const BACKGROUND: [f32; 2] = [0.0, 0.0];
    const OBJECT: [f32; 2] = [3.0, 3.0];

    // Linear C_SVC on separable points, background labelled -1 and objects +1.
    fn train_and_save(path: &Path) {
        let samples = [BACKGROUND, [0.0, 1.0], OBJECT, [3.0, 4.0]];
        let labels = [-1, -1, 1, 1];

        let mut features = Mat::zeros(samples.len() as i32, 2, CV_32F).unwrap().to_mat().unwrap();
        let mut responses = Mat::zeros(samples.len() as i32, 1, CV_32S).unwrap().to_mat().unwrap();
        for (i, (sample, label)) in samples.iter().zip(labels).enumerate() {
            for (j, &value) in sample.iter().enumerate() {
                *features.at_2d_mut::<f32>(i as i32, j as i32).unwrap() = value;
            }
            *responses.at_2d_mut::<i32>(i as i32, 0).unwrap() = label;
        }

        let mut svm = SVM::create().unwrap();
        svm.set_type(SVM_Types::C_SVC as i32).unwrap();
        svm.set_kernel(SVM_KernelTypes::LINEAR as i32).unwrap();
        svm.set_c(1.0).unwrap();
        assert!(svm.train(&features, ml::ROW_SAMPLE, &responses).unwrap());
        svm.save(&path.to_string_lossy()).unwrap();
    }

    #[test]
    fn object_class_scores_positive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_svm.yml");
        train_and_save(&path);

        let clf = SvmClassifier::load(&path).unwrap();
        assert_eq!(clf.descriptor_len(), Some(2));
        assert!(clf.score(&OBJECT).unwrap() > 0.0);
        assert!(clf.score(&BACKGROUND).unwrap() < 0.0);
        // Further from the boundary scores higher.
        assert!(clf.score(&[6.0, 6.0]).unwrap() > clf.score(&OBJECT).unwrap());
    }

    #[test]
    fn missing_model_is_an_error() {
        assert!(SvmClassifier::load(Path::new("/nonexistent/model_svm.yml")).is_err());
    }
}
