//! Shirt-style classifier: a score model paired with its label set.
//!
//! The model is treated as a black box returning one probability-like score
//! per class. The classifier validates the input shape, picks the first
//! maximum score, and maps its index through the [`LabelSet`].

use std::sync::Arc;

use image::DynamicImage;
use outfit_core::{ImageTensor, Prediction};
use tracing::{info, warn};

use crate::{InferenceError, LabelSet, preprocess};

/// Forward pass over a preprocessed image.
///
/// Implementations are loaded once and shared read-only between callers, so
/// `forward` takes `&self`.
pub trait ScoreModel: Send + Sync {
    /// Exact NHWC input shape the model accepts.
    fn input_shape(&self) -> [usize; 4];

    /// Number of scores per input, when the model declares it statically.
    fn output_width(&self) -> Option<usize>;

    /// Per-class scores for a single-image batch.
    fn forward(&self, input: &ImageTensor) -> Result<Vec<f32>, InferenceError>;
}

/// Process-wide handle: built once at start-up, injected wherever classification happens.
pub type SharedClassifier<M> = Arc<Classifier<M>>;

pub struct Classifier<M> {
    model: M,
    labels: LabelSet,
}

impl<M: ScoreModel> Classifier<M> {
    /// Pair a model with its labels.
    ///
    /// Fails when the model declares an output width different from the
    /// label count; that pairing would silently mis-label predictions.
    pub fn new(model: M, labels: LabelSet) -> Result<Self, InferenceError> {
        if let Some(outputs) = model.output_width()
            && outputs != labels.len()
        {
            return Err(InferenceError::LabelCountMismatch {
                labels: labels.len(),
                outputs,
            });
        }

        info!(
            labels = labels.len(),
            input_shape = ?model.input_shape(),
            "classifier ready"
        );
        Ok(Self { model, labels })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Square side length the preprocessor should resize to.
    pub fn input_size(&self) -> u32 {
        self.model.input_shape()[1] as u32
    }

    /// Classify a preprocessed tensor.
    pub fn classify(&self, input: &ImageTensor) -> Result<Prediction, InferenceError> {
        let expected = self.model.input_shape();
        if input.shape() != expected {
            return Err(InferenceError::ShapeMismatch {
                expected,
                actual: input.shape(),
            });
        }

        let scores = self.model.forward(input)?;
        let (index, score) = argmax_first(&scores).ok_or(InferenceError::EmptyOutput)?;

        let category = self
            .labels
            .get(index)
            .ok_or(InferenceError::IndexOutOfRange {
                index,
                labels: self.labels.len(),
            })?;

        if !(0.0..=1.0).contains(&score) {
            warn!(score, "model score outside [0, 1]; clamping confidence");
        }

        let prediction = Prediction::new(category, score);
        info!(
            category = prediction.category(),
            confidence = prediction.confidence(),
            "classified image"
        );
        Ok(prediction)
    }

    /// Preprocess a decoded image and classify it.
    pub fn classify_image(&self, image: &DynamicImage) -> Result<Prediction, InferenceError> {
        let tensor = preprocess::preprocess(image, self.input_size())?;
        self.classify(&tensor)
    }

    /// Decode raw upload bytes, preprocess, and classify.
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<Prediction, InferenceError> {
        let image = preprocess::decode(bytes)?;
        self.classify_image(&image)
    }
}

/// Index and value of the maximum score; ties go to the lowest index.
///
/// NaN scores never win. Returns `None` when no score is comparable.
pub fn argmax_first(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &s) in scores.iter().enumerate() {
        if s.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, b)| s > b) {
            best = Some((i, s));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns fixed scores and counts forward passes.
    struct FixedModel {
        size: usize,
        scores: Vec<f32>,
        declared_width: Option<usize>,
        calls: AtomicUsize,
    }

    impl FixedModel {
        fn new(scores: &[f32]) -> Self {
            Self {
                size: 8,
                scores: scores.to_vec(),
                declared_width: Some(scores.len()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ScoreModel for FixedModel {
        fn input_shape(&self) -> [usize; 4] {
            [1, self.size, self.size, 3]
        }

        fn output_width(&self) -> Option<usize> {
            self.declared_width
        }

        fn forward(&self, _input: &ImageTensor) -> Result<Vec<f32>, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.scores.clone())
        }
    }

    fn labels(names: &[&str]) -> LabelSet {
        LabelSet::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn tensor(size: usize) -> ImageTensor {
        ImageTensor::new([1, size, size, 3], vec![0.5; size * size * 3]).unwrap()
    }

    #[test]
    fn picks_max_score_label() {
        let clf = Classifier::new(
            FixedModel::new(&[0.1, 0.7, 0.2]),
            labels(&["Blouse", "Hoodie", "Tank"]),
        )
        .unwrap();
        let p = clf.classify(&tensor(8)).unwrap();
        assert_eq!(p.category(), "Hoodie");
        assert_eq!(p.confidence(), 0.7);
    }

    #[test]
    fn confidence_equals_raw_max() {
        let scores = [0.05, 0.15, 0.3, 0.5];
        let clf = Classifier::new(FixedModel::new(&scores), labels(&["a", "b", "c", "d"])).unwrap();
        let p = clf.classify(&tensor(8)).unwrap();
        let max = scores.iter().cloned().fold(f32::MIN, f32::max);
        assert_eq!(p.confidence(), max);
        assert!((0.0..=1.0).contains(&p.confidence()));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let clf = Classifier::new(
            FixedModel::new(&[0.4, 0.4, 0.2]),
            labels(&["Blouse", "Hoodie", "Tank"]),
        )
        .unwrap();
        assert_eq!(clf.classify(&tensor(8)).unwrap().category(), "Blouse");
    }

    #[test]
    fn wrong_shape_rejected_before_forward() {
        let clf = Classifier::new(FixedModel::new(&[1.0]), labels(&["Tank"])).unwrap();
        let err = clf.classify(&tensor(9)).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::ShapeMismatch {
                expected: [1, 8, 8, 3],
                actual: [1, 9, 9, 3],
            }
        ));
        assert!(err.is_internal());
        assert_eq!(clf.model().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn batch_dimension_checked() {
        let clf = Classifier::new(FixedModel::new(&[1.0]), labels(&["Tank"])).unwrap();
        let batch2 = ImageTensor::new([2, 8, 8, 3], vec![0.0; 2 * 8 * 8 * 3]).unwrap();
        assert!(matches!(
            clf.classify(&batch2),
            Err(InferenceError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn index_beyond_labels_is_error() {
        // Model does not declare its width, so the mismatch surfaces per call.
        let mut model = FixedModel::new(&[0.1, 0.2, 0.7]);
        model.declared_width = None;
        let clf = Classifier::new(model, labels(&["Blouse", "Hoodie"])).unwrap();
        let err = clf.classify(&tensor(8)).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::IndexOutOfRange {
                index: 2,
                labels: 2
            }
        ));
    }

    #[test]
    fn declared_width_mismatch_fails_at_construction() {
        let result = Classifier::new(FixedModel::new(&[0.5, 0.5, 0.0]), labels(&["a", "b"]));
        match result {
            Err(err @ InferenceError::LabelCountMismatch { labels: 2, outputs: 3 }) => {
                assert!(err.is_fatal());
                assert!(!err.is_internal());
            }
            _ => panic!("expected LabelCountMismatch"),
        }
    }

    #[test]
    fn empty_output_is_error() {
        let mut model = FixedModel::new(&[]);
        model.declared_width = None;
        let clf = Classifier::new(model, labels(&["Tank"])).unwrap();
        assert!(matches!(
            clf.classify(&tensor(8)),
            Err(InferenceError::EmptyOutput)
        ));
    }

    #[test]
    fn nan_scores_skipped() {
        let clf = Classifier::new(
            FixedModel::new(&[f32::NAN, 0.3, 0.6]),
            labels(&["a", "b", "c"]),
        )
        .unwrap();
        assert_eq!(clf.classify(&tensor(8)).unwrap().category(), "c");
    }

    #[test]
    fn out_of_range_score_clamped() {
        let clf = Classifier::new(FixedModel::new(&[3.5, 1.0]), labels(&["a", "b"])).unwrap();
        let p = clf.classify(&tensor(8)).unwrap();
        assert_eq!(p.category(), "a");
        assert_eq!(p.confidence(), 1.0);
    }

    #[test]
    fn classify_bytes_preprocesses_to_model_size() {
        let clf =
            Classifier::new(FixedModel::new(&[0.2, 0.8]), labels(&["Tank", "Hoodie"])).unwrap();
        let img = RgbImage::from_pixel(50, 30, Rgb([120, 30, 60]));
        let mut buf = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();

        let p = clf.classify_bytes(buf.get_ref()).unwrap();
        assert_eq!(p.category(), "Hoodie");
        assert_eq!(clf.model().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn classify_bytes_rejects_garbage() {
        let clf = Classifier::new(FixedModel::new(&[1.0]), labels(&["Tank"])).unwrap();
        assert!(matches!(
            clf.classify_bytes(b"\x00\x01\x02"),
            Err(InferenceError::Decode(_))
        ));
    }

    #[test]
    fn shared_handle_serves_many_threads() {
        let clf: SharedClassifier<FixedModel> = Arc::new(
            Classifier::new(FixedModel::new(&[0.9, 0.1]), labels(&["Hoodie", "Tank"])).unwrap(),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let clf = Arc::clone(&clf);
                std::thread::spawn(move || clf.classify(&tensor(8)).unwrap())
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap().category(), "Hoodie");
        }
        assert_eq!(clf.model().calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn argmax_first_cases() {
        assert_eq!(argmax_first(&[]), None);
        assert_eq!(argmax_first(&[f32::NAN]), None);
        assert_eq!(argmax_first(&[0.2, 0.9, 0.9]), Some((1, 0.9)));
        assert_eq!(argmax_first(&[-1.0, -0.5]), Some((1, -0.5)));
    }
}
