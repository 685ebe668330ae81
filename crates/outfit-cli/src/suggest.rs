//! Suggestion pipeline: upload → prediction → recommended bottoms → example images.

use std::path::PathBuf;

use outfit_ai::{Classifier, InferenceError, ScoreModel};
use outfit_core::{AppConfig, Prediction, Session};
use outfit_gallery::{GallerySampler, readable_examples};
use tracing::{info, warn};

/// One recommended bottom category with its sampled example images.
#[derive(Debug, Clone, PartialEq)]
pub struct BottomSuggestion {
    pub category: String,
    pub gallery_id: String,
    /// Readable example files; empty when the gallery has none.
    pub examples: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations {
    /// The predicted category has no configured bottoms.
    NotConfigured,
    Bottoms(Vec<BottomSuggestion>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub prediction: Prediction,
    pub recommendations: Recommendations,
}

/// Classify an uploaded image, record the prediction in the session, and
/// gather recommendations for it.
///
/// Only classification can fail; gallery problems degrade to empty example lists.
pub fn suggest<M: ScoreModel>(
    session: &mut Session,
    classifier: &Classifier<M>,
    config: &AppConfig,
    sampler: &GallerySampler,
    image_bytes: &[u8],
) -> Result<Suggestion, InferenceError> {
    let prediction = classifier.classify_bytes(image_bytes)?;
    session.record(prediction.clone());

    let recommendations = recommendations_for(&prediction, config, sampler);
    Ok(Suggestion {
        prediction,
        recommendations,
    })
}

/// Recommended bottoms for a prediction, each with up to `max_examples` images.
pub fn recommendations_for(
    prediction: &Prediction,
    config: &AppConfig,
    sampler: &GallerySampler,
) -> Recommendations {
    let rec = config.recommendations.recommend(prediction.category());
    if rec.is_none() {
        info!(category = prediction.category(), "no recommendations configured");
        return Recommendations::NotConfigured;
    }

    let bottoms = rec
        .top(config.max_recommendations)
        .iter()
        .map(|bottom| {
            let gallery_id = config.gallery_id(bottom);
            let sampled = sampler
                .sample(&gallery_id, config.max_examples)
                .unwrap_or_else(|e| {
                    warn!(gallery_id = %gallery_id, error = %e, "gallery listing failed");
                    Vec::new()
                });

            BottomSuggestion {
                category: bottom.clone(),
                gallery_id,
                examples: readable_examples(sampled),
            }
        })
        .collect();

    Recommendations::Bottoms(bottoms)
}
