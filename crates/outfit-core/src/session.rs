//! Per-user session context passed explicitly through the request path.

use chrono::{DateTime, Utc};

use crate::Prediction;

/// State owned by one interactive session.
///
/// Holds only the most recent prediction; a new classification replaces it.
/// Sessions never share state with each other, only the read-only classifier.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    last_prediction: Option<Prediction>,
    updated_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            last_prediction: None,
            updated_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Store a prediction, replacing any earlier one.
    pub fn record(&mut self, prediction: Prediction) {
        tracing::debug!(session = %self.id, prediction = %prediction, "session prediction updated");
        self.last_prediction = Some(prediction);
        self.updated_at = Some(Utc::now());
    }

    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn clear(&mut self) {
        self.last_prediction = None;
        self.updated_at = None;
    }
}
