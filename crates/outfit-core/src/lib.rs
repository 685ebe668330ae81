//! Core types for Outfit: predictions, image tensors, the recommendation map,
//! session state and configuration.

pub mod config;
mod error;
pub mod prediction;
pub mod recommend;
pub mod session;

pub use config::{AppConfig, GalleryBuildConfig};
pub use error::CoreError;
pub use prediction::{ImageTensor, Prediction};
pub use recommend::{Recommendation, RecommendationMap, display_name};
pub use session::Session;
