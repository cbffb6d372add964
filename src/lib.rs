mod config;
mod error;
mod input;
mod labels;
mod placeholder;
mod prediction;
mod session;
mod simulator;
mod stats;

pub use config::DemoConfig;
pub use error::SimError;
pub use input::{validate_upload, GrayImage, InputError, ALLOWED_EXTENSIONS, SOFT_SIZE_LIMIT};
pub use labels::{emoji, LabelSet};
pub use placeholder::{
    LabelMetrics, PlaceholderModel, TrainReport, TrainingSpec, FEATURE_COUNT, IMAGE_SIDE,
};
pub use prediction::{format_percent, Prediction, Scored};
pub use session::{SessionContext, SessionStore};
pub use simulator::{ConfidenceInterval, Simulator};
pub use stats::ServiceStats;
