//! Errors that end the application.

use crate::camera::CaptureError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("cannot open window: {0}")]
    Window(String),
    #[error(transparent)]
    Capture(#[from] CaptureError),
}
