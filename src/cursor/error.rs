use crate::image::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CursorError {
    #[error("{width}x{height} image is too large for a cursor")]
    TooLarge { width: u32, height: u32 },

    #[error("platform rejected cursor image: {0}")]
    BadImage(#[from] winit::window::BadImage),

    #[error("failed to build cursor image")]
    Image(#[from] ImageError),
}
