mod compose;
mod error;
mod img;

pub use compose::{composite, BlendMode, Rect};
pub use error::ImageError;
pub use img::{Image, BYTES_PER_PIXEL};
