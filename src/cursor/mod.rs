mod error;
mod host;
mod shape;

pub use error::CursorError;
pub use host::{CursorHost, WinitCursorHost};
pub use shape::CursorShape;
