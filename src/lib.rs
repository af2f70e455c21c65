pub mod app;
pub mod cursor;
pub mod image;
pub mod render;
