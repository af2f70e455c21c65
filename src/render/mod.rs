mod display_state;
mod quad_renderable;

pub use display_state::DisplayState;
pub use quad_renderable::{QuadRenderable, QuadUniform};
