mod app_config;
mod cursor_app;
mod state;

pub use app_config::AppConfig;
pub use cursor_app::{CursorApp, CursorAppBuilder};
pub use state::CursorAppState;

use crate::image::Image;
use anyhow::{Context, Result};

/// Load both images, open the window and run until it is closed.
///
/// Must be called from main thread
pub fn launch(config: AppConfig) -> Result<()> {
    log::info!("Starting with {}", serde_json::to_string(&config)?);

    let cursor_image = Image::open(&config.cursor_path).context("loading cursor image")?;
    let texture = Image::open(&config.texture_path).context("loading texture image")?;
    log::info!(
        "Loaded cursor {}x{} and texture {}x{}",
        cursor_image.width(),
        cursor_image.height(),
        texture.width(),
        texture.height()
    );

    let builder = CursorApp::build(config)?;
    builder.launch(CursorAppState::new(cursor_image, texture))
}
