use crate::image::BlendMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything the window, handlers and renderer need to agree on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub title: String,
    /// Side of the square window, in logical pixels.
    pub view_size: f64,
    /// Side of the placeholder quad, in logical pixels.
    pub quad_size: f64,
    pub cursor_path: PathBuf,
    pub texture_path: PathBuf,
    pub quad_color: [f32; 4],
    pub clear_color: [f64; 4],
    pub blend_mode: BlendMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            title: String::from("Hardware Cursor"),
            view_size: 512.0,
            quad_size: 128.0,
            cursor_path: PathBuf::from("../cursor.png"),
            texture_path: PathBuf::from("../texture.png"),
            quad_color: [1.0, 0.0, 0.0, 1.0],
            clear_color: [0.0, 0.0, 0.0, 1.0],
            blend_mode: BlendMode::Replace,
        }
    }
}

impl AppConfig {
    /// Where the quad's lower-left corner goes so that it is centered on a
    /// pointer at `(x, y)` window pixels, in normalized device coordinates.
    pub fn pointer_to_ndc(&self, x: f64, y: f64) -> [f32; 2] {
        let half = self.quad_size / 2.0;
        let ndc_x = (x - half) / self.view_size * 2.0 - 1.0;
        let ndc_y = -((y + half) / self.view_size * 2.0 - 1.0);
        [ndc_x as f32, ndc_y as f32]
    }

    /// Side of the quad in NDC units.
    pub fn quad_extent_ndc(&self) -> f32 {
        (self.quad_size / self.view_size * 2.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.view_size, 512.0);
        assert_eq!(config.quad_size, 128.0);
        assert_eq!(config.title, "Hardware Cursor");
        assert_eq!(config.blend_mode, BlendMode::Replace);
        assert_eq!(config.quad_extent_ndc(), 0.5);
    }

    #[test]
    fn pointer_to_ndc_centers_quad() {
        let config = AppConfig::default();
        let [x, y] = config.pointer_to_ndc(300.0, 200.0);
        assert!((x - -0.078125).abs() < 1e-6, "{x}");
        assert!((y - -0.03125).abs() < 1e-6, "{y}");

        // quad centered on the window center spans [-0.25, 0.25]
        let [x, y] = config.pointer_to_ndc(256.0, 256.0);
        assert_eq!([x, y], [-0.25, -0.25]);
    }

    #[test]
    fn pointer_to_ndc_corners() {
        let config = AppConfig::default();
        assert_eq!(config.pointer_to_ndc(64.0, 448.0), [-1.0, -1.0]);
        assert_eq!(config.pointer_to_ndc(448.0, 64.0), [0.5, 0.5]);
    }

    #[test]
    fn blend_mode_by_name() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "title": "t",
            "view_size": 256.0,
            "quad_size": 32.0,
            "cursor_path": "a.png",
            "texture_path": "b.png",
            "quad_color": [0.0, 1.0, 0.0, 1.0],
            "clear_color": [0.0, 0.0, 0.0, 1.0],
            "blend_mode": "AlphaOver",
        }))
        .unwrap();
        assert_eq!(config.blend_mode, BlendMode::AlphaOver);
        assert_eq!(config.quad_extent_ndc(), 0.25);
    }
}
