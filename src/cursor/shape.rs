use crate::image::Image;

/// A cursor image and the pixel that tracks the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorShape {
    image: Image,
    hotspot_x: u32,
    hotspot_y: u32,
}

impl CursorShape {
    /// Hotspot at the top-left pixel.
    pub fn anchored(image: Image) -> Self {
        CursorShape {
            image,
            hotspot_x: 0,
            hotspot_y: 0,
        }
    }

    /// Hotspot at `(width/2, height/2)`.
    pub fn centered(image: Image) -> Self {
        CursorShape {
            hotspot_x: image.width() / 2,
            hotspot_y: image.height() / 2,
            image,
        }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn hotspot(&self) -> (u32, u32) {
        (self.hotspot_x, self.hotspot_y)
    }
}
