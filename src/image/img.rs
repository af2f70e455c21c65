use crate::image::ImageError;
use std::path::Path;

pub const BYTES_PER_PIXEL: usize = 4;

/// Tightly packed RGBA8 pixels, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

pub(crate) fn byte_len(width: u32, height: u32) -> Result<usize, ImageError> {
    usize::try_from(width)
        .ok()
        .and_then(|w| w.checked_mul(usize::try_from(height).ok()?))
        .and_then(|px| px.checked_mul(BYTES_PER_PIXEL))
        .ok_or(ImageError::TooLarge { width, height })
}

impl Image {
    /// Allocate a fully transparent image.
    pub fn new(width: u32, height: u32) -> Result<Self, ImageError> {
        let len = byte_len(width, height)?;
        Ok(Image {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(ImageError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Image {
            width,
            height,
            data,
        })
    }

    /// Decode an image file into RGBA8, whatever the channel layout on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let decoded = ::image::open(path)
            .map_err(|source| ImageError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();

        let (width, height) = decoded.dimensions();
        log::debug!("Decoded {} ({width}x{height})", path.display());
        Image::from_rgba(width, height, decoded.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// RGBA of one pixel, `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let i = y as usize * self.stride() + x as usize * BYTES_PER_PIXEL;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[i..i + BYTES_PER_PIXEL]);
        Some(px)
    }
}
