use crate::image::img::BYTES_PER_PIXEL;
use crate::image::{Image, ImageError};
use serde::{Deserialize, Serialize};

/// How stamped pixels combine with what is already on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// Overwrite all four channels.
    #[default]
    Replace,
    /// Straight-alpha "source over destination".
    AlphaOver,
}

/// A placement on a canvas. The origin may be negative and the extent may run
/// past the canvas; [`Rect::clip`] trims it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersection with `[0, width) x [0, height)`, `None` if empty.
    pub fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (self.x + i64::from(self.width)).min(i64::from(width));
        let y1 = (self.y + i64::from(self.height)).min(i64::from(height));

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(Rect {
            x: x0,
            y: y0,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    #[cfg(test)]
    fn contains(&self, x: u32, y: u32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        x >= self.x
            && y >= self.y
            && x < self.x + i64::from(self.width)
            && y < self.y + i64::from(self.height)
    }
}

fn blend_over(src: &[u8], dst: &mut [u8]) {
    let src_a = src[3] as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;

    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a == 0.0 {
        dst.fill(0);
        return;
    }

    for c in 0..3 {
        let v = (src[c] as f32 * src_a + dst[c] as f32 * dst_a * (1.0 - src_a)) / out_a;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

impl Image {
    /// Copy `src` with its top-left corner at `(x, y)`. Whatever falls outside
    /// this image is dropped. Returns the region that was written.
    pub fn stamp(&mut self, src: &Image, x: i64, y: i64, mode: BlendMode) -> Option<Rect> {
        let placed = Rect::new(x, y, src.width(), src.height());
        let dst = placed.clip(self.width(), self.height())?;

        let src_x = (dst.x - x) as usize;
        let src_y = (dst.y - y) as usize;
        let dst_x = dst.x as usize;
        let dst_y = dst.y as usize;
        let row_bytes = dst.width as usize * BYTES_PER_PIXEL;

        let src_stride = src.stride();
        let dst_stride = self.stride();
        let dst_data = self.data_mut();

        for row in 0..dst.height as usize {
            let si = (src_y + row) * src_stride + src_x * BYTES_PER_PIXEL;
            let di = (dst_y + row) * dst_stride + dst_x * BYTES_PER_PIXEL;
            let s = &src.data()[si..si + row_bytes];
            let d = &mut dst_data[di..di + row_bytes];

            match mode {
                BlendMode::Replace => d.copy_from_slice(s),
                BlendMode::AlphaOver => {
                    for (dp, sp) in d
                        .chunks_exact_mut(BYTES_PER_PIXEL)
                        .zip(s.chunks_exact(BYTES_PER_PIXEL))
                    {
                        blend_over(sp, dp);
                    }
                }
            }
        }

        Some(dst)
    }
}

/// Where `back` lands on a `width` x `height` canvas: centered.
pub fn back_origin(width: u32, height: u32, back: &Image) -> (i64, i64) {
    (
        i64::from(width / 2) - i64::from(back.width() / 2),
        i64::from(height / 2) - i64::from(back.height() / 2),
    )
}

/// Where `front` lands: top-left corner at the canvas center.
pub fn front_origin(width: u32, height: u32) -> (i64, i64) {
    (i64::from(width / 2), i64::from(height / 2))
}

/// Build a canvas as large as both inputs, center `back` on it, then stamp
/// `front` with its corner at the center. `front` wins where they overlap.
pub fn composite(front: &Image, back: &Image, mode: BlendMode) -> Result<Image, ImageError> {
    let width = front.width().max(back.width());
    let height = front.height().max(back.height());
    let mut canvas = Image::new(width, height)?;

    let (bx, by) = back_origin(width, height, back);
    canvas.stamp(back, bx, by, mode);

    let (fx, fy) = front_origin(width, height);
    canvas.stamp(front, fx, fy, mode);

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, px: [u8; 4]) -> Image {
        let data = px.repeat((width * height) as usize);
        Image::from_rgba(width, height, data).unwrap()
    }

    /// Every pixel gets a distinct value so misplaced copies show up.
    fn gradient(width: u32, height: u32) -> Image {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 7, 255]);
            }
        }
        Image::from_rgba(width, height, data).unwrap()
    }

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    #[test]
    fn clip_trims_to_bounds() {
        assert_eq!(
            Rect::new(-2, 3, 5, 5).clip(4, 6),
            Some(Rect::new(0, 3, 3, 3))
        );
        assert_eq!(Rect::new(4, 0, 2, 2).clip(4, 4), None);
        assert_eq!(Rect::new(0, 0, 0, 3).clip(4, 4), None);
    }

    #[test]
    fn size_is_componentwise_max() {
        let out = composite(&solid(4, 2, RED), &solid(3, 5, BLUE), BlendMode::Replace).unwrap();
        assert_eq!((out.width(), out.height()), (4, 5));
        assert_eq!(out.data().len(), 4 * 5 * 4);

        let out = composite(&solid(1, 9, RED), &solid(6, 2, BLUE), BlendMode::Replace).unwrap();
        assert_eq!((out.width(), out.height()), (6, 9));
    }

    #[test]
    fn smaller_back_is_centered() {
        let out = composite(&solid(4, 4, RED), &solid(2, 2, BLUE), BlendMode::Replace).unwrap();

        // back covers (1,1)..(3,3), front covers (2,2)..(4,4)
        assert_eq!(out.pixel(1, 1), Some(BLUE));
        assert_eq!(out.pixel(2, 1), Some(BLUE));
        assert_eq!(out.pixel(1, 2), Some(BLUE));
        assert_eq!(out.pixel(2, 2), Some(RED));
        assert_eq!(out.pixel(3, 3), Some(RED));
        assert_eq!(out.pixel(0, 0), Some(CLEAR));
        assert_eq!(out.pixel(3, 0), Some(CLEAR));
        assert_eq!(out.pixel(0, 3), Some(CLEAR));
    }

    #[test]
    fn back_origin_matches_integer_centering() {
        let back = solid(3, 5, BLUE);
        assert_eq!(back_origin(8, 8, &back), (3, 2));
        assert_eq!(back_origin(3, 5, &back), (0, 0));
        assert_eq!(front_origin(7, 4), (3, 2));
    }

    #[test]
    fn untouched_pixels_stay_transparent() {
        let front = solid(3, 2, RED);
        let back = solid(2, 6, BLUE);
        let out = composite(&front, &back, BlendMode::Replace).unwrap();

        let (w, h) = (out.width(), out.height());
        let (bx, by) = back_origin(w, h, &back);
        let (fx, fy) = front_origin(w, h);
        let back_rect = Rect::new(bx, by, back.width(), back.height());
        let front_rect = Rect::new(fx, fy, front.width(), front.height());

        for y in 0..h {
            for x in 0..w {
                let px = out.pixel(x, y).unwrap();
                if front_rect.contains(x, y) {
                    assert_eq!(px, RED, "({x}, {y})");
                } else if back_rect.contains(x, y) {
                    assert_eq!(px, BLUE, "({x}, {y})");
                } else {
                    assert_eq!(px, CLEAR, "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn equal_sizes_back_fills_canvas_and_front_is_clipped() {
        let front = gradient(4, 4);
        let back = solid(4, 4, BLUE);
        let out = composite(&front, &back, BlendMode::Replace).unwrap();

        assert_eq!((out.width(), out.height()), (4, 4));
        for y in 0..4 {
            for x in 0..4 {
                let expected = if x >= 2 && y >= 2 {
                    front.pixel(x - 2, y - 2).unwrap()
                } else {
                    BLUE
                };
                assert_eq!(out.pixel(x, y), Some(expected), "({x}, {y})");
            }
        }
    }

    #[test]
    fn oversized_front_is_cropped_not_wrapped() {
        let front = gradient(6, 6);
        let back = solid(2, 2, BLUE);
        let out = composite(&front, &back, BlendMode::Replace).unwrap();

        assert_eq!(out.pixel(3, 3), front.pixel(0, 0));
        assert_eq!(out.pixel(5, 5), front.pixel(2, 2));
        // back sits at (2,2)..(4,4); the part not under front survives
        assert_eq!(out.pixel(2, 2), Some(BLUE));
        assert_eq!(out.pixel(0, 0), Some(CLEAR));
        // nothing from front's right half leaked into the next row
        assert_eq!(out.pixel(0, 4), Some(CLEAR));
    }

    #[test]
    fn stamp_with_negative_origin() {
        let mut canvas = Image::new(3, 3).unwrap();
        let written = canvas
            .stamp(&gradient(3, 3), -1, -2, BlendMode::Replace)
            .unwrap();

        assert_eq!(written, Rect::new(0, 0, 2, 1));
        assert_eq!(canvas.pixel(0, 0), Some([1, 2, 7, 255]));
        assert_eq!(canvas.pixel(1, 0), Some([2, 2, 7, 255]));
        assert_eq!(canvas.pixel(0, 1), Some(CLEAR));
    }

    #[test]
    fn empty_inputs_produce_empty_canvas() {
        let empty = Image::new(0, 0).unwrap();
        let out = composite(&empty, &empty, BlendMode::Replace).unwrap();
        assert_eq!((out.width(), out.height()), (0, 0));
        assert!(out.data().is_empty());
    }

    #[test]
    fn alpha_over_mixes_overlap() {
        let front = solid(2, 2, [255, 0, 0, 128]);
        let back = solid(2, 2, BLUE);
        let out = composite(&front, &back, BlendMode::AlphaOver).unwrap();

        let mixed = out.pixel(1, 1).unwrap();
        assert!(mixed[0] > 0);
        assert!(mixed[2] > 0);
        assert_eq!(mixed[3], 255);

        assert_eq!(out.pixel(0, 0), Some(BLUE));
    }

    #[test]
    fn alpha_over_extremes() {
        let mut px = BLUE;
        blend_over(&[9, 9, 9, 0], &mut px);
        assert_eq!(px, BLUE);

        blend_over(&RED, &mut px);
        assert_eq!(px, RED);

        let mut px = CLEAR;
        blend_over(&CLEAR, &mut px);
        assert_eq!(px, CLEAR);
    }
}
