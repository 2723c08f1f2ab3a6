//! CPU raster surface backed by an RGBA image.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::surface::{Blend, Surface};
use crate::error::Result;

/// In-memory canvas; rectangles are snapped to whole pixels by rounding both
/// edges so neighbouring cells tile without gaps
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Write the canvas to `path`; the format follows the extension
    pub fn save(&self, path: &str) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }

    /// Pixel span `[start, end)` covered by `origin..origin + size`, clipped to `limit`
    fn span(origin: f32, size: f32, limit: u32) -> (u32, u32) {
        let start = origin.round().clamp(0.0, limit as f32) as u32;
        let end = (origin + size).round().clamp(0.0, limit as f32) as u32;
        (start, end.max(start))
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self, color: Rgba<u8>) {
        for px in self.image.pixels_mut() {
            *px = color;
        }
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba<u8>) {
        let (width, height) = self.image.dimensions();
        let (x0, x1) = Self::span(origin.x, size.x, width);
        let (y0, y1) = Self::span(origin.y, size.y, height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba<u8>) {
        let (width, height) = self.image.dimensions();
        let (x0, x1) = Self::span(origin.x, size.x, width);
        let (y0, y1) = Self::span(origin.y, size.y, height);
        if x0 == x1 || y0 == y1 {
            return;
        }
        for x in x0..x1 {
            self.image.put_pixel(x, y0, color);
            self.image.put_pixel(x, y1 - 1, color);
        }
        for y in y0..y1 {
            self.image.put_pixel(x0, y, color);
            self.image.put_pixel(x1 - 1, y, color);
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32, blend: Blend) {
        let (width, height) = self.image.dimensions();
        for (sx, sy, src) in image.enumerate_pixels() {
            let dx = x + sx as i32;
            let dy = y + sy as i32;
            if dx < 0 || dy < 0 || dx >= width as i32 || dy >= height as i32 {
                continue;
            }
            let dst = self.image.get_pixel_mut(dx as u32, dy as u32);
            match blend {
                Blend::Replace => *dst = *src,
                Blend::Add => {
                    for c in 0..3 {
                        dst.0[c] = dst.0[c].saturating_add(src.0[c]);
                    }
                    dst.0[3] = 255;
                }
            }
        }
    }

    fn snapshot(&self) -> RgbaImage {
        self.image.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{channel_image, Channel};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.clear(BLACK);
        canvas.fill_rect(Vec2::new(2.0, 2.0), Vec2::new(10.0, 10.0), RED);

        assert_eq!(canvas.pixel(1, 1), BLACK);
        assert_eq!(canvas.pixel(2, 2), RED);
        assert_eq!(canvas.pixel(3, 3), RED);
    }

    #[test]
    fn test_adjacent_fractional_rects_tile() {
        let mut canvas = Canvas::new(10, 1);
        canvas.clear(BLACK);
        canvas.fill_rect(Vec2::new(0.0, 0.0), Vec2::new(3.4, 1.0), RED);
        canvas.fill_rect(Vec2::new(3.4, 0.0), Vec2::new(6.6, 1.0), Rgba([0, 255, 0, 255]));

        for x in 0..10 {
            assert_ne!(canvas.pixel(x, 0), BLACK);
        }
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut canvas = Canvas::new(5, 5);
        canvas.clear(BLACK);
        canvas.stroke_rect(Vec2::ZERO, Vec2::new(5.0, 5.0), RED);

        assert_eq!(canvas.pixel(0, 0), RED);
        assert_eq!(canvas.pixel(4, 2), RED);
        assert_eq!(canvas.pixel(2, 2), BLACK);
    }

    #[test]
    fn test_additive_channels_recombine() {
        let mut canvas = Canvas::new(2, 2);
        canvas.clear(Rgba([30, 60, 90, 255]));
        let snapshot = canvas.snapshot();

        canvas.clear(BLACK);
        for channel in Channel::ALL {
            canvas.draw_image(&channel_image(&snapshot, channel), 0, 0, Blend::Add);
        }

        assert_eq!(canvas.pixel(1, 1), Rgba([30, 60, 90, 255]));
    }

    #[test]
    fn test_save_writes_png() {
        let name = format!("glitchgrid-canvas-{}.png", std::process::id());
        let path = std::env::temp_dir().join(name).to_string_lossy().into_owned();
        let mut canvas = Canvas::new(3, 2);
        canvas.clear(RED);

        canvas.save(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(*loaded.get_pixel(2, 1), RED);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_into_missing_dir_is_image_error() {
        let canvas = Canvas::new(1, 1);
        let err = canvas.save("/definitely/not/here/frame.png").unwrap_err();
        assert!(matches!(err, crate::error::Error::Image(_)));
    }

    #[test]
    fn test_draw_image_offset_is_clipped() {
        let mut canvas = Canvas::new(3, 3);
        canvas.clear(BLACK);
        let mut stamp = RgbaImage::new(2, 2);
        for px in stamp.pixels_mut() {
            *px = RED;
        }

        canvas.draw_image(&stamp, -1, 2, Blend::Replace);

        assert_eq!(canvas.pixel(0, 2), RED);
        assert_eq!(canvas.pixel(1, 2), BLACK);
        assert_eq!(canvas.pixel(0, 1), BLACK);
    }
}
