//! Drawing interface the sketch renders through.

use glam::Vec2;
use image::{Rgba, RgbaImage};

/// How `draw_image` combines source pixels with the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    /// Overwrite destination pixels
    Replace,
    /// Add colour channels, saturating at 255
    Add,
}

/// A single colour channel of an RGBA image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Something rectangles and images can be drawn onto
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Rgba<u8>);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba<u8>);

    /// One-pixel outline of a rectangle
    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba<u8>);

    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32, blend: Blend);

    /// Copy of the current pixels
    fn snapshot(&self) -> RgbaImage;
}

/// Image holding only `channel` of `snapshot`, other channels zeroed
pub fn channel_image(snapshot: &RgbaImage, channel: Channel) -> RgbaImage {
    let keep = channel.index();
    let mut out = RgbaImage::new(snapshot.width(), snapshot.height());
    for (src, dst) in snapshot.pixels().zip(out.pixels_mut()) {
        let mut px = [0, 0, 0, 255];
        px[keep] = src.0[keep];
        *dst = Rgba(px);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_image_keeps_one_channel() {
        let mut snapshot = RgbaImage::new(2, 1);
        snapshot.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        snapshot.put_pixel(1, 0, Rgba([200, 100, 50, 128]));

        let green = channel_image(&snapshot, Channel::Green);

        assert_eq!(green.get_pixel(0, 0), &Rgba([0, 20, 0, 255]));
        assert_eq!(green.get_pixel(1, 0), &Rgba([0, 100, 0, 255]));
    }
}
