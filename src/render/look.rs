//! Per-cell appearance, resolved by explicit priority.
//!
//! Priority from highest to lowest: beat flash, glitching cell, active glitch
//! session (inverted), plain fill state.

use glam::Vec2;
use image::Rgba;
use rand::Rng;

use super::surface::Surface;
use crate::grid::CellRect;

pub const PAPER: Rgba<u8> = Rgba([238, 236, 230, 255]);
pub const INK: Rgba<u8> = Rgba([18, 18, 22, 255]);
pub const GRID_LINE: Rgba<u8> = Rgba([160, 160, 165, 255]);
pub const FLASH_HOT: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const FLASH_COOL: Rgba<u8> = Rgba([255, 40, 96, 255]);

/// What a cell looks like this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLook {
    /// Beat flash with frames remaining (> 0)
    Flash { remaining: u32 },
    /// Reached by the current glitch wave
    Glitching,
    /// Glitch session active but this cell is not glitching
    Inverted { filled: bool },
    Normal { filled: bool },
}

impl CellLook {
    /// Resolve the look from the cell's inputs, first matching rule wins
    pub fn resolve(
        flash_remaining: u32,
        glitching: bool,
        session_active: bool,
        filled: bool,
    ) -> Self {
        if flash_remaining > 0 {
            CellLook::Flash {
                remaining: flash_remaining,
            }
        } else if glitching {
            CellLook::Glitching
        } else if session_active {
            CellLook::Inverted { filled }
        } else {
            CellLook::Normal { filled }
        }
    }

    /// Whether drawing this look consumes a frame of the cell's flash
    pub fn consumes_flash(&self) -> bool {
        matches!(self, CellLook::Flash { .. })
    }

    /// Draw the cell onto `surface`
    pub fn draw<S: Surface + ?Sized, R: Rng>(
        &self,
        surface: &mut S,
        rect: &CellRect,
        rng: &mut R,
        jitter_px: f32,
    ) {
        match *self {
            CellLook::Flash { remaining } => {
                surface.fill_rect(rect.origin, rect.size, flash_color(remaining));
            }
            CellLook::Glitching => {
                let offset = if jitter_px > 0.0 {
                    Vec2::new(
                        rng.random_range(-jitter_px..=jitter_px),
                        rng.random_range(-jitter_px..=jitter_px),
                    )
                } else {
                    Vec2::ZERO
                };
                let color = Rgba([rng.random(), rng.random(), rng.random(), 255]);
                surface.fill_rect(rect.origin + offset, rect.size, color);
            }
            CellLook::Inverted { filled } => {
                surface.fill_rect(rect.origin, rect.size, if filled { PAPER } else { INK });
                surface.stroke_rect(rect.origin, rect.size, GRID_LINE);
            }
            CellLook::Normal { filled } => {
                surface.fill_rect(rect.origin, rect.size, if filled { INK } else { PAPER });
                surface.stroke_rect(rect.origin, rect.size, GRID_LINE);
            }
        }
    }
}

/// Alternates hot and cool on successive frames so the flash pulses
pub fn flash_color(remaining: u32) -> Rgba<u8> {
    if remaining % 2 == 0 {
        FLASH_HOT
    } else {
        FLASH_COOL
    }
}
