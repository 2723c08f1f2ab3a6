//! Drawing: the surface interface, a CPU canvas, cell looks and the GPU presenter.

mod canvas;
mod gpu;
mod look;
mod surface;

pub use canvas::Canvas;
pub use gpu::{RenderSystem, Viewport};
pub use look::{flash_color, CellLook, FLASH_COOL, FLASH_HOT, GRID_LINE, INK, PAPER};
pub use surface::{channel_image, Blend, Channel, Surface};
