use crate::chess::Square;
use std::cmp::min;
use tracing::debug;

/// Where the board is drawn on a display surface.
///
/// The board is a square of side [`Viewport::size`] scaled by [`Viewport::scale`],
/// centered within a surface that may be larger than the board itself.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    size: u32,
    scale: f64,
    surface: (u32, u32),
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(Viewport::DEFAULT_SIZE)
    }
}

impl Viewport {
    /// The side of the board on a fresh window.
    pub const DEFAULT_SIZE: u32 = 800;

    /// The smallest side the window can be resized to.
    pub const MIN_SIZE: u32 = 400;

    /// The largest side the window can be resized to.
    pub const MAX_SIZE: u32 = 1200;

    /// A viewport of a given side that fills a square surface of the same size.
    ///
    /// The side is clamped to the range [`Viewport::MIN_SIZE`]`..=`[`Viewport::MAX_SIZE`].
    pub fn new(size: u32) -> Self {
        let size = size.clamp(Self::MIN_SIZE, Self::MAX_SIZE);
        Viewport {
            size,
            scale: 1.,
            surface: (size, size),
        }
    }

    /// This viewport drawn with a different scale factor.
    ///
    /// Scale factors that are not strictly positive are ignored.
    pub fn with_scale(self, scale: f64) -> Self {
        if scale > 0. && scale.is_finite() {
            Viewport { scale, ..self }
        } else {
            self
        }
    }

    /// This viewport centered on a surface of different dimensions, as when going fullscreen.
    pub fn with_surface(self, width: u32, height: u32) -> Self {
        Viewport {
            surface: (width, height),
            ..self
        }
    }

    /// The unscaled side of the board.
    #[inline(always)]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The scale factor.
    #[inline(always)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The dimensions of the surface.
    #[inline(always)]
    pub fn surface(&self) -> (u32, u32) {
        self.surface
    }

    /// Follows the window being resized to `width` by `height`.
    ///
    /// The window is kept square, so the new side is the smallest dimension within bounds.
    pub fn resize(&mut self, width: u32, height: u32) -> u32 {
        let size = min(width, height).clamp(Self::MIN_SIZE, Self::MAX_SIZE);
        debug!(width, height, size, "resized");
        self.size = size;
        self.surface = (size, size);
        size
    }

    /// The offset of the board's top left corner on the surface.
    pub fn offset(&self) -> (f64, f64) {
        let side = (self.size as f64 * self.scale).floor();
        let (w, h) = self.surface;
        (
            ((w as f64 - side) / 2.).floor(),
            ((h as f64 - side) / 2.).floor(),
        )
    }

    /// The [`Square`] under a pointer at `(x, y)` on the surface, if any.
    pub fn locate(&self, x: f64, y: f64) -> Option<Square> {
        let (dx, dy) = self.offset();
        let side = self.size as f64 / Square::SIDE as f64;
        let col = ((x - dx) / self.scale / side).floor();
        let row = ((y - dy) / self.scale / side).floor();

        let range = 0.0..Square::SIDE as f64;
        if range.contains(&row) && range.contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }
}
