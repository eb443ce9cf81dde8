//! Recursive row-span scheduling for Lumen.
//!
//! The image's row range is split in half until a span holds at most
//! `leaf_rows` rows, then each leaf renders its rows sequentially. Splitting
//! a span also splits the three output planes with `split_at_mut`, so every
//! leaf owns a disjoint slice of each plane and no locking is needed. In
//! parallel mode the two halves of every split run through `rayon::join`.

use crate::camera::Camera;
use crate::error::RenderResult;
use crate::scene::Scene;
use crate::shading::{color_to_rgb, ray_color};

/// Default maximum number of rows rendered by one leaf task.
pub const DEFAULT_LEAF_ROWS: usize = 16;

/// A half-open range of image rows `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub start: usize,
    pub end: usize,
}

impl RowSpan {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of rows in the span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split the span at its midpoint.
    pub fn split(&self) -> (RowSpan, RowSpan) {
        let mid = self.start + self.len() / 2;
        (RowSpan::new(self.start, mid), RowSpan::new(mid, self.end))
    }
}

/// Mutable views of the red, green and blue planes covering one row span.
///
/// Index 0 of each slice is pixel (0, `span.start`).
#[derive(Debug)]
pub struct PlaneSlices<'a> {
    pub span: RowSpan,
    pub width: usize,
    pub red: &'a mut [u8],
    pub green: &'a mut [u8],
    pub blue: &'a mut [u8],
}

impl<'a> PlaneSlices<'a> {
    /// Split into the two halves of [`RowSpan::split`].
    pub fn split(self) -> (PlaneSlices<'a>, PlaneSlices<'a>) {
        let (top_span, bottom_span) = self.span.split();
        let at = top_span.len() * self.width;

        let (red_top, red_bottom) = self.red.split_at_mut(at);
        let (green_top, green_bottom) = self.green.split_at_mut(at);
        let (blue_top, blue_bottom) = self.blue.split_at_mut(at);

        (
            PlaneSlices {
                span: top_span,
                width: self.width,
                red: red_top,
                green: green_top,
                blue: blue_top,
            },
            PlaneSlices {
                span: bottom_span,
                width: self.width,
                red: red_bottom,
                green: green_bottom,
                blue: blue_bottom,
            },
        )
    }
}

/// Renders row spans of one frame.
pub struct TileScheduler<'a> {
    camera: &'a Camera,
    scene: &'a Scene,
    leaf_rows: usize,
    parallel: bool,
}

impl<'a> TileScheduler<'a> {
    /// Create a scheduler. A `leaf_rows` of zero is treated as one.
    pub fn new(camera: &'a Camera, scene: &'a Scene, leaf_rows: usize, parallel: bool) -> Self {
        Self {
            camera,
            scene,
            leaf_rows: leaf_rows.max(1),
            parallel,
        }
    }

    /// Render every row of `planes`, returning once all of them are done.
    ///
    /// When a leaf fails, the sibling tasks already running still finish
    /// and the first error is returned.
    pub fn render(&self, planes: PlaneSlices<'_>) -> RenderResult<()> {
        if planes.span.len() <= self.leaf_rows {
            return self.render_leaf(planes);
        }

        let (top, bottom) = planes.split();
        if self.parallel {
            let (top_result, bottom_result) =
                rayon::join(|| self.render(top), || self.render(bottom));
            top_result.and(bottom_result)
        } else {
            self.render(top)?;
            self.render(bottom)
        }
    }

    /// Render a span pixel by pixel.
    fn render_leaf(&self, planes: PlaneSlices<'_>) -> RenderResult<()> {
        log::debug!("Rendering rows {}..{}", planes.span.start, planes.span.end);

        let eye = self.camera.eye();
        let mut offset = 0;
        for y in planes.span.start..planes.span.end {
            for x in 0..planes.width {
                let ray = self.camera.get_ray(x, y)?;
                let [r, g, b] = color_to_rgb(ray_color(&ray, self.scene, eye)?);

                planes.red[offset] = r;
                planes.green[offset] = g;
                planes.blue[offset] = b;
                offset += 1;
            }
        }

        Ok(())
    }
}
