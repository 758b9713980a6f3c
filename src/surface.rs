//! # Surface
//!
//! An owned CPU raster buffer plus the handful of drawing operations the
//! engine needs: filled quads and blobs for stroke segments, whole-surface
//! compositing for layer merges, and a content-preserving resize. Everything
//! else tiny-skia offers (transforms, masks, strokes-as-paths) stays out of
//! the interface on purpose.

use tiny_skia::{
    FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use crate::color::Color;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("surface extent {0}x{1} has a zero axis")]
    ZeroExtent(u32, u32),
}

/// One rasterized drawing surface. Pixels are premultiplied RGBA8,
/// transparent on creation.
#[derive(Clone, Debug)]
pub struct Surface {
    pixmap: Pixmap,
}
impl Surface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::ZeroExtent(width, height))?;
        Ok(Self { pixmap })
    }
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
    /// Reallocate to `width x height`, keeping existing content at the
    /// origin. New area is transparent.
    ///
    /// Shrinking an axis clips; the board only ever grows its surfaces.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if width == self.width() && height == self.height() {
            return Ok(());
        }
        let mut grown =
            Pixmap::new(width, height).ok_or(SurfaceError::ZeroExtent(width, height))?;
        grown.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        self.pixmap = grown;
        Ok(())
    }
    /// Fill the quadrilateral `a -> b -> c -> d`, anti-aliased.
    ///
    /// A degenerate quad (collinear or coincident corners) covers nothing and
    /// is quietly dropped.
    pub fn fill_quad(&mut self, [a, b, c, d]: [[f32; 2]; 4], color: Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(a[0], a[1]);
        pb.line_to(b[0], b[1]);
        pb.line_to(c[0], c[1]);
        pb.line_to(d[0], d[1]);
        pb.close();
        let Some(path) = pb.finish() else {
            return;
        };
        self.fill(&path, color);
    }
    /// Fill a circle of `radius` around `center`, anti-aliased. A radius of
    /// zero (or less) covers nothing and is quietly dropped.
    pub fn fill_circle(&mut self, center: [f32; 2], radius: f32, color: Color) {
        let Some(path) = PathBuilder::from_circle(center[0], center[1], radius) else {
            return;
        };
        self.fill(&path, color);
    }
    fn fill(&mut self, path: &tiny_skia::Path, color: Color) {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }
    /// Source-over composite this surface onto `dst` at the origin, scaled by
    /// `opacity` as a single global alpha.
    pub fn composite_onto(&self, dst: &mut Surface, opacity: f32) {
        dst.pixmap.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &PixmapPaint {
                opacity: opacity.clamp(0.0, 1.0),
                ..PixmapPaint::default()
            },
            Transform::identity(),
            None,
        );
    }
    /// Frozen copy of the current pixel content.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width(),
            height: self.height(),
            data: self.pixmap.data().to_vec(),
        }
    }
}

/// Pixel content of a [`Surface`] at one point in time. Premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}
impl Snapshot {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }
    /// Fetch one `[r, g, b, a]` pixel. `None` if out-of-bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) as usize;
        Some(self.pixels()[idx])
    }
}

#[cfg(test)]
mod test {
    use super::{Surface, SurfaceError};
    use crate::color::Color;

    fn close(actual: [u8; 4], expected: [u8; 4]) -> bool {
        actual
            .iter()
            .zip(expected)
            .all(|(&a, e)| a.abs_diff(e) <= 1)
    }

    #[test]
    fn zero_extent_rejected() {
        let err = Surface::new(0, 10).unwrap_err();
        assert_eq!(err, SurfaceError::ZeroExtent(0, 10));
    }
    #[test]
    fn starts_transparent() {
        let surface = Surface::new(4, 4).unwrap();
        assert_eq!(surface.snapshot().pixel(2, 2), Some([0, 0, 0, 0]));
    }
    #[test]
    fn circle_interior_is_solid() {
        let mut surface = Surface::new(40, 40).unwrap();
        surface.fill_circle([20.0, 20.0], 10.0, Color::from_rgb8(255, 0, 0));
        // Center pixel is far from any anti-aliased edge.
        assert!(close(
            surface.snapshot().pixel(20, 20).unwrap(),
            [255, 0, 0, 255]
        ));
        // Well outside stays untouched.
        assert_eq!(surface.snapshot().pixel(2, 2), Some([0, 0, 0, 0]));
    }
    #[test]
    fn quad_fills() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.fill_quad(
            [[2.0, 2.0], [18.0, 2.0], [18.0, 18.0], [2.0, 18.0]],
            Color::BLACK,
        );
        assert!(close(
            surface.snapshot().pixel(10, 10).unwrap(),
            [0, 0, 0, 255]
        ));
    }
    #[test]
    fn degenerate_quad_is_noop() {
        let mut surface = Surface::new(10, 10).unwrap();
        let before = surface.snapshot();
        surface.fill_quad([[5.0, 5.0]; 4], Color::BLACK);
        surface.fill_circle([5.0, 5.0], 0.0, Color::BLACK);
        assert_eq!(surface.snapshot(), before);
    }
    #[test]
    fn resize_preserves_content_at_origin() {
        let mut surface = Surface::new(30, 30).unwrap();
        surface.fill_circle([10.0, 10.0], 5.0, Color::from_rgb8(0, 255, 0));
        surface.resize(60, 45).unwrap();
        assert_eq!(surface.width(), 60);
        assert_eq!(surface.height(), 45);
        assert!(close(
            surface.snapshot().pixel(10, 10).unwrap(),
            [0, 255, 0, 255]
        ));
        // Grown area is blank.
        assert_eq!(surface.snapshot().pixel(50, 40), Some([0, 0, 0, 0]));
    }
    #[test]
    fn composite_applies_global_alpha() {
        let mut src = Surface::new(10, 10).unwrap();
        src.fill_quad(
            [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
            Color::from_rgb8(255, 0, 0),
        );
        let mut dst = Surface::new(10, 10).unwrap();
        src.composite_onto(&mut dst, 0.5);
        let [r, g, b, a] = dst.snapshot().pixel(5, 5).unwrap();
        assert!(g == 0 && b == 0);
        // Premultiplied: both red and alpha land at half.
        assert!(r.abs_diff(128) <= 1, "r = {r}");
        assert!(a.abs_diff(128) <= 1, "a = {a}");
    }
}
