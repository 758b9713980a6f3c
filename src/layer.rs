//! # Layer
//!
//! The stroke renderer: one raster surface plus the stateful brush logic for
//! a single gesture. Each pointer-move sample extends the stroke by a filled
//! quad between the previous segment's leading edge and the new one, capped
//! with a round blob so direction changes read as one continuous line.
//!
//! Thickness is where the feel lives: pressure scales it linearly, smoothed
//! velocity divides it - fast flicks go thin, slow deliberate lines go fat -
//! and a hard cap keeps a stall from ballooning the brush.

use crate::color::Color;
use crate::geom::Vec2;
use crate::stroke::{Milliseconds, VelocityWindow};
use crate::surface::{Snapshot, Surface, SurfaceError};
use crate::util::UnitF32;

pub type LayerId = crate::id::InkId<Layer>;

pub const DEFAULT_MAX_THICKNESS: f32 = 15.0;
pub const DEFAULT_THICKNESS_MULTIPLIER: f32 = 10.0;
/// Nominal mid pressure, for devices that report none.
pub const DEFAULT_PRESSURE: f32 = 0.5;

/// Ceiling on instantaneous velocity, px/ms. Two samples sharing a timestamp
/// would otherwise push infinity into the window and poison the mean.
const VELOCITY_CLAMP: f32 = 1e6;

/// Stroke thickness for one segment. Inverse in velocity, linear in pressure,
/// capped.
fn thickness(pressure: f32, multiplier: f32, smoothed_velocity: f32, max: f32) -> f32 {
    (pressure * (multiplier / smoothed_velocity)).min(max)
}

pub struct Layer {
    id: LayerId,
    surface: Surface,
    color: Color,
    opacity: UnitF32,
    max_thickness: f32,
    thickness_multiplier: f32,
    velocity: VelocityWindow,
    /// Current pen position.
    pen: [f32; 2],
    /// The two ends of the previous segment's leading edge, offset
    /// perpendicular to travel.
    port: [f32; 2],
    starboard: [f32; 2],
    last_paint: Milliseconds,
}
impl Layer {
    pub(crate) fn new(
        width: u32,
        height: u32,
        color: Color,
        opacity: UnitF32,
    ) -> Result<Self, SurfaceError> {
        Ok(Self {
            id: LayerId::default(),
            surface: Surface::new(width, height)?,
            color,
            opacity,
            max_thickness: DEFAULT_MAX_THICKNESS,
            thickness_multiplier: DEFAULT_THICKNESS_MULTIPLIER,
            velocity: VelocityWindow::default(),
            pen: [0.0; 2],
            port: [0.0; 2],
            starboard: [0.0; 2],
            last_paint: Milliseconds::default(),
        })
    }
    #[must_use]
    pub fn id(&self) -> LayerId {
        self.id
    }
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
    #[must_use]
    pub fn opacity(&self) -> UnitF32 {
        self.opacity
    }
    /// Begin a gesture at `pos`. Must precede any [`Self::paint`].
    pub fn start(&mut self, pos: [f32; 2], now: Milliseconds) {
        self.pen = pos;
        self.port = pos;
        self.starboard = pos;
        self.velocity.clear();
        self.last_paint = now;
    }
    /// Extend the gesture to `pos`, painting one tapered segment into the
    /// owned surface.
    ///
    /// A sample at the pen's current position is a no-op - no direction, no
    /// ink, state untouched. Pressure outside `[0, 1]` (or NaN) is
    /// saturated; `None` means the device doesn't report pressure and gets
    /// [`DEFAULT_PRESSURE`].
    pub fn paint(&mut self, pos: [f32; 2], pressure: Option<f32>, now: Milliseconds) {
        let displacement = Vec2::new(pos[0] - self.pen[0], pos[1] - self.pen[1]);
        let Some(direction) = displacement.normalized() else {
            return;
        };
        let distance = displacement.magnitude();

        let elapsed = now.saturating_since(self.last_paint);
        let velocity = if elapsed == 0 {
            VELOCITY_CLAMP
        } else {
            (distance / elapsed as f32).min(VELOCITY_CLAMP)
        };
        self.velocity.push(velocity);
        // Unwrap OK - the window was pushed to just above.
        let smoothed = self.velocity.average().unwrap();

        let pressure = UnitF32::saturating(pressure.unwrap_or(DEFAULT_PRESSURE)).get();
        let thickness = thickness(
            pressure,
            self.thickness_multiplier,
            smoothed,
            self.max_thickness,
        );

        let offset = direction.perpendicular().scale(thickness);
        let port = [pos[0] - offset.x(), pos[1] - offset.y()];
        let starboard = [pos[0] + offset.x(), pos[1] + offset.y()];

        // Ribbon from the old leading edge to the new one, then a blob to cap
        // the joint - consecutive quads meet at an angle and would leave a
        // notch otherwise.
        self.surface
            .fill_quad([self.port, port, starboard, self.starboard], self.color);
        self.surface.fill_circle(pos, thickness, self.color);

        self.pen = pos;
        self.port = port;
        self.starboard = starboard;
        self.last_paint = now;
    }
    /// Mean of the velocity window. `None` before the first paint of a
    /// gesture.
    #[must_use]
    pub fn average_velocity(&self) -> Option<f32> {
        self.velocity.average()
    }
    pub(crate) fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.surface.resize(width, height)
    }
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.surface.snapshot()
    }
}
impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("id", &self.id)
            .field("color", &self.color)
            .field("opacity", &self.opacity)
            .field("pen", &self.pen)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::{thickness, Layer, DEFAULT_MAX_THICKNESS};
    use crate::color::Color;
    use crate::stroke::Milliseconds;
    use crate::util::UnitF32;

    fn layer() -> Layer {
        Layer::new(100, 100, Color::BLACK, UnitF32::ONE).unwrap()
    }

    #[test]
    fn start_resets_brush_state() {
        let mut layer = layer();
        layer.start([10.0, 20.0], Milliseconds(5));
        layer.paint([15.0, 20.0], Some(1.0), Milliseconds(55));
        assert!(layer.average_velocity().is_some());

        layer.start([1.0, 2.0], Milliseconds(100));
        assert_eq!(layer.pen, [1.0, 2.0]);
        assert_eq!(layer.port, [1.0, 2.0]);
        assert_eq!(layer.starboard, [1.0, 2.0]);
        assert!(layer.velocity.is_empty());
        assert_eq!(layer.last_paint, Milliseconds(100));
    }
    #[test]
    fn slow_full_pressure_stroke_hits_the_cap() {
        let mut layer = layer();
        layer.start([0.0, 0.0], Milliseconds(0));
        // distance 10 over 100 ms: velocity 0.1, thickness 1.0 * (10 / 0.1)
        // = 100, capped at 15.
        layer.paint([10.0, 0.0], Some(1.0), Milliseconds(100));

        assert_eq!(layer.velocity.len(), 1);
        assert_eq!(layer.average_velocity(), Some(0.1));
        // Edge points sit max-thickness above and below the pen.
        assert_eq!(layer.port, [10.0, -DEFAULT_MAX_THICKNESS]);
        assert_eq!(layer.starboard, [10.0, DEFAULT_MAX_THICKNESS]);
        assert_eq!(layer.pen, [10.0, 0.0]);
        assert_eq!(layer.last_paint, Milliseconds(100));
    }
    #[test]
    fn zero_distance_sample_is_a_noop() {
        let mut layer = layer();
        layer.start([5.0, 5.0], Milliseconds(0));
        layer.paint([8.0, 5.0], Some(0.5), Milliseconds(50));
        let (pen, port, starboard, last) =
            (layer.pen, layer.port, layer.starboard, layer.last_paint);
        let window_len = layer.velocity.len();
        let before = layer.snapshot();

        layer.paint([8.0, 5.0], Some(0.5), Milliseconds(80));

        assert_eq!(layer.pen, pen);
        assert_eq!(layer.port, port);
        assert_eq!(layer.starboard, starboard);
        assert_eq!(layer.last_paint, last);
        assert_eq!(layer.velocity.len(), window_len);
        assert_eq!(layer.snapshot(), before);
    }
    #[test]
    fn duplicate_timestamp_stays_finite() {
        let mut layer = layer();
        layer.start([0.0, 0.0], Milliseconds(10));
        layer.paint([5.0, 0.0], Some(1.0), Milliseconds(10));
        let avg = layer.average_velocity().unwrap();
        assert!(avg.is_finite());
        // Enormous velocity collapses thickness toward zero.
        layer.paint([10.0, 0.0], Some(1.0), Milliseconds(10));
        assert!(layer.average_velocity().unwrap().is_finite());
        assert!((layer.port[1] - 0.0).abs() < 0.01);
    }
    #[test]
    fn missing_pressure_defaults_to_half() {
        let mut with_default = layer();
        with_default.start([0.0, 0.0], Milliseconds(0));
        with_default.paint([200.0, 0.0], None, Milliseconds(10));

        let mut explicit = layer();
        explicit.start([0.0, 0.0], Milliseconds(0));
        explicit.paint([200.0, 0.0], Some(0.5), Milliseconds(10));

        assert_eq!(with_default.port, explicit.port);
        assert_eq!(with_default.starboard, explicit.starboard);
    }
    #[test]
    fn painting_leaves_ink_on_the_surface() {
        let mut layer = layer();
        layer.start([20.0, 50.0], Milliseconds(0));
        layer.paint([70.0, 50.0], Some(1.0), Milliseconds(200));
        // Midpoint of a slow full-pressure horizontal stroke is solidly
        // inside the ribbon.
        let [_, _, _, a] = layer.snapshot().pixel(45, 50).unwrap();
        assert_eq!(a, 255);
    }
    #[test]
    fn thickness_bounded_for_valid_inputs() {
        let pressures = [0.0, 0.1, 0.5, 0.9, 1.0];
        let velocities = [1e-6, 0.01, 0.5, 3.0, 1e6];
        for pressure in pressures {
            for velocity in velocities {
                let t = thickness(pressure, 10.0, velocity, DEFAULT_MAX_THICKNESS);
                assert!(
                    (0.0..=DEFAULT_MAX_THICKNESS).contains(&t),
                    "thickness {t} out of range at p={pressure} v={velocity}"
                );
            }
        }
    }
    #[test]
    fn window_tracks_last_five_paints() {
        let mut layer = layer();
        layer.start([0.0, 0.0], Milliseconds(0));
        // Seven segments, each 10 px in 10 ms horizontally: velocity 1.0 -
        // except segments 3 and 4 which take 20 ms: velocity 0.5.
        let mut x = 0.0;
        let mut t = 0;
        let mut expected = Vec::new();
        for i in 0..7 {
            let dt = if i == 3 || i == 4 { 20 } else { 10 };
            x += 10.0;
            t += dt;
            expected.push(10.0 / dt as f32);
            layer.paint([x, 0.0], Some(0.5), Milliseconds(t));
        }
        let tail = &expected[expected.len() - 5..];
        let mean = tail.iter().sum::<f32>() / 5.0;
        assert_eq!(layer.velocity.len(), 5);
        assert!((layer.average_velocity().unwrap() - mean).abs() < 1e-6);
    }
}
