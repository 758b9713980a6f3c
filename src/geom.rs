//! # Geometry
//!
//! The small amount of vector math the brush needs: displacement magnitude,
//! normalization, and the perpendicular that turns a travel direction into a
//! ribbon-width direction.

/// An immutable 2D displacement with its magnitude computed up front.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vec2 {
    x: f32,
    y: f32,
    magnitude: f32,
}
impl Vec2 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        magnitude: 0.0,
    };
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            magnitude: x.hypot(y),
        }
    }
    #[must_use]
    pub fn x(self) -> f32 {
        self.x
    }
    #[must_use]
    pub fn y(self) -> f32 {
        self.y
    }
    #[must_use]
    pub fn magnitude(self) -> f32 {
        self.magnitude
    }
    /// Unit vector in the same direction. `None` for zero-length (or
    /// non-finite) displacements - two pointer samples at the identical
    /// coordinate have no direction, and the caller must skip them.
    #[must_use = "returns a new vector without modifying `self`"]
    pub fn normalized(self) -> Option<Self> {
        if self.magnitude > 0.0 && self.magnitude.is_finite() {
            Some(Self::new(self.x / self.magnitude, self.y / self.magnitude))
        } else {
            None
        }
    }
    /// Rotate 90 degrees clockwise: `(x, y) -> (-y, x)`.
    #[must_use = "returns a new vector without modifying `self`"]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }
    #[must_use = "returns a new vector without modifying `self`"]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

#[cfg(test)]
mod test {
    use super::Vec2;

    #[test]
    fn magnitude_computed_on_construction() {
        assert_eq!(Vec2::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Vec2::ZERO.magnitude(), 0.0);
    }
    #[test]
    fn zero_has_no_direction() {
        assert!(Vec2::ZERO.normalized().is_none());
        assert!(Vec2::new(0.0, 0.0).normalized().is_none());
    }
    #[test]
    fn perpendicular_of_normalized_is_orthogonal_unit() {
        let cases = [
            (10.0, 0.0),
            (0.0, -3.5),
            (1.0, 1.0),
            (-7.25, 2.0),
            (0.001, -0.002),
        ];
        for (x, y) in cases {
            let v = Vec2::new(x, y);
            let n = v.normalized().unwrap().perpendicular();
            assert!((n.magnitude() - 1.0).abs() < 1e-5, "({x}, {y}) not unit");
            assert!(n.dot(v).abs() < 1e-3, "({x}, {y}) not orthogonal");
        }
    }
    #[test]
    fn perpendicular_is_clockwise() {
        let p = Vec2::new(1.0, 0.0).perpendicular();
        assert_eq!((p.x(), p.y()), (0.0, 1.0));
    }
}
