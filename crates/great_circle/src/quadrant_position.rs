use std::f64::consts::FRAC_PI_2;

use derive_more::Display;
use ordered_float::OrderedFloat;
use utility::Angle;

/// Positions this close to either side of the arc's start are the start.
const START_SNAP: f64 = 1e-12;

/// Angular position counter-clockwise from an arc's start, in `[0, 4)`.
///
/// The integer part is the quadrant, the fractional part is the sine of the
/// angle already covered inside that quadrant. This is strictly increasing
/// with the true angle, but not linear in it.
///
/// Only positions taken relative to the same arc are comparable.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Display)]
#[display(fmt = "{:.6}", _0)]
pub struct QuadrantPosition(f64);

impl QuadrantPosition {
    pub const START: Self = QuadrantPosition(0.0);

    pub fn new(value: f64) -> Self {
        let wrapped = value.rem_euclid(4.0);
        if wrapped < START_SNAP || wrapped >= 4.0 - START_SNAP {
            Self::START
        } else {
            QuadrantPosition(wrapped)
        }
    }

    /// `gx` and `gy` are the coordinates of a point on the great circle in
    /// the arc's `(p0, axis x p0)` basis.
    pub fn from_basis_coordinates(gx: f64, gy: f64) -> Self {
        let raw = if gy < 0.0 {
            if gx > 0.0 {
                3.0 + gx
            } else {
                2.0 - gy
            }
        } else if gx < 0.0 {
            1.0 - gx
        } else {
            gy
        };
        Self::new(raw)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn quadrant(&self) -> u8 {
        (self.0.floor() as u8).min(3)
    }

    pub fn progress_in_quadrant(&self) -> f64 {
        (self.0 - self.quadrant() as f64).clamp(0.0, 1.0)
    }

    /// Position of the opposite point on the same great circle.
    pub fn antipodal(&self) -> Self {
        Self::new(self.0 + 2.0)
    }

    pub fn to_angle(&self) -> Angle<f64> {
        Angle::radians(self.progress_in_quadrant().asin() + self.quadrant() as f64 * FRAC_PI_2)
    }

    pub fn from_angle(angle: Angle<f64>) -> Self {
        let radians = angle.radians.rem_euclid(4.0 * FRAC_PI_2);
        Self::from_basis_coordinates(radians.cos(), radians.sin())
    }

    pub fn ordered(&self) -> OrderedFloat<f64> {
        OrderedFloat(self.0)
    }

    /// Shortest distance going either way around, in quadrant units.
    pub fn circular_distance(&self, other: Self) -> f64 {
        let d = (self.0 - other.0).abs();
        d.min(4.0 - d)
    }
}

impl From<QuadrantPosition> for f64 {
    fn from(value: QuadrantPosition) -> Self {
        value.value()
    }
}
