use getset::CopyGetters;
use utility::*;

use crate::{GeometryError, GreatCircleArc, QuadrantPosition};

/// Slack on the "up to and including p1" test, so crossings at shared
/// endpoints survive rounding.
pub const ON_ARC_TOLERANCE: f64 = 1e-9;

/// Which side of one arc the other arc travels towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrossingSense {
    Negative,
    Along,
    Positive,
}

impl CrossingSense {
    pub fn of(x: f64) -> Self {
        match sign(x) {
            s if s < 0.0 => CrossingSense::Negative,
            s if s > 0.0 => CrossingSense::Positive,
            _ => CrossingSense::Along,
        }
    }
    pub fn is_negative(&self) -> bool {
        *self == CrossingSense::Negative
    }
}

#[derive(Clone, Copy, Debug, PartialEq, CopyGetters)]
#[get_copy = "pub"]
pub struct ArcIntersection {
    point: UnitVector,
    /// Position of `point` along the arc `intersect` was called on.
    self_position: QuadrantPosition,
    /// Position of `point` along the other arc.
    other_position: QuadrantPosition,
    /// Sign of `self.axis . (other.p1 - other.p0)`.
    other_sense_across_self: CrossingSense,
    /// Sign of `other.axis . (self.p1 - self.p0)`.
    self_sense_across_other: CrossingSense,
}

impl GreatCircleArc {
    /// Where this arc crosses `other`, if it does.
    ///
    /// The great circles always meet at `+-(axis x other.axis)`; the first of
    /// the two that lies within both spans is returned. `Ok(None)` means the
    /// circles cross outside at least one of the arcs.
    pub fn intersect(
        &self,
        other: &GreatCircleArc,
    ) -> Result<Option<ArcIntersection>, GeometryError> {
        let p = try_normalized(self.axis().cross(other.axis()), DEGENERATE_LENGTH)
            .ok_or(GeometryError::CoincidentGreatCircles)?;

        let self_position = self.quad_position(p);
        let other_position = other.quad_position(p);
        let other_sense_across_self = CrossingSense::of(self.axis().dot(other.p1() - other.p0()));
        let self_sense_across_other = CrossingSense::of(other.axis().dot(self.p1() - self.p0()));

        let candidates = [
            (p, self_position, other_position),
            (-p, self_position.antipodal(), other_position.antipodal()),
        ];
        let found = candidates
            .into_iter()
            .find(|&(_, self_position, other_position)| {
                self.is_on_arc_within(self_position, ON_ARC_TOLERANCE)
                    && other.is_on_arc_within(other_position, ON_ARC_TOLERANCE)
            })
            .map(|(point, self_position, other_position)| ArcIntersection {
                point,
                self_position,
                other_position,
                other_sense_across_self,
                self_sense_across_other,
            });
        Ok(found)
    }
}
