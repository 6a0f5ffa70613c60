use getset::CopyGetters;
use utility::*;

use crate::{GeometryError, QuadrantPosition};

/// A directed arc of a great circle, running counter-clockwise (about `axis`)
/// from `p0` to `p1`.
///
/// The axis is always normalized, so quadrant positions of different arcs
/// are built the same way. The basis used for positions is `gx = p0`,
/// `gy = axis x p0`.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters)]
#[get_copy = "pub"]
pub struct GreatCircleArc {
    p0: UnitVector,
    p1: UnitVector,
    axis: UnitVector,
    gy: UnitVector,
    p1_quad_position: QuadrantPosition,
}

impl GreatCircleArc {
    /// Endpoints must be unit vectors that are neither equal nor antipodal.
    pub fn new(p0: UnitVector, p1: UnitVector) -> Self {
        match Self::try_new(p0, p1) {
            Ok(arc) => arc,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_new(p0: UnitVector, p1: UnitVector) -> Result<Self, GeometryError> {
        let axis = try_normalized(p0.cross(p1), DEGENERATE_LENGTH)
            .ok_or(GeometryError::DegenerateArc { p0, p1 })?;
        let gy = axis.cross(p0).normalize();
        let mut arc = GreatCircleArc {
            p0,
            p1,
            axis,
            gy,
            p1_quad_position: QuadrantPosition::START,
        };
        arc.p1_quad_position = arc.quad_position(p1);
        Ok(arc)
    }

    pub fn gx(&self) -> UnitVector {
        self.p0
    }

    /// Position of `p`, a point on this arc's great circle, counted from `p0`.
    pub fn quad_position(&self, p: UnitVector) -> QuadrantPosition {
        QuadrantPosition::from_basis_coordinates(p.dot(self.p0), p.dot(self.gy))
    }

    /// Whether a position lies in the span from `p0` up to and including `p1`.
    pub fn is_on_arc(&self, position: QuadrantPosition) -> bool {
        position <= self.p1_quad_position
    }

    pub(crate) fn is_on_arc_within(&self, position: QuadrantPosition, tolerance: f64) -> bool {
        position.value() <= self.p1_quad_position.value() + tolerance
    }

    /// Whether `p` is on the great circle (within `tolerance`) and inside the span.
    pub fn contains_point(&self, p: UnitVector, tolerance: f64) -> bool {
        p.dot(self.axis).abs() <= tolerance
            && self.is_on_arc_within(self.quad_position(p), tolerance)
    }

    pub fn midpoint(&self) -> UnitVector {
        (self.p0 + self.p1).normalize()
    }

    pub fn angular_length(&self) -> Angle<f64> {
        self.p1_quad_position.to_angle()
    }

    /// `t = 0` is `p0`, `t = 1` is `p1`, evenly spaced in true angle.
    pub fn point_at_fraction(&self, t: f64) -> UnitVector {
        let angle = self.angular_length().radians * t;
        self.p0 * angle.cos() + self.gy * angle.sin()
    }

    /// `num_points` points from `p0` to `p1` inclusive.
    pub fn interpolate(&self, num_points: usize) -> UnitVectorList {
        match num_points {
            0 => vec![],
            1 => vec![self.p0],
            n => (0..n)
                .map(|i| self.point_at_fraction(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.p1, self.p0)
    }
}

#[cfg(test)]
mod tests {
    use ntest::{assert_about_eq, assert_false};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn x_to_y() -> GreatCircleArc {
        GreatCircleArc::new(vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0))
    }

    fn random_arc(rng: &mut StdRng) -> GreatCircleArc {
        loop {
            let p0 = seeded_random_unit_vector(rng);
            let p1 = seeded_random_unit_vector(rng);
            if let Ok(arc) = GreatCircleArc::try_new(p0, p1) {
                return arc;
            }
        }
    }

    #[test]
    fn test_basis_of_quarter_arc() {
        let arc = x_to_y();
        assert!(about_same_vector(arc.axis(), vec3(0.0, 0.0, 1.0), 1e-12));
        assert!(about_same_vector(arc.gy(), vec3(0.0, 1.0, 0.0), 1e-12));
        assert_about_eq!(arc.p1_quad_position().value(), 1.0);
    }

    #[test]
    fn test_endpoint_positions() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let arc = random_arc(&mut rng);
            assert_eq!(arc.quad_position(arc.p0()), QuadrantPosition::START);
            assert_eq!(arc.quad_position(arc.p1()), arc.p1_quad_position());
            assert!(arc.is_on_arc(arc.quad_position(arc.p0())));
            assert!(arc.is_on_arc(arc.quad_position(arc.p1())));
        }
    }

    #[test]
    fn test_positions_non_decreasing_along_arc() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let arc = random_arc(&mut rng);
            let mut last = QuadrantPosition::START;
            for p in arc.interpolate(30) {
                let position = arc.quad_position(p);
                assert!(position.value() >= last.value() - 1e-12);
                last = position;
            }
        }
    }

    #[test]
    fn test_point_past_p1_is_off_arc() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let arc = random_arc(&mut rng);
            let beyond = arc.point_at_fraction(1.05);
            assert_false!(arc.is_on_arc(arc.quad_position(beyond)));
        }
    }

    #[test]
    fn test_interpolate_hits_endpoints() {
        let arc = GreatCircleArc::new(vec3(1.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0));
        let points = arc.interpolate(5);
        assert_eq!(points.len(), 5);
        assert!(about_same_vector(points[0], arc.p0(), 1e-12));
        assert!(about_same_vector(points[4], arc.p1(), 1e-12));
        let s = 0.5_f64.sqrt();
        assert!(about_same_vector(points[2], vec3(s, 0.0, s), 1e-12));
    }

    #[test]
    fn test_midpoint() {
        let s = 0.5_f64.sqrt();
        assert!(about_same_vector(x_to_y().midpoint(), vec3(s, s, 0.0), 1e-12));
    }

    #[test]
    fn test_degenerate_endpoints_are_rejected() {
        let p = vec3(0.0, 0.0, 1.0);
        assert_eq!(
            GreatCircleArc::try_new(p, p),
            Err(GeometryError::DegenerateArc { p0: p, p1: p })
        );
        assert!(GreatCircleArc::try_new(p, -p).is_err());
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_antipodal_endpoints() {
        GreatCircleArc::new(vec3(1.0, 0.0, 0.0), vec3(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_contains_point() {
        let arc = x_to_y();
        assert!(arc.contains_point(arc.midpoint(), 1e-9));
        assert_false!(arc.contains_point(-arc.midpoint(), 1e-9));
        assert_false!(arc.contains_point(vec3(0.0, 0.0, 1.0), 1e-9));
    }

    #[test]
    fn test_reversed_runs_the_other_way() {
        let arc = x_to_y().reversed();
        assert_eq!(arc.p0(), vec3(0.0, 1.0, 0.0));
        assert!(about_same_vector(arc.axis(), vec3(0.0, 0.0, -1.0), 1e-12));
    }
}
