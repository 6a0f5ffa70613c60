use getset::Getters;
use great_circle::{GeometryError, GreatCircleArc};
use utility::*;

use crate::CornerProjection;

/// The outline of an image on the unit sphere.
///
/// `arcs[k]` runs from `corners[k]` to `corners[k + 1]`, wrapping, and every
/// arc's axis points into the image.
#[derive(Clone, Debug, PartialEq, Getters)]
#[get = "pub"]
pub struct ImageFrustum {
    corners: [UnitVector; 4],
    arcs: [GreatCircleArc; 4],
}

impl ImageFrustum {
    pub fn try_from_corners(corners: [UnitVector; 4]) -> Result<Self, GeometryError> {
        let [a0, a1, a2, a3] =
            [0, 1, 2, 3].map(|k| GreatCircleArc::try_new(corners[k], corners[(k + 1) % 4]));
        Ok(ImageFrustum {
            corners,
            arcs: [a0?, a1?, a2?, a3?],
        })
    }

    pub fn from_lens(
        lens: &impl CornerProjection,
        orientation: &Orientation,
    ) -> Result<Self, GeometryError> {
        Self::try_from_corners(lens.corner_directions(orientation))
    }

    pub fn corner(&self, index: usize) -> UnitVector {
        self.corners[index % 4]
    }

    pub fn centre(&self) -> UnitVector {
        self.corners
            .iter()
            .fold(UnitVector::zero(), |sum, &c| sum + c)
            .normalize()
    }

    /// Inside or on the boundary of all four edges.
    pub fn contains_direction(&self, direction: UnitVector, tolerance: f64) -> bool {
        self.arcs
            .iter()
            .all(|arc| arc.axis().dot(direction) >= -tolerance)
    }
}
