use thiserror::Error;
use utility::UnitVector;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("arc endpoints {p0:?} and {p1:?} are equal or antipodal")]
    DegenerateArc { p0: UnitVector, p1: UnitVector },
    #[error("great circles are coincident, they have no unique crossing")]
    CoincidentGreatCircles,
}
