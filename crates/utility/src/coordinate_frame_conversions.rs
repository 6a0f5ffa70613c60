use crate::*;

// empty structs for euclid typing
#[derive(Clone, PartialEq, Debug, Copy)]
pub struct WorldFrame;

/// Camera looks down +z, image x is +x, image y is +y.
#[derive(Clone, PartialEq, Debug, Copy)]
pub struct CameraFrame;

pub type WorldVector = Vector3D<f64, WorldFrame>;
pub type CameraVector = Vector3D<f64, CameraFrame>;

/// A direction on the unit sphere. Callers keep it normalized.
pub type UnitVector = WorldVector;

/// Maps camera-frame directions to world-frame directions.
pub type Orientation = Rotation3D<f64, CameraFrame, WorldFrame>;

/// Maps the target camera's frame into the source camera's frame.
pub type RelativeOrientation = Rotation3D<f64, CameraFrame, CameraFrame>;

pub type UnitVectorList = Vec<UnitVector>;

pub const CAMERA_VIEW_AXIS: CameraVector = CameraVector::new(0.0, 0.0, 1.0);

pub fn camera_direction_to_world(
    orientation: &Orientation,
    direction: CameraVector,
) -> WorldVector {
    orientation.transform_vector3d(direction)
}

pub fn view_direction(orientation: &Orientation) -> UnitVector {
    camera_direction_to_world(orientation, CAMERA_VIEW_AXIS)
}

/// `base * relative`: apply `relative` first, then `base`.
pub fn compose_orientation(base: &Orientation, relative: &RelativeOrientation) -> Orientation {
    relative.then(base).normalize()
}

/// Quaternion components in real-first order, as the matcher reports them.
pub fn relative_orientation_from_rijk(r: f64, i: f64, j: f64, k: f64) -> RelativeOrientation {
    RelativeOrientation::quaternion(i, j, k, r).normalize()
}

pub fn orientation_from_rijk(r: f64, i: f64, j: f64, k: f64) -> Orientation {
    Orientation::quaternion(i, j, k, r).normalize()
}

pub fn rijk_of<Src, Dst>(rotation: &Rotation3D<f64, Src, Dst>) -> [f64; 4] {
    [rotation.r, rotation.i, rotation.j, rotation.k]
}
