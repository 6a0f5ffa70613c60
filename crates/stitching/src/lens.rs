use std::f64::consts::FRAC_PI_2;

use getset::CopyGetters;
use log::warn;
use serde::Deserialize;
use strum_macros::{Display, EnumIter, EnumString};
use utility::*;

/// Image corners in normalized device coordinates, in the order the frustum
/// edges run. Each edge's axis then points into the image.
pub const NDC_CORNERS: [[f64; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LensType {
    /// angle = offset / focal length
    #[default]
    Equidistant,
    /// angle = atan(offset / focal length)
    Rectilinear,
    /// angle = 2 atan(offset / (2 focal length))
    Stereographic,
}

impl LensType {
    /// Unrecognised names fall back to equidistant.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!("unknown lens type {:?}, using {}", name, LensType::Equidistant);
            LensType::Equidistant
        })
    }
}

/// Anything that can say where an image's four corners look, given the
/// camera's orientation.
pub trait CornerProjection {
    fn corner_directions(&self, orientation: &Orientation) -> [UnitVector; 4];
}

/// Maps image coordinates to directions for a simple symmetric lens.
///
/// Image coordinates are in the same units as `width`; an offset of `width`
/// from the centre is the full `frame_width` on the sensor.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters, Deserialize)]
#[get_copy = "pub"]
#[serde(default)]
pub struct LensProjection {
    width: f64,
    height: f64,
    /// Sensor width, same units as `focal_length`.
    frame_width: f64,
    focal_length: f64,
    lens_type: LensType,
}

impl Default for LensProjection {
    // 20mm rectilinear on an APS-C body, image spanning -1..1 horizontally
    fn default() -> Self {
        Self {
            width: 2.0,
            height: 2.0 * 5184.0 / 3456.0,
            frame_width: 22.3,
            focal_length: 20.0,
            lens_type: LensType::Rectilinear,
        }
    }
}

impl LensProjection {
    pub fn new(
        width: f64,
        height: f64,
        frame_width: f64,
        focal_length: f64,
        lens_type: LensType,
    ) -> Self {
        Self {
            width,
            height,
            frame_width,
            focal_length,
            lens_type,
        }
    }

    pub fn with_lens(&self, focal_length: f64, lens_type: LensType) -> Self {
        Self {
            focal_length,
            lens_type,
            ..*self
        }
    }

    /// `fraction_from_center` is the offset as a fraction of `width`.
    pub fn offset_to_angle(&self, fraction_from_center: f64) -> f64 {
        let offset = fraction_from_center * self.frame_width;
        match self.lens_type {
            LensType::Equidistant => offset / self.focal_length,
            LensType::Rectilinear => offset.atan2(self.focal_length),
            LensType::Stereographic => 2.0 * offset.atan2(2.0 * self.focal_length),
        }
    }

    pub fn angle_to_offset(&self, angle: f64) -> f64 {
        let scale = self.focal_length / self.frame_width;
        match self.lens_type {
            LensType::Equidistant => angle * scale,
            LensType::Rectilinear => angle.tan() * scale,
            LensType::Stereographic => 2.0 * (angle / 2.0).tan() * scale,
        }
    }

    /// Roll around the view axis and angle away from it.
    pub fn xy_to_roll_yaw(&self, xy: [f64; 2]) -> (Angle<f64>, Angle<f64>) {
        let [x, y] = xy;
        let r = x.hypot(y);
        (Angle::radians(y.atan2(x)), Angle::radians(self.offset_to_angle(r / self.width)))
    }

    pub fn camera_direction_of_xy(&self, xy: [f64; 2]) -> CameraVector {
        let (roll, yaw) = self.xy_to_roll_yaw(xy);
        let (sin_yaw, cos_yaw) = yaw.radians.sin_cos();
        let (sin_roll, cos_roll) = roll.radians.sin_cos();
        vec3(sin_yaw * cos_roll, sin_yaw * sin_roll, cos_yaw)
    }

    pub fn direction_of_xy(&self, orientation: &Orientation, xy: [f64; 2]) -> UnitVector {
        camera_direction_to_world(orientation, self.camera_direction_of_xy(xy)).normalize()
    }

    /// Inverse of [`Self::direction_of_xy`]. `None` for directions this lens can not image.
    pub fn xy_of_direction(
        &self,
        orientation: &Orientation,
        direction: UnitVector,
    ) -> Option<[f64; 2]> {
        let camera = orientation.inverse().transform_vector3d(direction);
        let yaw = camera.z.clamp(-1.0, 1.0).acos();
        if self.lens_type == LensType::Rectilinear && yaw >= FRAC_PI_2 {
            return None;
        }
        let roll = camera.y.atan2(camera.x);
        let r = self.width * self.angle_to_offset(yaw);
        Some([r * roll.cos(), r * roll.sin()])
    }
}

impl CornerProjection for LensProjection {
    fn corner_directions(&self, orientation: &Orientation) -> [UnitVector; 4] {
        NDC_CORNERS.map(|xy| self.direction_of_xy(orientation, xy))
    }
}
