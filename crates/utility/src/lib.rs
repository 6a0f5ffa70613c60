#![allow(dead_code)]

use std::fmt::Display;

pub use euclid::{vec3, Angle, Rotation3D, Vector3D};
use num::Float;
use rand::rngs::StdRng;
use rand::Rng;

pub mod coordinate_frame_conversions;
pub use coordinate_frame_conversions::*;

/// Below this length a cross product is treated as zero.
pub const DEGENERATE_LENGTH: f64 = 1e-12;

#[macro_export]
macro_rules! pub_mod_and_use {
    ($($module:ident), +) => {
        $(
            pub mod $module;
            pub use self::$module::*;
        )+
    };
}

pub fn sign<T: Float>(x: T) -> T {
    if x < T::zero() {
        -T::one()
    } else if x > T::zero() {
        T::one()
    } else {
        T::zero()
    }
}

/// `None` instead of NaN components when the vector is too short to have a direction.
pub fn try_normalized<U>(v: Vector3D<f64, U>, min_length: f64) -> Option<Vector3D<f64, U>> {
    let length = v.length();
    if !length.is_finite() || length <= min_length {
        None
    } else {
        Some(v / length)
    }
}

pub fn is_unit_vector<U>(v: Vector3D<f64, U>, tolerance: f64) -> bool {
    (v.length() - 1.0).abs() <= tolerance
}

pub fn about_same_vector<U>(a: Vector3D<f64, U>, b: Vector3D<f64, U>, tolerance: f64) -> bool {
    (a - b).length() <= tolerance
}

/// q and -q are the same rotation.
pub fn orientations_approx_eq<Src, Dst>(
    a: &Rotation3D<f64, Src, Dst>,
    b: &Rotation3D<f64, Src, Dst>,
    tolerance: f64,
) -> bool {
    let dot = a.r * b.r + a.i * b.i + a.j * b.j + a.k * b.k;
    1.0 - dot.abs() <= tolerance
}

pub fn vector3_to_string<T: Display, U>(v: Vector3D<T, U>) -> String {
    format!("({}, {}, {})", v.x, v.y, v.z)
}

pub fn seeded_random_unit_vector<U>(rng: &mut StdRng) -> Vector3D<f64, U> {
    loop {
        let v: Vector3D<f64, U> = vec3(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let square_length = v.square_length();
        if square_length <= 1.0 && square_length > 1e-6 {
            return v.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use ntest::{assert_about_eq, assert_false};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(0.1f32), 1.0);
    }

    #[test]
    fn test_try_normalized_rejects_zero() {
        assert_eq!(try_normalized(WorldVector::zero(), DEGENERATE_LENGTH), None);
        let v = try_normalized(WorldVector::new(0.0, 3.0, 4.0), DEGENERATE_LENGTH).unwrap();
        assert_about_eq!(v.y, 0.6);
        assert_about_eq!(v.z, 0.8);
    }

    #[test]
    fn test_orientations_approx_eq_ignores_quaternion_sign() {
        let q = orientation_from_rijk(0.5, 0.5, 0.5, 0.5);
        let minus_q = orientation_from_rijk(-0.5, -0.5, -0.5, -0.5);
        assert!(orientations_approx_eq(&q, &minus_q, 1e-12));
        assert_false!(orientations_approx_eq(&q, &Orientation::identity(), 1e-6));
    }

    #[test]
    fn test_seeded_random_unit_vectors_are_unit_and_repeatable() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let a: WorldVector = seeded_random_unit_vector(&mut rng_a);
            let b: WorldVector = seeded_random_unit_vector(&mut rng_b);
            assert!(is_unit_vector(a, 1e-12));
            assert_eq!(a, b);
        }
    }
}
