//! Math utilities and types
//!
//! Thin aliases over `nalgebra` so the rest of the engine speaks one vocabulary
//! for vectors, matrices and orientations.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Unit quaternion used for every orientation in the engine.
///
/// Euler angles are accepted only as constructor input; nothing stores them.
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Lengths below this are treated as zero when normalizing directions.
    pub const DIRECTION_EPSILON: f32 = 1e-6;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Normalize `v`, or `None` when it is too short to carry a direction.
    pub fn try_direction(v: Vec3) -> Option<Vec3> {
        v.try_normalize(constants::DIRECTION_EPSILON)
    }

    /// Component-wise absolute value
    pub fn abs(v: Vec3) -> Vec3 {
        v.map(f32::abs)
    }
}
