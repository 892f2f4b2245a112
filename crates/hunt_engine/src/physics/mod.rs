//! Physics module: discrete collision geometry only
//!
//! There is no dynamics solver. Motion is kinematic translation done by the
//! movement system; this module answers ray/box and box/box questions.

pub mod collision;

pub use collision::{Aabb, AabbHit, Ray, RAY_PARALLEL_EPSILON};
