//! Collision geometry
//!
//! - [`primitives`] - rays, axis-aligned boxes and their intersection tests

pub mod primitives;

pub use primitives::{Aabb, AabbHit, Ray, RAY_PARALLEL_EPSILON};
