//! Primitive collision shapes and intersection algorithms
//!
//! Rays and axis-aligned boxes, with the slab method for ray/box tests and an
//! inclusive overlap test for box/box. Everything here is pure geometry; the
//! ECS-facing scan lives in `ecs::systems::collision_system`.

use crate::foundation::math::{utils, Vec3};

/// Below this magnitude a ray direction component counts as parallel to that
/// axis' slab. Tunable: raising it treats more grazing rays as parallel.
pub const RAY_PARALLEL_EPSILON: f32 = 1e-4;

/// A ray for ray casting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray, always unit length
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray, normalizing `direction`.
    ///
    /// Returns `None` for a zero-length direction: a degenerate ray
    /// intersects nothing.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        utils::try_direction(direction).map(|direction| Self { origin, direction })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Where a ray struck an [`Aabb`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabbHit {
    /// Distance from the ray origin, never negative
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
    /// Outward normal of the struck face, one of the six axis directions
    pub normal: Vec3,
}

/// Axis-aligned bounding box given by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two opposite corners in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Create a box from its center and half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = utils::abs(half_extents);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half of the box size along each axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Whether `point` lies inside or on the boundary
    pub fn contains_point(&self, point: Vec3) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Inclusive overlap test: boxes touching on a face count as overlapping
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| self.min[axis] <= other.max[axis] && self.max[axis] >= other.min[axis])
    }

    /// Slab-method ray test with the default [`RAY_PARALLEL_EPSILON`]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<AabbHit> {
        self.intersect_ray_with_epsilon(ray, RAY_PARALLEL_EPSILON)
    }

    /// Slab-method ray test.
    ///
    /// A ray starting inside the box reports the exit point, so the distance
    /// is never negative.
    pub fn intersect_ray_with_epsilon(&self, ray: &Ray, parallel_epsilon: f32) -> Option<AabbHit> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];

            if direction.abs() < parallel_epsilon {
                // Parallel to this slab: either always inside it or never
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }

            let mut t1 = (self.min[axis] - origin) / direction;
            let mut t2 = (self.max[axis] - origin) / direction;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }

        let distance = if t_min >= 0.0 { t_min } else { t_max };
        if !distance.is_finite() {
            return None;
        }

        let point = ray.point_at(distance);
        Some(AabbHit {
            distance,
            point,
            normal: self.face_normal(point),
        })
    }

    /// Outward normal of the face closest to `point`.
    ///
    /// Picks the axis whose `|local| - half_extent` is nearest zero; on a tie
    /// the first axis in x, y, z order wins.
    pub fn face_normal(&self, point: Vec3) -> Vec3 {
        let local = point - self.center();
        let half = self.half_extents();

        let mut best_axis = 0;
        let mut best_deviation = f32::INFINITY;
        for axis in 0..3 {
            let deviation = (local[axis].abs() - half[axis]).abs();
            if deviation < best_deviation {
                best_deviation = deviation;
                best_axis = axis;
            }
        }

        let mut normal = Vec3::zeros();
        normal[best_axis] = if local[best_axis] < 0.0 { -1.0 } else { 1.0 };
        normal
    }
}
