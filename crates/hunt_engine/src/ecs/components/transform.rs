//! Transform component for the ECS system
//!
//! Pure data: world-space position, orientation quaternion and non-uniform
//! scale. Y-up right-handed; an unrotated entity faces -Z.

use crate::ecs::Component;
use crate::foundation::math::{constants::DIRECTION_EPSILON, utils, Mat4, Quat, Vec3};

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation quaternion
    pub rotation: Quat,

    /// World space scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from full transform specification
    pub fn from_transform(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Convert to transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Local -Z in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::new(0.0, 0.0, -1.0)
    }

    /// Local +X in world space
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::new(1.0, 0.0, 0.0)
    }

    /// Local +Y in world space
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::new(0.0, 1.0, 0.0)
    }

    /// Rotate about the entity's own axes: `current * delta`
    pub fn rotate_local(&mut self, delta: Quat) {
        self.rotation *= delta;
    }

    /// Rotate about the world axes: `delta * current`
    pub fn rotate_world(&mut self, delta: Quat) {
        self.rotation = delta * self.rotation;
    }

    /// Turn so that [`TransformComponent::forward`] points along `direction`.
    ///
    /// A zero-length direction leaves the rotation untouched.
    pub fn look_along(&mut self, direction: Vec3) {
        if let Some(rotation) = facing_rotation(direction) {
            self.rotation = rotation;
        }
    }

    /// Builder pattern: Set position
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from quaternion
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set rotation from axis-angle
    #[must_use]
    pub fn with_rotation_axis_angle(mut self, axis: Vec3, angle: f32) -> Self {
        if let Some(axis) = utils::try_direction(axis) {
            self.rotation = Quat::from_axis_angle(&nalgebra::Unit::new_unchecked(axis), angle);
        }
        self
    }

    /// Builder pattern: Set scale (uniform)
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Rotation taking -Z onto `direction`, `None` if `direction` is degenerate
pub fn facing_rotation(direction: Vec3) -> Option<Quat> {
    let direction = utils::try_direction(direction)?;
    let default_forward = Vec3::new(0.0, 0.0, -1.0);

    if (direction + default_forward).magnitude() < DIRECTION_EPSILON {
        // Exactly backwards: rotation_between has no unique answer
        return Some(Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::PI));
    }
    Some(Quat::rotation_between(&default_forward, &direction).unwrap_or_else(Quat::identity))
}
