//! Health component for entities that can be shot down
//!
//! State machine: `Alive -> Dead -> Falling`, then destroyed by the
//! lifecycle system once the entity drops below the death plane.

use crate::ecs::Component;

/// Where an entity is in its death sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthState {
    /// Flying normally
    #[default]
    Alive,
    /// Hit and hanging in the air for the death pause
    Dead,
    /// Dropping toward the death plane
    Falling,
}

/// Component for entities that react to being hit
#[derive(Debug, Clone, PartialEq)]
pub struct HealthComponent {
    /// Current state
    pub state: HealthState,

    /// Seconds spent in `state`
    pub state_time: f32,

    /// Mesh swapped in when the entity dies, looked up by name
    pub downed_mesh: Option<String>,

    /// Material swapped in when the entity dies, looked up by name
    pub downed_material: Option<String>,

    /// Base points awarded for the hit
    pub points: u32,
}

impl Component for HealthComponent {}

impl Default for HealthComponent {
    fn default() -> Self {
        Self::new(0)
    }
}

impl HealthComponent {
    /// Alive entity worth `points`
    pub fn new(points: u32) -> Self {
        Self {
            state: HealthState::Alive,
            state_time: 0.0,
            downed_mesh: None,
            downed_material: None,
            points,
        }
    }

    /// Builder pattern: visuals to show once dead
    #[must_use]
    pub fn with_downed_visuals(mut self, mesh: Option<&str>, material: Option<&str>) -> Self {
        self.downed_mesh = mesh.map(str::to_string);
        self.downed_material = material.map(str::to_string);
        self
    }

    /// Whether the entity can still be hit
    pub fn is_alive(&self) -> bool {
        self.state == HealthState::Alive
    }

    /// Set the state, resetting the state timer on change
    pub fn set_state(&mut self, new_state: HealthState) {
        if self.state != new_state {
            self.state = new_state;
            self.state_time = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_alive() {
        let health = HealthComponent::new(100);
        assert!(health.is_alive());
        assert_eq!(health.points, 100);
        assert_eq!(health.downed_mesh, None);
    }

    #[test]
    fn test_set_state_resets_timer_only_on_change() {
        let mut health = HealthComponent::new(0);
        health.state_time = 1.5;
        health.set_state(HealthState::Alive);
        assert_eq!(health.state_time, 1.5);

        health.set_state(HealthState::Dead);
        assert_eq!(health.state, HealthState::Dead);
        assert_eq!(health.state_time, 0.0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_downed_visuals_builder() {
        let health = HealthComponent::new(50).with_downed_visuals(Some("duck_dead"), None);
        assert_eq!(health.downed_mesh.as_deref(), Some("duck_dead"));
        assert_eq!(health.downed_material, None);
    }
}
