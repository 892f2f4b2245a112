//! Round and score bookkeeping
//!
//! A reference game-state collaborator. It only listens to events; nothing
//! in the simulation reads it back.
//!
//! Rules:
//! - a hit scores `points * score_multiplier^(round - 1)`
//! - a round fails as soon as `escaped >= max_escapes`
//! - a round clears once every target of the round is resolved (hit or
//!   escaped) without failing
//! - a target that was already hit stays a hit: its later `DuckEscaped`
//!   (a downed duck drifting out of bounds while falling) is ignored

use crate::config::RoundRules;
use crate::ecs::Entity;
use crate::events::{EventHandler, GameEvent};
use std::collections::HashSet;

/// Outcome of the current round so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundStatus {
    /// Targets are still flying
    #[default]
    InProgress,
    /// Every target resolved and too few escaped
    Cleared,
    /// Too many targets escaped
    Failed,
}

/// Tracks score, hits and escapes across rounds
#[derive(Debug, Clone)]
pub struct RoundTracker {
    rules: RoundRules,
    round: u32,
    score: u64,
    hits: u32,
    escaped: u32,
    shots: u32,
    status: RoundStatus,
    /// Hit targets not yet removed from the world
    downed: HashSet<Entity>,
}

impl RoundTracker {
    /// Start at round 1 with no score
    pub fn new(rules: RoundRules) -> Self {
        Self {
            rules,
            round: 1,
            score: 0,
            hits: 0,
            escaped: 0,
            shots: 0,
            status: RoundStatus::InProgress,
            downed: HashSet::new(),
        }
    }

    /// Current round, starting at 1
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Total score over all rounds
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Hits in the current round
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Escapes in the current round
    pub fn escaped(&self) -> u32 {
        self.escaped
    }

    /// Shots fired in the current round
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Status of the current round
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Score for a hit on a target worth `points` in the current round
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn score_for_hit(&self, points: u32) -> u64 {
        let exponent = i32::try_from(self.round.saturating_sub(1)).unwrap_or(i32::MAX);
        let factor = f64::from(self.rules.score_multiplier).powi(exponent);
        (f64::from(points) * factor).round().max(0.0) as u64
    }

    /// Whether the escape count has reached the failure threshold
    pub fn is_failed(&self) -> bool {
        self.escaped >= self.rules.max_escapes
    }

    /// Move to the next round, keeping the score
    pub fn next_round(&mut self) {
        self.round += 1;
        self.hits = 0;
        self.escaped = 0;
        self.shots = 0;
        self.status = RoundStatus::InProgress;
        log::info!("Round {} started", self.round);
    }

    fn refresh_status(&mut self) {
        if self.status != RoundStatus::InProgress {
            return;
        }
        if self.is_failed() {
            self.status = RoundStatus::Failed;
            log::info!("Round {} failed: {} escaped", self.round, self.escaped);
        } else if self.hits + self.escaped >= self.rules.ducks_per_round {
            self.status = RoundStatus::Cleared;
            log::info!("Round {} cleared with {} hits", self.round, self.hits);
        }
    }
}

impl EventHandler for RoundTracker {
    fn on_event(&mut self, event: &GameEvent) -> bool {
        match event {
            GameEvent::BulletFired { .. } => self.shots += 1,
            GameEvent::DuckHit { entity, points } => {
                self.score += self.score_for_hit(*points);
                self.hits += 1;
                self.downed.insert(*entity);
            }
            GameEvent::DuckEscaped { entity } => {
                if self.downed.remove(entity) {
                    log::debug!("{entity} escaped after being hit, still a hit");
                } else {
                    self.escaped += 1;
                }
            }
            GameEvent::DuckFell { entity } => {
                self.downed.remove(entity);
            }
        }
        self.refresh_status();
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(points: u32) -> GameEvent {
        GameEvent::DuckHit {
            entity: Entity::new(1),
            points,
        }
    }

    fn escape() -> GameEvent {
        GameEvent::DuckEscaped {
            entity: Entity::new(2),
        }
    }

    #[test]
    fn test_score_is_exponential_in_round() {
        let mut tracker = RoundTracker::new(RoundRules::default());
        assert_eq!(tracker.score_for_hit(100), 100);

        tracker.next_round();
        assert_eq!(tracker.score_for_hit(100), 150);

        tracker.next_round();
        // 100 * 1.5^2, not the linear 100 * 1.5 * 3 = 450
        assert_eq!(tracker.score_for_hit(100), 225);
    }

    #[test]
    fn test_hits_accumulate_score() {
        let mut tracker = RoundTracker::new(RoundRules::default());
        tracker.on_event(&hit(100));
        tracker.next_round();
        tracker.on_event(&hit(100));
        assert_eq!(tracker.score(), 250);
        assert_eq!(tracker.hits(), 1);
    }

    #[test]
    fn test_round_fails_at_max_escapes_not_after() {
        let mut tracker = RoundTracker::new(RoundRules::default());
        tracker.on_event(&escape());
        tracker.on_event(&escape());
        assert_eq!(tracker.status(), RoundStatus::InProgress);
        assert!(!tracker.is_failed());

        // Third escape fails the round: >= 3, not > 3
        tracker.on_event(&escape());
        assert!(tracker.is_failed());
        assert_eq!(tracker.status(), RoundStatus::Failed);
    }

    #[test]
    fn test_round_clears_when_all_resolved() {
        let rules = RoundRules {
            ducks_per_round: 3,
            ..RoundRules::default()
        };
        let mut tracker = RoundTracker::new(rules);
        tracker.on_event(&hit(10));
        tracker.on_event(&escape());
        assert_eq!(tracker.status(), RoundStatus::InProgress);
        tracker.on_event(&hit(10));
        assert_eq!(tracker.status(), RoundStatus::Cleared);

        tracker.next_round();
        assert_eq!(tracker.status(), RoundStatus::InProgress);
        assert_eq!(tracker.escaped(), 0);
    }

    #[test]
    fn test_escape_of_hit_duck_is_not_a_miss() {
        let mut tracker = RoundTracker::new(RoundRules {
            max_escapes: 1,
            ..RoundRules::default()
        });
        let duck = Entity::new(7);
        tracker.on_event(&GameEvent::DuckHit { entity: duck, points: 100 });
        tracker.on_event(&GameEvent::DuckEscaped { entity: duck });

        assert_eq!(tracker.hits(), 1);
        assert_eq!(tracker.escaped(), 0);
        assert_eq!(tracker.status(), RoundStatus::InProgress);

        // A different duck escaping still counts
        tracker.on_event(&escape());
        assert_eq!(tracker.escaped(), 1);
        assert_eq!(tracker.status(), RoundStatus::Failed);
    }

    #[test]
    fn test_fallen_duck_is_forgotten() {
        let mut tracker = RoundTracker::new(RoundRules::default());
        let duck = Entity::new(3);
        tracker.on_event(&GameEvent::DuckHit { entity: duck, points: 100 });
        tracker.on_event(&GameEvent::DuckFell { entity: duck });
        assert!(tracker.downed.is_empty());
    }

    #[test]
    fn test_failed_round_stays_failed() {
        let rules = RoundRules {
            max_escapes: 1,
            ducks_per_round: 2,
            ..RoundRules::default()
        };
        let mut tracker = RoundTracker::new(rules);
        tracker.on_event(&escape());
        tracker.on_event(&hit(10));
        assert_eq!(tracker.status(), RoundStatus::Failed);
    }

    #[test]
    fn test_counts_shots_and_never_consumes() {
        let mut tracker = RoundTracker::new(RoundRules::default());
        let fired = GameEvent::BulletFired {
            gun: Entity::new(1),
            origin: crate::foundation::math::Vec3::zeros(),
            direction: -crate::foundation::math::Vec3::z(),
            hit: None,
        };
        assert!(!tracker.on_event(&fired));
        assert_eq!(tracker.shots(), 1);
    }
}
