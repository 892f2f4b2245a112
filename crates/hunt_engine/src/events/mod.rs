//! Gameplay event delivery
//!
//! Systems never call the audio or game-state collaborators directly. They
//! queue a [`GameEvent`]; the scene manager dispatches the queue once per
//! frame, after all systems ran. Delivery is fire-and-forget:
//! - handlers return `true` to consume an event and stop forwarding
//! - nothing is retried and no result flows back into the simulation
//! - deferred events wait in a second queue until their delivery time

use crate::ecs::Entity;
use crate::foundation::math::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A gun cast its ray
    BulletFired,
    /// A live target was struck
    DuckHit,
    /// A target left its escape bounds
    DuckEscaped,
    /// A target dropped below the death plane
    DuckFell,
}

/// Notification emitted by the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A gun cast its ray, whether or not it struck anything
    BulletFired {
        /// Firing entity
        gun: Entity,
        /// Ray origin
        origin: Vec3,
        /// World-space ray direction
        direction: Vec3,
        /// First collider struck, if any
        hit: Option<Entity>,
    },
    /// A live target was struck and started its death sequence
    DuckHit {
        /// The struck target
        entity: Entity,
        /// Base points carried by the target
        points: u32,
    },
    /// A target escaped and was destroyed
    DuckEscaped {
        /// The escaped target
        entity: Entity,
    },
    /// A target fell through the death plane and was destroyed
    DuckFell {
        /// The fallen target
        entity: Entity,
    },
}

impl GameEvent {
    /// Discriminant used for handler filtering
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::BulletFired { .. } => EventType::BulletFired,
            Self::DuckHit { .. } => EventType::DuckHit,
            Self::DuckEscaped { .. } => EventType::DuckEscaped,
            Self::DuckFell { .. } => EventType::DuckFell,
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &GameEvent) -> bool;

    /// Whether this handler wants events of `event_type`. Defaults to all.
    fn handles(&self, _event_type: EventType) -> bool {
        true
    }
}

/// Shared handlers let the owner keep reading state after registration
impl<H: EventHandler> EventHandler for Rc<RefCell<H>> {
    fn on_event(&mut self, event: &GameEvent) -> bool {
        self.borrow_mut().on_event(event)
    }

    fn handles(&self, event_type: EventType) -> bool {
        self.borrow().handles(event_type)
    }
}

/// Event system with registration and queuing
/// Follows chain of responsibility pattern
pub struct EventSystem {
    immediate_queue: Vec<GameEvent>,
    deferred_queue: Vec<(f64, GameEvent)>,
    handlers: Vec<Box<dyn EventHandler>>,
    current_time: f64,
    dispatched: u64,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self {
            immediate_queue: Vec::new(),
            deferred_queue: Vec::new(),
            handlers: Vec::new(),
            current_time: 0.0,
            dispatched: 0,
        }
    }

    /// Update current time (seconds since start)
    pub fn update_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Register a handler. Handlers are offered events in registration order.
    pub fn register_handler(&mut self, handler: Box<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Queue an event for this frame's dispatch
    pub fn send(&mut self, event: GameEvent) {
        log::trace!("Queued {:?}", event.event_type());
        self.immediate_queue.push(event);
    }

    /// Post event for deferred delivery at specified time
    pub fn post(&mut self, delivery_time: f64, event: GameEvent) {
        self.deferred_queue.push((delivery_time, event));
    }

    /// Events waiting for dispatch, deferred ones included
    pub fn pending(&self) -> usize {
        self.immediate_queue.len() + self.deferred_queue.len()
    }

    /// Total events delivered so far
    pub fn dispatched_count(&self) -> u64 {
        self.dispatched
    }

    /// Dispatch all pending events
    /// Processes immediate queue first, then due deferred events
    pub fn dispatch(&mut self) {
        let immediate = std::mem::take(&mut self.immediate_queue);
        for event in &immediate {
            self.dispatch_event(event);
        }

        let current_time = self.current_time;
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred_queue)
            .into_iter()
            .partition(|(time, _)| *time <= current_time);
        self.deferred_queue = waiting;
        for (_, event) in &due {
            self.dispatch_event(event);
        }
    }

    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&mut self, event: &GameEvent) {
        let event_type = event.event_type();
        self.dispatched += 1;
        for handler in &mut self.handlers {
            if handler.handles(event_type) && handler.on_event(event) {
                break;
            }
        }
    }

    /// Clear all queued events (useful for state transitions)
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestHandler {
        events_received: Vec<EventType>,
        consume: bool,
        only: Option<EventType>,
    }

    impl TestHandler {
        fn shared(consume: bool, only: Option<EventType>) -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(Self {
                events_received: Vec::new(),
                consume,
                only,
            }))
        }
    }

    impl EventHandler for TestHandler {
        fn on_event(&mut self, event: &GameEvent) -> bool {
            self.events_received.push(event.event_type());
            self.consume
        }

        fn handles(&self, event_type: EventType) -> bool {
            self.only.map_or(true, |only| only == event_type)
        }
    }

    fn escaped(id: u64) -> GameEvent {
        GameEvent::DuckEscaped {
            entity: Entity::new(id),
        }
    }

    #[test]
    fn test_immediate_dispatch() {
        let mut system = EventSystem::new();
        let handler = TestHandler::shared(false, None);
        system.register_handler(Box::new(handler.clone()));

        system.send(GameEvent::DuckHit {
            entity: Entity::new(1),
            points: 100,
        });
        assert!(handler.borrow().events_received.is_empty());

        system.dispatch();
        assert_eq!(handler.borrow().events_received, vec![EventType::DuckHit]);
        assert_eq!(system.pending(), 0);
        assert_eq!(system.dispatched_count(), 1);
    }

    #[test]
    fn test_deferred_dispatch() {
        let mut system = EventSystem::new();
        let handler = TestHandler::shared(false, None);
        system.register_handler(Box::new(handler.clone()));
        system.post(1.0, escaped(1));

        system.update_time(0.5);
        system.dispatch();
        assert_eq!(system.pending(), 1);

        system.update_time(1.0);
        system.dispatch();
        assert_eq!(system.pending(), 0);
        assert_eq!(handler.borrow().events_received.len(), 1);
    }

    #[test]
    fn test_event_consumption() {
        let mut system = EventSystem::new();
        let first = TestHandler::shared(true, None);
        let second = TestHandler::shared(false, None);
        system.register_handler(Box::new(first.clone()));
        system.register_handler(Box::new(second.clone()));

        system.send(escaped(1));
        system.dispatch();

        assert_eq!(first.borrow().events_received.len(), 1);
        assert!(second.borrow().events_received.is_empty());
    }

    #[test]
    fn test_uninterested_handler_skipped() {
        let mut system = EventSystem::new();
        let hits_only = TestHandler::shared(true, Some(EventType::DuckHit));
        let everything = TestHandler::shared(false, None);
        system.register_handler(Box::new(hits_only.clone()));
        system.register_handler(Box::new(everything.clone()));

        system.send(escaped(2));
        system.dispatch();

        assert!(hits_only.borrow().events_received.is_empty());
        assert_eq!(everything.borrow().events_received, vec![EventType::DuckEscaped]);
    }

    #[test]
    fn test_clear_drops_queued() {
        let mut system = EventSystem::new();
        system.send(escaped(1));
        system.post(5.0, escaped(2));
        system.clear();
        assert_eq!(system.pending(), 0);
    }
}
