//! Frame notifications.
//!
//! Observers are registered explicitly and notified in registration order.
//! Every callback defaults to a no-op, so an observer implements only what it
//! cares about. Observers must not change the frame geometry from inside
//! `on_did_move` / `on_did_scale`.

use crate::frame::ScalableFrame;
use serde::{Deserialize, Serialize};

/// The six notifications a frame emits, in the order a session produces
/// them: one begin, any number of did-*, one end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameEvent {
    BeginScale,
    EndScale,
    BeginMove,
    EndMove,
    DidMove,
    DidScale,
}

impl FrameEvent {
    /// Stable name used by host bindings.
    pub fn name(self) -> &'static str {
        match self {
            FrameEvent::BeginScale => "beginScale",
            FrameEvent::EndScale => "endScale",
            FrameEvent::BeginMove => "beginMove",
            FrameEvent::EndMove => "endMove",
            FrameEvent::DidMove => "didMove",
            FrameEvent::DidScale => "didScale",
        }
    }
}

/// Receiver of frame notifications.
pub trait FrameObserver {
    fn on_begin_scale(&self, _frame: &ScalableFrame) {}

    fn on_end_scale(&self, _frame: &ScalableFrame) {}

    fn on_begin_move(&self, _frame: &ScalableFrame) {}

    fn on_end_move(&self, _frame: &ScalableFrame) {}

    /// Called on every committed move. Keep it cheap.
    fn on_did_move(&self, _frame: &ScalableFrame) {}

    /// Called on every committed resize. Keep it cheap.
    fn on_did_scale(&self, _frame: &ScalableFrame) {}
}

/// Handle returned by [`ObserverSet::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Ordered list of observers.
#[derive(Default)]
pub struct ObserverSet {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn FrameObserver>)>,
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("count", &self.observers.len())
            .finish()
    }
}

impl ObserverSet {
    pub fn subscribe(&mut self, observer: Box<dyn FrameObserver>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `event` about `frame` to every observer.
    pub fn notify(&self, frame: &ScalableFrame, event: FrameEvent) {
        for (_, observer) in &self.observers {
            match event {
                FrameEvent::BeginScale => observer.on_begin_scale(frame),
                FrameEvent::EndScale => observer.on_end_scale(frame),
                FrameEvent::BeginMove => observer.on_begin_move(frame),
                FrameEvent::EndMove => observer.on_end_move(frame),
                FrameEvent::DidMove => observer.on_did_move(frame),
                FrameEvent::DidScale => observer.on_did_scale(frame),
            }
        }
    }
}
