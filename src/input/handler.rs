use crate::{
    input::events::{MapEvent, MapEventKind},
    prelude::VecDeque,
    traits::LayerContext,
};

/// Callback invoked synchronously for every dispatched event of its kind
pub type EventCallback = Box<dyn FnMut(&MapEvent, &mut LayerContext<'_>) -> ListenerStatus>;

/// Returned by a listener after each dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerStatus {
    /// Keep receiving events
    Active,
    /// The listener's owner is gone; unregister it
    Finished,
}

/// Handle returned by [`EventManager::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Listener registry and event queue for a map host
#[derive(Default)]
pub struct EventManager {
    /// Event listeners in registration order
    listeners: Vec<(ListenerId, MapEventKind, EventCallback)>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
    next_id: u64,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on(&mut self, kind: MapEventKind, callback: EventCallback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, callback));
        log::trace!("registered {} listener {}", kind, id.0);
        id
    }

    /// Remove a listener; returns false when it was not registered
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        before != self.listeners.len()
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Dispatch all queued events, in order, to the listeners of their kind.
    /// Listeners returning [`ListenerStatus::Finished`] are unregistered.
    pub fn process_events(&mut self, context: &mut LayerContext<'_>) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            let kind = event.kind();
            self.listeners.retain_mut(|(id, listener_kind, callback)| {
                if *listener_kind != kind {
                    return true;
                }
                match callback(event, &mut *context) {
                    ListenerStatus::Active => true,
                    ListenerStatus::Finished => {
                        log::debug!("dropping finished {} listener {}", kind, id.0);
                        false
                    }
                }
            });
        }

        events
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    pub fn listener_count(&self, kind: MapEventKind) -> usize {
        self.listeners
            .iter()
            .filter(|(_, listener_kind, _)| *listener_kind == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{geo::LatLng, viewport::Viewport},
        rendering::scene::SceneGraph,
    };
    use std::{cell::Cell, rc::Rc};

    fn move_end() -> MapEvent {
        MapEvent::MoveEnd {
            center: LatLng::new(0.0, 0.0),
            zoom: 1.0,
        }
    }

    #[test]
    fn test_dispatch_by_kind_and_unsubscribe() {
        let viewport = Viewport::default();
        let mut scene = SceneGraph::new();
        let pane = scene.root();
        let mut manager = EventManager::new();

        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = manager.on(
            MapEventKind::MoveEnd,
            Box::new(move |_event: &MapEvent, _ctx: &mut LayerContext<'_>| {
                counter.set(counter.get() + 1);
                ListenerStatus::Active
            }),
        );

        manager.emit(move_end());
        manager.emit(MapEvent::ZoomEnd { zoom: 1.0 });
        assert_eq!(manager.pending_events(), 2);

        let mut context = LayerContext {
            viewport: &viewport,
            surface: &mut scene,
            pane,
        };
        let processed = manager.process_events(&mut context);
        assert_eq!(processed.len(), 2);
        assert_eq!(hits.get(), 1);

        assert!(manager.off(id));
        assert!(!manager.off(id));
        manager.emit(move_end());
        manager.process_events(&mut context);
        assert_eq!(hits.get(), 1);
        assert_eq!(manager.listener_count(MapEventKind::MoveEnd), 0);
    }

    #[test]
    fn test_finished_listener_is_unregistered() {
        let viewport = Viewport::default();
        let mut scene = SceneGraph::new();
        let pane = scene.root();
        let mut manager = EventManager::new();

        let remaining = Rc::new(Cell::new(2));
        let budget = Rc::clone(&remaining);
        manager.on(
            MapEventKind::MoveEnd,
            Box::new(move |_event: &MapEvent, _ctx: &mut LayerContext<'_>| {
                budget.set(budget.get() - 1);
                if budget.get() == 0 {
                    ListenerStatus::Finished
                } else {
                    ListenerStatus::Active
                }
            }),
        );
        manager.on(
            MapEventKind::MoveEnd,
            Box::new(|_event: &MapEvent, _ctx: &mut LayerContext<'_>| ListenerStatus::Active),
        );

        let mut context = LayerContext {
            viewport: &viewport,
            surface: &mut scene,
            pane,
        };
        manager.emit(move_end());
        manager.process_events(&mut context);
        assert_eq!(manager.listener_count(MapEventKind::MoveEnd), 2);

        manager.emit(move_end());
        manager.emit(move_end());
        manager.process_events(&mut context);
        assert_eq!(remaining.get(), 0);
        assert_eq!(manager.listener_count(MapEventKind::MoveEnd), 1);
    }
}
