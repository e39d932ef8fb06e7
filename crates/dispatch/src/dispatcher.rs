//! Dispatcher routing events to ordered listeners

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::DispatcherConfig;
use crate::types::{Event, EventDispatchReport, Listener, ListenerDispatchReport};

/// Registered listeners keyed by event accessor
pub type ListenerMap = HashMap<String, Vec<Arc<dyn Listener>>>;

/// Synchronous event dispatcher
///
/// Listeners for an accessor run in the order they were added. No internal
/// locking is done; wrap the dispatcher in a `Mutex` or `RwLock` to share it
/// across threads.
#[derive(Default)]
pub struct Dispatcher {
    events: ListenerMap,
}

impl Dispatcher {
    /// Create a dispatcher with no registered events
    pub fn new() -> Self {
        Self {
            events: HashMap::new(),
        }
    }

    /// Create a dispatcher with every accessor from the manifest registered
    pub fn from_config(config: &DispatcherConfig) -> Self {
        let mut dispatcher = Self::new();
        for accessor in &config.events {
            dispatcher.register(accessor.as_str());
        }
        dispatcher
    }

    /// Replace all events and listeners with a complete configuration
    pub fn set_events_and_listeners(&mut self, events: ListenerMap) -> &mut Self {
        trace!(events = events.len(), "Replacing events and listeners");
        self.events = events;
        self
    }

    /// Register an event accessor
    ///
    /// Registering an accessor that is already known keeps its listeners.
    pub fn register(&mut self, accessor: impl Into<String>) -> &mut Self {
        let accessor = accessor.into();
        if !self.events.contains_key(&accessor) {
            trace!(accessor = %accessor, "Registering event");
            self.events.insert(accessor, Vec::new());
        }
        self
    }

    /// Add a listener to an event, registering the event if needed
    pub fn add_listener<L: Listener>(&mut self, accessor: impl Into<String>, listener: L) -> &mut Self {
        self.add_shared_listener(accessor, Arc::new(listener))
    }

    /// Add an already shared listener to an event, registering the event if needed
    ///
    /// The same handle may be added several times; it is invoked once per entry.
    pub fn add_shared_listener(
        &mut self,
        accessor: impl Into<String>,
        listener: Arc<dyn Listener>,
    ) -> &mut Self {
        let accessor = accessor.into();
        trace!(accessor = %accessor, listener = listener.name(), "Adding listener");
        self.events.entry(accessor).or_default().push(listener);
        self
    }

    /// Dispatch an event to its listeners and report what happened
    ///
    /// Listeners run in order until one returns `false`. Listeners after that
    /// point still get a report entry but are not invoked.
    pub fn dispatch(&self, event: &dyn Event) -> EventDispatchReport {
        let mut report = EventDispatchReport::new(event.accessor());

        let Some(listeners) = self.events.get(&report.accessor) else {
            debug!(accessor = %report.accessor, "Dispatched unregistered event");
            return report;
        };

        report.registered = true;
        report.listener_reports.reserve(listeners.len());
        let mut propagation_stopped = false;

        for listener in listeners {
            let mut listener_report = ListenerDispatchReport::pending(listener.name());

            if propagation_stopped {
                report.listener_reports.push(listener_report);
                continue;
            }

            if !listener.handle(event) {
                propagation_stopped = true;
                listener_report.stopped_propagation = true;
            }
            listener_report.completed = true;

            report.listener_reports.push(listener_report);
        }

        report.completed = !propagation_stopped;

        debug!(
            accessor = %report.accessor,
            listeners = report.listener_reports.len(),
            invoked = report.invoked_count(),
            stopped_by = report.stopped_by().map(|r| r.instance.as_str()),
            "Dispatched event"
        );

        report
    }

    /// Whether an accessor is registered
    pub fn is_registered(&self, accessor: &str) -> bool {
        self.events.contains_key(accessor)
    }

    /// Listeners registered for an accessor, in invocation order
    pub fn listeners(&self, accessor: &str) -> Option<&[Arc<dyn Listener>]> {
        self.events.get(accessor).map(Vec::as_slice)
    }

    /// Number of listeners for an accessor (0 when unregistered)
    pub fn listener_count(&self, accessor: &str) -> usize {
        self.events.get(accessor).map_or(0, Vec::len)
    }

    /// Registered accessors, in no particular order
    pub fn accessors(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    /// Number of registered events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("event_count", &self.len())
            .field(
                "listener_count",
                &self.events.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}
