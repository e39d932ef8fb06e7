//! Event, listener and report types for the dispatcher

use std::any::{type_name, Any};

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};

/// Upcast helper so `dyn Event` can be narrowed to its concrete type.
///
/// Implemented for every `'static` type; there is no need to implement it by hand.
#[doc(hidden)]
pub trait AsAny: Any + 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value that can be dispatched.
///
/// The accessor is the routing key the dispatcher uses to find listeners.
pub trait Event: AsAny + 'static {
    fn accessor(&self) -> &str;
}

impl dyn Event {
    /// Narrow the opaque event to a concrete type, if it is one.
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Whether the opaque event is of concrete type `T`
    pub fn is<T: Event>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Narrow the opaque event, failing with [`DispatchError::UnexpectedEvent`] on mismatch.
    pub fn expect_event<T: Event>(&self) -> Result<&T> {
        self.downcast_ref::<T>()
            .ok_or_else(|| DispatchError::UnexpectedEvent {
                accessor: self.accessor().to_string(),
                expected: type_name::<T>(),
            })
    }
}

impl std::fmt::Debug for dyn Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("accessor", &self.accessor())
            .finish()
    }
}

/// Handles dispatched events.
///
/// Returning `true` continues propagation; returning `false` stops it, so no
/// later listener for the same accessor is invoked.
///
/// Listeners receive the event as `&dyn Event` and narrow it themselves. A
/// listener handed an event of a type it does not understand should ignore it
/// and return `true`.
pub trait Listener: Send + Sync + 'static {
    fn handle(&self, event: &dyn Event) -> bool;

    /// Name reported as the listener instance in dispatch reports.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Report describing a single dispatch call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct EventDispatchReport {
    /// Whether the accessor was known to the dispatcher
    pub registered: bool,
    /// Whether propagation ran to the end without being stopped
    pub completed: bool,
    /// Accessor of the dispatched event
    pub accessor: String,
    /// One entry per registered listener, in invocation order
    pub listener_reports: Vec<ListenerDispatchReport>,
}

/// Report describing what happened to one listener during a dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ListenerDispatchReport {
    /// Listener name
    pub instance: String,
    /// Whether the listener was invoked
    pub completed: bool,
    /// Whether this listener stopped propagation
    pub stopped_propagation: bool,
}

impl EventDispatchReport {
    /// Create the report for an accessor before any lookup happened
    pub fn new(accessor: impl Into<String>) -> Self {
        Self {
            registered: false,
            completed: false,
            accessor: accessor.into(),
            listener_reports: Vec::new(),
        }
    }

    /// The listener that stopped propagation, if any
    pub fn stopped_by(&self) -> Option<&ListenerDispatchReport> {
        self.listener_reports.iter().find(|r| r.stopped_propagation)
    }

    /// Number of listeners whose handler actually ran
    pub fn invoked_count(&self) -> usize {
        self.listener_reports.iter().filter(|r| r.completed).count()
    }

    /// Number of listeners skipped after propagation stopped
    pub fn skipped_count(&self) -> usize {
        self.listener_reports.len() - self.invoked_count()
    }

    pub fn is_stopped(&self) -> bool {
        self.registered && !self.completed
    }
}

impl ListenerDispatchReport {
    pub(crate) fn pending(instance: &str) -> Self {
        Self {
            instance: instance.to_string(),
            completed: false,
            stopped_propagation: false,
        }
    }
}
