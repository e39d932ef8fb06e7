//! Closure-backed listener adapters

use std::marker::PhantomData;

use tracing::warn;

use crate::types::{Event, Listener};

/// Listener wrapping a closure over the opaque event
pub struct FnListener<F> {
    name: &'static str,
    handler: F,
}

/// Create a listener from a closure over the opaque event
pub fn listener_fn<F>(name: &'static str, handler: F) -> FnListener<F>
where
    F: Fn(&dyn Event) -> bool + Send + Sync + 'static,
{
    FnListener { name, handler }
}

impl<F> Listener for FnListener<F>
where
    F: Fn(&dyn Event) -> bool + Send + Sync + 'static,
{
    fn handle(&self, event: &dyn Event) -> bool {
        (self.handler)(event)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Listener that only understands events of concrete type `E`
///
/// Events of any other type are ignored: a warning is logged and propagation
/// continues.
pub struct TypedListener<E, F> {
    name: &'static str,
    handler: F,
    _event: PhantomData<fn(&E)>,
}

/// Create a listener from a closure over a concrete event type
pub fn typed_listener<E, F>(name: &'static str, handler: F) -> TypedListener<E, F>
where
    E: Event,
    F: Fn(&E) -> bool + Send + Sync + 'static,
{
    TypedListener {
        name,
        handler,
        _event: PhantomData,
    }
}

impl<E, F> Listener for TypedListener<E, F>
where
    E: Event,
    F: Fn(&E) -> bool + Send + Sync + 'static,
{
    fn handle(&self, event: &dyn Event) -> bool {
        match event.downcast_ref::<E>() {
            Some(event) => (self.handler)(event),
            None => {
                warn!(
                    listener = self.name,
                    accessor = event.accessor(),
                    expected = std::any::type_name::<E>(),
                    "Ignoring event of unexpected type"
                );
                true
            }
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct OrderPlaced {
        total: u32,
    }

    impl Event for OrderPlaced {
        fn accessor(&self) -> &str {
            "order.placed"
        }
    }

    struct OrderCancelled;

    impl Event for OrderCancelled {
        fn accessor(&self) -> &str {
            "order.cancelled"
        }
    }

    #[test]
    fn test_fn_listener() {
        let listener = listener_fn("accessor-check", |event| event.accessor() == "order.placed");

        assert_eq!(listener.name(), "accessor-check");
        assert!(listener.handle(&OrderPlaced { total: 1 }));
        assert!(!listener.handle(&OrderCancelled));
    }

    #[test]
    fn test_typed_listener_matching_event() {
        let listener = typed_listener("limit", |order: &OrderPlaced| order.total <= 100);

        assert_eq!(listener.name(), "limit");
        assert!(listener.handle(&OrderPlaced { total: 50 }));
        assert!(!listener.handle(&OrderPlaced { total: 500 }));
    }

    #[test]
    fn test_typed_listener_ignores_other_events() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let listener = typed_listener("limit", move |_order: &OrderPlaced| {
            flag.store(true, Ordering::SeqCst);
            false
        });

        assert!(listener.handle(&OrderCancelled));
        assert!(!called.load(Ordering::SeqCst));
    }
}
