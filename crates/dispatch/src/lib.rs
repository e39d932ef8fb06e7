//! Synchronous in-process event dispatch
//!
//! This crate provides a [`Dispatcher`] that routes events to ordered
//! listeners by accessor and reports what happened during each dispatch.

mod config;
mod dispatcher;
mod error;
mod listeners;
mod types;

pub use config::DispatcherConfig;
pub use dispatcher::{Dispatcher, ListenerMap};
pub use error::{DispatchError, Result};
pub use listeners::{listener_fn, typed_listener, FnListener, TypedListener};
pub use types::*;
