//! # Busy-request data model.
//!
//! This module provides the queue-side types, pure data + logic with no
//! rendering and no timers:
//! - [`BusyRequest`] - one outstanding show-busy request (id, expiry, modal)
//! - [`RequestSpec`] - per-call options bundle (timeout, modal flag)
//! - [`BusyQueue`] - ordered collection with replace/sweep semantics

mod queue;
mod request;
mod spec;

pub use queue::BusyQueue;
pub use request::BusyRequest;
pub use spec::RequestSpec;

pub(crate) use request::sanitize_id;
