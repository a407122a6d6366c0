//! Indicator events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the queue and the reconciler.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `BusyIndicator` (queue mutations, expiry sweeps) and
//!   the reconciler (layer transitions, surface degradation).
//! - **Consumers**: the builder's listener (fans out to
//!   [`SubscriberSet`](crate::SubscriberSet)) and anything holding a
//!   receiver from [`BusyIndicator::subscribe`](crate::BusyIndicator::subscribe).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
