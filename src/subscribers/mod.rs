//! # Event subscribers.
//!
//! Extension point for plugging custom observers (logging, metrics, UI
//! state) into the indicator's event stream.
//!
//! ## Architecture
//! ```text
//! BusyIndicator ── publish(Event) ──► Bus ──► builder listener ──► SubscriberSet
//!                                                          ┌─────────┼─────────┐
//!                                                          ▼         ▼         ▼
//!                                                     [queue S1] [queue S2] [queue SN]
//!                                                          ▼         ▼         ▼
//!                                                     worker S1  worker S2  worker SN
//!                                                          ▼         ▼         ▼
//!                                                     sub1.on    sub2.on    subN.on
//!                                                      _event()   _event()   _event()
//! ```
//!
//! ## Contents
//! - [`Subscribe`] - the subscriber trait
//! - [`SubscriberSet`] - non-blocking fan-out with per-subscriber queues
//! - [`LogWriter`] - built-in event printer (feature `logging`)

mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
