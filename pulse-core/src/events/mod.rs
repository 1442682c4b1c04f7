//! Synchronous event system: handler trait, dispatcher, channel adapter.
//!
//! The engine returns alerts to its caller; events are the optional
//! observer seam for consumers (dashboard push channels, operators) that
//! want notification without polling. Delivery beyond the handler call is
//! out of scope.

pub mod channel;
pub mod dispatcher;
pub mod handler;
pub mod types;

pub use channel::ChannelForwarder;
pub use dispatcher::EventDispatcher;
pub use handler::PulseEventHandler;
