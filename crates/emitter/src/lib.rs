//! Synchronous in-process event emitter.
//!
//! Producers dispatch a payload under an event key; every listener registered
//! for that key runs on the calling thread, in registration order, before
//! [`EventEmitter::emit`] returns.
//!
//! ```
//! use relay_emitter::{EventEmitter, Listener};
//!
//! let emitter: EventEmitter<&str, u32> = EventEmitter::new();
//! let log = Listener::new(|n: &u32| println!("tick {n}"));
//!
//! emitter.on("tick", log.clone());
//! emitter.emit("tick", &1).unwrap();
//! emitter.off("tick", &log);
//! ```
//!
//! # Semantics
//!
//! * Listeners are compared by identity. Clones of a [`Listener`] are the same
//!   listener; separately constructed listeners are not, whatever they do.
//! * Registering a listener twice runs it twice. [`EventEmitter::off`] removes
//!   the first registration only.
//! * Dispatch runs over a snapshot of the listener list. Listeners may
//!   register, remove or emit through a clone of the emitter; the running
//!   dispatch is unaffected and later ones see the change.
//! * A listener error ends the dispatch and is returned from `emit`.
//! * Removing from or emitting to an event that has never had a listener, and
//!   removing a listener that isn't registered, log a `tracing` warning and do
//!   nothing else.
//!
//! # Features
//!
//! * `sync` (default): [`SharedEmitter`] and [`SyncListener`], a
//!   `Send + Sync` variant guarded by a `parking_lot` mutex.

mod emitter;
mod error;
mod listener;
mod map;
#[cfg(feature = "sync")]
mod shared;
#[cfg(test)]
mod testing;

pub use emitter::EventEmitter;
pub use error::ListenerError;
#[cfg(feature = "sync")]
pub use listener::SyncListener;
pub use listener::Listener;
#[cfg(feature = "sync")]
pub use shared::SharedEmitter;
