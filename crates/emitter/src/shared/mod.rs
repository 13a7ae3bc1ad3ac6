//! Thread-safe emitter for hosts that dispatch from more than one thread.
//!
//! Same contract as [`EventEmitter`](crate::EventEmitter), with the registry
//! behind a [`parking_lot::Mutex`]. The lock covers registration, removal and
//! the snapshot copy only; it is released before any listener runs, so
//! listeners may re-enter the emitter from the dispatching thread.

use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::listener::SyncListener;
use crate::map::{ListenerMap, no_listeners};

/// Cloneable, `Send + Sync` registry of listeners keyed by event.
pub struct SharedEmitter<K, P, E = Infallible> {
	inner: Arc<Mutex<ListenerMap<K, SyncListener<P, E>>>>,
}

impl<K, P, E> SharedEmitter<K, P, E>
where
	K: Eq + Hash,
{
	/// Creates an empty emitter.
	pub fn new() -> Self {
		Self {
			inner: Arc::new(Mutex::new(ListenerMap::default())),
		}
	}

	/// Appends `listener` to the listeners of `event`.
	pub fn on(&self, event: impl Into<K>, listener: SyncListener<P, E>) {
		self.inner.lock().insert(event.into(), listener);
	}

	/// Removes the first registration of `listener` for `event`, warning when
	/// there is nothing to remove.
	pub fn off<Q>(&self, event: &Q, listener: &SyncListener<P, E>)
	where
		K: Borrow<Q>,
		Q: Eq + Hash + Debug + ?Sized,
	{
		let removal = self.inner.lock().remove(event, listener);
		removal.report(event, listener);
	}

	/// Invokes a snapshot of the listeners for `event` on the calling thread.
	///
	/// Stops at, and returns, the first listener error.
	pub fn emit<Q>(&self, event: &Q, payload: &P) -> Result<(), E>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + Debug + ?Sized,
	{
		let snapshot = self.inner.lock().snapshot(event);
		let Some(listeners) = snapshot else {
			no_listeners(event);
			return Ok(());
		};

		trace!(event = ?event, listeners = listeners.len(), "dispatching event");
		for listener in &listeners {
			listener.call(payload)?;
		}
		Ok(())
	}

	/// Number of listeners currently registered for `event`.
	pub fn listener_count<Q>(&self, event: &Q) -> usize
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.inner.lock().len(event)
	}

	/// True once `event` has had a listener registered, even if all were removed.
	pub fn has_event<Q>(&self, event: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.inner.lock().contains(event)
	}

	/// Number of events known to the registry.
	pub fn event_count(&self) -> usize {
		self.inner.lock().event_count()
	}
}

impl<K: Eq + Hash, P, E> Default for SharedEmitter<K, P, E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, P, E> Clone for SharedEmitter<K, P, E> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<K, P, E> fmt::Debug for SharedEmitter<K, P, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut out = f.debug_struct("SharedEmitter");
		match self.inner.try_lock() {
			Some(map) => out.field("events", &map.event_count()),
			None => out.field("events", &"<locked>"),
		};
		out.finish()
	}
}
