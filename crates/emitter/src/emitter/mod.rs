//! Single-threaded event emitter.

use std::cell::RefCell;
use std::convert::Infallible;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use tracing::trace;

use crate::listener::Listener;
use crate::map::{ListenerMap, no_listeners};

/// Registry of listeners keyed by event, dispatched synchronously.
///
/// Cloning an emitter yields another handle to the same registry, which is how
/// listeners get at the emitter that invokes them. No internal borrow is held
/// while a listener runs, so listeners may call [`on`](Self::on),
/// [`off`](Self::off) and [`emit`](Self::emit) freely. Changes they make are
/// seen by later dispatches, never by the one already running.
///
/// `EventEmitter` is neither `Send` nor `Sync`; see
/// [`SharedEmitter`](crate::SharedEmitter) for multi-threaded hosts.
pub struct EventEmitter<K, P, E = Infallible> {
	inner: Rc<RefCell<ListenerMap<K, Listener<P, E>>>>,
}

impl<K, P, E> EventEmitter<K, P, E>
where
	K: Eq + Hash,
{
	/// Creates an empty emitter.
	pub fn new() -> Self {
		Self {
			inner: Rc::new(RefCell::new(ListenerMap::default())),
		}
	}

	/// Appends `listener` to the listeners of `event`.
	///
	/// Registering the same listener twice is allowed; it is then invoked twice
	/// per dispatch.
	pub fn on(&self, event: impl Into<K>, listener: Listener<P, E>) {
		self.inner.borrow_mut().insert(event.into(), listener);
	}

	/// Removes the first registration of `listener` for `event`.
	///
	/// Unknown events and unregistered listeners are logged at WARN and
	/// otherwise ignored.
	pub fn off<Q>(&self, event: &Q, listener: &Listener<P, E>)
	where
		K: std::borrow::Borrow<Q>,
		Q: Eq + Hash + Debug + ?Sized,
	{
		let removal = self.inner.borrow_mut().remove(event, listener);
		removal.report(event, listener);
	}

	/// Invokes every listener registered for `event`, in registration order.
	///
	/// The listener sequence is copied before the first call. The first error
	/// returned by a listener stops the dispatch and is handed back to the
	/// caller; the remaining listeners are not invoked.
	pub fn emit<Q>(&self, event: &Q, payload: &P) -> Result<(), E>
	where
		K: std::borrow::Borrow<Q>,
		Q: Eq + Hash + Debug + ?Sized,
	{
		let snapshot = self.inner.borrow().snapshot(event);
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
		K: std::borrow::Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.inner.borrow().len(event)
	}

	/// True once `event` has had a listener registered, even if all were removed.
	pub fn has_event<Q>(&self, event: &Q) -> bool
	where
		K: std::borrow::Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.inner.borrow().contains(event)
	}

	/// Number of events known to the registry.
	pub fn event_count(&self) -> usize {
		self.inner.borrow().event_count()
	}
}

impl<K: Eq + Hash, P, E> Default for EventEmitter<K, P, E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, P, E> Clone for EventEmitter<K, P, E> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<K, P, E> fmt::Debug for EventEmitter<K, P, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut out = f.debug_struct("EventEmitter");
		match self.inner.try_borrow() {
			Ok(map) => out.field("events", &map.event_count()),
			Err(_) => out.field("events", &"<borrowed>"),
		};
		out.finish()
	}
}
