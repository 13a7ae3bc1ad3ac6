//! Event → listener sequence storage shared by both emitter front ends.
//!
//! Storage operations never call listeners and never log. Front ends take what
//! they need while holding their borrow or lock, release it, and only then
//! report diagnostics or invoke callbacks.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap as HashMap;
use smallvec::SmallVec;
use tracing::warn;

use crate::listener::Identity;

/// Listeners copied out of the map at the start of a dispatch.
pub(crate) type Snapshot<L> = SmallVec<[L; 4]>;

/// Ordered listener sequences keyed by event.
///
/// Keys are created on first registration and are kept even after their last
/// listener is removed.
#[derive(Debug)]
pub(crate) struct ListenerMap<K, L> {
	events: HashMap<K, Vec<L>>,
}

impl<K, L> Default for ListenerMap<K, L> {
	fn default() -> Self {
		Self {
			events: HashMap::default(),
		}
	}
}

impl<K, L> ListenerMap<K, L> {
	/// Number of known events.
	pub(crate) fn event_count(&self) -> usize {
		self.events.len()
	}
}

/// Outcome of [`ListenerMap::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Removal {
	/// The first matching occurrence was removed.
	Removed,
	/// No sequence exists for the event.
	UnknownEvent,
	/// The sequence exists but holds no handle identical to the listener.
	NotFound,
}

impl Removal {
	/// Emits the misuse warning for unsuccessful removals.
	pub(crate) fn report<Q, L>(self, event: &Q, listener: &L)
	where
		Q: Debug + ?Sized,
		L: Identity,
	{
		match self {
			Self::Removed => {}
			Self::UnknownEvent => no_listeners(event),
			Self::NotFound => {
				warn!(event = ?event, listener = listener.diagnostic_label(), "listener was not removed");
			}
		}
	}
}

/// Warns that `event` has never had a listener registered.
pub(crate) fn no_listeners<Q: Debug + ?Sized>(event: &Q) {
	warn!(event = ?event, "no listeners for event");
}

impl<K, L> ListenerMap<K, L>
where
	K: Eq + Hash,
	L: Identity,
{
	/// Appends `listener` to the sequence for `event`.
	pub(crate) fn insert(&mut self, event: K, listener: L) {
		self.events.entry(event).or_default().push(listener);
	}

	/// Removes the first handle identical to `listener`.
	pub(crate) fn remove<Q>(&mut self, event: &Q, listener: &L) -> Removal
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		let Some(listeners) = self.events.get_mut(event) else {
			return Removal::UnknownEvent;
		};
		match listeners.iter().position(|l| l.same(listener)) {
			Some(index) => {
				listeners.remove(index);
				Removal::Removed
			}
			None => Removal::NotFound,
		}
	}

	/// Copies the current sequence for `event`, or `None` for unknown events.
	pub(crate) fn snapshot<Q>(&self, event: &Q) -> Option<Snapshot<L>>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.events.get(event).map(|listeners| listeners.iter().cloned().collect())
	}

	/// Number of listeners registered for `event`.
	pub(crate) fn len<Q>(&self, event: &Q) -> usize
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.events.get(event).map_or(0, Vec::len)
	}

	/// True once `event` has seen a registration, even if it is now empty.
	pub(crate) fn contains<Q>(&self, event: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.events.contains_key(event)
	}
}
