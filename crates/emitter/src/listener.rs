//! Listener handles.
//!
//! A listener is identified by its allocation, not by what it does: clones of
//! one handle are the same listener, while two handles built from identical
//! closures are distinct and can be removed independently.

use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;
#[cfg(feature = "sync")]
use std::sync::Arc;

/// Label used in diagnostics for listeners built without one.
pub(crate) const ANONYMOUS: &str = "<anonymous>";

/// Identity comparison shared by both listener flavours.
pub(crate) trait Identity: Clone {
	/// Returns true when both handles point at the same registered callable.
	fn same(&self, other: &Self) -> bool;

	/// Label reported when the listener cannot be found.
	fn diagnostic_label(&self) -> &str;
}

type LocalFn<P, E> = dyn Fn(&P) -> Result<(), E>;

/// Single-threaded listener handle used by [`EventEmitter`](crate::EventEmitter).
pub struct Listener<P, E = Infallible> {
	callback: Rc<LocalFn<P, E>>,
	label: Option<Rc<str>>,
}

impl<P: 'static, E: 'static> Listener<P, E> {
	/// Wraps a callback that cannot fail.
	pub fn new<F>(callback: F) -> Self
	where
		F: Fn(&P) + 'static,
	{
		Self::fallible(move |payload| {
			callback(payload);
			Ok(())
		})
	}

	/// Wraps a callback whose error aborts the dispatch it runs in.
	pub fn fallible<F>(callback: F) -> Self
	where
		F: Fn(&P) -> Result<(), E> + 'static,
	{
		Self {
			callback: Rc::new(callback),
			label: None,
		}
	}
}

impl<P, E> Listener<P, E> {
	/// Attaches a diagnostic label. Identity is unchanged.
	pub fn with_label(mut self, label: impl Into<Rc<str>>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Returns the diagnostic label, if any.
	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	/// Returns true if both handles refer to the same listener.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.callback, &other.callback)
	}

	pub(crate) fn call(&self, payload: &P) -> Result<(), E> {
		(self.callback)(payload)
	}
}

impl<P, E> Clone for Listener<P, E> {
	fn clone(&self) -> Self {
		Self {
			callback: Rc::clone(&self.callback),
			label: self.label.clone(),
		}
	}
}

impl<P, E> Identity for Listener<P, E> {
	fn same(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}

	fn diagnostic_label(&self) -> &str {
		self.label.as_deref().unwrap_or(ANONYMOUS)
	}
}

impl<P, E> fmt::Debug for Listener<P, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Listener")
			.field("label", &self.diagnostic_label())
			.field("ptr", &Rc::as_ptr(&self.callback).cast::<()>())
			.finish()
	}
}

#[cfg(feature = "sync")]
type SharedFn<P, E> = dyn Fn(&P) -> Result<(), E> + Send + Sync;

/// Thread-safe listener handle used by [`SharedEmitter`](crate::SharedEmitter).
#[cfg(feature = "sync")]
pub struct SyncListener<P, E = Infallible> {
	callback: Arc<SharedFn<P, E>>,
	label: Option<Arc<str>>,
}

#[cfg(feature = "sync")]
impl<P: 'static, E: 'static> SyncListener<P, E> {
	/// Wraps a callback that cannot fail.
	pub fn new<F>(callback: F) -> Self
	where
		F: Fn(&P) + Send + Sync + 'static,
	{
		Self::fallible(move |payload| {
			callback(payload);
			Ok(())
		})
	}

	/// Wraps a callback whose error aborts the dispatch it runs in.
	pub fn fallible<F>(callback: F) -> Self
	where
		F: Fn(&P) -> Result<(), E> + Send + Sync + 'static,
	{
		Self {
			callback: Arc::new(callback),
			label: None,
		}
	}
}

#[cfg(feature = "sync")]
impl<P, E> SyncListener<P, E> {
	/// Attaches a diagnostic label. Identity is unchanged.
	pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Returns the diagnostic label, if any.
	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	/// Returns true if both handles refer to the same listener.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.callback, &other.callback)
	}

	pub(crate) fn call(&self, payload: &P) -> Result<(), E> {
		(self.callback)(payload)
	}
}

#[cfg(feature = "sync")]
impl<P, E> Clone for SyncListener<P, E> {
	fn clone(&self) -> Self {
		Self {
			callback: Arc::clone(&self.callback),
			label: self.label.clone(),
		}
	}
}

#[cfg(feature = "sync")]
impl<P, E> Identity for SyncListener<P, E> {
	fn same(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}

	fn diagnostic_label(&self) -> &str {
		self.label.as_deref().unwrap_or(ANONYMOUS)
	}
}

#[cfg(feature = "sync")]
impl<P, E> fmt::Debug for SyncListener<P, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SyncListener")
			.field("label", &self.diagnostic_label())
			.field("ptr", &Arc::as_ptr(&self.callback).cast::<()>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn clones_share_identity() {
		let listener: Listener<u32> = Listener::new(|_| {});
		let copy = listener.clone();
		assert!(listener.ptr_eq(&copy));
		assert!(listener.same(&copy));
	}

	#[test]
	fn identical_closures_are_distinct() {
		let first: Listener<u32> = Listener::new(|_| {});
		let second: Listener<u32> = Listener::new(|_| {});
		assert!(!first.ptr_eq(&second));
	}

	#[test]
	fn label_does_not_change_identity() {
		let listener: Listener<u32> = Listener::new(|_| {});
		let labelled = listener.clone().with_label("tick-counter");
		assert!(listener.ptr_eq(&labelled));
		assert_eq!(labelled.label(), Some("tick-counter"));
		assert_eq!(listener.diagnostic_label(), ANONYMOUS);
	}

	#[test]
	fn call_forwards_payload_and_error() {
		let seen = Rc::new(Cell::new(0));
		let sink = Rc::clone(&seen);
		let listener: Listener<u32, String> = Listener::fallible(move |n| {
			sink.set(*n);
			if *n > 10 { Err(format!("too big: {n}")) } else { Ok(()) }
		});

		assert_eq!(listener.call(&7), Ok(()));
		assert_eq!(seen.get(), 7);
		assert_eq!(listener.call(&11), Err("too big: 11".to_string()));
	}

	#[cfg(feature = "sync")]
	#[test]
	fn sync_listener_identity() {
		let listener: SyncListener<u32> = SyncListener::new(|_| {}).with_label("worker");
		let other: SyncListener<u32> = SyncListener::new(|_| {});
		assert!(listener.ptr_eq(&listener.clone()));
		assert!(!listener.ptr_eq(&other));
		assert_eq!(other.diagnostic_label(), ANONYMOUS);
	}
}
