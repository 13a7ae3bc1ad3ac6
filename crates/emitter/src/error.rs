//! Ready-made listener failure type.

use thiserror::Error;

/// Error a listener can return to abort the dispatch it runs in.
///
/// Emitters are generic over their error type; this one covers callers that
/// don't need their own.
#[derive(Debug, Error)]
pub enum ListenerError {
	/// The listener rejected the payload.
	#[error("listener failed: {0}")]
	Failed(String),

	/// An underlying error raised inside the listener.
	#[error("listener error: {0}")]
	Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ListenerError {
	/// Builds a [`ListenerError::Failed`] from a message.
	pub fn failed(reason: impl Into<String>) -> Self {
		Self::Failed(reason.into())
	}

	/// Boxes any error into [`ListenerError::Source`].
	pub fn boxed<E>(error: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Self::Source(Box::new(error))
	}
}
