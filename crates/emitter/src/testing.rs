//! Test helpers: a tracing layer that records events for assertions.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One recorded tracing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Captured {
	pub level: Level,
	pub message: String,
	pub fields: Vec<(String, String)>,
}

impl Captured {
	pub fn field(&self, name: &str) -> Option<&str> {
		self.fields.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
	}
}

#[derive(Default)]
struct FieldVisitor {
	message: String,
	fields: Vec<(String, String)>,
}

impl Visit for FieldVisitor {
	fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
		if field.name() == "message" {
			self.message = format!("{value:?}");
		} else {
			self.fields.push((field.name().to_string(), format!("{value:?}")));
		}
	}

	fn record_str(&mut self, field: &Field, value: &str) {
		if field.name() == "message" {
			self.message = value.to_string();
		} else {
			self.fields.push((field.name().to_string(), value.to_string()));
		}
	}
}

#[derive(Clone, Default)]
struct CaptureLayer {
	records: Arc<Mutex<Vec<Captured>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		let mut visitor = FieldVisitor::default();
		event.record(&mut visitor);
		self.records.lock().push(Captured {
			level: *event.metadata().level(),
			message: visitor.message,
			fields: visitor.fields,
		});
	}
}

/// Runs `f` with a capturing subscriber and returns the WARN events it produced.
pub(crate) fn warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<Captured>) {
	let layer = CaptureLayer::default();
	let subscriber = Registry::default().with(layer.clone());
	let out = tracing::subscriber::with_default(subscriber, f);
	let records = std::mem::take(&mut *layer.records.lock());
	(out, records.into_iter().filter(|r| r.level == Level::WARN).collect())
}
