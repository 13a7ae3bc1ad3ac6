use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory sink for formatted log output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl<'a> MakeWriter<'a> for LogBuffer {
	type Writer = LogBuffer;

	fn make_writer(&'a self) -> Self::Writer {
		self.clone()
	}
}

/// Runs `f` under a WARN-level fmt subscriber and returns its formatted output.
pub fn with_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
	let buffer = LogBuffer::default();
	let subscriber = tracing_subscriber::fmt()
		.with_writer(buffer.clone())
		.with_ansi(false)
		.with_max_level(Level::WARN)
		.finish();
	let out = tracing::subscriber::with_default(subscriber, f);
	let logs = String::from_utf8_lossy(&buffer.0.lock()).into_owned();
	(out, logs)
}
