//! Helpers for asserting on log output in tests.

use std::fmt::Display;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Debug, Default)]
pub struct CollectingWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Display for CollectingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let buffer = self.buffer.lock().unwrap();
        let str_content = String::from_utf8_lossy(&buffer);
        write!(f, "{str_content}")
    }
}

impl CollectingWriter {
    /// Whether an event at `level` with `message` in its line was written.
    pub fn contains_event(&self, level: tracing::Level, message: &str) -> bool {
        self.to_string()
            .lines()
            .any(|line| line.trim_start().starts_with(level.as_str()) && line.contains(message))
    }
}

impl<'w> MakeWriter<'w> for CollectingWriter {
    type Writer = <Mutex<Vec<u8>> as MakeWriter<'w>>::Writer;

    fn make_writer(&'w self) -> Self::Writer {
        (*self.buffer).make_writer()
    }
}

/// A subscriber writing one compact line per event, prefixed with its level,
/// into the returned writer.
///
/// Install it with [tracing::subscriber::set_default] for the duration of a
/// single-threaded test.
pub fn test_subscriber() -> (impl tracing::Subscriber, CollectingWriter) {
    let writer = CollectingWriter::default();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .compact()
        .without_time()
        .with_target(false)
        .finish();

    (subscriber, writer)
}
