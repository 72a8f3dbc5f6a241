//! Caller-supplied diagnostic narration.

use std::fmt;
use std::sync::Arc;

/// A single-argument message sink.
///
/// The sink must not block. Cloning is cheap and shares the underlying
/// callback.
#[derive(Clone)]
pub struct TraceSink {
    inner: Arc<dyn Fn(&str) + Send + Sync>,
}

impl TraceSink {
    /// Wraps a callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// A sink that forwards every message to the `tracing` subscriber at
    /// info level.
    pub fn tracing() -> Self {
        Self::new(|msg| tracing::info!(target: "objfs_prefetch::trace", "{}", msg))
    }

    /// Delivers one message.
    pub fn emit(&self, msg: &str) {
        (self.inner)(msg)
    }
}

impl fmt::Debug for TraceSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceSink").finish_non_exhaustive()
    }
}

/// Emits `msg` if a sink is present; otherwise does nothing.
pub(crate) fn trace(sink: Option<&TraceSink>, msg: impl AsRef<str>) {
    if let Some(sink) = sink {
        sink.emit(msg.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_sink_receives_messages() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let sink = TraceSink::new(move |msg| captured.lock().unwrap().push(msg.to_string()));

        trace(Some(&sink), "first");
        sink.clone().emit("second");

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_absent_sink_is_noop() {
        trace(None, "nobody listens");
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TraceSink::tracing().emit("no subscriber installed");
    }

    #[test]
    fn test_debug_does_not_expose_callback() {
        let sink = TraceSink::new(|_| {});
        assert!(format!("{:?}", sink).starts_with("TraceSink"));
    }
}
