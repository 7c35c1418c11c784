use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// In-memory serial port with failure injection.
#[derive(Clone, Default)]
pub(crate) struct MockPort {
    inner: Arc<Mutex<MockPortInner>>,
}

#[derive(Default)]
struct MockPortInner {
    written: Vec<u8>,
    failures: VecDeque<io::ErrorKind>,
    max_chunk: Option<usize>,
    flushed: bool,
}

impl MockPort {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Accept at most `n` bytes per `write` call.
    pub(crate) fn with_max_chunk(n: usize) -> Self {
        let port = Self::new();
        port.inner.lock().unwrap().max_chunk = Some(n);
        port
    }

    /// Fail the next `write` call with `kind`.
    pub(crate) fn fail_next(&self, kind: io::ErrorKind) {
        self.inner.lock().unwrap().failures.push_back(kind);
    }

    pub(crate) fn written(&self) -> Vec<u8> {
        self.inner.lock().unwrap().written.clone()
    }

    pub(crate) fn flushed(&self) -> bool {
        self.inner.lock().unwrap().flushed
    }
}

impl Write for MockPort {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(kind) = inner.failures.pop_front() {
            return Err(io::Error::new(kind, "injected failure"));
        }
        let n = inner.max_chunk.map_or(data.len(), |max| max.min(data.len()));
        inner.written.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.lock().unwrap().flushed = true;
        Ok(())
    }
}
