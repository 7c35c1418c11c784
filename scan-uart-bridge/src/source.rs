use crate::constants::SHUTDOWN_DEADLINE_MS;
use crate::error::{BridgeError, Result};
use crate::time::sleep_ms;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use scan_uart_data::LaserScan;
use std::io::BufRead;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// What a scan source yields when polled.
#[derive(Debug, PartialEq)]
pub enum ScanEvent {
    Scan(LaserScan),
    /// Nothing arrived before the timeout.
    Idle,
    EndOfStream,
}

/// Inbound side of the bridge. Scans are yielded in arrival order.
pub trait ScanSource {
    fn next_event(&mut self, timeout: Duration) -> Result<ScanEvent>;
}

/// Build a bounded scan queue of `depth` scans.
///
/// Publishing into a full queue evicts the oldest queued scan.
pub fn scan_queue(depth: usize) -> (ScanPublisher, ChannelSource) {
    let (tx, rx) = bounded(depth);
    let publisher = ScanPublisher {
        tx,
        overflow_rx: rx.clone(),
        dropped: 0,
    };
    (publisher, ChannelSource { rx })
}

pub struct ScanPublisher {
    tx: Sender<LaserScan>,
    overflow_rx: Receiver<LaserScan>,
    dropped: usize,
}

impl ScanPublisher {
    pub fn publish(&mut self, mut scan: LaserScan) {
        loop {
            match self.tx.try_send(scan) {
                Ok(()) => return,
                Err(TrySendError::Full(rejected)) => {
                    if self.overflow_rx.try_recv().is_ok() {
                        self.dropped += 1;
                        log::debug!("Scan queue full, dropped oldest scan");
                    }
                    scan = rejected;
                }
                // Unreachable while `overflow_rx` is alive.
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }

    /// Number of scans evicted because the queue was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

pub struct ChannelSource {
    rx: Receiver<LaserScan>,
}

impl ScanSource for ChannelSource {
    fn next_event(&mut self, timeout: Duration) -> Result<ScanEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(scan) => Ok(ScanEvent::Scan(scan)),
            Err(RecvTimeoutError::Timeout) => Ok(ScanEvent::Idle),
            Err(RecvTimeoutError::Disconnected) => Ok(ScanEvent::EndOfStream),
        }
    }
}

/// Decode one newline-delimited JSON scan. `line` is 1-based, for diagnostics.
pub fn decode_scan(text: &str, line: usize) -> Result<LaserScan> {
    serde_json::from_str(text).map_err(|source| BridgeError::Decode { line, source })
}

/// Reader thread replaying recorded scans into a [`ScanPublisher`].
///
/// The thread is signalled and joined when this struct is dropped.
pub struct ReplayThread {
    terminator_tx: Sender<bool>,
    thread: Option<JoinHandle<()>>,
}

impl ReplayThread {
    /// # Arguments
    ///
    /// * `reader` - Newline-delimited JSON scans, e.g. a file or stdin.
    /// * `period` - Optional pause after each published scan.
    /// * `publisher` - Queue the scans are published to.
    pub fn spawn<R>(reader: R, period: Option<Duration>, publisher: ScanPublisher) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (terminator_tx, terminator_rx) = bounded(1);
        let thread = std::thread::Builder::new()
            .name("scan-replay".to_string())
            .spawn(move || replay_scans(reader, period, publisher, terminator_rx))?;

        Ok(ReplayThread {
            terminator_tx,
            thread: Some(thread),
        })
    }
}

impl Drop for ReplayThread {
    fn drop(&mut self) {
        let _ = self.terminator_tx.try_send(true);

        let Some(thread) = self.thread.take() else {
            return;
        };
        let deadline = Instant::now() + Duration::from_millis(SHUTDOWN_DEADLINE_MS);
        while !thread.is_finished() && Instant::now() < deadline {
            sleep_ms(10);
        }
        if !thread.is_finished() {
            // Blocked on input (typically stdin). Leave it to process exit.
            log::warn!("Scan replay thread still blocked on input, detaching");
            return;
        }
        if thread.join().is_err() {
            log::error!("Scan replay thread panicked");
        }
    }
}

pub(crate) fn replay_scans<R: BufRead>(
    reader: R,
    period: Option<Duration>,
    mut publisher: ScanPublisher,
    terminator_rx: Receiver<bool>,
) {
    let mut published = 0usize;
    for (i, line) in reader.lines().enumerate() {
        if do_terminate(&terminator_rx) {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read scan input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match decode_scan(&line, i + 1) {
            Ok(scan) => {
                publisher.publish(scan);
                published += 1;
            }
            Err(e) => {
                log::warn!("{}", e);
                continue;
            }
        }

        if let Some(period) = period {
            if let Ok(true) = terminator_rx.recv_timeout(period) {
                break;
            }
        }
    }
    log::info!(
        "Scan replay finished: {} published, {} dropped on overflow",
        published,
        publisher.dropped()
    );
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}
