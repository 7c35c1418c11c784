use crate::constants::EVENT_POLL_MS;
use crate::error::Result;
use crate::line::format_line;
use crate::reducer::reduce_scan;
use crate::serial::SerialSink;
use crate::source::{ScanEvent, ScanSource};
use scan_uart_data::{ClosestObstacle, LaserScan};
use serialport::SerialPort;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Result of pushing one scan through the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum ScanOutcome {
    Sent(ClosestObstacle),
    NoObstacle,
    /// The line was lost; the device stays open for the next scan.
    WriteFailed(ClosestObstacle),
    /// Metadata was non-finite, the range window was empty, or the
    /// reconstructed angle does not fit in an `f32`.
    InvalidScan,
}

/// Counters over one bridge run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BridgeStats {
    pub scans: usize,
    pub lines_sent: usize,
    pub empty_scans: usize,
    pub invalid_scans: usize,
    pub write_errors: usize,
}

/// Scan reducer, line formatter and serial sink wired in sequence.
pub struct Bridge<P: Write = Box<dyn SerialPort>> {
    sink: SerialSink<P>,
    stats: BridgeStats,
}

impl<P: Write> Bridge<P> {
    pub fn new(sink: SerialSink<P>) -> Self {
        Bridge {
            sink,
            stats: BridgeStats::default(),
        }
    }

    pub fn stats(&self) -> &BridgeStats {
        &self.stats
    }

    pub fn handle_scan(&mut self, scan: &LaserScan) -> ScanOutcome {
        self.stats.scans += 1;

        if !scan.has_valid_metadata() {
            log::warn!(
                "Ignoring scan with invalid metadata: range=[{}, {}], angle_min={}, angle_increment={}",
                scan.range_min,
                scan.range_max,
                scan.angle_min,
                scan.angle_increment
            );
            self.stats.invalid_scans += 1;
            return ScanOutcome::InvalidScan;
        }

        let Some(obstacle) = reduce_scan(scan) else {
            log::info!("No valid obstacles detected within range");
            self.stats.empty_scans += 1;
            return ScanOutcome::NoObstacle;
        };
        if !obstacle.angle_deg.is_finite() {
            log::warn!(
                "Ignoring scan whose angle at index {} overflows: angle_min={}, angle_increment={}",
                obstacle.index,
                scan.angle_min,
                scan.angle_increment
            );
            self.stats.invalid_scans += 1;
            return ScanOutcome::InvalidScan;
        }
        log::info!(
            "Closest obstacle: Distance={:.2} m, Angle={:.2} deg",
            obstacle.distance_m,
            obstacle.angle_deg
        );

        match self.sink.write_line(&format_line(&obstacle)) {
            Ok(()) => {
                self.stats.lines_sent += 1;
                ScanOutcome::Sent(obstacle)
            }
            Err(e) => {
                log::error!("{}", e);
                self.stats.write_errors += 1;
                ScanOutcome::WriteFailed(obstacle)
            }
        }
    }

    /// Process scans in arrival order until `running` is cleared or the
    /// source ends. A scan already being written is finished first.
    pub fn run<S: ScanSource>(&mut self, source: &mut S, running: &AtomicBool) -> Result<()> {
        let poll = Duration::from_millis(EVENT_POLL_MS);
        while running.load(Ordering::SeqCst) {
            match source.next_event(poll)? {
                ScanEvent::Scan(scan) => {
                    self.handle_scan(&scan);
                }
                ScanEvent::Idle => continue,
                ScanEvent::EndOfStream => {
                    log::info!("Scan source closed");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Release the serial device and return the final counters.
    pub fn shutdown(self) -> BridgeStats {
        let Bridge { sink, stats } = self;
        sink.close();
        stats
    }
}
