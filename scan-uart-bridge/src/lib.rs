use std::sync::atomic::AtomicBool;

mod config;
mod constants;
mod driver;
mod error;
mod line;
mod numeric;
mod reducer;
mod serial;
mod source;
#[cfg(test)]
mod testing;
mod time;

use crate::constants::{SCAN_QUEUE_DEPTH, SCAN_TOPIC};

pub use crate::config::Args;
pub use crate::driver::{Bridge, BridgeStats, ScanOutcome};
pub use crate::error::{BridgeError, Result};
pub use crate::line::{format_line, parse_line};
pub use crate::reducer::reduce_scan;
pub use crate::serial::SerialSink;
pub use crate::source::{
    decode_scan, scan_queue, ChannelSource, ReplayThread, ScanEvent, ScanPublisher, ScanSource,
};
pub use scan_uart_data::{ClosestObstacle, LaserScan};

/// Function to run the bridge until `running` is cleared or the input ends.
///
/// The serial device is opened before anything subscribes to scans, and it
/// is released on every return path.
/// # Arguments
///
/// * `args` - Startup configuration, read once.
/// * `running` - Cleared by the shutdown signal handler.
pub fn run_bridge(args: &Args, running: &AtomicBool) -> Result<BridgeStats> {
    let sink = SerialSink::open(&args.uart_port, args.uart_baud_rate)?;

    let reader = args.open_replay()?;
    let (publisher, mut source) = scan_queue(SCAN_QUEUE_DEPTH);
    let replay = ReplayThread::spawn(reader, args.replay_period(), publisher)?;
    log::info!("Bridge started, subscribed to /{}", SCAN_TOPIC);

    let mut bridge = Bridge::new(sink);
    let result = bridge.run(&mut source, running);
    drop(replay);

    let stats = bridge.shutdown();
    log::info!(
        "Processed {} scans: {} lines sent, {} without obstacle, {} invalid, {} write errors",
        stats.scans,
        stats.lines_sent,
        stats.empty_scans,
        stats.invalid_scans,
        stats.write_errors
    );
    result.map(|()| stats)
}
