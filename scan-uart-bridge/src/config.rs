use crate::constants::{DEFAULT_UART_BAUD_RATE, DEFAULT_UART_PORT};
use crate::error::Result;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Serial device the closest obstacle is written to.
    #[arg(long, env, default_value = DEFAULT_UART_PORT)]
    pub uart_port: String,

    /// Baud rate of the serial device.
    #[arg(long, env, default_value_t = DEFAULT_UART_BAUD_RATE)]
    pub uart_baud_rate: u32,

    /// Newline-delimited JSON laser scans to forward. `-` reads stdin.
    #[arg(long, env, default_value = "-")]
    pub replay: PathBuf,

    /// Pause after each replayed scan in milliseconds. 0 disables pacing.
    #[arg(long, env, default_value = "0")]
    pub replay_period_ms: u64,
}

impl Args {
    pub fn replay_period(&self) -> Option<Duration> {
        match self.replay_period_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn open_replay(&self) -> Result<Box<dyn BufRead + Send>> {
        if self.replay.as_os_str() == "-" {
            return Ok(Box::new(BufReader::new(io::stdin())));
        }
        let file = File::open(&self.replay)?;
        Ok(Box::new(BufReader::new(file)))
    }
}
