use clap::{Arg, Command};
use scan_uart_data::LaserScan;
use std::io::Write;

const N_SAMPLES: usize = 360;
const RANGE_MIN: f32 = 0.1;
const RANGE_MAX: f32 = 6.0;

fn get_n_scans() -> usize {
    let matches = Command::new("Synthetic scan generator.")
        .about("Prints laser scans as JSON lines, for piping into scan-uart-bridge.")
        .disable_version_flag(true)
        .arg(
            Arg::new("count")
                .help("Number of scans to generate")
                .value_parser(clap::value_parser!(usize))
                .default_value("50"),
        )
        .get_matches();

    *matches.get_one::<usize>("count").unwrap()
}

/// A wall at 3 m with one obstacle sweeping around the sensor.
fn make_scan(step: usize) -> LaserScan {
    let angle_increment = 2. * std::f32::consts::PI / N_SAMPLES as f32;
    let obstacle_index = (step * 7) % N_SAMPLES;
    let ranges = (0..N_SAMPLES)
        .map(|i| {
            if i == obstacle_index {
                0.5 + (step % 10) as f32 * 0.1
            } else if i % 45 == 0 {
                // dropouts
                f32::NAN
            } else {
                3.0
            }
        })
        .collect();

    LaserScan {
        angle_min: -std::f32::consts::PI,
        angle_max: std::f32::consts::PI - angle_increment,
        angle_increment,
        range_min: RANGE_MIN,
        range_max: RANGE_MAX,
        ranges,
        intensities: Vec::new(),
    }
}

fn main() {
    let n_scans = get_n_scans();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for step in 0..n_scans {
        let line = serde_json::to_string(&make_scan(step)).unwrap();
        if writeln!(out, "{line}").is_err() {
            break;
        }
    }
}
