use crate::numeric::{is_valid_range, radian_to_degree};
use scan_uart_data::{ClosestObstacle, LaserScan};

/// Reduces one scan to its closest valid sample.
///
/// The running minimum starts at `range_max` and a sample must be strictly
/// smaller to be taken, so a scan whose only valid samples sit exactly at
/// `range_max` yields nothing. Ties keep the earliest index.
pub fn reduce_scan(scan: &LaserScan) -> Option<ClosestObstacle> {
    let mut min_range = scan.range_max;
    let mut min_index = None;

    for (i, &range) in scan.ranges.iter().enumerate() {
        if !is_valid_range(range, scan.range_min, scan.range_max) {
            continue;
        }
        if range < min_range {
            min_range = range;
            min_index = Some(i);
        }
    }

    min_index.map(|index| ClosestObstacle {
        distance_m: min_range,
        angle_deg: sample_angle_degree(scan, index) as f32,
        index,
    })
}

pub(crate) fn sample_angle_degree(scan: &LaserScan, index: usize) -> f64 {
    let angle_radian = scan.angle_min as f64 + (index as f64) * (scan.angle_increment as f64);
    radian_to_degree(angle_radian)
}
