#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The valid sample with the smallest range in one scan.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClosestObstacle {
    /// Distance to the obstacle in meters.
    pub distance_m: f32,
    /// Bearing in degrees, in the scan's own angular frame (not normalized).
    pub angle_deg: f32,
    /// Index of the selected sample in `LaserScan::ranges`.
    pub index: usize,
}
