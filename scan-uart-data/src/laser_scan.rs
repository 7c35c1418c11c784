#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// One planar sweep of range samples, laid out like the middleware's
/// `sensor_msgs/LaserScan`.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaserScan {
    /// Angle of the first sample in radian.
    pub angle_min: f32,
    /// Angle of the last sample in radian.
    #[cfg_attr(feature = "serde", serde(default))]
    pub angle_max: f32,
    /// Angular distance between consecutive samples in radian.
    pub angle_increment: f32,
    /// Minimum valid range in meters.
    pub range_min: f32,
    /// Maximum valid range in meters.
    pub range_max: f32,
    /// Range samples in meters. `null` in serialized form means no return.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "nullable_ranges"))]
    pub ranges: Vec<f32>,
    /// Return strength per sample. Device specific units, may be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub intensities: Vec<f32>,
}

impl LaserScan {
    /// Metadata must be finite with `0 <= range_min < range_max` before the
    /// ranges mean anything.
    pub fn has_valid_metadata(&self) -> bool {
        self.angle_min.is_finite()
            && self.angle_increment.is_finite()
            && self.range_min.is_finite()
            && self.range_max.is_finite()
            && self.range_min >= 0.
            && self.range_min < self.range_max
    }
}

#[cfg(feature = "serde")]
fn nullable_ranges<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let ranges = Vec::<Option<f32>>::deserialize(deserializer)?;
    Ok(ranges.into_iter().map(|r| r.unwrap_or(f32::NAN)).collect())
}
