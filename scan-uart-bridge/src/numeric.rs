pub(crate) fn radian_to_degree(radian: f64) -> f64 {
    radian * 180. / std::f64::consts::PI
}

/// NaN and infinities fail both comparisons, so they are never valid.
pub(crate) fn is_valid_range(range: f32, range_min: f32, range_max: f32) -> bool {
    range.is_finite() && range >= range_min && range <= range_max
}
