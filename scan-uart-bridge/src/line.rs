use scan_uart_data::ClosestObstacle;

const DIST_PREFIX: &str = "Dist: ";
const ANGLE_SEPARATOR: &str = ", Angle: ";

/// Renders `Dist: <d>, Angle: <a>\n` with two fractional digits.
pub fn format_line(obstacle: &ClosestObstacle) -> Vec<u8> {
    format!(
        "{DIST_PREFIX}{:.2}{ANGLE_SEPARATOR}{:.2}\n",
        obstacle.distance_m, obstacle.angle_deg
    )
    .into_bytes()
}

/// Reads a line produced by [`format_line`] back into `(distance, angle)`.
pub fn parse_line(line: &[u8]) -> Option<(f32, f32)> {
    let line = std::str::from_utf8(line).ok()?.strip_suffix('\n')?;
    let (dist, angle) = line.strip_prefix(DIST_PREFIX)?.split_once(ANGLE_SEPARATOR)?;
    if !is_fixed_point(dist) || !is_fixed_point(angle) {
        return None;
    }
    Some((dist.parse().ok()?, angle.parse().ok()?))
}

// -?\d+\.\d{2}
fn is_fixed_point(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    match digits.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.len() == 2
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(distance_m: f32, angle_deg: f32) -> ClosestObstacle {
        ClosestObstacle {
            distance_m,
            angle_deg,
            index: 0,
        }
    }

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(&obstacle(0.5, -87.0)), b"Dist: 0.50, Angle: -87.00\n");
        assert_eq!(format_line(&obstacle(2.25, 90.0)), b"Dist: 2.25, Angle: 90.00\n");
        assert_eq!(format_line(&obstacle(1.0, 0.0)), b"Dist: 1.00, Angle: 0.00\n");
        assert_eq!(format_line(&obstacle(12.0, 359.994)), b"Dist: 12.00, Angle: 359.99\n");
    }

    #[test]
    fn test_format_line_rounds_to_two_digits() {
        assert_eq!(format_line(&obstacle(0.126, -0.004)), b"Dist: 0.13, Angle: -0.00\n");
        assert_eq!(format_line(&obstacle(5.999, 45.678)), b"Dist: 6.00, Angle: 45.68\n");
    }

    #[test]
    fn test_format_line_shape() {
        let inputs = [
            (0.1, -180.0),
            (0.333, 1234.5678),
            (5.999, -0.001),
            (3.0, 720.25),
            (0.12, f32::MAX),
        ];
        for (d, a) in inputs {
            let line = format_line(&obstacle(d, a));
            assert!(line.is_ascii());
            assert_eq!(line.iter().filter(|&&b| b == b'\n').count(), 1);
            assert_eq!(line.last(), Some(&b'\n'));
            assert!(!line.contains(&b'+'));
            assert!(parse_line(&line).is_some(), "{:?}", String::from_utf8_lossy(&line));
        }
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let inputs = [(0.5, -87.0), (2.2549, 90.004), (0.1, -179.996), (5.0, 1e4)];
        for (d, a) in inputs {
            let (pd, pa) = parse_line(&format_line(&obstacle(d, a))).unwrap();
            assert!((pd - d).abs() <= 5e-3, "{pd} vs {d}");
            assert!((pa - a).abs() <= 5e-3, "{pa} vs {a}");
        }
    }

    #[test]
    fn test_parse_line_rejects_malformed() {
        assert_eq!(parse_line(b"Dist: 0.50, Angle: -87.00"), None);
        assert_eq!(parse_line(b"Dist: 0.5, Angle: -87.00\n"), None);
        assert_eq!(parse_line(b"Dist: +0.50, Angle: 1.00\n"), None);
        assert_eq!(parse_line(b"Dist: 0.50,Angle: 1.00\n"), None);
        assert_eq!(parse_line(b" Dist: 0.50, Angle: 1.00\n"), None);
        assert_eq!(parse_line(b"Dist: .50, Angle: 1.00\n"), None);
        assert_eq!(parse_line(b"Dist: 0.50, Angle: 1.00\n"), Some((0.5, 1.0)));
    }
}
