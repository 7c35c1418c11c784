pub mod laser_scan;
pub mod obstacle;

pub use laser_scan::LaserScan;
pub use obstacle::ClosestObstacle;
