pub(crate) const SCAN_TOPIC: &str = "scan";
pub(crate) const SCAN_QUEUE_DEPTH: usize = 10;
pub(crate) const DEFAULT_UART_PORT: &str = "/dev/ttyUSB1";
pub(crate) const DEFAULT_UART_BAUD_RATE: u32 = 115200;
// Per-call port timeout and whole-line deadline. A line overruns its deadline
// by at most one port timeout, so one line never blocks shutdown past 1 s.
pub(crate) const WRITE_TIMEOUT_MS: u64 = 500;
pub(crate) const LINE_DEADLINE_MS: u64 = 500;
pub(crate) const SHUTDOWN_DEADLINE_MS: u64 = 1000;
pub(crate) const EVENT_POLL_MS: u64 = 100;
