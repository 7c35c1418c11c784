use crate::constants::{LINE_DEADLINE_MS, WRITE_TIMEOUT_MS};
use crate::error::{BridgeError, Result};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Exclusive owner of the outbound UART.
///
/// The port is released when the sink is dropped, so every exit path closes
/// it exactly once. [`SerialSink::close`] is the explicit teardown hook.
pub struct SerialSink<P: Write = Box<dyn SerialPort>> {
    port: P,
    name: String,
}

impl SerialSink {
    /// Open `port_name` raw 8N1 at `baud_rate`, without flow control.
    ///
    /// # Arguments
    ///
    /// * `port_name` - Serial port name such as `/dev/ttyUSB1`.
    /// * `baud_rate` - Baud rate such as 115200.
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(WRITE_TIMEOUT_MS))
            .open()
            .map_err(|source| BridgeError::Open {
                port: port_name.to_string(),
                source,
            })?;

        log::info!("Opened UART port: {} at {} baud", port_name, baud_rate);
        Ok(SerialSink::from_port(port, port_name))
    }
}

impl<P: Write> SerialSink<P> {
    pub fn from_port(port: P, name: &str) -> Self {
        SerialSink {
            port,
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write the whole line or fail. The device is kept open on failure.
    pub fn write_line(&mut self, line: &[u8]) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(LINE_DEADLINE_MS);
        send_all(&mut self.port, line, deadline).map_err(BridgeError::Write)?;
        log::debug!(
            "Sent UART message: {}",
            String::from_utf8_lossy(line).trim_end()
        );
        Ok(())
    }

    pub fn close(self) {
        drop(self);
    }
}

impl<P: Write> Drop for SerialSink<P> {
    fn drop(&mut self) {
        if let Err(e) = self.port.flush() {
            log::warn!("Failed to flush UART port {}: {}", self.name, e);
        }
        log::info!("UART port closed");
    }
}

fn send_all<W: Write>(port: &mut W, mut data: &[u8], deadline: Instant) -> io::Result<()> {
    while !data.is_empty() {
        match port.write(data) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "serial port accepted no bytes",
                ))
            }
            Ok(n) => data = &data[n..],
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
        if !data.is_empty() && Instant::now() >= deadline {
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("{} bytes of the line still unsent", data.len()),
            ));
        }
    }
    Ok(())
}
