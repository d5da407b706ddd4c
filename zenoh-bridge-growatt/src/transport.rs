//! Modbus transport: one shared connection serving every device on the
//! bus.
//!
//! RTU is a half-duplex party line, so all devices share one [`Context`]
//! and the poller addresses them by unit id per request. TCP goes through
//! the same interface for Growatt datalogger gateways that front the
//! serial bus.

use std::net::SocketAddr;
use std::time::Duration;

use tokio_modbus::client::{Context, Reader};
use tokio_modbus::prelude::*;

use crate::config::{BusConfig, ConnectionConfig};
use crate::registry::RegisterClass;

/// Error type for register reads.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Modbus exception: {0}")]
    Exception(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl TransportError {
    /// Timeouts and exception responses are routine on a field bus (a
    /// device asleep at night, a register block the firmware does not
    /// have). Anything else means the bus itself is in trouble.
    pub fn is_comm(&self) -> bool {
        matches!(self, TransportError::Timeout | TransportError::Exception(_))
    }
}

/// Abstraction over the register-read operation, so the polling pipeline
/// can be exercised against canned registers in tests.
pub trait RegisterTransport {
    async fn read_registers(
        &mut self,
        class: RegisterClass,
        address: u16,
        count: u16,
        unit: u8,
    ) -> Result<Vec<u16>, TransportError>;
}

/// Production transport over tokio-modbus.
pub struct ModbusTransport {
    ctx: Context,
    timeout: Duration,
}

impl ModbusTransport {
    /// Open the bus connection described by the configuration.
    pub async fn connect(config: &BusConfig) -> Result<Self, TransportError> {
        let timeout = Duration::from_millis(config.timeout_ms);

        let ctx = match &config.connection {
            ConnectionConfig::Tcp { host, port } => {
                let addr: SocketAddr = format!("{}:{}", host, port)
                    .parse()
                    .map_err(|e| TransportError::Connection(format!("Invalid address: {}", e)))?;

                tokio::time::timeout(timeout, tcp::connect(addr))
                    .await
                    .map_err(|_| TransportError::Connection("Connection timeout".to_string()))?
                    .map_err(|e| TransportError::Connection(e.to_string()))?
            }
            ConnectionConfig::Rtu {
                port,
                baud_rate,
                data_bits,
                parity,
                stop_bits,
            } => {
                let parity = match parity.to_lowercase().as_str() {
                    "even" => tokio_serial::Parity::Even,
                    "odd" => tokio_serial::Parity::Odd,
                    _ => tokio_serial::Parity::None,
                };

                let stop_bits = match stop_bits {
                    2 => tokio_serial::StopBits::Two,
                    _ => tokio_serial::StopBits::One,
                };

                let data_bits = match data_bits {
                    5 => tokio_serial::DataBits::Five,
                    6 => tokio_serial::DataBits::Six,
                    7 => tokio_serial::DataBits::Seven,
                    _ => tokio_serial::DataBits::Eight,
                };

                let builder = tokio_serial::new(port, *baud_rate)
                    .parity(parity)
                    .stop_bits(stop_bits)
                    .data_bits(data_bits);

                let serial = tokio_serial::SerialStream::open(&builder)
                    .map_err(|e| TransportError::Connection(format!("Serial open failed: {}", e)))?;

                rtu::attach(serial)
            }
        };

        Ok(Self { ctx, timeout })
    }
}

impl RegisterTransport for ModbusTransport {
    async fn read_registers(
        &mut self,
        class: RegisterClass,
        address: u16,
        count: u16,
        unit: u8,
    ) -> Result<Vec<u16>, TransportError> {
        self.ctx.set_slave(Slave(unit));

        let request = async {
            match class {
                RegisterClass::Input => self.ctx.read_input_registers(address, count).await,
                RegisterClass::Holding => self.ctx.read_holding_registers(address, count).await,
            }
        };

        let words = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| TransportError::Timeout)?
            .map_err(|e| TransportError::Io(e.to_string()))?
            .map_err(|e| TransportError::Exception(format!("{:?}", e)))?;

        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(TransportError::Timeout.is_comm());
        assert!(TransportError::Exception("IllegalDataAddress".to_string()).is_comm());
        assert!(!TransportError::Io("broken pipe".to_string()).is_comm());
        assert!(!TransportError::Connection("refused".to_string()).is_comm());
    }
}
