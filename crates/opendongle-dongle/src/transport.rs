//! Radio transport seam.
//!
//! The USB side of the dongle (firmware upload, MCU command framing, bulk
//! endpoints) lives behind [`RadioTransport`]. The registry only needs the
//! dongle's own address and a way to push an MCU command.

use core::fmt;
use std::sync::Arc;

use opendongle_errors::TransportError;
use parking_lot::Mutex;

use crate::radio::MacAddress;

/// MCU commands the registry issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum McuCommand {
    /// Transmit a radio frame to a client.
    PacketTx,
}

impl fmt::Display for McuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            McuCommand::PacketTx => f.write_str("packet-tx"),
        }
    }
}

/// Radio driver interface used by the registry.
pub trait RadioTransport: Send + Sync {
    /// Hardware address the dongle transmits from.
    fn mac_address(&self) -> MacAddress;

    fn open(&self) -> Result<(), TransportError>;

    fn close(&self) -> Result<(), TransportError>;

    fn send_command(&self, command: McuCommand, data: &[u8]) -> Result<(), TransportError>;
}

#[derive(Debug, Default)]
struct TransportState {
    commands: Vec<(McuCommand, Vec<u8>)>,
    fail_send: bool,
    fail_close: bool,
    open_count: usize,
    close_count: usize,
}

/// In-memory transport that records every command it is given.
///
/// Clones share state, so a test can keep one handle while the registry
/// owns another.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    address: MacAddress,
    state: Arc<Mutex<TransportState>>,
}

impl RecordingTransport {
    pub fn new(address: MacAddress) -> Self {
        Self {
            address,
            state: Arc::new(Mutex::new(TransportState::default())),
        }
    }

    /// Commands sent so far, oldest first.
    pub fn commands(&self) -> Vec<(McuCommand, Vec<u8>)> {
        self.state.lock().commands.clone()
    }

    /// Payloads of all `PacketTx` commands sent so far.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.state
            .lock()
            .commands
            .iter()
            .filter(|(command, _)| *command == McuCommand::PacketTx)
            .map(|(_, data)| data.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.state.lock().commands.clear();
    }

    pub fn set_fail_send(&self, fail: bool) {
        self.state.lock().fail_send = fail;
    }

    pub fn set_fail_close(&self, fail: bool) {
        self.state.lock().fail_close = fail;
    }

    pub fn open_count(&self) -> usize {
        self.state.lock().open_count
    }

    pub fn close_count(&self) -> usize {
        self.state.lock().close_count
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new(MacAddress::new([0x62, 0x45, 0xB4, 0x00, 0x00, 0x01]))
    }
}

impl RadioTransport for RecordingTransport {
    fn mac_address(&self) -> MacAddress {
        self.address
    }

    fn open(&self) -> Result<(), TransportError> {
        self.state.lock().open_count += 1;
        Ok(())
    }

    fn close(&self) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        state.close_count += 1;
        if state.fail_close {
            return Err(TransportError::CloseFailed("transport disabled".to_string()));
        }
        Ok(())
    }

    fn send_command(&self, command: McuCommand, data: &[u8]) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        if state.fail_send {
            return Err(TransportError::send_failed(
                command.to_string(),
                "transport disabled",
            ));
        }
        state.commands.push((command, data.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands_in_order() -> Result<(), TransportError> {
        let transport = RecordingTransport::default();
        transport.send_command(McuCommand::PacketTx, &[1, 2])?;
        transport.send_command(McuCommand::PacketTx, &[3])?;
        assert_eq!(transport.frames(), vec![vec![1, 2], vec![3]]);
        transport.clear();
        assert!(transport.commands().is_empty());
        Ok(())
    }

    #[test]
    fn failing_send_records_nothing() {
        let transport = RecordingTransport::default();
        transport.set_fail_send(true);
        let result = transport.send_command(McuCommand::PacketTx, &[1]);
        assert!(matches!(result, Err(TransportError::SendFailed { .. })));
        assert!(transport.commands().is_empty());
    }

    #[test]
    fn clones_share_state() -> Result<(), TransportError> {
        let transport = RecordingTransport::default();
        let other = transport.clone();
        other.open()?;
        other.close()?;
        assert_eq!(transport.open_count(), 1);
        assert_eq!(transport.close_count(), 1);
        Ok(())
    }
}
