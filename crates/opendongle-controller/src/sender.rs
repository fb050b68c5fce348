//! Outbound packet seam.

use opendongle_errors::Result;

/// Sends a complete GIP packet to one controller.
///
/// Implementations are shared between the session and the feedback thread,
/// so sending takes `&self`.
pub trait PacketSender: Send + Sync {
    fn send_packet(&self, packet: &[u8]) -> Result<()>;
}

pub mod mock {
    use std::sync::Arc;

    use opendongle_errors::{Result, TransportError};
    use parking_lot::Mutex;

    use super::PacketSender;

    /// Records sent packets; can be switched to fail.
    #[derive(Clone, Default)]
    pub struct RecordingSender {
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
        fail: Arc<Mutex<bool>>,
    }

    impl RecordingSender {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sent(&self) -> Vec<Vec<u8>> {
            self.sent.lock().clone()
        }

        pub fn clear(&self) {
            self.sent.lock().clear();
        }

        pub fn set_fail(&self, fail: bool) {
            *self.fail.lock() = fail;
        }
    }

    impl PacketSender for RecordingSender {
        fn send_packet(&self, packet: &[u8]) -> Result<()> {
            if *self.fail.lock() {
                return Err(TransportError::send_failed("packet", "sender disabled").into());
            }
            self.sent.lock().push(packet.to_vec());
            Ok(())
        }
    }
}
