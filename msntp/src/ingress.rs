use std::sync::Arc;

#[cfg(feature = "log")]
use log::{debug, warn};

use crate::slot::ResponseSlot;
use crate::transport::DataReceiver;
use crate::types::{RawSntpPacket, SntpResponse, SocketId, SNTP_MSG_SIZE};

#[allow(clippy::cast_possible_truncation)]
const SNTP_MSG_SIZE_U32: u32 = SNTP_MSG_SIZE as u32;

/// Socket data entry point of the SNTP client.
///
/// Must be wired into the socket layer's data-received notification so that every
/// chunk received on any socket reaches [`SntpIngress::on_socket_data`]. Anything that
/// does not look like a complete SNTP message is ignored, so sharing the notification
/// with other protocols is fine.
#[derive(Debug, Clone)]
pub struct SntpIngress {
    slot: Arc<ResponseSlot>,
}

impl SntpIngress {
    #[must_use]
    pub fn new(slot: Arc<ResponseSlot>) -> Self {
        SntpIngress { slot }
    }

    /// Captures an SNTP response delivered by the socket layer.
    ///
    /// Deliveries are ignored unless both the message and the chunk are exactly
    /// [`SNTP_MSG_SIZE`] bytes long. A delivery that claims that size but carries a
    /// shorter buffer is dropped and the slot is left empty. Accepted responses replace
    /// any response still pending in the slot.
    pub fn on_socket_data(&self, socket: SocketId, data: &[u8], message_size: u32, chunk_size: u32) {
        if message_size != SNTP_MSG_SIZE_U32 || chunk_size != SNTP_MSG_SIZE_U32 {
            #[cfg(feature = "log")]
            debug!(
                "socket {}: {}/{} byte delivery is not an SNTP response, ignored",
                socket, chunk_size, message_size
            );
            return;
        }

        let Some(packet) = RawSntpPacket::from_slice(data) else {
            #[cfg(feature = "log")]
            warn!(
                "socket {}: SNTP response truncated to {} bytes, dropped",
                socket,
                data.len()
            );
            self.slot.clear();
            return;
        };

        #[allow(unused_variables)]
        let displaced = self.slot.install(SntpResponse::new(socket, packet));

        #[cfg(feature = "log")]
        if let Some(stale) = displaced {
            debug!("socket {}: stale SNTP response from socket {} discarded", socket, stale.socket());
        }
    }
}

impl DataReceiver for SntpIngress {
    fn on_socket_data(&self, socket: SocketId, data: &[u8], message_size: u32, chunk_size: u32) {
        SntpIngress::on_socket_data(self, socket, data, message_size, chunk_size);
    }
}
