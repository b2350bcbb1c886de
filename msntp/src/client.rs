use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[cfg(feature = "log")]
use log::{debug, error, info, trace};

use crate::config::SntpConfig;
use crate::ingress::SntpIngress;
use crate::slot::ResponseSlot;
use crate::transport::SntpTransport;
use crate::types::{decode_response, encode_request, Error, Result, SntpResponse, SntpTime, SocketId};

/// Blocking SNTP client performing one request/response exchange per call.
///
/// Responses reach the client through the [`ResponseSlot`] it shares with an
/// [`SntpIngress`]. Only one exchange may be in flight per slot: `get_datetime` does not
/// serialize callers, and two concurrent exchanges sharing a slot can steal or
/// misattribute each other's responses (see [`Error::Internal`]).
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use msntp::{ResponseSlot, SntpClient, SntpConfig, SntpIngress, SntpTransport};
/// # use msntp::{SocketId, TransportError};
/// # struct Wifi;
/// # impl Wifi { fn new(_: SntpIngress) -> Self { Wifi } }
/// # impl SntpTransport for Wifi {
/// #     fn open(&self, _: &str, _: u16) -> Result<i32, TransportError> { Ok(0) }
/// #     fn write(&self, _: SocketId, buf: &[u8]) -> Result<usize, TransportError> { Ok(buf.len()) }
/// #     fn close(&self, _: SocketId) -> Result<(), TransportError> { Ok(()) }
/// # }
///
/// let slot = Arc::new(ResponseSlot::new());
/// // the socket layer calls `SntpIngress::on_socket_data` for every received chunk
/// let transport = Wifi::new(SntpIngress::new(Arc::clone(&slot)));
/// let client = SntpClient::new(transport, slot, SntpConfig::new("time.google.com"));
///
/// match client.get_datetime() {
///     Ok(time) => println!("socket {}: {}", time.socket(), time.sec()),
///     Err(err) => eprintln!("SNTP exchange failed: {err}"),
/// }
/// ```
#[derive(Debug)]
pub struct SntpClient<T: SntpTransport> {
    transport: T,
    slot: Arc<ResponseSlot>,
    config: SntpConfig,
    last_time: AtomicI64,
}

impl<T: SntpTransport> SntpClient<T> {
    #[must_use]
    pub fn new(transport: T, slot: Arc<ResponseSlot>, config: SntpConfig) -> Self {
        SntpClient {
            transport,
            slot,
            config,
            last_time: AtomicI64::new(0),
        }
    }

    /// Returns an ingress feeding this client's response slot
    #[must_use]
    pub fn ingress(&self) -> SntpIngress {
        SntpIngress::new(Arc::clone(&self.slot))
    }

    #[must_use]
    pub fn config(&self) -> &SntpConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Server time obtained by the last successful exchange, in seconds since
    /// UNIX EPOCH. `0` until an exchange succeeds
    #[must_use]
    pub fn last_known_time(&self) -> i64 {
        self.last_time.load(Ordering::Acquire)
    }

    /// Retrieves the current time from the configured SNTP server.
    ///
    /// Drops any response left in the slot, opens a socket, sends the request and
    /// blocks until the ingress captures a response or the configured timeout runs out.
    /// The response slot is cleared and the socket closed before returning, whatever
    /// the outcome.
    ///
    /// # Errors
    ///
    /// * [`Error::Socket`] - the socket could not be opened or its handle is invalid
    /// * [`Error::RequestFailure`] - the request could not be written
    /// * [`Error::Timeout`] - no response arrived in time
    /// * [`Error::Internal`] - the captured response belongs to another socket
    /// * [`Error::Parser`] - the response carries a transmit time before UNIX EPOCH
    pub fn get_datetime(&self) -> Result<SntpTime> {
        #[cfg(feature = "log")]
        debug!(
            "Getting date and time from SNTP server {}:{}",
            self.config.server(),
            self.config.port()
        );
        let mut cleanup = Cleanup {
            transport: &self.transport,
            slot: &self.slot,
            socket: None,
        };
        // anything captured before the request is sent cannot be its answer
        self.slot.clear();

        let socket = self.start()?;
        cleanup.socket = Some(socket);

        self.send_request(socket)?;
        let response = self.await_response()?;

        self.process_response(socket, &response)
    }

    fn start(&self) -> Result<SocketId> {
        #[allow(unused_variables)]
        let raw = self
            .transport
            .open(self.config.server(), self.config.port())
            .map_err(|err| {
                #[cfg(feature = "log")]
                error!("SNTP socket creation failed: {}", err);
                Error::Socket
            })?;

        let Some(socket) = SocketId::from_raw(raw) else {
            #[cfg(feature = "log")]
            error!("SNTP socket creation returned invalid socket id {}", raw);
            return Err(Error::Socket);
        };

        #[cfg(feature = "log")]
        debug!("SNTP socket {} opened", socket);
        Ok(socket)
    }

    fn send_request(&self, socket: SocketId) -> Result<()> {
        let request = encode_request();

        match self.transport.write(socket, request.as_bytes()) {
            Ok(size) if size == request.as_bytes().len() => Ok(()),
            #[allow(unused_variables)]
            Ok(size) => {
                #[cfg(feature = "log")]
                error!("SNTP request partially written: {} bytes", size);
                Err(Error::RequestFailure)
            }
            #[allow(unused_variables)]
            Err(err) => {
                #[cfg(feature = "log")]
                error!("SNTP request write failed: {}", err);
                Err(Error::RequestFailure)
            }
        }
    }

    fn await_response(&self) -> Result<SntpResponse> {
        let step = self.config.poll_interval();
        let mut remaining = self.config.timeout();

        loop {
            if self.slot.peek_socket_id().is_some() {
                if let Some(response) = self.slot.take_and_clear() {
                    return Ok(response);
                }
            }

            if remaining.is_zero() {
                #[cfg(feature = "log")]
                error!("SNTP response timed out after {} ms", self.config.timeout().as_millis());
                return Err(Error::Timeout);
            }

            #[cfg(feature = "log")]
            trace!("awaiting SNTP response, {} ms left", remaining.as_millis());
            self.slot.wait_for_arrival(step.min(remaining));
            remaining = remaining.saturating_sub(step);
        }
    }

    fn process_response(&self, socket: SocketId, response: &SntpResponse) -> Result<SntpTime> {
        if response.socket() != socket {
            #[cfg(feature = "log")]
            error!(
                "SNTP response captured for socket {} while awaiting socket {}",
                response.socket(),
                socket
            );
            return Err(Error::Internal);
        }

        #[cfg(feature = "log")]
        crate::debug_sntp_packet(&crate::SntpPacket::from(response.packet()));

        let seconds = decode_response(response.packet());

        if seconds < 0 {
            #[cfg(feature = "log")]
            error!("SNTP transmit timestamp predates UNIX EPOCH: {}", seconds);
            return Err(Error::Parser);
        }

        #[cfg(feature = "log")]
        info!("Received epoch time: {}", seconds);
        self.last_time.store(seconds, Ordering::Release);

        Ok(SntpTime::new(socket, seconds))
    }
}

struct Cleanup<'a, T: SntpTransport> {
    transport: &'a T,
    slot: &'a ResponseSlot,
    socket: Option<SocketId>,
}

impl<T: SntpTransport> Drop for Cleanup<'_, T> {
    fn drop(&mut self) {
        self.slot.clear();

        if let Some(socket) = self.socket.take() {
            match self.transport.close(socket) {
                Ok(()) => {
                    #[cfg(feature = "log")]
                    debug!("SNTP socket {} closed", socket);
                }
                #[allow(unused_variables)]
                Err(err) => {
                    #[cfg(feature = "log")]
                    error!("SNTP socket {} close failed: {}", socket, err);
                }
            }
        }
    }
}
