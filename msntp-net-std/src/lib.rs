//! Standard library UDP transport for the [`msntp`] SNTP client.
//!
//! [`StdTransport`] implements [`SntpTransport`] on top of [`std::net::UdpSocket`] and
//! plays the role of a callback driven socket stack: every open socket gets a reader
//! thread that forwards each received datagram to a [`DataReceiver`], normally an
//! [`msntp::SntpIngress`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use msntp::{ResponseSlot, SntpClient, SntpConfig, SntpIngress};
//! use msntp_net_std::StdTransport;
//!
//! let slot = Arc::new(ResponseSlot::new());
//! let transport = StdTransport::new(SntpIngress::new(Arc::clone(&slot)));
//! let client = SntpClient::new(transport, slot, SntpConfig::new("pool.ntp.org"));
//!
//! match client.get_datetime() {
//!     Ok(time) => println!("Received time: {}", time.sec()),
//!     Err(e) => eprintln!("Failed to get time: {e}"),
//! }
//! ```

use msntp::{DataReceiver, SntpTransport, SocketId, TransportError};

#[cfg(feature = "log")]
use log::{debug, error};

use std::collections::BTreeMap;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Status reported when a server name resolves to no address
pub const STATUS_UNRESOLVED: i32 = -2;
/// Status reported when every socket handle is in use
pub const STATUS_NO_FREE_HANDLE: i32 = -3;
/// Status reported for operations on a handle that is not open
pub const STATUS_UNKNOWN_HANDLE: i32 = -4;
/// Status reported when a reader thread terminated abnormally
pub const STATUS_READER_FAILED: i32 = -5;

const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(100);
const MAX_DATAGRAM_SIZE: usize = 1500;

struct OpenSocket {
    socket: UdpSocket,
    running: Arc<AtomicBool>,
    reader: JoinHandle<()>,
}

/// UDP transport backed by [`std::net::UdpSocket`]
///
/// Socket handles are allocated lowest-first from `0..=255` and reused after close.
pub struct StdTransport<R> {
    receiver: Arc<R>,
    sockets: Mutex<BTreeMap<u8, OpenSocket>>,
    read_timeout: Duration,
}

impl<R> StdTransport<R>
where
    R: DataReceiver + Send + Sync + 'static,
{
    /// Creates a transport delivering received data to `receiver`
    #[must_use]
    pub fn new(receiver: R) -> Self {
        StdTransport {
            receiver: Arc::new(receiver),
            sockets: Mutex::new(BTreeMap::new()),
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Sets how often reader threads check whether their socket has been closed
    #[must_use]
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout.max(Duration::from_millis(1));
        self
    }

    /// Number of currently open sockets
    #[must_use]
    pub fn open_sockets(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<u8, OpenSocket>> {
        self.sockets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn connect(&self, host: &str, port: u16) -> io::Result<UdpSocket> {
        let addr = (host, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no address"))?;
        let local = match addr {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        let socket = UdpSocket::bind(local)?;

        socket.connect(addr)?;
        socket.set_read_timeout(Some(self.read_timeout))?;
        #[cfg(feature = "log")]
        debug!("UDP socket {:?} connected to {}", socket.local_addr(), addr);

        Ok(socket)
    }

    fn spawn_reader(&self, id: u8, socket: UdpSocket, running: Arc<AtomicBool>) -> io::Result<JoinHandle<()>> {
        let receiver = Arc::clone(&self.receiver);

        thread::Builder::new()
            .name(format!("sntp-rx-{id}"))
            .spawn(move || read_loop(&socket, SocketId::new(id), &*receiver, &running))
    }
}

fn read_loop<R: DataReceiver>(socket: &UdpSocket, id: SocketId, receiver: &R, running: &AtomicBool) {
    let mut buf = [0u8; MAX_DATAGRAM_SIZE];

    while running.load(Ordering::Acquire) {
        match socket.recv(&mut buf) {
            Ok(size) => {
                let message_size = u32::try_from(size).unwrap_or(u32::MAX);
                receiver.on_socket_data(id, &buf[..size], message_size, message_size);
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {}
            Err(e) => {
                #[cfg(feature = "log")]
                error!("socket {}: receive failed: {}", id, e);
                // ICMP port unreachable surfaces as an error on connected sockets
                if e.kind() != io::ErrorKind::ConnectionRefused {
                    break;
                }
            }
        }
    }
}

impl<R> SntpTransport for StdTransport<R>
where
    R: DataReceiver + Send + Sync + 'static,
{
    fn open(&self, host: &str, port: u16) -> Result<i32, TransportError> {
        let socket = self.connect(host, port).map_err(|e| {
            #[cfg(feature = "log")]
            error!("Unable to open UDP socket to {}:{}: {}", host, port, e);
            if e.kind() == io::ErrorKind::NotFound {
                TransportError::new(STATUS_UNRESOLVED)
            } else {
                TransportError::from(e)
            }
        })?;
        let reader_socket = socket.try_clone()?;

        let mut sockets = self.lock();
        let id = (0..=u8::MAX)
            .find(|id| !sockets.contains_key(id))
            .ok_or(TransportError::new(STATUS_NO_FREE_HANDLE))?;
        let running = Arc::new(AtomicBool::new(true));
        let reader = self.spawn_reader(id, reader_socket, Arc::clone(&running))?;

        sockets.insert(id, OpenSocket { socket, running, reader });

        Ok(i32::from(id))
    }

    fn write(&self, socket: SocketId, buf: &[u8]) -> Result<usize, TransportError> {
        let sockets = self.lock();
        let open = sockets
            .get(&socket.get())
            .ok_or(TransportError::new(STATUS_UNKNOWN_HANDLE))?;

        Ok(open.socket.send(buf)?)
    }

    fn close(&self, socket: SocketId) -> Result<(), TransportError> {
        let open = self
            .lock()
            .remove(&socket.get())
            .ok_or(TransportError::new(STATUS_UNKNOWN_HANDLE))?;

        open.running.store(false, Ordering::Release);
        open.reader
            .join()
            .map_err(|_| TransportError::new(STATUS_READER_FAILED))
    }
}

impl<R> Drop for StdTransport<R> {
    fn drop(&mut self) {
        let sockets = std::mem::take(self.sockets.get_mut().unwrap_or_else(PoisonError::into_inner));

        for (_, open) in sockets {
            open.running.store(false, Ordering::Release);
            let _ = open.reader.join();
        }
    }
}
