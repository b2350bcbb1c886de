use crate::types::{SocketId, TransportError};

/// A trait encapsulating the socket layer an SNTP exchange runs on top of.
///
/// The socket layer is expected to be connection oriented from the client's point of
/// view: [`SntpTransport::open`] creates a UDP association with a server and hands
/// back a small integer handle, data is written by handle and incoming datagrams are
/// delivered asynchronously to a [`DataReceiver`] rather than read back by the caller.
pub trait SntpTransport {
    /// Opens a UDP socket to `host:port` and returns its raw handle.
    ///
    /// A negative handle is treated as an allocation failure even when the call
    /// itself reports success.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the socket layer is unable to create the socket
    fn open(&self, host: &str, port: u16) -> Result<i32, TransportError>;

    /// Writes `buf` to the socket. On success, returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an underlying write fails
    fn write(&self, socket: SocketId, buf: &[u8]) -> Result<usize, TransportError>;

    /// Closes a socket previously returned by [`SntpTransport::open`].
    ///
    /// # Errors
    ///
    /// Will return `Err` if the socket layer refuses to close the socket
    fn close(&self, socket: SocketId) -> Result<(), TransportError>;
}

impl<T: SntpTransport + ?Sized> SntpTransport for &T {
    fn open(&self, host: &str, port: u16) -> Result<i32, TransportError> {
        (**self).open(host, port)
    }

    fn write(&self, socket: SocketId, buf: &[u8]) -> Result<usize, TransportError> {
        (**self).write(socket, buf)
    }

    fn close(&self, socket: SocketId) -> Result<(), TransportError> {
        (**self).close(socket)
    }
}

#[cfg(feature = "std")]
impl<T: SntpTransport + ?Sized> SntpTransport for std::sync::Arc<T> {
    fn open(&self, host: &str, port: u16) -> Result<i32, TransportError> {
        (**self).open(host, port)
    }

    fn write(&self, socket: SocketId, buf: &[u8]) -> Result<usize, TransportError> {
        (**self).write(socket, buf)
    }

    fn close(&self, socket: SocketId) -> Result<(), TransportError> {
        (**self).close(socket)
    }
}

/// Receiving side of the socket layer.
///
/// The socket layer calls [`DataReceiver::on_socket_data`] for every chunk of data that
/// arrives on any open socket, without filtering by socket first.
pub trait DataReceiver {
    /// Handles `chunk_size` bytes in `data` belonging to a message of `message_size`
    /// bytes received on `socket`
    fn on_socket_data(&self, socket: SocketId, data: &[u8], message_size: u32, chunk_size: u32);
}

impl<R: DataReceiver + ?Sized> DataReceiver for &R {
    fn on_socket_data(&self, socket: SocketId, data: &[u8], message_size: u32, chunk_size: u32) {
        (**self).on_socket_data(socket, data, message_size, chunk_size);
    }
}

#[cfg(feature = "std")]
impl<R: DataReceiver + ?Sized> DataReceiver for std::sync::Arc<R> {
    fn on_socket_data(&self, socket: SocketId, data: &[u8], message_size: u32, chunk_size: u32) {
        (**self).on_socket_data(socket, data, message_size, chunk_size);
    }
}
