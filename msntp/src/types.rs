use core::fmt::{Display, Formatter};

/// SNTP mode value bit mask
pub(crate) const MODE_MASK: u8 = 0b0000_0111;
/// SNTP mode bit mask shift value
pub(crate) const MODE_SHIFT: u8 = 0;
/// SNTP version value bit mask
pub(crate) const VERSION_MASK: u8 = 0b0011_1000;
/// SNTP version bit mask shift value
pub(crate) const VERSION_SHIFT: u8 = 3;
/// SNTP LI (leap indicator) bit mask value
pub(crate) const LI_MASK: u8 = 0b1100_0000;
/// SNTP LI bit mask shift value
pub(crate) const LI_SHIFT: u8 = 6;
/// Offset of the transmit timestamp seconds within a message
pub(crate) const TX_SECONDS_OFFSET: usize = 40;

/// Size of every SNTP message the client sends or accepts
pub const SNTP_MSG_SIZE: usize = 48;

/// Seconds between the NTP era 0 start (1900-01-01) and UNIX EPOCH.
/// See <https://www.rfc-editor.org/rfc/rfc5905>
pub const NTP_TIMESTAMP_DELTA: u32 = 2_208_988_800u32;

/// SNTP library result type
pub type Result<T> = core::result::Result<T, Error>;

/// Raw SNTP message exactly as it travels over the wire
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawSntpPacket(pub [u8; SNTP_MSG_SIZE]);

impl RawSntpPacket {
    /// Copies the first [`SNTP_MSG_SIZE`] bytes of `data` into a new packet.
    ///
    /// Returns `None` if `data` is shorter than a single SNTP message.
    #[must_use]
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        let bytes = data.get(..SNTP_MSG_SIZE)?;
        let mut buf = [0u8; SNTP_MSG_SIZE];

        buf.copy_from_slice(bytes);
        Some(RawSntpPacket(buf))
    }

    /// Wire representation of the packet
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SNTP_MSG_SIZE] {
        &self.0
    }
}

impl Default for RawSntpPacket {
    fn default() -> Self {
        RawSntpPacket([0u8; SNTP_MSG_SIZE])
    }
}

impl From<[u8; SNTP_MSG_SIZE]> for RawSntpPacket {
    fn from(buf: [u8; SNTP_MSG_SIZE]) -> Self {
        RawSntpPacket(buf)
    }
}

impl AsRef<[u8]> for RawSntpPacket {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Client request sent on every exchange.
///
/// Flags `0xE3`: leap indicator 3 (clock unsynchronized), version 4, mode 3 (client).
/// Poll exponent 3, precision -6, root delay and root dispersion of one second and a
/// fixed transmit timestamp. Servers echo the transmit timestamp back as the origin
/// timestamp, the client does not rely on it.
pub const SNTP_REQUEST: RawSntpPacket = RawSntpPacket([
    0xe3, 0x00, 0x03, 0xfa, 0x00, 0x01, 0x00, 0x00, //
    0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0xd5, 0x22, 0x0e, 0x35, 0xb8, 0x76, 0xab, 0xea,
]);

/// Returns the request message sent to an SNTP server
#[must_use]
pub const fn encode_request() -> RawSntpPacket {
    SNTP_REQUEST
}

/// Extracts the server transmit time from a response as seconds since UNIX EPOCH.
///
/// Only the seconds half of the transmit timestamp is used. The result is negative
/// when the server reports a time before 1970, e.g. an all-zero (unsent) transmit
/// timestamp, or once the NTP era 0 rolls over in 2036.
#[must_use]
pub fn decode_response(packet: &RawSntpPacket) -> i64 {
    let mut seconds = [0u8; 4];

    seconds.copy_from_slice(&packet.0[TX_SECONDS_OFFSET..TX_SECONDS_OFFSET + 4]);

    i64::from(u32::from_be_bytes(seconds)) - i64::from(NTP_TIMESTAMP_DELTA)
}

/// Host-order view of an SNTP message header
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SntpPacket {
    pub li_vn_mode: u8,
    pub stratum: u8,
    pub poll: i8,
    pub precision: i8,
    pub root_delay: u32,
    pub root_dispersion: u32,
    pub ref_id: u32,
    pub ref_timestamp: u64,
    pub origin_timestamp: u64,
    pub recv_timestamp: u64,
    pub tx_timestamp: u64,
}

impl SntpPacket {
    /// Association mode (3 - client, 4 - server, 5 - broadcast)
    #[must_use]
    pub fn mode(&self) -> u8 {
        shifter(self.li_vn_mode, MODE_MASK, MODE_SHIFT)
    }

    /// Protocol version number
    #[must_use]
    pub fn version(&self) -> u8 {
        shifter(self.li_vn_mode, VERSION_MASK, VERSION_SHIFT)
    }

    /// Leap indicator (3 - clock unsynchronized)
    #[must_use]
    pub fn leap_indicator(&self) -> u8 {
        shifter(self.li_vn_mode, LI_MASK, LI_SHIFT)
    }

    /// Encodes the header back into its network representation
    #[must_use]
    pub fn to_bytes(&self) -> RawSntpPacket {
        RawSntpPacket::from(self)
    }
}

fn shifter(val: u8, mask: u8, shift: u8) -> u8 {
    (val & mask) >> shift
}

impl From<&RawSntpPacket> for SntpPacket {
    fn from(val: &RawSntpPacket) -> Self {
        let to_array_u32 = |x: &[u8]| {
            let mut temp_buf = [0u8; 4];
            temp_buf.copy_from_slice(x);
            temp_buf
        };
        let to_array_u64 = |x: &[u8]| {
            let mut temp_buf = [0u8; 8];
            temp_buf.copy_from_slice(x);
            temp_buf
        };

        SntpPacket {
            li_vn_mode: val.0[0],
            stratum: val.0[1],
            poll: i8::from_be_bytes([val.0[2]]),
            precision: i8::from_be_bytes([val.0[3]]),
            root_delay: u32::from_be_bytes(to_array_u32(&val.0[4..8])),
            root_dispersion: u32::from_be_bytes(to_array_u32(&val.0[8..12])),
            ref_id: u32::from_be_bytes(to_array_u32(&val.0[12..16])),
            ref_timestamp: u64::from_be_bytes(to_array_u64(&val.0[16..24])),
            origin_timestamp: u64::from_be_bytes(to_array_u64(&val.0[24..32])),
            recv_timestamp: u64::from_be_bytes(to_array_u64(&val.0[32..40])),
            tx_timestamp: u64::from_be_bytes(to_array_u64(&val.0[40..48])),
        }
    }
}

impl From<&SntpPacket> for RawSntpPacket {
    fn from(val: &SntpPacket) -> Self {
        let mut tmp_buf = [0u8; SNTP_MSG_SIZE];

        tmp_buf[0] = val.li_vn_mode;
        tmp_buf[1] = val.stratum;
        tmp_buf[2] = val.poll.to_be_bytes()[0];
        tmp_buf[3] = val.precision.to_be_bytes()[0];
        tmp_buf[4..8].copy_from_slice(&val.root_delay.to_be_bytes());
        tmp_buf[8..12].copy_from_slice(&val.root_dispersion.to_be_bytes());
        tmp_buf[12..16].copy_from_slice(&val.ref_id.to_be_bytes());
        tmp_buf[16..24].copy_from_slice(&val.ref_timestamp.to_be_bytes());
        tmp_buf[24..32].copy_from_slice(&val.origin_timestamp.to_be_bytes());
        tmp_buf[32..40].copy_from_slice(&val.recv_timestamp.to_be_bytes());
        tmp_buf[40..48].copy_from_slice(&val.tx_timestamp.to_be_bytes());

        RawSntpPacket(tmp_buf)
    }
}

/// Transport level socket handle
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SocketId(u8);

impl SocketId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        SocketId(id)
    }

    /// Validates a raw handle returned by a transport. Negative values and values
    /// that do not fit a socket id denote an unallocated socket.
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        u8::try_from(raw).ok().map(SocketId)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for SocketId {
    fn from(id: u8) -> Self {
        SocketId(id)
    }
}

impl Display for SocketId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SNTP response captured from the delivery callback along with the socket
/// it arrived on
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SntpResponse {
    socket: SocketId,
    packet: RawSntpPacket,
}

impl SntpResponse {
    #[must_use]
    pub fn new(socket: SocketId, packet: RawSntpPacket) -> Self {
        SntpResponse { socket, packet }
    }

    #[must_use]
    pub fn socket(&self) -> SocketId {
        self.socket
    }

    #[must_use]
    pub fn packet(&self) -> &RawSntpPacket {
        &self.packet
    }
}

/// Status code reported by the underlying socket layer
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TransportError {
    code: i32,
}

impl TransportError {
    #[must_use]
    pub const fn new(code: i32) -> Self {
        TransportError { code }
    }

    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "transport status {}", self.code)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::new(err.raw_os_error().unwrap_or(-1))
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

/// The error type for SNTP client
/// Errors originate on transport layer or while validating a captured response
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Transport could not open a socket to the server or returned an invalid handle
    Socket,
    /// Transport failed to write the request
    RequestFailure,
    /// No response arrived within the configured timeout
    Timeout,
    /// Captured response belongs to a socket other than the one the exchange opened.
    /// Only reachable when several exchanges share one response slot
    Internal,
    /// Response transmit timestamp does not represent a time after UNIX EPOCH
    Parser,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::Socket => "unable to open socket to SNTP server",
            Error::RequestFailure => "unable to send SNTP request",
            Error::Timeout => "SNTP response timed out",
            Error::Internal => "SNTP response socket mismatch",
            Error::Parser => "invalid SNTP transmit timestamp",
        };

        write!(f, "{msg}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Numeric outcome of a single exchange, for callers that keep C-style status
/// bookkeeping. `0` is success, failures are negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(i8)]
pub enum Status {
    Success = 0,
    Timeout = -1,
    SocketError = -2,
    RequestFailure = -3,
    InternalError = -4,
    ParserError = -5,
}

impl Status {
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::Socket => Status::SocketError,
            Error::RequestFailure => Status::RequestFailure,
            Error::Timeout => Status::Timeout,
            Error::Internal => Status::InternalError,
            Error::Parser => Status::ParserError,
        }
    }
}

impl<T> From<&Result<T>> for Status {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(err) => Status::from(*err),
        }
    }
}

/// Successful exchange result
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SntpTime {
    /// Socket the exchange was performed on
    pub socket: SocketId,
    /// Server time in seconds since UNIX EPOCH
    pub seconds: i64,
}

impl SntpTime {
    #[must_use]
    pub fn new(socket: SocketId, seconds: i64) -> Self {
        SntpTime { socket, seconds }
    }

    /// Returns the socket handle used for the exchange
    #[must_use]
    pub fn socket(&self) -> SocketId {
        self.socket
    }

    /// Returns server time in seconds since UNIX EPOCH
    #[must_use]
    pub fn sec(&self) -> i64 {
        self.seconds
    }
}
