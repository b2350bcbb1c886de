//! Rust single-shot SNTP client
//!
//! # Overview
//!
//! This crate fetches the current time, in seconds since UNIX EPOCH, from an SNTP
//! server with a single 48 byte request/response exchange. It targets socket stacks
//! that deliver received data through a callback instead of a blocking `recv`, as
//! found on WiFi/cellular modules driven by AT commands and similar embedded network
//! co-processors.
//!
//! # Usage
//!
//! Put this in your `Cargo.toml`:
//! ```cargo
//! [dependencies]
//! msntp = "0.2"
//! ```
//!
//! ## Features
//!
//! `msntp` supports several features:
//! - `std`: client, response slot and ingress; without it only the wire codec is available
//! - `log`: enables library debug output during execution
//! - `utils`: includes OS specific helpers to update system time
//!
//! # Details
//!
//! The socket stack is abstracted by two traits:
//! - [`SntpTransport`] opens, writes and closes sockets by handle
//! - [`DataReceiver`] is what the stack calls whenever data arrives on any socket.
//!   [`SntpIngress`] implements it
//!
//! [`SntpClient::get_datetime`] sends the request and blocks until [`SntpIngress`]
//! places a response into the shared [`ResponseSlot`], or the configured timeout runs
//! out. One exchange may be outstanding per slot at a time.
//!
//! ## Logging support
//!
//! Library debug logs can be enabled in executables by enabling `log` feature. Exchange
//! steps and decoded response headers will be printed.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use msntp::{ResponseSlot, SntpClient, SntpConfig, SntpIngress, SntpTransport, SocketId, TransportError};
//!
//! // Socket stack that answers every request right away
//! struct Loopback(SntpIngress);
//!
//! impl SntpTransport for Loopback {
//!     fn open(&self, _host: &str, _port: u16) -> Result<i32, TransportError> {
//!         Ok(3)
//!     }
//!
//!     fn write(&self, socket: SocketId, buf: &[u8]) -> Result<usize, TransportError> {
//!         let mut response = [0u8; 48];
//!         response[0] = 0x24;
//!         response[40..44].copy_from_slice(&3_908_988_800u32.to_be_bytes());
//!         self.0.on_socket_data(socket, &response, 48, 48);
//!         Ok(buf.len())
//!     }
//!
//!     fn close(&self, _socket: SocketId) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//!
//! let slot = Arc::new(ResponseSlot::new());
//! let transport = Loopback(SntpIngress::new(Arc::clone(&slot)));
//! let config = SntpConfig::new("time.google.com").with_timeout(Duration::from_secs(1));
//! let client = SntpClient::new(transport, slot, config);
//!
//! let time = client.get_datetime().expect("SNTP exchange failed");
//! assert_eq!(time.sec(), 1_700_000_000);
//! assert_eq!(time.socket(), SocketId::new(3));
//! ```
//!
//! For a [`std::net::UdpSocket`] based transport, see the `msntp-net-std` crate.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "utils")]
pub mod utils;

#[cfg(feature = "std")]
mod client;
#[cfg(feature = "std")]
mod config;
#[cfg(feature = "std")]
mod ingress;
#[cfg(feature = "std")]
mod slot;
mod transport;
mod types;

#[cfg(feature = "std")]
pub use crate::client::SntpClient;
#[cfg(feature = "std")]
pub use crate::config::*;
#[cfg(feature = "std")]
pub use crate::ingress::SntpIngress;
#[cfg(feature = "std")]
pub use crate::slot::ResponseSlot;
pub use crate::transport::{DataReceiver, SntpTransport};
pub use crate::types::*;

#[cfg(feature = "log")]
use core::str;

#[cfg(feature = "log")]
use log::debug;

#[cfg(feature = "log")]
pub(crate) fn debug_sntp_packet(packet: &SntpPacket) {
    const DELIMITER: &str = "================================================================";

    debug!("{}", DELIMITER);
    debug!("| Mode:\t\t{}", packet.mode());
    debug!("| Version:\t{}", packet.version());
    debug!("| Leap:\t\t{}", packet.leap_indicator());
    debug!("| Stratum:\t{}", packet.stratum);
    debug!("| Poll:\t\t{}", packet.poll);
    debug!("| Precision:\t\t{}", packet.precision);
    debug!("| Root delay:\t\t{}", packet.root_delay);
    debug!("| Root dispersion:\t{}", packet.root_dispersion);
    debug!(
        "| Reference ID:\t\t{}",
        str::from_utf8(&packet.ref_id.to_be_bytes()).unwrap_or("")
    );
    debug!("| Origin timestamp    (client):\t{:>16}", packet.origin_timestamp);
    debug!("| Receive timestamp   (server):\t{:>16}", packet.recv_timestamp);
    debug!("| Transmit timestamp  (server):\t{:>16}", packet.tx_timestamp);
    debug!("| Reference timestamp (server):\t{:>16}", packet.ref_timestamp);
    debug!("{}", DELIMITER);
}
