#![allow(dead_code)]

use msntp::{SntpIngress, SntpTransport, SocketId, TransportError};

use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// NTP seconds of 2023-11-14 22:13:20 UTC, UNIX time 1_700_000_000
pub const NTP_SECONDS_1_700_000_000: u32 = 3_908_988_800;

pub fn sntp_response(ntp_seconds: u32) -> [u8; 48] {
    let mut buf = [0u8; 48];
    buf[0] = 0x24;
    buf[1] = 2;
    buf[24..32].copy_from_slice(&msntp::SNTP_REQUEST.0[40..48]);
    buf[40..44].copy_from_slice(&ntp_seconds.to_be_bytes());
    buf
}

#[derive(Default)]
struct Journal {
    next_handles: Vec<i32>,
    writes: Vec<(SocketId, Vec<u8>)>,
    closes: Vec<SocketId>,
}

/// Transport handing out scripted socket handles. Received data is injected by the
/// test through [`Delivery`], from a thread of its own
#[derive(Default)]
pub struct ManualTransport {
    journal: Mutex<Journal>,
}

impl ManualTransport {
    pub fn with_handles(handles: &[i32]) -> Self {
        let transport = ManualTransport::default();
        transport.journal.lock().unwrap().next_handles = handles.iter().rev().copied().collect();
        transport
    }

    pub fn writes(&self) -> Vec<(SocketId, Vec<u8>)> {
        self.journal.lock().unwrap().writes.clone()
    }

    pub fn closes(&self) -> Vec<SocketId> {
        self.journal.lock().unwrap().closes.clone()
    }

    /// Blocks until `count` requests have been written
    pub fn wait_for_writes(&self, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);

        while self.journal.lock().unwrap().writes.len() < count {
            assert!(Instant::now() < deadline, "request was never written");
            thread::sleep(Duration::from_millis(1));
        }
    }
}

impl SntpTransport for ManualTransport {
    fn open(&self, _host: &str, _port: u16) -> Result<i32, TransportError> {
        self.journal
            .lock()
            .unwrap()
            .next_handles
            .pop()
            .ok_or(TransportError::new(-1))
    }

    fn write(&self, socket: SocketId, buf: &[u8]) -> Result<usize, TransportError> {
        self.journal.lock().unwrap().writes.push((socket, buf.to_vec()));
        Ok(buf.len())
    }

    fn close(&self, socket: SocketId) -> Result<(), TransportError> {
        self.journal.lock().unwrap().closes.push(socket);
        Ok(())
    }
}

/// Delivery context of the simulated socket stack
pub struct Delivery;

impl Delivery {
    /// Calls `ingress` with every `(socket, data)` pair after `delay`, from a
    /// separate thread
    pub fn after(delay: Duration, ingress: SntpIngress, chunks: Vec<(u8, Vec<u8>)>) -> JoinHandle<()> {
        thread::spawn(move || {
            thread::sleep(delay);

            for (socket, data) in chunks {
                let size = u32::try_from(data.len()).unwrap();
                ingress.on_socket_data(SocketId::new(socket), &data, size, size);
            }
        })
    }
}
