//! Demonstrates a single SNTP exchange with a public NTP server
//!
//! The exchange runs on top of [`msntp_net_std::StdTransport`], which forwards every
//! received datagram to the client's [`msntp::SntpIngress`].
use msntp::{ResponseSlot, SntpClient, SntpConfig, SntpIngress, Status};
use msntp_net_std::StdTransport;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[allow(dead_code)]
const POOL_NTP_ADDR: &str = "pool.ntp.org";
#[allow(dead_code)]
const GOOGLE_NTP_ADDR: &str = "time.google.com";

const ATTEMPTS: usize = 3;

fn main() {
    #[cfg(feature = "log")]
    if cfg!(debug_assertions) {
        simple_logger::init_with_level(log::Level::Trace).unwrap();
    } else {
        simple_logger::init_with_level(log::Level::Info).unwrap();
    }

    let slot = Arc::new(ResponseSlot::new());
    let transport = StdTransport::new(SntpIngress::new(Arc::clone(&slot)));
    let config = SntpConfig::new(POOL_NTP_ADDR).with_timeout(Duration::from_secs(2));
    let client = SntpClient::new(transport, slot, config);

    for _ in 0..ATTEMPTS {
        let result = client.get_datetime();

        match result {
            Ok(time) => {
                assert_ne!(time.sec(), 0);
                println!(
                    "Got time from [{POOL_NTP_ADDR}] over socket {}: {}",
                    time.socket(),
                    time.sec()
                );

                break;
            }
            Err(err) => println!("Err: {err} (status {})", Status::from(err).code()),
        }

        thread::sleep(Duration::new(2, 0));
    }

    println!("Last known time: {}", client.last_known_time());
}
