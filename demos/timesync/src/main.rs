//! Demonstrates a system time update with the OS specific [`msntp::utils`]
//!
//! Run it from the demo directory:
//!
//! ```
//! cargo run
//! ```
//!
//! That will query `time.google.com`. Options available:
//! - `-s`/`--server` - specify server (default: `time.google.com`)
//! - `-p`/`--port` - specify port (default: `123`)
//! - `-t`/`--timeout` - response timeout in milliseconds (default: `5000`)
//!
//! Updating the system clock needs sufficient privileges:
//!
//! ```
//! sudo cargo run --features log -- -s pool.ntp.org -p 123
//! ```
use msntp::{ResponseSlot, SntpClient, SntpConfig, SntpIngress, utils};
use msntp_net_std::StdTransport;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

const GOOGLE_NTP_ADDR: &str = "time.google.com";

#[derive(Parser)]
#[command(name = "timesync")]
#[command(version)]
struct Cli {
    /// NTP server hostname
    #[arg(short, long, default_value = GOOGLE_NTP_ADDR)]
    server: String,

    /// NTP server port
    #[arg(short, long, default_value_t = msntp::DEFAULT_PORT)]
    port: u16,

    /// Response timeout in milliseconds
    #[arg(short, long, default_value_t = 5000)]
    timeout: u64,
}

fn main() {
    let cli = Cli::parse();

    #[cfg(feature = "log")]
    if cfg!(debug_assertions) {
        simple_logger::init_with_level(log::Level::Trace).unwrap();
    } else {
        simple_logger::init_with_level(log::Level::Info).unwrap();
    }

    let config = SntpConfig::new(cli.server.as_str())
        .with_port(cli.port)
        .with_timeout(Duration::from_millis(cli.timeout));
    let ntp_addr = format!("{}:{}", config.server(), config.port());

    let slot = Arc::new(ResponseSlot::new());
    let transport = StdTransport::new(SntpIngress::new(Arc::clone(&slot)));
    let client = SntpClient::new(transport, slot, config);

    let result = client
        .get_datetime()
        .unwrap_or_else(|e| panic!("Unable to receive time from {ntp_addr}: {e}"));

    match utils::epoch_to_datetime(result.sec()) {
        Some(datetime) => println!("Received time: {datetime}"),
        None => println!("Received time: {} (out of range)", result.sec()),
    }

    utils::update_system_time(result.sec()).unwrap_or_else(|e| panic!("Unable to update system time: {e}"));
}
