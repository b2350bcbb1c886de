//! Helper utils to turn SNTP results into calendar time and synchronize time of a system
//!
//! System time update is currently supported on Unix based systems
use chrono::{DateTime, TimeZone, Utc};
#[cfg(unix)]
use chrono::Local;
#[cfg(all(unix, feature = "log"))]
use chrono::Timelike;
#[cfg(all(unix, feature = "log"))]
use log::debug;

#[cfg(unix)]
use std::io;

#[cfg(unix)]
use unix::sync_time;

#[cfg(unix)]
mod unix;

/// Converts seconds since UNIX EPOCH, as returned by [`crate::SntpClient::get_datetime`],
/// into a UTC date and time. Returns `None` for values outside of `chrono` range
#[must_use]
pub fn epoch_to_datetime(sec: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(sec, 0).single()
}

/// Set up system time based on the given parameters
/// Args:
/// * `sec` - Seconds since UNIX epoch start
///
/// # Errors
///
/// Will return `Err` if `sec` is not a representable date or the platform
/// `date` command could not set the time
#[cfg(unix)]
pub fn update_system_time(sec: i64) -> io::Result<()> {
    let time = epoch_to_datetime(sec).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{sec} is out of supported date range"),
        )
    })?;
    let local_time = time.with_timezone(&Local);
    #[cfg(feature = "log")]
    debug!(
        "UTC time: {:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
    #[cfg(feature = "log")]
    debug!(
        "{} time: {:02}:{:02}:{:02}",
        local_time.offset(),
        local_time.hour(),
        local_time.minute(),
        local_time.second()
    );

    sync_time(local_time)
}
