use std::io;
use std::process::Command;

use chrono::{DateTime, Datelike, Local, Timelike};

/// Synchronize system time with the platform specific
/// command line tool
pub(super) fn sync_time(time: DateTime<Local>) -> io::Result<()> {
    let time_str = format!(
        "{}/{}/{} {:02}:{:02}:{:02}",
        time.month(),
        time.day(),
        time.year(),
        time.hour(),
        time.minute(),
        time.second()
    );
    let sync_cmd_status = Command::new("date")
        .args(["-s", time_str.as_str()])
        .status()?;

    if sync_cmd_status.success() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("date command exit status {sync_cmd_status}"),
        ))
    }
}
