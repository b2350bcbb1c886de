use std::time::Duration;

/// Server used when none is configured
pub const DEFAULT_SERVER: &str = "pool.ntp.org";
/// Well-known SNTP port
pub const DEFAULT_PORT: u16 = 123;
/// Total time an exchange waits for a response
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Granularity of the response wait
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// SNTP exchange settings
///
/// ```
/// use std::time::Duration;
/// use msntp::SntpConfig;
///
/// let config = SntpConfig::new("time.google.com")
///     .with_timeout(Duration::from_secs(2))
///     .with_poll_interval(Duration::from_millis(100));
///
/// assert_eq!(config.port(), 123);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SntpConfig {
    server: String,
    port: u16,
    timeout: Duration,
    poll_interval: Duration,
}

impl SntpConfig {
    /// Creates settings for `server` with default port and timing
    #[must_use]
    pub fn new(server: impl Into<String>) -> Self {
        SntpConfig {
            server: server.into(),
            ..SntpConfig::default()
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the total response wait budget. A zero timeout still checks for a
    /// response once
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the response wait step. Clamped to at least one millisecond
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }

    #[must_use]
    pub fn server(&self) -> &str {
        &self.server
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl Default for SntpConfig {
    fn default() -> Self {
        SntpConfig {
            server: DEFAULT_SERVER.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
