use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::types::{SntpResponse, SocketId};

/// Single-capacity holder for the most recent SNTP response.
///
/// Bridges the socket layer's delivery context, which installs responses through
/// [`crate::SntpIngress`], and the caller blocked in [`crate::SntpClient::get_datetime`],
/// which claims them. At most one response is retained: installing a new one drops
/// whatever was pending.
///
/// The slot is not keyed by request, so it supports one outstanding exchange at a
/// time. Two exchanges sharing a slot can observe each other's responses.
#[derive(Debug, Default)]
pub struct ResponseSlot {
    pending: Mutex<Option<SntpResponse>>,
    arrived: Condvar,
}

impl ResponseSlot {
    /// Creates an empty slot
    #[must_use]
    pub const fn new() -> Self {
        ResponseSlot {
            pending: Mutex::new(None),
            arrived: Condvar::new(),
        }
    }

    // A panicking holder cannot leave the slot half-written: every critical section
    // is a single `Option` replace or take.
    fn lock(&self) -> MutexGuard<'_, Option<SntpResponse>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `response`, returning the stale response it displaced, if any, and
    /// wakes a waiting exchange
    pub fn install(&self, response: SntpResponse) -> Option<SntpResponse> {
        let previous = self.lock().replace(response);

        self.arrived.notify_all();
        previous
    }

    /// Claims the pending response and leaves the slot empty
    pub fn take_and_clear(&self) -> Option<SntpResponse> {
        self.lock().take()
    }

    /// Socket of the pending response, without claiming it
    #[must_use]
    pub fn peek_socket_id(&self) -> Option<SocketId> {
        self.lock().as_ref().map(SntpResponse::socket)
    }

    /// Drops the pending response. No-op on an empty slot
    pub fn clear(&self) {
        self.lock().take();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    /// Blocks until a response is pending or `timeout` elapses.
    /// Returns `true` if a response is pending on return
    pub fn wait_for_arrival(&self, timeout: Duration) -> bool {
        let guard = self.lock();
        let (guard, _) = self
            .arrived
            .wait_timeout_while(guard, timeout, |pending| pending.is_none())
            .unwrap_or_else(PoisonError::into_inner);

        guard.is_some()
    }
}

#[cfg(test)]
mod response_slot_tests {
    use super::ResponseSlot;
    use crate::types::{RawSntpPacket, SntpResponse, SocketId};

    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    fn response(socket: u8, fill: u8) -> SntpResponse {
        SntpResponse::new(SocketId::new(socket), RawSntpPacket([fill; 48]))
    }

    #[test]
    fn test_starts_empty() {
        let slot = ResponseSlot::new();

        assert!(slot.is_empty());
        assert_eq!(slot.peek_socket_id(), None);
        assert_eq!(slot.take_and_clear(), None);
    }

    #[test]
    fn test_install_replaces_pending_response() {
        let slot = ResponseSlot::new();
        let a = response(3, 0xaa);
        let b = response(3, 0xbb);

        assert_eq!(slot.install(a), None);
        assert_eq!(slot.install(b), Some(a));
        assert_eq!(slot.take_and_clear(), Some(b));
        assert!(slot.is_empty());
        assert_eq!(slot.take_and_clear(), None);
    }

    #[test]
    fn test_peek_does_not_claim() {
        let slot = ResponseSlot::new();
        slot.install(response(7, 0));

        assert_eq!(slot.peek_socket_id(), Some(SocketId::new(7)));
        assert_eq!(slot.peek_socket_id(), Some(SocketId::new(7)));
        assert!(!slot.is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let slot = ResponseSlot::new();
        slot.install(response(1, 0));

        slot.clear();
        slot.clear();
        assert!(slot.is_empty());
    }

    #[test]
    fn test_wait_returns_immediately_when_pending() {
        let slot = ResponseSlot::new();
        slot.install(response(1, 0));
        let started = Instant::now();

        assert!(slot.wait_for_arrival(Duration::from_secs(5)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_wait_times_out_on_empty_slot() {
        let slot = ResponseSlot::new();
        let started = Instant::now();

        assert!(!slot.wait_for_arrival(Duration::from_millis(50)));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_wait_wakes_on_install_from_other_thread() {
        let slot = Arc::new(ResponseSlot::new());
        let writer = Arc::clone(&slot);
        let started = Instant::now();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            writer.install(response(2, 0x11));
        });

        assert!(slot.wait_for_arrival(Duration::from_secs(5)));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(slot.take_and_clear(), Some(response(2, 0x11)));
        handle.join().unwrap();
    }
}
