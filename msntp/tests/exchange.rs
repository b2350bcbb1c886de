mod common;

use common::{sntp_response, Delivery, ManualTransport, NTP_SECONDS_1_700_000_000};
use msntp::{Error, ResponseSlot, SntpClient, SntpConfig, SntpTime, SocketId, Status, SNTP_REQUEST};

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn config(timeout: Duration, poll_interval: Duration) -> SntpConfig {
    SntpConfig::new("time.example.com")
        .with_timeout(timeout)
        .with_poll_interval(poll_interval)
}

fn client(transport: ManualTransport, timeout: Duration) -> SntpClient<ManualTransport> {
    SntpClient::new(
        transport,
        Arc::new(ResponseSlot::new()),
        config(timeout, Duration::from_millis(250)),
    )
}

#[test]
fn test_end_to_end_exchange() {
    let client = client(ManualTransport::with_handles(&[3]), Duration::from_secs(5));
    let response = sntp_response(NTP_SECONDS_1_700_000_000).to_vec();
    let delivery = Delivery::after(Duration::from_millis(100), client.ingress(), vec![(3, response)]);

    let result = client.get_datetime();
    delivery.join().unwrap();

    assert_eq!(result, Ok(SntpTime::new(SocketId::new(3), 1_700_000_000)));
    assert_eq!(Status::from(&result), Status::Success);
    assert_eq!(client.last_known_time(), 1_700_000_000);
    assert_eq!(
        client.transport().writes(),
        vec![(SocketId::new(3), SNTP_REQUEST.0.to_vec())]
    );
    assert_eq!(client.transport().closes(), vec![SocketId::new(3)]);
}

#[test]
fn test_response_wakes_waiter_before_poll_interval() {
    let transport = ManualTransport::with_handles(&[1]);
    let client = SntpClient::new(
        transport,
        Arc::new(ResponseSlot::new()),
        config(Duration::from_secs(10), Duration::from_secs(5)),
    );
    let response = sntp_response(NTP_SECONDS_1_700_000_000).to_vec();
    let delivery = Delivery::after(Duration::from_millis(50), client.ingress(), vec![(1, response)]);
    let started = Instant::now();

    assert!(client.get_datetime().is_ok());
    assert!(started.elapsed() < Duration::from_secs(5));
    delivery.join().unwrap();
}

#[test]
fn test_timeout_is_bounded() {
    let timeout = Duration::from_millis(300);
    let poll_interval = Duration::from_millis(100);
    let client = SntpClient::new(
        ManualTransport::with_handles(&[5]),
        Arc::new(ResponseSlot::new()),
        config(timeout, poll_interval),
    );
    let started = Instant::now();

    let result = client.get_datetime();
    let elapsed = started.elapsed();

    assert_eq!(result, Err(Error::Timeout));
    assert_eq!(Status::from(&result).code(), -1);
    assert!(elapsed >= timeout, "gave up after {elapsed:?}");
    assert!(elapsed < timeout + poll_interval + Duration::from_millis(500), "waited {elapsed:?}");
    assert_eq!(client.transport().closes(), vec![SocketId::new(5)]);
}

#[test]
fn test_protocol_noise_does_not_disturb_exchange() {
    let client = client(ManualTransport::with_handles(&[3]), Duration::from_secs(5));
    let chunks = vec![
        (3, vec![0x24; 12]),
        (3, vec![0x24; 47]),
        (3, vec![0x24; 49]),
        (3, sntp_response(NTP_SECONDS_1_700_000_000).to_vec()),
        (3, vec![0x00; 512]),
    ];
    let delivery = Delivery::after(Duration::from_millis(50), client.ingress(), chunks);

    let result = client.get_datetime();
    delivery.join().unwrap();

    assert_eq!(result, Ok(SntpTime::new(SocketId::new(3), 1_700_000_000)));
}

#[test]
fn test_noise_alone_times_out() {
    let client = client(ManualTransport::with_handles(&[3]), Duration::from_millis(500));
    let chunks = vec![(3, vec![0x24; 24]), (3, vec![0x24; 96])];
    let delivery = Delivery::after(Duration::from_millis(20), client.ingress(), chunks);

    assert_eq!(client.get_datetime(), Err(Error::Timeout));
    delivery.join().unwrap();
}

#[test]
fn test_foreign_socket_response_is_internal_error() {
    let client = client(ManualTransport::with_handles(&[3]), Duration::from_secs(5));
    let response = sntp_response(NTP_SECONDS_1_700_000_000).to_vec();
    let delivery = Delivery::after(Duration::from_millis(50), client.ingress(), vec![(4, response)]);

    let result = client.get_datetime();
    delivery.join().unwrap();

    assert_eq!(result, Err(Error::Internal));
    assert_eq!(client.last_known_time(), 0);
    assert_eq!(client.transport().closes(), vec![SocketId::new(3)]);
}

#[test]
fn test_zero_transmit_timestamp_is_parser_error() {
    let client = client(ManualTransport::with_handles(&[0]), Duration::from_secs(5));
    let delivery = Delivery::after(Duration::from_millis(10), client.ingress(), vec![(0, sntp_response(0).to_vec())]);

    let result = client.get_datetime();
    delivery.join().unwrap();

    assert_eq!(result, Err(Error::Parser));
    assert_eq!(client.transport().closes(), vec![SocketId::new(0)]);
}

#[test]
fn test_unavailable_socket_is_socket_error() {
    let client = client(ManualTransport::with_handles(&[]), Duration::from_secs(5));

    assert_eq!(client.get_datetime(), Err(Error::Socket));
    assert!(client.transport().writes().is_empty());
    assert!(client.transport().closes().is_empty());
}

#[test]
fn test_response_pending_before_exchange_is_discarded() {
    let client = client(ManualTransport::with_handles(&[3, 3]), Duration::from_millis(300));
    let ingress = client.ingress();
    let response = sntp_response(NTP_SECONDS_1_700_000_000);

    // late duplicate of an earlier answer, captured while no exchange is running
    ingress.on_socket_data(SocketId::new(3), &response, 48, 48);
    assert_eq!(client.get_datetime(), Err(Error::Timeout));

    let delivery = Delivery::after(Duration::from_millis(20), ingress, vec![(3, response.to_vec())]);
    assert_eq!(client.get_datetime(), Ok(SntpTime::new(SocketId::new(3), 1_700_000_000)));
    delivery.join().unwrap();

    assert_eq!(client.transport().closes().len(), 2);
}

/// Two exchanges sharing one response slot are not supported. The single response
/// below is claimed by whichever exchange wakes first: the exchange it was meant for
/// succeeds and the other times out, or the other one claims it and reports a
/// socket mismatch while the intended receiver times out.
#[test]
fn test_concurrent_exchanges_cross_talk() {
    let slot = Arc::new(ResponseSlot::new());
    let transport = Arc::new(ManualTransport::with_handles(&[3, 4]));
    let timeout = Duration::from_millis(500);
    let first = SntpClient::new(Arc::clone(&transport), Arc::clone(&slot), config(timeout, Duration::from_millis(50)));
    let second = SntpClient::new(Arc::clone(&transport), Arc::clone(&slot), config(timeout, Duration::from_millis(50)));
    let ingress = first.ingress();

    let first = thread::spawn(move || first.get_datetime());
    transport.wait_for_writes(1);
    let second = thread::spawn(move || second.get_datetime());
    transport.wait_for_writes(2);

    ingress.on_socket_data(SocketId::new(4), &sntp_response(NTP_SECONDS_1_700_000_000), 48, 48);

    let first = first.join().unwrap();
    let second = second.join().unwrap();

    match (first, second) {
        (Err(Error::Timeout), Ok(time)) => assert_eq!(time, SntpTime::new(SocketId::new(4), 1_700_000_000)),
        (Err(Error::Internal), Err(Error::Timeout)) => {}
        outcome => panic!("unexpected outcome {outcome:?}"),
    }

    let mut closes = transport.closes();
    closes.sort();
    assert_eq!(closes, vec![SocketId::new(3), SocketId::new(4)]);
    assert!(slot.is_empty());
}
