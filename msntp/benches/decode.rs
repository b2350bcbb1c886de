use criterion::{criterion_group, criterion_main, Criterion};
use msntp::{decode_response, RawSntpPacket, SntpPacket};
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    let mut buf = [0u8; 48];
    buf[0] = 0x24;
    buf[40..44].copy_from_slice(&3_908_988_800u32.to_be_bytes());
    let packet = RawSntpPacket(buf);

    c.bench_function("decode_response", |b| {
        b.iter(|| decode_response(black_box(&packet)));
    });
    c.bench_function("sntp_packet_header", |b| {
        b.iter(|| SntpPacket::from(black_box(&packet)));
    });
}

criterion_group!(decode_benches, criterion_benchmark);
criterion_main!(decode_benches);
