use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mefsw::build_key;

static FRAME_BYTES: [u8; 118] = [
    0x00, 0x0b, 0x86, 0x64, 0x8b, 0xa0, 0x00, 0x50, 0x56, 0xae, 0x76, 0xf5, 0x88, 0xa8, 0xa0, 0x1e,
    0x81, 0x00, 0x20, 0x0a, 0x08, 0x00, 0x45, 0x00, 0x00, 0x5e, 0x5c, 0x65, 0x00, 0x00, 0x80, 0x11,
    0x00, 0x00, 0xc0, 0xa8, 0x1d, 0x3a, 0xc0, 0xa8, 0x1d, 0xa0, 0xeb, 0xd8, 0x00, 0xa1, 0x00, 0x4a,
    0xbc, 0x86, 0x30, 0x40, 0x02, 0x01, 0x03, 0x30, 0x0f, 0x02, 0x03, 0x00, 0x91, 0xc8, 0x02, 0x02,
    0x05, 0xdc, 0x04, 0x01, 0x04, 0x02, 0x01, 0x03, 0x04, 0x15, 0x30, 0x13, 0x04, 0x00, 0x02, 0x01,
    0x00, 0x02, 0x01, 0x00, 0x04, 0x05, 0x61, 0x64, 0x6d, 0x69, 0x6e, 0x04, 0x00, 0x04, 0x00, 0x30,
    0x13, 0x04, 0x00, 0x04, 0x00, 0xa0, 0x0d, 0x02, 0x03, 0x00, 0x91, 0xc8, 0x02, 0x01, 0x00, 0x02,
    0x01, 0x00, 0x30, 0x00, 0x00, 0x00,
];

fn classify(buf: &[u8], port: u32) {
    let key = build_key(buf, port).unwrap();
    assert!(key.outer_vlan_id == 30);
    assert!(key.inner_vlan_id == 10);
}

pub fn b1(c: &mut Criterion) {
    c.bench_function("classify_untagged", |b| {
        let mut buf = [0; 110];
        buf[..12].copy_from_slice(&FRAME_BYTES[..12]);
        buf[12..].copy_from_slice(&FRAME_BYTES[20..]);
        b.iter(|| {
            let key = build_key(black_box(&buf[..]), black_box(1)).unwrap();
            assert!(key.outer_vlan_id == 0);
        })
    });
}

pub fn b2(c: &mut Criterion) {
    c.bench_function("classify_qinq", |b| {
        b.iter(|| {
            classify(black_box(&FRAME_BYTES[..]), black_box(1));
        })
    });
}

criterion_group!(benches, b1, b2);
criterion_main!(benches);
