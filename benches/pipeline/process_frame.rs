use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use mefsw::action::Action;
use mefsw::conf::FrameConf;
use mefsw::{process_frame, ClassificationKey, Disposition, FrameBuf, Rule, SharedRuleTable};

static FRAME_BYTES: [u8; 114] = [
    0x00, 0x0b, 0x86, 0x64, 0x8b, 0xa0, 0x00, 0x50, 0x56, 0xae, 0x76, 0xf5, 0x81, 0x00, 0x00, 0x64,
    0x08, 0x00, 0x45, 0x00, 0x00, 0x5e, 0x5c, 0x65, 0x00, 0x00, 0x80, 0x11, 0x00, 0x00, 0xc0, 0xa8,
    0x1d, 0x3a, 0xc0, 0xa8, 0x1d, 0xa0, 0xeb, 0xd8, 0x00, 0xa1, 0x00, 0x4a, 0xbc, 0x86, 0x30, 0x40,
    0x02, 0x01, 0x03, 0x30, 0x0f, 0x02, 0x03, 0x00, 0x91, 0xc8, 0x02, 0x02, 0x05, 0xdc, 0x04, 0x01,
    0x04, 0x02, 0x01, 0x03, 0x04, 0x15, 0x30, 0x13, 0x04, 0x00, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00,
    0x04, 0x05, 0x61, 0x64, 0x6d, 0x69, 0x6e, 0x04, 0x00, 0x04, 0x00, 0x30, 0x13, 0x04, 0x00, 0x04,
    0x00, 0xa0, 0x0d, 0x02, 0x03, 0x00, 0x91, 0xc8, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00, 0x30, 0x00,
    0x00, 0x00,
];

fn table_with(actions: &[Action]) -> SharedRuleTable {
    let table = SharedRuleTable::new();
    table
        .insert(
            ClassificationKey::new(5, 100, 0),
            Rule::from_actions(actions).unwrap(),
        )
        .unwrap();
    // some unrelated entries so the lookup is not alone in its shard
    for port in 100..1100 {
        table
            .insert(ClassificationKey::new(port, 100, 0), Rule::new())
            .unwrap();
    }
    table
}

fn fresh_frame() -> FrameBuf {
    let mut frame = FrameBuf::from_conf(&FrameConf::default()).unwrap();
    frame.extend_from_slice(&FRAME_BYTES[..]).unwrap();
    frame
}

pub fn b1(c: &mut Criterion) {
    let table = table_with(&[]);
    c.bench_function("process_rule_miss", |b| {
        let mut frame = fresh_frame();
        b.iter(|| {
            let res = process_frame(black_box(&mut frame), black_box(6), &table);
            assert!(res == Disposition::Pass);
        })
    });
}

pub fn b2(c: &mut Criterion) {
    let table = table_with(&[Action::push_svlan(200), Action::Forward { target_port: 7 }]);
    c.bench_function("process_push_forward", |b| {
        b.iter_batched_ref(
            fresh_frame,
            |frame| {
                let res = process_frame(black_box(frame), black_box(5), &table);
                assert!(res == Disposition::Redirect(7));
            },
            BatchSize::SmallInput,
        )
    });
}

pub fn b3(c: &mut Criterion) {
    let table = table_with(&[Action::Pop, Action::push_cvlan(300), Action::Forward { target_port: 7 }]);
    c.bench_function("process_pop_push_forward", |b| {
        b.iter_batched_ref(
            fresh_frame,
            |frame| {
                let res = process_frame(black_box(frame), black_box(5), &table);
                assert!(res == Disposition::Redirect(7));
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, b1, b2, b3);
criterion_main!(benches);
