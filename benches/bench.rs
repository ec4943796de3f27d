use criterion::{black_box, criterion_group, criterion_main, Criterion};
use respb::{parse_one, serialize, Outcome, ReaderLimits};

fn short_string(s: &str) -> Vec<u8> {
    let mut v = (s.len() as u16).to_be_bytes().to_vec();
    v.extend_from_slice(s.as_bytes());
    v
}

fn long_string(s: &str) -> Vec<u8> {
    let mut v = (s.len() as u32).to_be_bytes().to_vec();
    v.extend_from_slice(s.as_bytes());
    v
}

pub fn reader(c: &mut Criterion) {
    c.bench_function("parse_one_get", |b| {
        let mut buf = vec![0x00, 0x00, 0x00, 0x2a];
        buf.extend_from_slice(&short_string("user:1000"));

        b.iter(|| {
            let outcome = parse_one(black_box(&buf), 0, &ReaderLimits::default());
            black_box(outcome)
        })
    });

    c.bench_function("parse_one_set", |b| {
        let mut buf = vec![0x00, 0x01, 0x00, 0x07];
        buf.extend_from_slice(&short_string("session:abc"));
        buf.extend_from_slice(&long_string("payload"));
        buf.extend_from_slice(&[0u8; 9]);

        b.iter(|| {
            let outcome = parse_one(black_box(&buf), 0, &ReaderLimits::default());
            black_box(outcome)
        })
    });

    c.bench_function("parse_one_mget_20_keys", |b| {
        let mut buf = vec![0x00, 0x0c, 0x00, 0x00];
        buf.extend_from_slice(&20u16.to_be_bytes());
        for i in 0..20 {
            buf.extend_from_slice(&short_string(&format!("key:{i}")));
        }

        b.iter(|| {
            let outcome = parse_one(black_box(&buf), 0, &ReaderLimits::default());
            black_box(outcome)
        })
    });
}

pub fn writer(c: &mut Criterion) {
    c.bench_function("serialise_set", |b| {
        let mut buf = vec![0x00, 0x01, 0x00, 0x07];
        buf.extend_from_slice(&short_string("session:abc"));
        buf.extend_from_slice(&long_string("payload"));
        buf.extend_from_slice(&[0u8; 9]);
        let pc = match parse_one(&buf, 0, &ReaderLimits::default()) {
            Outcome::Complete(pc, _) => pc,
            _ => unreachable!(),
        };

        let mut out = Vec::with_capacity(buf.len());
        b.iter(|| {
            out.clear();
            serialize(black_box(&pc), &mut out).expect("serialise");
            black_box(&out);
        })
    });
}

criterion_group!(benches, reader, writer);
criterion_main!(benches);
