#![no_main]
use libfuzzer_sys::fuzz_target;
use respb::{parse_one, serialize, Outcome, ReaderLimits};

fuzz_target!(|data: &[u8]| {
    match parse_one(data, 0, &ReaderLimits::default()) {
        Outcome::Complete(pc, consumed) => {
            let mut buf = Vec::new();
            serialize(&pc, &mut buf).expect("a parsed command must always serialise");
            assert_eq!(&buf[..], &data[..consumed], "round trip must be byte-exact");

            match parse_one(&buf, 0, &ReaderLimits::default()) {
                Outcome::Complete(pc2, consumed2) => {
                    assert_eq!(pc, pc2);
                    assert_eq!(consumed2, buf.len());
                }
                other => panic!("re-parsing a serialised command failed: {:?}", other),
            }
        }
        Outcome::Incomplete | Outcome::Error(_) => {}
    }
});
