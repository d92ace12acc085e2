#![no_main]
use libfuzzer_sys::fuzz_target;
use msgpack_read::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut decoder = Decoder::new(data);
    if decoder.decode_value().is_ok() {
        assert!(decoder.consumed() <= data.len());
    }
});
