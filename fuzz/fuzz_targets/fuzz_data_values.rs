#![no_main]
use libfuzzer_sys::fuzz_target;
use mmdb::decoder::Decoder;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let decoder = Decoder::new(data);

    // Decode from a handful of offsets derived from the input itself,
    // rather than only offset 0, to reach deeper into pointer/size
    // decoding paths without needing a full database around it.
    let offset = data[0] as u32 % data.len() as u32;
    let _ = decoder.decode_one(offset);
    let _ = decoder.decode_tree(offset);
    let _ = decoder.get_path(offset, &["a"]);
    let _ = decoder.get_path(offset, &["-1"]);
    let _ = decoder.get_path(0, &[]);
});
