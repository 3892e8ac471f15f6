#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use digestrs::ChunkReader;

fuzz_target!(|input: (Vec<u8>, u16, u16)| {
    let (data, chunk_size, declared_slack) = input;
    let chunk_size = chunk_size as usize + 1;

    // Declared size may exceed the data, which must surface as a read failure
    let declared = data.len() as u64 + (declared_slack % 4) as u64;
    let mut reader = ChunkReader::new(Cursor::new(data.clone()), declared, chunk_size).unwrap();

    let mut seen = Vec::new();
    loop {
        match reader.next_chunk() {
            Ok(Some(chunk)) => {
                let remaining_before = declared - seen.len() as u64;
                assert_eq!(chunk.len() as u64, remaining_before.min(chunk_size as u64));
                seen.extend_from_slice(chunk);
            }
            Ok(None) => {
                assert_eq!(declared, data.len() as u64);
                break;
            }
            Err(e) => {
                assert!(e.is_read_failure());
                assert!(declared > data.len() as u64);
                break;
            }
        }
    }

    assert_eq!(seen, data[..seen.len()]);
});
