#![no_main]

use libfuzzer_sys::fuzz_target;
use digestrs::{AlgorithmSet, DigestSet};

fuzz_target!(|input: (Vec<u8>, Vec<u16>)| {
    let (data, cuts) = input;
    let whole = DigestSet::digest(&data, AlgorithmSet::all()).unwrap();

    // Same bytes split at arbitrary points
    let mut cuts: Vec<usize> = cuts
        .into_iter()
        .map(|c| c as usize % (data.len() + 1))
        .collect();
    cuts.sort_unstable();

    let mut set = DigestSet::new(AlgorithmSet::all()).unwrap();
    let mut start = 0;
    for cut in cuts {
        set.update(&data[start..cut]);
        start = cut;
    }
    set.update(&data[start..]);
    let parts = set.finalize();

    assert_eq!(parts, whole);
    assert_eq!(parts.total_bytes(), data.len() as u64);

    // Hex is lowercase and fixed-length
    for (algorithm, entry) in parts.iter() {
        let hex = entry.hex().unwrap();
        assert_eq!(hex.len(), algorithm.hex_len());
        assert!(hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }
});
