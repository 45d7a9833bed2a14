#![no_main]
use libfuzzer_sys::fuzz_target;
use pcx2sms::{ConvertRequest, HeaderInfo, Limits, Permissiveness};

fuzz_target!(|data: &[u8]| {
    // Keep allocations small; a 65536-wide header is legal but slow to fuzz.
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };

    for permissiveness in [Permissiveness::Standard, Permissiveness::Strict] {
        // Must never panic
        let Ok(tiles) = ConvertRequest::new()
            .with_limits(&limits)
            .with_permissiveness(permissiveness)
            .convert_bytes(data, enough::Unstoppable)
        else {
            continue;
        };

        let info = HeaderInfo::from_bytes(data).expect("converted input must have a header");
        assert_eq!(tiles.len() as u64, info.output_len(), "output size mismatch");
    }
});
