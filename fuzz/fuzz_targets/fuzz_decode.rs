#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraster::{DecodeRequest, ImageInfo, Limits, Permissiveness};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };

    // Must never panic, whatever the permissiveness.
    let _ = ImageInfo::from_bytes(data);
    for permissiveness in [
        Permissiveness::Strict,
        Permissiveness::Standard,
        Permissiveness::Permissive,
    ] {
        let _ = DecodeRequest::new(data)
            .with_limits(&limits)
            .with_permissiveness(permissiveness)
            .decode(enough::Unstoppable);
    }

    let _ = zenraster::sunras::rle::decode(data, data.len() * 4);
});
