#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraster::*;

fuzz_target!(|data: &[u8]| {
    // RLE stream: encode then decode must be lossless
    let packed = sunras::rle::encode(data);
    let (unpacked, short) = sunras::rle::decode(&packed, data.len());
    assert!(!short, "rle stream ended early");
    assert_eq!(unpacked, data, "rle roundtrip mismatch");

    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let Ok(decoded) = decode_with_limits(data, &limits, enough::Unstoppable) else {
        return;
    };

    let mut request = EncodeRequest::rle();
    if let Some(palette) = decoded.palette() {
        // Out-of-range indices have no colour to preserve.
        if decoded.pixels().iter().any(|&i| usize::from(i) >= palette.len()) {
            return;
        }
        request = request.with_palette(palette);
    }
    // Palettes over 256 entries decode fine but cannot be written back.
    let Ok(reencoded) = request.encode(
        decoded.pixels(),
        decoded.width,
        decoded.height,
        decoded.layout,
        enough::Unstoppable,
    ) else {
        return;
    };

    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.to_rgb8(), decoded2.to_rgb8(), "roundtrip pixel mismatch");
    assert_eq!(decoded.width, decoded2.width);
    assert_eq!(decoded.height, decoded2.height);
});
