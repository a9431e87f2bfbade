use enough::Unstoppable;
use zenraster::sunras::{HEADER_LEN, RAS_MAGIC, RasterHeader};
use zenraster::*;

#[test]
fn rgb8_roundtrip() {
    let w = 4;
    let h = 3;
    let mut pixels = vec![0u8; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * 3;
            if (x + y) % 2 == 0 {
                pixels[off] = 255;
                pixels[off + 1] = 0;
                pixels[off + 2] = 128;
            } else {
                pixels[off] = 0;
                pixels[off + 1] = 200;
                pixels[off + 2] = 50;
            }
        }
    }

    let encoded = EncodeRequest::standard()
        .encode(&pixels, w as u32, h as u32, PixelLayout::Rgb8, Unstoppable)
        .unwrap();

    let header = RasterHeader::read(&encoded);
    assert_eq!(header.magic, RAS_MAGIC);
    assert_eq!(header.depth, 24);
    assert_eq!(header.ras_type, 1);

    let decoded = DecodeRequest::new(&encoded).decode(Unstoppable).unwrap();
    assert_eq!(decoded.width, w as u32);
    assert_eq!(decoded.height, h as u32);
    assert_eq!(decoded.layout, PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &pixels[..]);
    assert!(!decoded.truncated);
    // BGR on disk, so the decoder has to swizzle
    assert!(!decoded.is_borrowed());
}

#[test]
fn gray8_roundtrip_is_zero_copy() {
    let w = 4;
    let h = 2;
    let pixels = vec![0, 64, 128, 192, 255, 100, 7, 9];

    let encoded = EncodeRequest::standard()
        .encode(&pixels, w, h, PixelLayout::Gray8, Unstoppable)
        .unwrap();

    let header = RasterHeader::read(&encoded);
    assert_eq!(header.depth, 8);
    assert_eq!(header.map_type, 1);
    assert_eq!(header.map_length, 768);

    let decoded = DecodeRequest::new(&encoded).decode(Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Gray8);
    assert!(decoded.palette().is_none());
    assert_eq!(decoded.pixels(), &pixels[..]);
    assert!(decoded.is_borrowed(), "even-width raw gray should be zero-copy");
}

#[test]
fn bgr8_decodes_as_rgb8() {
    let pixels = vec![
        3, 2, 1, 6, 5, 4, // row 0
        9, 8, 7, 12, 11, 10, // row 1
    ];
    let encoded = encode(&pixels, 2, 2, PixelLayout::Bgr8, Unstoppable).unwrap();
    // On disk the bytes are already BGR.
    assert_eq!(&encoded[HEADER_LEN..], &pixels[..]);

    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgb8);
    assert_eq!(
        decoded.pixels(),
        &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12][..]
    );
}

#[test]
fn bgrx8_roundtrip_32bit() {
    let pixels = vec![
        30, 20, 10, 0xFF, 60, 50, 40, 0xFF, // row 0
        90, 80, 70, 0xFF, 120, 110, 100, 0xFF, // row 1
    ];
    let encoded = EncodeRequest::standard()
        .with_32bit(true)
        .encode(&pixels, 2, 2, PixelLayout::Bgrx8, Unstoppable)
        .unwrap();

    assert_eq!(RasterHeader::read(&encoded).depth, 32);
    assert_eq!(&encoded[HEADER_LEN..HEADER_LEN + 4], &[0, 30, 20, 10]);

    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgb8);
    assert_eq!(
        decoded.pixels(),
        &[10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120][..]
    );
}

#[test]
fn rle_header_roundtrip() {
    let w = 17;
    let h = 5;
    let pixels: Vec<u8> = (0..w * h * 3).map(|i| (i / 7) as u8).collect();
    let encoded = encode_rle(&pixels, w as u32, h as u32, PixelLayout::Rgb8, Unstoppable).unwrap();

    let header = RasterHeader::read(&encoded);
    assert!(header.is_valid());
    assert_eq!(header.width, 17);
    assert_eq!(header.height, 5);
    assert_eq!(header.depth, 24);
    assert_eq!(header.ras_type, 2);
    assert_eq!(header.map_type, 0);
    assert_eq!(header.map_length, 0);
    assert_eq!(header.length as usize, encoded.len() - HEADER_LEN);

    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.width, 17);
    assert_eq!(decoded.height, 5);
    assert_eq!(decoded.pixels(), &pixels[..]);
    assert!(!decoded.truncated);
}

#[test]
fn raw_header_length_is_pixel_bytes() {
    // 5 gray pixels per row pad to 6 bytes.
    let pixels = vec![1u8; 5 * 3];
    let encoded = encode(&pixels, 5, 3, PixelLayout::Gray8, Unstoppable).unwrap();
    let header = RasterHeader::read(&encoded);
    assert_eq!(header.length, 18);
    assert_eq!(encoded.len(), HEADER_LEN + 768 + 18);
}

#[test]
fn indexed8_roundtrip_keeps_palette() {
    let palette = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [9, 9, 9]];
    let pixels = vec![0, 1, 2, 3, 3, 2, 1, 0];

    let encoded = EncodeRequest::rle()
        .with_palette(&palette)
        .encode(&pixels, 4, 2, PixelLayout::Indexed8, Unstoppable)
        .unwrap();

    let header = RasterHeader::read(&encoded);
    assert_eq!(header.depth, 8);
    assert_eq!(header.map_length, 12);

    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Indexed8);
    assert_eq!(decoded.palette(), Some(&palette[..]));
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn black_white_palette_saves_inverted_bilevel() {
    let palette = [[0, 0, 0], [255, 255, 255]];
    let pixels = vec![0, 1, 1, 0, 1, 0, 0, 0, 1, 1];

    let encoded = EncodeRequest::standard()
        .with_palette(&palette)
        .encode(&pixels, 10, 1, PixelLayout::Indexed8, Unstoppable)
        .unwrap();

    let header = RasterHeader::read(&encoded);
    assert_eq!(header.depth, 1);
    assert_eq!(header.map_type, 0);
    assert_eq!(header.map_length, 0);
    // Black pixels become set bits.
    assert_eq!(&encoded[HEADER_LEN..], &[0b1001_0111, 0b0011_1111]);

    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Indexed8);
    let expected: Vec<u8> = pixels.iter().flat_map(|&i| palette[i as usize]).collect();
    assert_eq!(decoded.to_rgb8(), expected);
}

#[test]
fn white_black_palette_saves_plain_bilevel() {
    let palette = [[255, 255, 255], [0, 0, 0]];
    let pixels = vec![1, 0, 1, 1, 0, 0, 0, 0];

    let encoded = EncodeRequest::standard()
        .with_palette(&palette)
        .encode(&pixels, 8, 1, PixelLayout::Indexed8, Unstoppable)
        .unwrap();

    let header = RasterHeader::read(&encoded);
    assert_eq!(header.depth, 1);
    assert_eq!(header.map_length, 0);
    // One data byte plus the alignment pad.
    assert_eq!(&encoded[HEADER_LEN..], &[0b1011_0000, 0]);

    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.palette(), Some(&palette[..]));
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn two_colour_palette_keeps_colormap() {
    let palette = [[255, 0, 0], [0, 0, 255]];
    let pixels = vec![0, 1, 1, 0];

    let encoded = EncodeRequest::standard()
        .with_palette(&palette)
        .encode(&pixels, 2, 2, PixelLayout::Indexed8, Unstoppable)
        .unwrap();

    let header = RasterHeader::read(&encoded);
    assert_eq!(header.depth, 1);
    assert_eq!(header.map_type, 1);
    assert_eq!(header.map_length, 6);

    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.palette(), Some(&palette[..]));
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn alpha_is_rejected() {
    let pixels = vec![0u8; 2 * 2 * 4];
    for layout in [PixelLayout::Rgba8, PixelLayout::Bgra8] {
        match encode(&pixels, 2, 2, layout, Unstoppable).unwrap_err() {
            RasterError::AlphaNotSupported(l) => assert_eq!(l, layout),
            other => panic!("expected AlphaNotSupported, got {other:?}"),
        }
    }
}

#[test]
fn indexed_without_palette_is_rejected() {
    let result = encode(&[0, 1], 2, 1, PixelLayout::Indexed8, Unstoppable);
    assert!(matches!(result, Err(RasterError::InvalidData(_))));
}

#[test]
fn palette_size_is_checked() {
    let oversized: Vec<[u8; 3]> = (0..257u32).map(|i| [i as u8, 0, 0]).collect();
    let result = EncodeRequest::standard()
        .with_palette(&oversized)
        .encode(&[0, 1], 2, 1, PixelLayout::Indexed8, Unstoppable);
    assert!(matches!(result, Err(RasterError::InvalidData(_))));

    let result = EncodeRequest::rle()
        .with_palette(&[])
        .encode(&[0, 0], 2, 1, PixelLayout::Indexed8, Unstoppable);
    assert!(matches!(result, Err(RasterError::InvalidData(_))));
}

#[test]
fn short_buffer_is_rejected() {
    let result = encode(&[0; 5], 2, 1, PixelLayout::Rgb8, Unstoppable);
    match result.unwrap_err() {
        RasterError::BufferTooSmall { needed, actual } => {
            assert_eq!(needed, 6);
            assert_eq!(actual, 5);
        }
        other => panic!("expected BufferTooSmall, got {other:?}"),
    }
}

#[test]
fn zero_dimensions_are_rejected_on_encode() {
    let result = encode(&[], 0, 4, PixelLayout::Gray8, Unstoppable);
    assert!(matches!(result, Err(RasterError::InvalidData(_))));
}

#[test]
fn image_info_probe() {
    let pixels = vec![255u8; 6]; // 1x2 RGB
    let encoded = encode_rle(&pixels, 1, 2, PixelLayout::Rgb8, Unstoppable).unwrap();

    let info = ImageInfo::from_bytes(&encoded).unwrap();
    assert_eq!(info.width, 1);
    assert_eq!(info.height, 2);
    assert_eq!(info.depth, Depth::Rgb);
    assert_eq!(info.compression, Compression::Rle);
    assert_eq!(info.native_layout, PixelLayout::Rgb8);
    assert_eq!(info.colors, 0);
}

#[test]
fn image_info_on_indexed() {
    let palette = [[1, 2, 3], [4, 5, 6], [7, 8, 9]];
    let encoded = EncodeRequest::standard()
        .with_palette(&palette)
        .encode(&[0, 1, 2, 0], 2, 2, PixelLayout::Indexed8, Unstoppable)
        .unwrap();

    let info = ImageInfo::from_bytes(&encoded).unwrap();
    assert_eq!(info.depth, Depth::Indexed);
    assert_eq!(info.compression, Compression::None);
    assert_eq!(info.native_layout, PixelLayout::Indexed8);
    assert_eq!(info.colors, 3);
}

#[test]
fn limits_reject_large() {
    let pixels = vec![255u8; 6];
    let encoded = encode(&pixels, 1, 2, PixelLayout::Rgb8, Unstoppable).unwrap();

    let limits = Limits {
        max_pixels: Some(1), // only 1 pixel allowed
        ..Default::default()
    };

    let result = DecodeRequest::new(&encoded)
        .with_limits(&limits)
        .decode(Unstoppable);
    match result.unwrap_err() {
        RasterError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn memory_limit_rejects_before_allocating() {
    let pixels = vec![9u8; 8 * 8 * 3];
    let encoded = encode(&pixels, 8, 8, PixelLayout::Rgb8, Unstoppable).unwrap();

    let limits = Limits {
        max_memory_bytes: Some(100),
        ..Default::default()
    };
    let result = decode_with_limits(&encoded, &limits, Unstoppable);
    assert!(matches!(result, Err(RasterError::LimitExceeded(_))));
}

#[test]
fn encode_limits_reject_large() {
    let pixels = vec![7u8; 16 * 16 * 3];

    let limits = Limits {
        max_width: Some(8),
        ..Default::default()
    };
    let result = EncodeRequest::standard()
        .with_limits(&limits)
        .encode(&pixels, 16, 16, PixelLayout::Rgb8, Unstoppable);
    assert!(matches!(result, Err(RasterError::LimitExceeded(_))));

    // Header plus 768 bytes of pixel data is over the cap.
    let limits = Limits {
        max_memory_bytes: Some(500),
        ..Default::default()
    };
    let result = EncodeRequest::rle()
        .with_limits(&limits)
        .encode(&pixels, 16, 16, PixelLayout::Rgb8, Unstoppable);
    assert!(matches!(result, Err(RasterError::LimitExceeded(_))));

    let limits = Limits {
        max_memory_bytes: Some(32 + 768),
        ..Default::default()
    };
    EncodeRequest::standard()
        .with_limits(&limits)
        .encode(&pixels, 16, 16, PixelLayout::Rgb8, Unstoppable)
        .unwrap();
}

#[test]
fn into_owned_works() {
    let pixels = vec![1u8, 2, 3, 4];
    let encoded = encode(&pixels, 2, 2, PixelLayout::Gray8, Unstoppable).unwrap();

    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert!(decoded.is_borrowed());

    let owned = decoded.into_owned();
    assert!(!owned.is_borrowed());
    assert_eq!(owned.pixels(), &[1, 2, 3, 4]);
}

#[test]
fn to_rgb8_expands_gray_and_palette() {
    let gray = encode(&[0, 200], 2, 1, PixelLayout::Gray8, Unstoppable).unwrap();
    let decoded = decode(&gray, Unstoppable).unwrap();
    assert_eq!(decoded.to_rgb8(), [0, 0, 0, 200, 200, 200]);

    let palette = [[10, 20, 30], [40, 50, 60], [70, 80, 90]];
    let indexed = EncodeRequest::standard()
        .with_palette(&palette)
        .encode(&[2, 0], 2, 1, PixelLayout::Indexed8, Unstoppable)
        .unwrap();
    let decoded = decode(&indexed, Unstoppable).unwrap();
    assert_eq!(decoded.to_rgb8(), [70, 80, 90, 10, 20, 30]);
}

#[cfg(feature = "rgb")]
#[test]
fn typed_pixel_view() {
    let pixels = vec![1u8, 2, 3, 4, 5, 6];
    let encoded = encode(&pixels, 2, 1, PixelLayout::Rgb8, Unstoppable).unwrap();
    let decoded = decode(&encoded, Unstoppable).unwrap();

    let typed: &[rgb::RGB8] = decoded.as_pixels().unwrap();
    assert_eq!(typed, &[rgb::RGB8::new(1, 2, 3), rgb::RGB8::new(4, 5, 6)]);

    let wrong = decoded.as_pixels::<rgb::alt::Gray<u8>>();
    assert!(matches!(wrong, Err(RasterError::LayoutMismatch { .. })));
}

#[cfg(feature = "std")]
#[test]
fn io_adapters_roundtrip() {
    let pixels = vec![5u8, 6, 7, 8, 9, 10];
    let mut file = Vec::new();
    write_sunras(&mut file, &pixels, 3, 2, PixelLayout::Gray8, Unstoppable).unwrap();

    let decoded = read_sunras(std::io::Cursor::new(file), Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Gray8);
    assert_eq!(decoded.pixels(), &pixels[..]);
}
