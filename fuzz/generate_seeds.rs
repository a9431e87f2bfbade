#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn ras(width: u32, height: u32, depth: u32, ras_type: u32, map_type: u32, map: &[u8], data: &[u8]) -> Vec<u8> {
    let words = [
        0x59A6_6A95,
        width,
        height,
        depth,
        data.len() as u32,
        ras_type,
        map_type,
        map.len() as u32,
    ];
    let mut out: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
    out.extend_from_slice(map);
    out.extend_from_slice(data);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Depth 1, no colormap, 10x2
    let bilevel = ras(10, 2, 1, 1, 0, &[], &[0xAA, 0xC0, 0x55, 0x40]);
    fs::write(format!("{dir}/bilevel_10x2.ras"), bilevel).unwrap();

    // Depth 8 gray with identity colormap, 3x2 (padded rows)
    let ramp: Vec<u8> = (0..3).flat_map(|_| 0..=255u8).collect();
    let gray = ras(3, 2, 8, 1, 1, &ramp, &[0x00, 0x40, 0x80, 0, 0xc0, 0xff, 0x64, 0]);
    fs::write(format!("{dir}/gray_3x2.ras"), gray).unwrap();

    // Depth 8 indexed, 4-entry colormap, RLE
    let map = [255, 0, 0, 9, 0, 255, 0, 9, 0, 0, 255, 9];
    let indexed = ras(4, 2, 8, 2, 1, &map, &[0x80, 0x03, 0x01, 0x02, 0x03, 0x80, 0x00, 0x00]);
    fs::write(format!("{dir}/indexed_rle_4x2.ras"), indexed).unwrap();

    // Depth 24 BGR 2x2
    let bgr = ras(2, 2, 24, 1, 0, &[], &[0, 0, 255, 0, 255, 0, 255, 0, 0, 128, 128, 128]);
    fs::write(format!("{dir}/bgr_2x2.ras"), bgr).unwrap();

    // Depth 24 RGB-order type, 1x1 (padded)
    let rgb = ras(1, 1, 24, 3, 0, &[], &[255, 0, 0, 0]);
    fs::write(format!("{dir}/rgb_type3_1x1.ras"), rgb).unwrap();

    // Depth 32 RLE 2x1
    let xrgb = ras(2, 1, 32, 2, 0, &[], &[0, 1, 2, 3, 0, 4, 5, 6]);
    fs::write(format!("{dir}/xrgb_rle_2x1.ras"), xrgb).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/magic_only.bin"), b"\x59\xa6\x6a\x95").unwrap();
    let short_pixels = ras(8, 8, 8, 1, 0, &[], &[1, 2, 3]);
    fs::write(format!("{dir}/short_pixels.ras"), short_pixels).unwrap();
    let dangling_escape = ras(4, 1, 8, 2, 0, &[], &[0x80]);
    fs::write(format!("{dir}/dangling_escape.ras"), dangling_escape).unwrap();
    let raw_map = ras(2, 1, 8, 1, 2, &[1, 2, 3, 4], &[5, 6]);
    fs::write(format!("{dir}/raw_colormap.ras"), raw_map).unwrap();

    println!("Generated seed corpus in {dir}/");
}
