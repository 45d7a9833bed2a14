#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: u16, height: u16) -> Vec<u8> {
    let mut h = vec![0u8; 128];
    h[0] = 0x0A; h[1] = 5; h[2] = 1; h[3] = 8;
    h[8..10].copy_from_slice(&(width - 1).to_le_bytes()); // xmax
    h[10..12].copy_from_slice(&(height - 1).to_le_bytes()); // ymax
    h
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_convert";
    fs::create_dir_all(dir).unwrap();

    // Solid 8x8, one run per row
    let mut solid = header(8, 8);
    for _ in 0..8 { solid.extend_from_slice(&[0xC8, 0x0F]); }
    fs::write(format!("{dir}/solid_8x8.pcx"), solid).unwrap();

    // 16x8 literal ramp
    let mut ramp = header(16, 8);
    for _ in 0..8 { ramp.extend(0u8..16); }
    fs::write(format!("{dir}/ramp_16x8.pcx"), ramp).unwrap();

    // Zero-length runs mixed in
    let mut zero = header(8, 8);
    for _ in 0..8 { zero.extend_from_slice(&[0xC0, 0x07, 0xC4, 0x01, 0xC4, 0x02]); }
    fs::write(format!("{dir}/zero_runs_8x8.pcx"), zero).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/header_only.bin"), header(8, 8)).unwrap();
    fs::write(format!("{dir}/unaligned.bin"), header(12, 8)).unwrap();
    let mut overrun = header(8, 8);
    overrun.extend_from_slice(&[0xC6, 0x01, 0xC6, 0x01]);
    fs::write(format!("{dir}/overrun.bin"), overrun).unwrap();

    println!("Generated seed corpus in {dir}/");
}
