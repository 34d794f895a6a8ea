//! Benchmark input profiles for the audioring primitives.
//!
//! - [`boundary_inputs`]: every `2^k - 1`, `2^k`, `2^k + 1` in range
//! - [`mixed_inputs`]: deterministic pseudo-random values via seed
//! - [`audio_geometries`]: typical ring shapes for audio I/O

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use audioring_alloc::{ConfigError, RingGeometry};
use audioring_bits::MAX_POWER_OF_TWO;

/// Power-of-two boundary values in `1..=2^31`, ascending.
///
/// These are the inputs where `next_power_of_two` changes its answer.
pub fn boundary_inputs() -> Vec<u32> {
    let mut inputs = Vec::with_capacity(96);
    for bit in 0..32 {
        let p = 1u32 << bit;
        inputs.extend([p - 1, p, p.saturating_add(1)]);
    }
    inputs.retain(|&x| (1..=MAX_POWER_OF_TWO).contains(&x));
    inputs.sort_unstable();
    inputs.dedup();
    inputs
}

/// `n` deterministic values in `1..=2^31` derived from `seed`.
///
/// Uses a 64-bit LCG, which is enough to defeat branch prediction in the
/// benchmarks while keeping runs reproducible.
pub fn mixed_inputs(n: usize, seed: u64) -> Vec<u32> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            // Vary the magnitude as well as the low bits.
            let shift = (state >> 59) as u32;
            (((state >> 32) as u32) >> shift).clamp(1, MAX_POWER_OF_TWO)
        })
        .collect()
}

/// Ring shapes seen in audio playthrough: mono to 8 channels, 16-bit to
/// 32-bit float samples, 10 ms to 2 s of buffering at 48 kHz.
pub fn audio_geometries() -> Result<Vec<RingGeometry>, ConfigError> {
    let shapes = [
        (1, 2, 480),
        (2, 4, 4_800),
        (2, 4, 96_000),
        (8, 4, 48_000),
    ];
    shapes
        .into_iter()
        .map(|(channels, bytes, frames)| RingGeometry::new(channels, bytes, frames))
        .collect()
}
