/// One analysis frame: where it starts, how many samples it actually holds,
/// and its mean-squared energy.
///
/// `len` matters for the detector's minimum-duration accounting: the final
/// frame of a channel may be shorter than the nominal frame size and must
/// contribute only its real sample count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEnergy {
    pub start: usize,
    pub len: usize,
    pub energy: f64,
}

/// Nominal frame length in samples for a given frame time.
pub fn frame_size(sample_rate: u32, frame_time: f64) -> usize {
    ((sample_rate as f64 * frame_time).floor() as usize).max(1)
}

/// Partitions a channel into contiguous non-overlapping frames from index 0
/// and computes short-time energy per frame, `(Σ sample²) / frame_len`.
///
/// Energy is accumulated in f64 so long frames of small samples do not lose
/// precision against the threshold comparison.
pub fn frame_energies(samples: &[f32], frame_size: usize) -> Vec<FrameEnergy> {
    let frame_size = frame_size.max(1);
    samples
        .chunks(frame_size)
        .enumerate()
        .map(|(index, frame)| {
            let sum: f64 = frame
                .iter()
                .map(|sample| *sample as f64 * *sample as f64)
                .sum();
            FrameEnergy {
                start: index * frame_size,
                len: frame.len(),
                energy: sum / frame.len() as f64,
            }
        })
        .collect()
}
