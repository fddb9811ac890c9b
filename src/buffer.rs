use crate::error::{SilencerError, SilencerResult};

/// A decoded PCM buffer: one `Vec<f32>` per channel, all equal length,
/// samples nominally in [-1, 1].
///
/// Buffers are immutable once built. Every pipeline stage reads its input
/// and allocates a fresh buffer for its output, so buffers can be shared
/// across threads without coordination.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> SilencerResult<Self> {
        if sample_rate == 0 {
            return Err(SilencerError::InvalidBuffer(
                "sample rate must be positive".to_string(),
            ));
        }
        let Some(first) = channels.first() else {
            return Err(SilencerError::InvalidBuffer(
                "buffer needs at least one channel".to_string(),
            ));
        };
        let len = first.len();
        if channels.iter().any(|channel| channel.len() != len) {
            return Err(SilencerError::InvalidBuffer(
                "all channels must have the same length".to_string(),
            ));
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn duration(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Downmixes to a single channel by averaging all channels per sample.
    /// Mono buffers are returned as-is.
    pub fn to_mono(&self) -> AudioBuffer {
        if self.channel_count() == 1 {
            return self.clone();
        }
        let scale = 1.0 / self.channel_count() as f32;
        let mut mixed = vec![0.0f32; self.len()];
        for channel in &self.channels {
            for (out, sample) in mixed.iter_mut().zip(channel.iter()) {
                *out += sample * scale;
            }
        }
        AudioBuffer {
            sample_rate: self.sample_rate,
            channels: vec![mixed],
        }
    }
}

/// Concatenates several decoded blocks into one buffer, in order, ahead of
/// detection. Used for multi-file sessions.
///
/// All blocks must share sample rate and channel count; there is no
/// resampler in this crate.
pub fn merge_blocks(blocks: &[AudioBuffer]) -> SilencerResult<AudioBuffer> {
    let Some(first) = blocks.first() else {
        return Err(SilencerError::BlockMismatch(
            "no blocks to merge".to_string(),
        ));
    };
    for block in &blocks[1..] {
        if block.sample_rate() != first.sample_rate() {
            return Err(SilencerError::BlockMismatch(format!(
                "sample rate mismatch: {} vs {}",
                first.sample_rate(),
                block.sample_rate()
            )));
        }
        if block.channel_count() != first.channel_count() {
            return Err(SilencerError::BlockMismatch(format!(
                "channel count mismatch: {} vs {}",
                first.channel_count(),
                block.channel_count()
            )));
        }
    }

    let total: usize = blocks.iter().map(AudioBuffer::len).sum();
    let mut channels: Vec<Vec<f32>> = (0..first.channel_count())
        .map(|_| Vec::with_capacity(total))
        .collect();
    for block in blocks {
        for (out, channel) in channels.iter_mut().zip(block.channels()) {
            out.extend_from_slice(channel);
        }
    }
    AudioBuffer::new(first.sample_rate(), channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_sample_rate() {
        assert!(AudioBuffer::new(0, vec![vec![0.0; 4]]).is_err());
    }

    #[test]
    fn rejects_no_channels() {
        assert!(AudioBuffer::new(8000, vec![]).is_err());
    }

    #[test]
    fn rejects_unequal_channel_lengths() {
        assert!(AudioBuffer::new(8000, vec![vec![0.0; 4], vec![0.0; 5]]).is_err());
    }

    #[test]
    fn duration_from_rate_and_length() {
        let buffer = AudioBuffer::new(8000, vec![vec![0.0; 4000]]).unwrap();
        assert_eq!(buffer.duration(), 0.5);
    }

    #[test]
    fn mono_downmix_averages_channels() {
        let buffer =
            AudioBuffer::new(8000, vec![vec![1.0, 0.0, -1.0], vec![0.0, 0.0, -1.0]]).unwrap();
        let mono = buffer.to_mono();
        assert_eq!(mono.channel_count(), 1);
        assert_eq!(mono.channel(0), &[0.5, 0.0, -1.0]);
    }

    #[test]
    fn mono_downmix_is_identity_for_mono() {
        let buffer = AudioBuffer::new(8000, vec![vec![0.25, -0.5]]).unwrap();
        assert_eq!(buffer.to_mono(), buffer);
    }

    #[test]
    fn merge_concatenates_per_channel() {
        let a = AudioBuffer::new(8000, vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = AudioBuffer::new(8000, vec![vec![5.0], vec![6.0]]).unwrap();
        let merged = merge_blocks(&[a, b]).unwrap();
        assert_eq!(merged.channel(0), &[1.0, 2.0, 5.0]);
        assert_eq!(merged.channel(1), &[3.0, 4.0, 6.0]);
    }

    #[test]
    fn merge_rejects_rate_mismatch() {
        let a = AudioBuffer::new(8000, vec![vec![0.0]]).unwrap();
        let b = AudioBuffer::new(44100, vec![vec![0.0]]).unwrap();
        assert!(matches!(
            merge_blocks(&[a, b]),
            Err(SilencerError::BlockMismatch(_))
        ));
    }

    #[test]
    fn merge_rejects_channel_mismatch() {
        let a = AudioBuffer::new(8000, vec![vec![0.0]]).unwrap();
        let b = AudioBuffer::new(8000, vec![vec![0.0], vec![0.0]]).unwrap();
        assert!(matches!(
            merge_blocks(&[a, b]),
            Err(SilencerError::BlockMismatch(_))
        ));
    }

    #[test]
    fn merge_rejects_empty_list() {
        assert!(merge_blocks(&[]).is_err());
    }
}
