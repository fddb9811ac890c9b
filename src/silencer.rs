use serde::{Deserialize, Serialize};

use crate::buffer::AudioBuffer;
use crate::crossfade::apply_crossfade;
use crate::decode::decode_wav;
use crate::detector::{SilenceSegment, detect_channel_segments, merge_channel_segments};
use crate::encode::encode_wav;
use crate::energy::{frame_energies, frame_size};
use crate::error::{SilencerError, SilencerResult};
use crate::excise::excise_segments;
use crate::normalize::normalize_samples;

/// Caller-supplied knobs for one detect-and-remove run. Immutable per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionParams {
    /// Mean-squared frame energy below which a frame counts as silent,
    /// measured on peak-normalized samples (so typically within 0..1).
    pub threshold: f64,
    /// Shortest silent run worth cutting, in seconds.
    #[serde(rename = "minimumSilenceDuration")]
    pub minimum_silence_duration: f64,
    /// Analysis frame length in seconds.
    #[serde(rename = "frameTime")]
    pub frame_time: f64,
    /// Gain ramp length applied on both sides of every splice, in seconds.
    #[serde(rename = "crossfadeDuration")]
    pub crossfade_duration: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            threshold: 0.01,
            minimum_silence_duration: 0.2,
            frame_time: 0.02,
            crossfade_duration: 0.05,
        }
    }
}

impl DetectionParams {
    pub fn validate(&self) -> SilencerResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(SilencerError::InvalidParams(format!(
                "threshold must be finite and >= 0, got {}",
                self.threshold
            )));
        }
        if !self.minimum_silence_duration.is_finite() || self.minimum_silence_duration <= 0.0 {
            return Err(SilencerError::InvalidParams(format!(
                "minimum silence duration must be finite and > 0, got {}",
                self.minimum_silence_duration
            )));
        }
        if !self.frame_time.is_finite() || self.frame_time <= 0.0 {
            return Err(SilencerError::InvalidParams(format!(
                "frame time must be finite and > 0, got {}",
                self.frame_time
            )));
        }
        if !self.crossfade_duration.is_finite() || self.crossfade_duration < 0.0 {
            return Err(SilencerError::InvalidParams(format!(
                "crossfade duration must be finite and >= 0, got {}",
                self.crossfade_duration
            )));
        }
        Ok(())
    }
}

/// Everything one removal run produced: the reconstructed buffer plus the
/// segment lists behind it, for reporting.
#[derive(Debug, Clone)]
pub struct RemovalOutcome {
    pub buffer: AudioBuffer,
    pub channel_segments: Vec<Vec<SilenceSegment>>,
    pub canonical_segments: Vec<SilenceSegment>,
}

/// The detect-and-remove pipeline: detection per channel on normalized
/// samples, cross-channel consensus, excision on original-scale samples,
/// crossfade smoothing, mono 16-bit PCM export.
#[derive(Debug, Clone)]
pub struct Silencer {
    params: DetectionParams,
}

impl Silencer {
    pub fn new(params: DetectionParams) -> SilencerResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Detects silence independently on every channel.
    ///
    /// Each channel is peak-normalized before energy analysis so the
    /// threshold means the same thing on quiet and loud recordings.
    pub fn detect_channels(&self, buffer: &AudioBuffer) -> Vec<Vec<SilenceSegment>> {
        let size = frame_size(buffer.sample_rate(), self.params.frame_time);
        buffer
            .channels()
            .iter()
            .map(|channel| {
                let normalized = normalize_samples(channel);
                let energies = frame_energies(&normalized, size);
                detect_channel_segments(
                    &energies,
                    buffer.sample_rate(),
                    self.params.threshold,
                    self.params.minimum_silence_duration,
                )
            })
            .collect()
    }

    /// The canonical segment list every channel agrees on.
    pub fn detect(&self, buffer: &AudioBuffer) -> Vec<SilenceSegment> {
        merge_channel_segments(&self.detect_channels(buffer))
    }

    /// Detects and removes silence, returning the reconstructed buffer
    /// together with the segment lists that drove it.
    pub fn remove(&self, buffer: &AudioBuffer) -> SilencerResult<RemovalOutcome> {
        let channel_segments = self.detect_channels(buffer);
        let canonical_segments = merge_channel_segments(&channel_segments);
        let excised = excise_segments(buffer, &canonical_segments)?;
        let faded = apply_crossfade(&excised, &canonical_segments, self.params.crossfade_duration)?;
        Ok(RemovalOutcome {
            buffer: faded,
            channel_segments,
            canonical_segments,
        })
    }

    /// Single entry point: WAV bytes in, silence-trimmed mono WAV bytes out.
    ///
    /// Detection consumes every input channel; the export side always
    /// downmixes to one channel.
    pub fn run(&self, bytes: &[u8]) -> SilencerResult<Vec<u8>> {
        let buffer = decode_wav(bytes)?;
        let outcome = self.remove(&buffer)?;
        Ok(encode_wav(&outcome.buffer.to_mono()))
    }
}
