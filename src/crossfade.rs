use crate::buffer::AudioBuffer;
use crate::detector::SilenceSegment;
use crate::error::{SilencerError, SilencerResult};

/// Smooths the splice points left behind by excision.
///
/// `segments` carries the original pre-excision timestamps; after a silent
/// region is cut, its `start` is where the surrounding audio now meets. For
/// every splice point the gain ramps linearly from 1.0 at
/// `start - crossfade_duration` down to 0.0 at `start`, then back up to 1.0
/// by `min(start + crossfade_duration, buffer_duration)`.
///
/// The envelope is computed analytically and applied by per-sample
/// multiplication, with one gain curve shared by all channels so they stay
/// phase-synchronized. This approximates smoothing rather than guaranteeing
/// phase continuity; amplitude next to a silence boundary is already near
/// zero.
pub fn apply_crossfade(
    buffer: &AudioBuffer,
    segments: &[SilenceSegment],
    crossfade_duration: f64,
) -> SilencerResult<AudioBuffer> {
    if !crossfade_duration.is_finite() || crossfade_duration < 0.0 {
        return Err(SilencerError::Render(format!(
            "invalid crossfade duration: {crossfade_duration}"
        )));
    }
    if crossfade_duration == 0.0 || segments.is_empty() || buffer.is_empty() {
        return Ok(buffer.clone());
    }

    let rate = buffer.sample_rate() as f64;
    let duration = buffer.duration();
    let len = buffer.len();
    let mut gains = vec![1.0f32; len];

    for segment in segments {
        let start = segment.start;
        if !start.is_finite() {
            return Err(SilencerError::Render(format!(
                "non-finite splice point: {start}"
            )));
        }
        let fade_out_begin = start - crossfade_duration;
        let fade_in_end = (start + crossfade_duration).min(duration);

        let first = (fade_out_begin.max(0.0) * rate).floor() as usize;
        let split = ((start * rate).floor() as usize).min(len);
        let last = ((fade_in_end * rate).ceil() as usize).min(len);

        for (index, gain) in gains.iter_mut().enumerate().take(split).skip(first) {
            let t = index as f64 / rate;
            *gain *= ((start - t) / crossfade_duration).clamp(0.0, 1.0) as f32;
        }

        let fade_in_len = fade_in_end - start;
        if fade_in_len > 0.0 {
            for (index, gain) in gains.iter_mut().enumerate().take(last).skip(split) {
                let t = index as f64 / rate;
                *gain *= ((t - start) / fade_in_len).clamp(0.0, 1.0) as f32;
            }
        }
    }

    if gains.iter().any(|gain| !gain.is_finite()) {
        return Err(SilencerError::Render(
            "gain envelope produced a non-finite value".to_string(),
        ));
    }

    let channels = buffer
        .channels()
        .iter()
        .map(|channel| {
            channel
                .iter()
                .zip(gains.iter())
                .map(|(sample, gain)| sample * gain)
                .collect()
        })
        .collect();
    AudioBuffer::new(buffer.sample_rate(), channels)
}
