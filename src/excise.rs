use log::warn;

use crate::buffer::AudioBuffer;
use crate::detector::SilenceSegment;
use crate::error::{SilencerError, SilencerResult};

/// Floor-derived sample bounds of a segment, kept signed so out-of-range
/// timestamps stay detectable.
fn sample_bounds(segment: &SilenceSegment, rate: f64) -> (i64, i64) {
    (
        (segment.start * rate).floor() as i64,
        (segment.end * rate).floor() as i64,
    )
}

/// Builds a new buffer containing only the non-silent ranges of `buffer`.
///
/// Segments must be ordered and non-overlapping (the canonical list is).
/// Segment boundaries are floating-point-derived, so a malformed segment is
/// skipped with a warning rather than failing the whole track, and a copy
/// that would overrun the destination is truncated and reported. Fails only
/// when nothing at all would remain.
pub fn excise_segments(
    buffer: &AudioBuffer,
    segments: &[SilenceSegment],
) -> SilencerResult<AudioBuffer> {
    let rate = buffer.sample_rate() as f64;
    let original_len = buffer.len();

    let removed: i64 = segments
        .iter()
        .map(|segment| {
            let (start, end) = sample_bounds(segment, rate);
            (end - start).max(0)
        })
        .sum();
    let new_len = original_len as i64 - removed;
    if new_len <= 0 {
        return Err(SilencerError::InvalidBufferLength(new_len));
    }
    let new_len = new_len as usize;

    let mut channels = Vec::with_capacity(buffer.channel_count());
    for channel in buffer.channels() {
        let mut out = vec![0.0f32; new_len];
        let mut write_index = 0usize;
        let mut last_end = 0usize;

        for segment in segments {
            let (start_sample, end_sample) = sample_bounds(segment, rate);
            if start_sample < 0 || end_sample > original_len as i64 || start_sample > end_sample {
                warn!(
                    "invalid segment bounds: start={start_sample} end={end_sample} \
                     original_len={original_len}, skipping segment"
                );
                continue;
            }
            let (start_sample, end_sample) = (start_sample as usize, end_sample as usize);
            if start_sample < last_end {
                warn!(
                    "segment starting at sample {start_sample} overlaps the previous one \
                     (ends at {last_end}), skipping segment"
                );
                continue;
            }

            let span = start_sample - last_end;
            let copy = span.min(new_len - write_index);
            if copy < span {
                warn!(
                    "copy would exceed output capacity: write_index={write_index} span={span} \
                     new_len={new_len}, truncating"
                );
            }
            out[write_index..write_index + copy]
                .copy_from_slice(&channel[last_end..last_end + copy]);
            write_index += copy;
            last_end = end_sample;
        }

        if last_end < original_len {
            let span = original_len - last_end;
            let copy = span.min(new_len - write_index);
            if copy < span {
                warn!(
                    "trailing copy would exceed output capacity: write_index={write_index} \
                     span={span} new_len={new_len}, truncating"
                );
            }
            out[write_index..write_index + copy]
                .copy_from_slice(&channel[last_end..last_end + copy]);
        }

        channels.push(out);
    }

    AudioBuffer::new(buffer.sample_rate(), channels)
}
