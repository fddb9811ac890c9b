use serde::Serialize;

use crate::energy::FrameEnergy;

/// A detected silence time-range in seconds, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SilenceSegment {
    pub start: f64,
    pub end: f64,
}

impl SilenceSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectorState {
    Sonic,
    Silent,
}

/// Runs the Sonic/Silent state machine over one channel's frame energies.
///
/// A frame with energy strictly below `threshold` opens (or extends) a
/// silent run; a frame at or above it closes the run, which is emitted only
/// if its accumulated real sample count covers `minimum_silence_duration`.
/// The accumulator counts actual frame lengths, so a short final frame is
/// not inflated to the nominal frame size.
///
/// A run still open when the channel ends is always flushed as a segment
/// reaching the end of the buffer, even below the minimum duration. Trailing
/// dead air is cut unconditionally.
pub fn detect_channel_segments(
    energies: &[FrameEnergy],
    sample_rate: u32,
    threshold: f64,
    minimum_silence_duration: f64,
) -> Vec<SilenceSegment> {
    let rate = sample_rate as f64;
    let needed_samples = minimum_silence_duration * rate;

    let mut segments = Vec::new();
    let mut state = DetectorState::Sonic;
    let mut run_start = 0.0f64;
    let mut run_samples = 0usize;

    for frame in energies {
        if frame.energy < threshold {
            if state == DetectorState::Sonic {
                state = DetectorState::Silent;
                run_start = frame.start as f64 / rate;
                run_samples = 0;
            }
            run_samples += frame.len;
        } else if state == DetectorState::Silent {
            if run_samples as f64 >= needed_samples {
                segments.push(SilenceSegment {
                    start: run_start,
                    end: frame.start as f64 / rate,
                });
            }
            state = DetectorState::Sonic;
        }
    }

    if state == DetectorState::Silent {
        let channel_len = energies.last().map_or(0, |frame| frame.start + frame.len);
        segments.push(SilenceSegment {
            start: run_start,
            end: channel_len as f64 / rate,
        });
    }

    segments
}

/// Intersects per-channel segment lists into the canonical list driving
/// excision: a channel-0 segment survives only if every other channel
/// detected a segment with the exact same (start, end) pair.
///
/// Exact equality is intentional, not interval overlap. All channels share
/// sample rate and frame time, so their frame boundaries land on identical
/// timestamps. Channel-0 order is preserved; with a single channel the
/// merge is a no-op.
pub fn merge_channel_segments(channel_segments: &[Vec<SilenceSegment>]) -> Vec<SilenceSegment> {
    let Some(first) = channel_segments.first() else {
        return Vec::new();
    };
    first
        .iter()
        .filter(|segment| {
            channel_segments[1..].iter().all(|other| {
                other
                    .iter()
                    .any(|candidate| candidate.start == segment.start && candidate.end == segment.end)
            })
        })
        .copied()
        .collect()
}
