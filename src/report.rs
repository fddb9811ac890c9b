use serde::Serialize;
use serde_json::to_string_pretty;

use crate::detector::SilenceSegment;
use crate::silencer::{DetectionParams, RemovalOutcome};

/// One detected segment as it appears in the JSON report.
#[derive(Debug, Serialize)]
pub struct SegmentReport {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    #[serde(rename = "startSample")]
    pub start_sample: usize,
    #[serde(rename = "endSample")]
    pub end_sample: usize,
    #[serde(rename = "durationSamples")]
    pub duration_samples: usize,
}

impl SegmentReport {
    fn new(segment: &SilenceSegment, sample_rate: u32) -> Self {
        let rate = sample_rate as f64;
        let start_sample = (segment.start * rate).floor() as usize;
        let end_sample = (segment.end * rate).floor() as usize;
        Self {
            start: segment.start,
            end: segment.end,
            duration: segment.duration(),
            start_sample,
            end_sample,
            duration_samples: end_sample.saturating_sub(start_sample),
        }
    }
}

/// Builds the run report: parameters used, per-channel detections, the
/// canonical list that drove excision, and the resulting durations.
pub fn build_report(
    outcome: &RemovalOutcome,
    params: &DetectionParams,
    sample_rate: u32,
    input_duration: f64,
) -> serde_json::Value {
    let channels: Vec<Vec<SegmentReport>> = outcome
        .channel_segments
        .iter()
        .map(|segments| {
            segments
                .iter()
                .map(|segment| SegmentReport::new(segment, sample_rate))
                .collect()
        })
        .collect();
    let canonical: Vec<SegmentReport> = outcome
        .canonical_segments
        .iter()
        .map(|segment| SegmentReport::new(segment, sample_rate))
        .collect();

    serde_json::json!({
        "params": params,
        "inputDurationSeconds": input_duration,
        "outputDurationSeconds": outcome.buffer.duration(),
        "channels": channels,
        "canonical": canonical,
    })
}

/// Writes the report as pretty JSON.
pub fn write_report(path: &str, report: &serde_json::Value) -> std::io::Result<()> {
    std::fs::write(path, to_string_pretty(report).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::AudioBuffer;

    #[test]
    fn report_shape_and_sample_indices() {
        let outcome = RemovalOutcome {
            buffer: AudioBuffer::new(8000, vec![vec![0.0; 8000]]).unwrap(),
            channel_segments: vec![vec![SilenceSegment { start: 1.0, end: 2.5 }]],
            canonical_segments: vec![SilenceSegment { start: 1.0, end: 2.5 }],
        };
        let report = build_report(&outcome, &DetectionParams::default(), 8000, 3.0);

        assert_eq!(report["inputDurationSeconds"], 3.0);
        assert_eq!(report["outputDurationSeconds"], 1.0);
        assert_eq!(report["channels"].as_array().unwrap().len(), 1);

        let segment = &report["canonical"][0];
        assert_eq!(segment["start"], 1.0);
        assert_eq!(segment["end"], 2.5);
        assert_eq!(segment["duration"], 1.5);
        assert_eq!(segment["startSample"], 8000);
        assert_eq!(segment["endSample"], 20000);
        assert_eq!(segment["durationSamples"], 12000);
    }

    #[test]
    fn params_are_embedded() {
        let outcome = RemovalOutcome {
            buffer: AudioBuffer::new(8000, vec![vec![0.0; 100]]).unwrap(),
            channel_segments: vec![vec![]],
            canonical_segments: vec![],
        };
        let report = build_report(&outcome, &DetectionParams::default(), 8000, 0.5);
        assert_eq!(report["params"]["threshold"], 0.01);
        assert_eq!(report["params"]["frameTime"], 0.02);
        assert!(report["canonical"].as_array().unwrap().is_empty());
    }
}
