use clap::Parser;

use crate::silencer::DetectionParams;

/// Detects and removes silence from PCM audio tracks.
#[derive(Debug, Parser)]
#[command(name = "trimwave", version, about)]
pub struct Cli {
    /// Input WAV file(s). Multiple files are merged into one session before
    /// detection.
    #[arg(required = true)]
    pub input: Vec<String>,

    /// Output WAV path.
    #[arg(short, long, default_value = "out.wav")]
    pub output: String,

    /// Frame energy below which a frame counts as silent (on
    /// peak-normalized samples).
    #[arg(short, long, default_value_t = 0.01)]
    pub threshold: f64,

    /// Minimum silence duration in seconds; shorter runs are kept.
    #[arg(short = 'm', long = "min-silence", default_value_t = 0.2)]
    pub minimum_silence_duration: f64,

    /// Analysis frame length in seconds.
    #[arg(short = 'f', long = "frame-time", default_value_t = 0.02)]
    pub frame_time: f64,

    /// Crossfade duration in seconds applied around every splice point.
    #[arg(short = 'c', long, default_value_t = 0.05)]
    pub crossfade: f64,

    /// Write a JSON report of the detected segments to this path.
    #[arg(long)]
    pub json: Option<String>,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    pub fn params(&self) -> DetectionParams {
        DetectionParams {
            threshold: self.threshold,
            minimum_silence_duration: self.minimum_silence_duration,
            frame_time: self.frame_time,
            crossfade_duration: self.crossfade,
        }
    }
}
