//! trimwave — silence detection and removal for PCM audio.
//!
//! Decodes a WAV byte stream, finds silent regions by short-time energy
//! with cross-channel consensus, cuts them out, smooths the splice points
//! with linear crossfades, and re-encodes to 16-bit PCM.
//! The CLI binary consumes this crate.

pub mod buffer;
pub mod cli;
pub mod crossfade;
pub mod decode;
pub mod detector;
pub mod encode;
pub mod energy;
pub mod error;
pub mod excise;
pub mod normalize;
pub mod output;
pub mod report;
pub mod silencer;

pub use buffer::{AudioBuffer, merge_blocks};
pub use crossfade::apply_crossfade;
pub use decode::decode_wav;
pub use detector::{SilenceSegment, detect_channel_segments, merge_channel_segments};
pub use encode::encode_wav;
pub use energy::{FrameEnergy, frame_energies, frame_size};
pub use error::{SilencerError, SilencerResult};
pub use excise::excise_segments;
pub use normalize::normalize_samples;
pub use silencer::{DetectionParams, RemovalOutcome, Silencer};
