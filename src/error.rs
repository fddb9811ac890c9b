use thiserror::Error;

pub type SilencerResult<T> = Result<T, SilencerError>;

/// Errors raised by the silence-removal pipeline.
///
/// Out-of-range segments found during excision are not represented here.
/// They are skipped with a logged warning so one bad boundary does not
/// discard an otherwise usable track.
#[derive(Debug, Error)]
pub enum SilencerError {
    #[error("could not decode input as PCM audio: {0}")]
    Decode(#[from] hound::Error),

    #[error("invalid buffer length after removing silence segments: {0} samples left")]
    InvalidBufferLength(i64),

    #[error("crossfade rendering failed: {0}")]
    Render(String),

    #[error("invalid detection parameters: {0}")]
    InvalidParams(String),

    #[error("invalid audio buffer: {0}")]
    InvalidBuffer(String),

    #[error("cannot merge blocks: {0}")]
    BlockMismatch(String),
}
