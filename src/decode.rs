use std::io::Cursor;

use hound::SampleFormat;

use crate::buffer::AudioBuffer;
use crate::error::SilencerResult;

/// Decodes an in-memory WAV byte stream into a planar float buffer.
///
/// Integer PCM (16/24/32 bit) is scaled by the positive maximum of its bit
/// depth so that a buffer written by [`crate::encode::encode_wav`] decodes
/// back to the original floats to within one quantization step. 32-bit IEEE
/// float data passes through unchanged.
pub fn decode_wav(bytes: &[u8]) -> SilencerResult<AudioBuffer> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let channel_count = spec.channels as usize;
    if channel_count == 0 {
        return Err(hound::Error::Unsupported.into());
    }

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits @ (16 | 24 | 32)) => {
            let scale = ((1i64 << (bits - 1)) - 1) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<Result<_, _>>()?
        }
        _ => return Err(hound::Error::Unsupported.into()),
    };

    let frames = interleaved.len() / channel_count;
    let mut channels: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frames))
        .collect();
    for (index, sample) in interleaved.iter().enumerate() {
        channels[index % channel_count].push(*sample);
    }
    AudioBuffer::new(spec.sample_rate, channels)
}
