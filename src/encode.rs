use crate::buffer::AudioBuffer;

const HEADER_SIZE: usize = 44;
const BYTES_PER_SAMPLE: usize = 2;

/// Serializes a float buffer to a canonical 16-bit PCM WAV byte stream.
///
/// The 44-byte little-endian header (RIFF/WAVE, fmt chunk of 16 bytes,
/// format tag 1) is followed by interleaved samples, each clamped to
/// [-1, 1] and scaled by 32767. Output size is exactly
/// `44 + samples × channels × 2` bytes. Pure and deterministic.
pub fn encode_wav(buffer: &AudioBuffer) -> Vec<u8> {
    let channel_count = buffer.channel_count() as u16;
    let sample_rate = buffer.sample_rate();
    let total_samples = buffer.len() * buffer.channel_count();
    let data_size = (total_samples * BYTES_PER_SAMPLE) as u32;
    let wav_size = HEADER_SIZE as u32 + data_size;

    let mut out = Vec::with_capacity(wav_size as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(wav_size - 8).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&channel_count.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    let byte_rate = sample_rate * channel_count as u32 * BYTES_PER_SAMPLE as u32;
    out.extend_from_slice(&byte_rate.to_le_bytes());
    let block_align = channel_count * BYTES_PER_SAMPLE as u16;
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());

    for index in 0..buffer.len() {
        for channel in buffer.channels() {
            let sample = channel[index].clamp(-1.0, 1.0);
            let value = (sample * 32767.0).round() as i16;
            out.extend_from_slice(&value.to_le_bytes());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    fn i16_at(bytes: &[u8], offset: usize) -> i16 {
        i16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn header_fields_are_canonical() {
        let buffer = AudioBuffer::new(8000, vec![vec![0.0; 100]]).unwrap();
        let bytes = encode_wav(&buffer);

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), (44 + 200 - 8) as u32);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1);
        assert_eq!(u16_at(&bytes, 22), 1);
        assert_eq!(u32_at(&bytes, 24), 8000);
        assert_eq!(u32_at(&bytes, 28), 8000 * 2);
        assert_eq!(u16_at(&bytes, 32), 2);
        assert_eq!(u16_at(&bytes, 34), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), 200);
    }

    #[test]
    fn output_size_is_exact() {
        let buffer = AudioBuffer::new(44100, vec![vec![0.1; 777]]).unwrap();
        assert_eq!(encode_wav(&buffer).len(), 44 + 777 * 2);

        let stereo = AudioBuffer::new(44100, vec![vec![0.1; 10], vec![0.2; 10]]).unwrap();
        assert_eq!(encode_wav(&stereo).len(), 44 + 10 * 2 * 2);
    }

    #[test]
    fn samples_are_scaled_and_clamped() {
        let buffer = AudioBuffer::new(8000, vec![vec![0.0, 1.0, -1.0, 2.0, -2.0, 0.5]]).unwrap();
        let bytes = encode_wav(&buffer);
        assert_eq!(i16_at(&bytes, 44), 0);
        assert_eq!(i16_at(&bytes, 46), 32767);
        assert_eq!(i16_at(&bytes, 48), -32767);
        assert_eq!(i16_at(&bytes, 50), 32767);
        assert_eq!(i16_at(&bytes, 52), -32767);
        assert_eq!(i16_at(&bytes, 54), (0.5f32 * 32767.0).round() as i16);
    }

    #[test]
    fn stereo_samples_interleave() {
        let buffer = AudioBuffer::new(8000, vec![vec![1.0, 0.0], vec![-1.0, 0.5]]).unwrap();
        let bytes = encode_wav(&buffer);
        assert_eq!(u16_at(&bytes, 22), 2);
        assert_eq!(u32_at(&bytes, 28), 8000 * 2 * 2);
        assert_eq!(u16_at(&bytes, 32), 4);
        assert_eq!(i16_at(&bytes, 44), 32767);
        assert_eq!(i16_at(&bytes, 46), -32767);
        assert_eq!(i16_at(&bytes, 48), 0);
        assert_eq!(i16_at(&bytes, 50), 16384);
    }

    #[test]
    fn empty_buffer_is_header_only() {
        let buffer = AudioBuffer::new(8000, vec![vec![]]).unwrap();
        let bytes = encode_wav(&buffer);
        assert_eq!(bytes.len(), 44);
        assert_eq!(u32_at(&bytes, 40), 0);
    }
}
