//! Integer PCM decoding, channel remixing and quantisation.

use std::path::Path;

use crate::audio_file::{AudioFileError, PcmSubtype};

use super::error::ConverterError;
use super::types::PcmBuffer;

/// Magnitude of full scale for a signed integer of `bit_depth` bits.
fn full_scale(bit_depth: u16) -> f64 {
    f64::from(1u32 << (bit_depth - 1))
}

/// Decodes a WAV file into normalised planes at its native format.
pub fn decode(path: &Path) -> Result<PcmBuffer, ConverterError> {
    let mut reader =
        hound::WavReader::open(path).map_err(|e| AudioFileError::from_wav(path, e))?;
    let spec = reader.spec();
    let subtype = PcmSubtype::from_spec(&spec)?;
    let channels = usize::from(spec.channels);
    if channels == 0 {
        return Err(ConverterError::CorruptSource {
            path: path.to_path_buf(),
            reason: "header declares zero channels".to_string(),
        });
    }

    let scale = full_scale(subtype.bit_depth());
    let capacity = reader.duration() as usize;
    let mut planes = vec![Vec::with_capacity(capacity); channels];
    // The header parsed, so any read error from here on is a damaged data chunk.
    for (index, sample) in reader.samples::<i32>().enumerate() {
        let sample = sample.map_err(|e| ConverterError::CorruptSource {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        planes[index % channels].push(f64::from(sample) / scale);
    }

    // A trailing partial frame is dropped.
    let frames = planes.iter().map(Vec::len).min().unwrap_or(0);
    for plane in &mut planes {
        plane.truncate(frames);
    }

    Ok(PcmBuffer::new(spec.sample_rate, planes))
}

/// Maps `buffer` onto `target_channels` channels.
///
/// Mono output averages every source channel. Mono input is duplicated.
/// Between other layouts, surplus channels are folded onto `i % target` and
/// missing ones repeat the source channels cyclically.
pub fn remix(buffer: &PcmBuffer, target_channels: u16) -> PcmBuffer {
    let source = buffer.channel_count();
    let target = usize::from(target_channels);
    if source == target || source == 0 || target == 0 {
        return buffer.clone();
    }

    let frames = buffer.frames();
    let planes = if target < source {
        (0..target)
            .map(|out| {
                let inputs: Vec<&Vec<f64>> = buffer
                    .channels
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| index % target == out)
                    .map(|(_, plane)| plane)
                    .collect();
                let weight = inputs.len() as f64;
                (0..frames)
                    .map(|frame| inputs.iter().map(|plane| plane[frame]).sum::<f64>() / weight)
                    .collect()
            })
            .collect()
    } else {
        (0..target)
            .map(|out| buffer.channels[out % source].clone())
            .collect()
    };

    PcmBuffer::new(buffer.sample_rate, planes)
}

/// Converts a normalised sample to a signed integer of `bit_depth` bits,
/// clipping anything outside full scale.
pub fn quantize(sample: f64, bit_depth: u16) -> i32 {
    let scale = full_scale(bit_depth);
    (sample * scale).round().clamp(-scale, scale - 1.0) as i32
}

/// Writes `buffer` as integer PCM of `bit_depth` bits. Returns the number of
/// frames written.
pub fn encode(path: &Path, buffer: &PcmBuffer, bit_depth: u16) -> Result<u64, ConverterError> {
    PcmSubtype::from_bit_depth(bit_depth)?;
    let channels = u16::try_from(buffer.channel_count())
        .map_err(|_| ConverterError::invalid_target("too many channels"))?;
    if channels == 0 {
        return Err(ConverterError::invalid_target("zero channels"));
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate: buffer.sample_rate,
        bits_per_sample: bit_depth,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| encode_error(path, e))?;

    let frames = buffer.frames();
    for frame in 0..frames {
        for plane in &buffer.channels {
            writer
                .write_sample(quantize(plane[frame], bit_depth))
                .map_err(|e| encode_error(path, e))?;
        }
    }
    writer.finalize().map_err(|e| encode_error(path, e))?;

    Ok(frames as u64)
}

fn encode_error(path: &Path, error: hound::Error) -> ConverterError {
    match error {
        hound::Error::IoError(source) => ConverterError::unwritable(path, source),
        other => ConverterError::EncodeFailed {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_file::PcmFormat;
    use crate::testing::fixtures::write_test_wav;
    use tempfile::TempDir;

    #[test]
    fn test_quantize_full_scale() {
        assert_eq!(quantize(0.0, 16), 0);
        assert_eq!(quantize(0.5, 16), 16384);
        assert_eq!(quantize(-1.0, 16), -32768);
        // Positive full scale clips to the largest code.
        assert_eq!(quantize(1.0, 16), 32767);
        assert_eq!(quantize(1.0, 8), 127);
        assert_eq!(quantize(-2.0, 24), -8_388_608);
        assert_eq!(quantize(1.0, 32), i32::MAX);
    }

    #[test]
    fn test_remix_to_mono_averages() {
        let stereo = PcmBuffer::new(44100, vec![vec![0.5, 1.0], vec![-0.5, 0.0]]);
        let mono = remix(&stereo, 1);
        assert_eq!(mono.channels, vec![vec![0.0, 0.5]]);
        assert_eq!(mono.sample_rate, 44100);
    }

    #[test]
    fn test_remix_from_mono_duplicates() {
        let mono = PcmBuffer::new(48000, vec![vec![0.25, -0.25]]);
        let stereo = remix(&mono, 2);
        assert_eq!(stereo.channels, vec![vec![0.25, -0.25], vec![0.25, -0.25]]);
    }

    #[test]
    fn test_remix_folds_surplus_channels() {
        let quad = PcmBuffer::new(
            48000,
            vec![vec![1.0], vec![0.0], vec![0.0], vec![1.0]],
        );
        let stereo = remix(&quad, 2);
        assert_eq!(stereo.channels, vec![vec![0.5], vec![0.5]]);
    }

    #[test]
    fn test_remix_same_layout_is_identity() {
        let stereo = PcmBuffer::new(48000, vec![vec![0.1], vec![0.2]]);
        assert_eq!(remix(&stereo, 2), stereo);
    }

    #[test]
    fn test_decode_and_encode() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("tone.wav");
        let format = PcmFormat {
            channel_count: 2,
            sample_rate: 44100,
            bit_depth: 16,
        };
        write_test_wav(&source, format, 441).unwrap();

        let buffer = decode(&source).unwrap();
        assert_eq!(buffer.sample_rate, 44100);
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frames(), 441);
        assert!(buffer.channels[0].iter().all(|s| (-1.0..1.0).contains(s)));

        let output = dir.path().join("out.wav");
        let frames = encode(&output, &buffer, 24).unwrap();
        assert_eq!(frames, 441);

        let reader = hound::WavReader::open(&output).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 24);
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.duration(), 441);
    }

    #[test]
    fn test_decode_missing_file() {
        let err = decode(Path::new("/nonexistent/missing.wav")).unwrap_err();
        assert!(matches!(err, ConverterError::SourceNotFound { .. }));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("noise.wav");
        std::fs::write(&path, b"definitely not a wav file").unwrap();
        let err = decode(&path).unwrap_err();
        assert!(matches!(err, ConverterError::CorruptSource { .. }));
    }

    #[test]
    fn test_decode_truncated_data_chunk_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cut.wav");
        let format = PcmFormat {
            channel_count: 2,
            sample_rate: 44100,
            bit_depth: 16,
        };
        write_test_wav(&path, format, 4410).unwrap();

        let file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        let len = file.metadata().unwrap().len();
        file.set_len(len - 301).unwrap();
        drop(file);

        match decode(&path).unwrap_err() {
            ConverterError::CorruptSource { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_encode_rejects_odd_depth() {
        let dir = TempDir::new().unwrap();
        let buffer = PcmBuffer::new(44100, vec![vec![0.0]]);
        let err = encode(&dir.path().join("x.wav"), &buffer, 12).unwrap_err();
        assert!(matches!(err, ConverterError::UnsupportedSubtype { .. }));
    }
}
