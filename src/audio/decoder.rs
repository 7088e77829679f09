//! Audio decoding using symphonia
//!
//! Decodes any supported container to mono f32 samples, optionally
//! resampled to a requested rate.

use super::resample::resample;
use super::traits::AudioSource;
use crate::error::{Result, ShiftError};
use crate::types::AudioBuffer;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, trace};

/// Maximum file size we'll attempt to decode (2GB)
const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// [`AudioSource`] backed by symphonia and rubato
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaSource;

impl AudioSource for SymphoniaSource {
    fn load(&self, path: &Path, target_rate: Option<u32>) -> Result<AudioBuffer> {
        decode(path, target_rate)
    }

    fn name(&self) -> &'static str {
        "symphonia"
    }
}

/// Decode an audio file to a mono AudioBuffer
///
/// With `target_rate` set and different from the file's native rate, the
/// waveform is resampled as part of loading.
pub fn decode(path: &Path, target_rate: Option<u32>) -> Result<AudioBuffer> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ShiftError::decode_error(path, format!("Failed to read file metadata: {}", e)))?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(ShiftError::decode_error(
            path,
            format!(
                "File too large ({:.1} GB). Maximum supported size is 2 GB.",
                metadata.len() as f64 / (1024.0 * 1024.0 * 1024.0)
            ),
        ));
    }

    let file = std::fs::File::open(path)
        .map_err(|e| ShiftError::decode_error(path, format!("Failed to open file: {}", e)))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Provide a hint based on file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| ShiftError::decode_error(path, format!("Failed to probe format: {}", e)))?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| ShiftError::decode_error(path, "No audio tracks found"))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let source_sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| ShiftError::decode_error(path, "Unknown sample rate"))?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    debug!(
        "Decoding: {} @ {}Hz, {} channels",
        path.display(),
        source_sample_rate,
        channels
    );

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| ShiftError::decode_error(path, format!("Failed to create decoder: {}", e)))?;

    let mut all_samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break; // End of stream
            }
            Err(e) => {
                return Err(ShiftError::decode_error(path, format!("Failed to read packet: {}", e)));
            }
        };

        // Skip packets from other tracks
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                // Skip corrupted frames
                trace!("Skipping corrupted frame: {}", e);
                continue;
            }
            Err(e) => {
                return Err(ShiftError::decode_error(path, format!("Decode error: {}", e)));
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        let frame_channels = spec.channels.count();

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        all_samples.extend(to_mono(sample_buf.samples(), frame_channels));
    }

    if all_samples.is_empty() {
        return Err(ShiftError::decode_error(path, "File contains no audio samples"));
    }

    let (final_samples, final_rate) = match target_rate {
        Some(rate) if rate != source_sample_rate => {
            (resample(&all_samples, source_sample_rate, rate)?, rate)
        }
        _ => (all_samples, source_sample_rate),
    };

    debug!(
        "Decoded {} samples ({:.2}s @ {}Hz)",
        final_samples.len(),
        final_samples.len() as f64 / final_rate as f64,
        final_rate
    );

    Ok(AudioBuffer::new(final_samples, final_rate))
}

/// Convert interleaved multi-channel audio to mono
fn to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
