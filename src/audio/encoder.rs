//! WAV encoding using hound

use super::traits::AudioSink;
use crate::error::{Result, ShiftError};
use crate::types::{AudioBuffer, OutputEncoding, OUTPUT_EXTENSION};
use std::path::Path;
use tracing::debug;

/// [`AudioSink`] writing mono WAV files
#[derive(Debug, Default, Clone, Copy)]
pub struct WavSink;

impl AudioSink for WavSink {
    fn write(&self, path: &Path, buffer: &AudioBuffer, encoding: OutputEncoding) -> Result<()> {
        write_wav(path, buffer, encoding)
    }

    fn extension(&self) -> &'static str {
        OUTPUT_EXTENSION
    }
}

/// Write mono audio to a WAV file, overwriting any existing file
pub fn write_wav(path: &Path, buffer: &AudioBuffer, encoding: OutputEncoding) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: encoding.bits_per_sample(),
        sample_format: match encoding {
            OutputEncoding::Pcm16 => hound::SampleFormat::Int,
            OutputEncoding::Float32 => hound::SampleFormat::Float,
        },
    };

    let wav_error = |stage: &str, e: hound::Error| match e {
        hound::Error::IoError(io) => ShiftError::output_error(path, io),
        other => ShiftError::OutputError {
            path: path.to_path_buf(),
            reason: format!("{}: {}", stage, other),
        },
    };

    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| wav_error("Failed to create WAV file", e))?;

    match encoding {
        OutputEncoding::Pcm16 => {
            for &sample in &buffer.samples {
                let value = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                writer
                    .write_sample(value)
                    .map_err(|e| wav_error("Failed to write sample", e))?;
            }
        }
        OutputEncoding::Float32 => {
            for &sample in &buffer.samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| wav_error("Failed to write sample", e))?;
            }
        }
    }

    writer
        .finalize()
        .map_err(|e| wav_error("Failed to finalize WAV", e))?;

    debug!("Wrote {} samples to {}", buffer.len(), path.display());
    Ok(())
}
