//! Duration-preserving pitch shift
//!
//! Time-stretch with the phase vocoder by `2^(-n/12)`, then resample by
//! the same factor so the result has the original length and a pitch
//! moved by `n` semitones.

use super::phase_vocoder::time_stretch;
use crate::audio::resample::resample_by_ratio;
use crate::audio::traits::PitchShifter;
use crate::error::{Result, ShiftError};
use crate::types::{AudioBuffer, SemitoneOffset};
use tracing::debug;

/// [`PitchShifter`] using a phase vocoder and a sinc resampler
#[derive(Debug, Default, Clone, Copy)]
pub struct PhaseVocoderShifter;

impl PitchShifter for PhaseVocoderShifter {
    fn shift(&self, buffer: &AudioBuffer, offset: SemitoneOffset) -> Result<AudioBuffer> {
        let samples = pitch_shift(&buffer.samples, buffer.sample_rate, offset)?;
        Ok(AudioBuffer::new(samples, buffer.sample_rate))
    }

    fn name(&self) -> &'static str {
        "phase-vocoder"
    }
}

/// Shift `samples` by `offset` semitones, keeping the sample count
pub fn pitch_shift(samples: &[f32], sample_rate: u32, offset: SemitoneOffset) -> Result<Vec<f32>> {
    if sample_rate == 0 {
        return Err(ShiftError::ConfigError(
            "cannot pitch-shift audio with a sample rate of 0 Hz".to_string(),
        ));
    }
    if samples.is_empty() || offset.is_zero() {
        return Ok(samples.to_vec());
    }

    let rate = 1.0 / offset.frequency_ratio();
    debug!(
        "Pitch shift {} @ {}Hz: stretch rate {:.5}",
        offset, sample_rate, rate
    );

    let stretched = time_stretch(samples, rate);
    let mut shifted = resample_by_ratio(&stretched, rate)?;

    shifted.resize(samples.len(), 0.0);
    Ok(shifted)
}
