//! Sample-rate conversion using rubato
//!
//! Two entry points share one chunked driver:
//! - [`resample`] converts between integer rates with the FFT resampler.
//! - [`resample_by_ratio`] handles the irrational ratios produced by
//!   fractional semitone offsets with the sinc resampler.

use crate::error::{Result, ShiftError};
use rubato::{
    FftFixedInOut, Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
    WindowFunction,
};
use tracing::debug;

/// Input frames handed to the resampler per call
const CHUNK_SIZE: usize = 1024;

/// Zero chunks fed past the end of input before giving up on the tail
const MAX_FLUSH_CHUNKS: usize = 16;

/// Convert mono samples from one integer sample rate to another
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }
    if from_rate == 0 || to_rate == 0 {
        return Err(ShiftError::resample_error(format!(
            "invalid sample rate conversion {from_rate}Hz -> {to_rate}Hz"
        )));
    }

    let mut resampler =
        FftFixedInOut::<f32>::new(from_rate as usize, to_rate as usize, CHUNK_SIZE, 1)
            .map_err(ShiftError::resample_error)?;

    let ratio = to_rate as f64 / from_rate as f64;
    let output = drive(&mut resampler, samples, ratio)?;

    debug!(
        "Resampled {}Hz -> {}Hz: {} -> {} samples",
        from_rate,
        to_rate,
        samples.len(),
        output.len()
    );
    Ok(output)
}

/// Stretch mono samples by an arbitrary ratio (output length ≈ input × ratio)
pub fn resample_by_ratio(samples: &[f32], ratio: f64) -> Result<Vec<f32>> {
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(ShiftError::resample_error(format!("invalid resample ratio {ratio}")));
    }
    if samples.is_empty() || ratio == 1.0 {
        return Ok(samples.to_vec());
    }

    // Heavier kernel when the ratio is far from 1, as aliasing grows with it
    let (sinc_len, interpolation) = if !(0.5..2.0).contains(&ratio) {
        (512, SincInterpolationType::Cubic)
    } else {
        (256, SincInterpolationType::Linear)
    };

    let params = SincInterpolationParameters {
        sinc_len,
        f_cutoff: 0.95,
        interpolation,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 1.0, params, CHUNK_SIZE, 1)
        .map_err(ShiftError::resample_error)?;

    drive(&mut resampler, samples, ratio)
}

/// Feed fixed-size chunks through a resampler, zero-padding past the end,
/// then drop the resampler's delay so output sample 0 lines up with input
/// sample 0.
fn drive<R: Resampler<f32>>(resampler: &mut R, samples: &[f32], ratio: f64) -> Result<Vec<f32>> {
    let expected = (samples.len() as f64 * ratio).round() as usize;
    let delay = resampler.output_delay();
    let needed = expected + delay;

    let mut output = Vec::with_capacity(needed + CHUNK_SIZE);
    let mut pos = 0;

    while output.len() < needed {
        let frames = resampler.input_frames_next();
        let mut chunk = vec![0.0f32; frames];
        if pos < samples.len() {
            let end = (pos + frames).min(samples.len());
            chunk[..end - pos].copy_from_slice(&samples[pos..end]);
        }
        pos += frames;

        let input_channels = vec![chunk];
        let resampled = resampler
            .process(&input_channels, None)
            .map_err(ShiftError::resample_error)?;

        if let Some(channel) = resampled.first() {
            output.extend_from_slice(channel);
        }

        if output.len() < needed && pos > samples.len() + MAX_FLUSH_CHUNKS * CHUNK_SIZE {
            return Err(ShiftError::resample_error(format!(
                "resampler stalled after {} of {} output samples",
                output.len(),
                needed
            )));
        }
    }

    Ok(output.into_iter().skip(delay).take(expected).collect())
}
