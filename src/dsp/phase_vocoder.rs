//! Phase-vocoder time stretching

use super::stft::{self, Spectrogram, HOP_LENGTH, N_FFT};
use rustfft::num_complex::Complex;
use std::f32::consts::PI;

/// Resample a spectrogram in time by `rate` (> 1 is faster/shorter)
///
/// Magnitudes are linearly interpolated between neighbouring frames and
/// phases are advanced by each bin's measured instantaneous frequency, so
/// partials stay coherent across the new frame spacing.
pub fn phase_vocoder(spectrogram: &Spectrogram, rate: f64) -> Spectrogram {
    if spectrogram.is_empty() {
        return spectrogram.clone();
    }

    let num_frames = spectrogram.num_frames();
    let num_bins = spectrogram.frames[0].len();
    let silent = vec![Complex::new(0.0f32, 0.0); num_bins];
    let frame_at = |idx: usize| spectrogram.frames.get(idx).unwrap_or(&silent);

    // Expected phase advance per hop for each bin's center frequency
    let phi_advance: Vec<f32> = (0..num_bins)
        .map(|k| 2.0 * PI * HOP_LENGTH as f32 * k as f32 / N_FFT as f32)
        .collect();

    let mut phase_acc: Vec<f32> = spectrogram.frames[0].iter().map(|c| c.arg()).collect();
    let mut frames = Vec::with_capacity((num_frames as f64 / rate).ceil() as usize);

    for t in 0usize.. {
        let step = t as f64 * rate;
        if step >= num_frames as f64 {
            break;
        }

        let idx = step.floor() as usize;
        let alpha = (step - idx as f64) as f32;
        let (left, right) = (frame_at(idx), frame_at(idx + 1));

        let frame: Vec<Complex<f32>> = (0..num_bins)
            .map(|k| {
                let mag = (1.0 - alpha) * left[k].norm() + alpha * right[k].norm();
                Complex::from_polar(mag, phase_acc[k])
            })
            .collect();
        frames.push(frame);

        for k in 0..num_bins {
            let dphase = right[k].arg() - left[k].arg() - phi_advance[k];
            let dphase = dphase - 2.0 * PI * (dphase / (2.0 * PI)).round();
            phase_acc[k] += phi_advance[k] + dphase;
        }
    }

    Spectrogram { frames }
}

/// Change duration by `1 / rate` without changing pitch
pub fn time_stretch(samples: &[f32], rate: f64) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }
    let output_length = (samples.len() as f64 / rate).round() as usize;
    let stretched = phase_vocoder(&stft::stft(samples), rate);
    stft::istft(&stretched, output_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, len: usize, sample_rate: f32) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin() * 0.5)
            .collect()
    }

    #[test]
    fn test_frame_count_follows_rate() {
        let spec = stft::stft(&sine(440.0, 22050, 22050.0));
        let n = spec.num_frames();
        assert_eq!(phase_vocoder(&spec, 0.5).num_frames(), 2 * n);
        assert_eq!(phase_vocoder(&spec, 2.0).num_frames(), (n + 1) / 2);
        assert_eq!(phase_vocoder(&spec, 1.0).num_frames(), n);
    }

    #[test]
    fn test_time_stretch_length() {
        let samples = sine(440.0, 10000, 22050.0);
        assert_eq!(time_stretch(&samples, 0.5).len(), 20000);
        assert_eq!(time_stretch(&samples, 2.0).len(), 5000);
        assert!(time_stretch(&[], 2.0).is_empty());
    }

    #[test]
    fn test_unit_rate_preserves_signal() {
        let samples = sine(440.0, 8192, 22050.0);
        let stretched = time_stretch(&samples, 1.0);
        let max_err = samples
            .iter()
            .zip(stretched.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_err < 1e-2, "max error {max_err}");
    }
}
