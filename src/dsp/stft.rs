//! STFT (Short-Time Fourier Transform) for the phase vocoder
//!
//! # Parameter Choices
//!
//! - **N_FFT = 2048**: ~46ms windows at 44.1kHz with 1025 frequency bins.
//!   Long enough to resolve the low partials of bass piano notes.
//!
//! - **HOP_LENGTH = 512**: 75% overlap. With a Hann window this satisfies
//!   COLA, so an unmodified spectrogram reconstructs the input.
//!
//! Frames are centered: the signal is zero-padded by `N_FFT / 2` on both
//! sides so frame `t` is centered on sample `t * HOP_LENGTH`.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

/// FFT window size
pub const N_FFT: usize = 2048;

/// Hop length between frames
pub const HOP_LENGTH: usize = 512;

/// Number of frequency bins in positive-frequency half of spectrum
pub const NUM_FREQ_BINS: usize = N_FFT / 2 + 1; // 1025

/// Complex spectrogram of a mono signal: `frames[time][bin]`
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub frames: Vec<Vec<Complex<f32>>>,
}

impl Spectrogram {
    /// Number of time frames
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Compute the centered STFT of a mono signal
pub fn stft(samples: &[f32]) -> Spectrogram {
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(N_FFT);
    let window = hann_window(N_FFT);

    let pad = N_FFT / 2;
    let mut padded = vec![0.0f32; samples.len() + 2 * pad];
    padded[pad..pad + samples.len()].copy_from_slice(samples);

    let num_frames = 1 + (padded.len() - N_FFT) / HOP_LENGTH;
    let mut frames = Vec::with_capacity(num_frames);

    for frame_idx in 0..num_frames {
        let start = frame_idx * HOP_LENGTH;
        let mut buffer: Vec<Complex<f32>> = padded[start..start + N_FFT]
            .iter()
            .zip(window.iter())
            .map(|(&s, &w)| Complex::new(s * w, 0.0))
            .collect();

        fft.process(&mut buffer);

        // Keep only positive frequencies (DC through Nyquist)
        buffer.truncate(NUM_FREQ_BINS);
        frames.push(buffer);
    }

    Spectrogram { frames }
}

/// Inverse of [`stft`], producing exactly `output_length` samples
pub fn istft(spectrogram: &Spectrogram, output_length: usize) -> Vec<f32> {
    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(N_FFT);
    let window = hann_window(N_FFT);

    let pad = N_FFT / 2;
    let full_length = N_FFT + HOP_LENGTH * spectrogram.num_frames().saturating_sub(1);
    let mut output = vec![0.0f32; full_length];
    let mut window_sum = vec![0.0f32; full_length];
    let scale = 1.0 / N_FFT as f32;

    for (frame_idx, frame) in spectrogram.frames.iter().enumerate() {
        let start = frame_idx * HOP_LENGTH;

        // Rebuild the full conjugate-symmetric spectrum
        let mut buffer = vec![Complex::new(0.0f32, 0.0); N_FFT];
        buffer[..NUM_FREQ_BINS].copy_from_slice(&frame[..NUM_FREQ_BINS]);
        for i in 1..NUM_FREQ_BINS - 1 {
            buffer[N_FFT - i] = frame[i].conj();
        }

        ifft.process(&mut buffer);

        for (i, &w) in window.iter().enumerate() {
            output[start + i] += buffer[i].re * scale * w;
            window_sum[start + i] += w * w;
        }
    }

    for (sample, &ws) in output.iter_mut().zip(window_sum.iter()) {
        if ws > 1e-8 {
            *sample /= ws;
        }
    }

    let mut trimmed: Vec<f32> = output.into_iter().skip(pad).take(output_length).collect();
    trimmed.resize(output_length, 0.0);
    trimmed
}

/// Periodic Hann window of given size
fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / size as f32).cos()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let window = hann_window(4);
        assert_eq!(window.len(), 4);
        assert!(window[0] < 0.01);
        assert!(window[2] > 0.99);
    }

    #[test]
    fn test_frame_count() {
        let spec = stft(&vec![0.0; 22050]);
        assert_eq!(spec.num_frames(), 1 + 22050 / HOP_LENGTH);
        assert!(spec.frames.iter().all(|f| f.len() == NUM_FREQ_BINS));
    }

    #[test]
    fn test_short_signal_has_one_frame() {
        let spec = stft(&[0.25; 10]);
        assert_eq!(spec.num_frames(), 1);
    }

    #[test]
    fn test_round_trip_reconstructs_signal() {
        let samples: Vec<f32> = (0..8000)
            .map(|i| (2.0 * PI * 330.0 * i as f32 / 22050.0).sin() * 0.5)
            .collect();
        let restored = istft(&stft(&samples), samples.len());
        assert_eq!(restored.len(), samples.len());
        let max_err = samples
            .iter()
            .zip(restored.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_err < 1e-3, "max reconstruction error {max_err}");
    }
}
