//! Signal processing: STFT, phase vocoder and pitch shifting

pub mod phase_vocoder;
pub mod pitch_shift;
pub mod stft;

pub use pitch_shift::{pitch_shift, PhaseVocoderShifter};
