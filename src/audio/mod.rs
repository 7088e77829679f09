//! Audio I/O: decoding, resampling and WAV encoding

pub mod decoder;
pub mod encoder;
pub mod resample;
pub mod traits;

pub use decoder::{decode, SymphoniaSource};
pub use encoder::{write_wav, WavSink};
pub use traits::{AudioSink, AudioSource, PitchShifter};
