//! Audio backend trait abstractions
//!
//! The pipeline only talks to these traits, so decoding, pitch shifting
//! and encoding backends can be swapped without touching orchestration.

use crate::error::Result;
use crate::types::{AudioBuffer, OutputEncoding, SemitoneOffset};
use std::path::Path;

/// Loads a file into a mono waveform
pub trait AudioSource {
    /// Decode `path`, resampling to `target_rate` when given
    fn load(&self, path: &Path, target_rate: Option<u32>) -> Result<AudioBuffer>;

    /// Get the name of this source (for logging)
    fn name(&self) -> &'static str;
}

/// Duration-preserving pitch shift
pub trait PitchShifter {
    /// Shift `buffer` by `offset`, returning a buffer of the same length and rate
    fn shift(&self, buffer: &AudioBuffer, offset: SemitoneOffset) -> Result<AudioBuffer>;

    /// Get the name of this shifter (for logging)
    fn name(&self) -> &'static str;
}

/// Writes a waveform to disk
pub trait AudioSink {
    /// Write `buffer` to `path`, replacing any existing file
    fn write(&self, path: &Path, buffer: &AudioBuffer, encoding: OutputEncoding) -> Result<()>;

    /// File extension produced by this sink, without the dot
    fn extension(&self) -> &'static str;
}
