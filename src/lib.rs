//! sampleshift - Batch pitch-shifting for instrument sample libraries
//!
//! Reads every original sample in a directory and writes one pitch-shifted
//! copy per requested semitone offset, named `<stem>_<p|m><steps>.wav`.
//!
//! # Architecture
//!
//! - `config`: CLI argument parsing and runtime settings
//! - `discovery`: Source sample scanning
//! - `audio`: Decoding (symphonia), resampling (rubato), WAV writing (hound)
//! - `dsp`: STFT, phase vocoder and pitch shifting
//! - `pipeline`: Shift plan, per-file execution and orchestration
//!
//! # Example
//!
//! ```no_run
//! use sampleshift::{config::Settings, pipeline};
//!
//! let settings = Settings::default();
//! let report = pipeline::run(&settings).expect("Shifting failed");
//! println!("{}", report.summary_line());
//! ```

pub mod audio;
pub mod config;
pub mod discovery;
pub mod dsp;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-export key types at crate root
pub use error::{Result, ShiftError};
pub use types::{AudioBuffer, OutputEncoding, SemitoneOffset};
