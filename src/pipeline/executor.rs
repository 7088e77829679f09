//! Per-file shift execution

use crate::audio::traits::{AudioSink, AudioSource, PitchShifter};
use crate::discovery::SourceFile;
use crate::error::{Result, ShiftError};
use crate::types::{AudioBuffer, OutputEncoding, SemitoneOffset};
use std::path::PathBuf;
use tracing::debug;

/// Output file name for one source stem and offset: `C4_p12.wav`
pub fn output_file_name(stem: &str, offset: SemitoneOffset, extension: &str) -> String {
    format!("{}_{}.{}", stem, offset.suffix(), extension)
}

/// Renders (source file, offset) pairs into the output directory
pub struct ShiftExecutor<'a> {
    source: &'a dyn AudioSource,
    shifter: &'a dyn PitchShifter,
    sink: &'a dyn AudioSink,
    output_dir: PathBuf,
    target_rate: Option<u32>,
    encoding: OutputEncoding,
}

impl<'a> ShiftExecutor<'a> {
    pub fn new(
        source: &'a dyn AudioSource,
        shifter: &'a dyn PitchShifter,
        sink: &'a dyn AudioSink,
        output_dir: impl Into<PathBuf>,
        target_rate: Option<u32>,
        encoding: OutputEncoding,
    ) -> Self {
        Self {
            source,
            shifter,
            sink,
            output_dir: output_dir.into(),
            target_rate,
            encoding,
        }
    }

    /// Path the given pair will be written to
    pub fn output_path(&self, file: &SourceFile, offset: SemitoneOffset) -> PathBuf {
        self.output_dir
            .join(output_file_name(&file.stem, offset, self.sink.extension()))
    }

    /// Decode a source file at the configured rate
    pub fn load(&self, file: &SourceFile) -> Result<AudioBuffer> {
        debug!("Loading {} via {}", file.path.display(), self.source.name());
        self.source.load(&file.path, self.target_rate)
    }

    /// Shift an already-loaded source and write the result
    pub fn render(
        &self,
        file: &SourceFile,
        buffer: &AudioBuffer,
        offset: SemitoneOffset,
    ) -> Result<PathBuf> {
        let shifted = self
            .shifter
            .shift(buffer, offset)
            .map_err(|e| match e {
                ShiftError::ResampleError { reason } | ShiftError::ConfigError(reason) => {
                    ShiftError::ShiftFailed {
                        path: file.path.clone(),
                        reason,
                    }
                }
                other => other,
            })?;

        let out_path = self.output_path(file, offset);
        self.sink.write(&out_path, &shifted, self.encoding)?;

        debug!(
            "Shifted {} by {} with {}",
            file.path.display(),
            offset,
            self.shifter.name()
        );
        Ok(out_path)
    }

    /// Load, shift and write one (source file, offset) pair
    pub fn execute(&self, file: &SourceFile, offset: SemitoneOffset) -> Result<PathBuf> {
        let buffer = self.load(file)?;
        self.render(file, &buffer, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioFormat;
    use std::cell::RefCell;
    use std::path::Path;

    struct ConstantSource;

    impl AudioSource for ConstantSource {
        fn load(&self, _path: &Path, target_rate: Option<u32>) -> Result<AudioBuffer> {
            Ok(AudioBuffer::new(vec![0.5; 64], target_rate.unwrap_or(44100)))
        }

        fn name(&self) -> &'static str {
            "constant"
        }
    }

    struct Negate;

    impl PitchShifter for Negate {
        fn shift(&self, buffer: &AudioBuffer, _offset: SemitoneOffset) -> Result<AudioBuffer> {
            Ok(AudioBuffer::new(
                buffer.samples.iter().map(|s| -s).collect(),
                buffer.sample_rate,
            ))
        }

        fn name(&self) -> &'static str {
            "negate"
        }
    }

    struct FailingShifter;

    impl PitchShifter for FailingShifter {
        fn shift(&self, _buffer: &AudioBuffer, _offset: SemitoneOffset) -> Result<AudioBuffer> {
            Err(ShiftError::resample_error("ratio out of range"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        writes: RefCell<Vec<(PathBuf, u32, f32)>>,
    }

    impl AudioSink for RecordingSink {
        fn write(&self, path: &Path, buffer: &AudioBuffer, _encoding: OutputEncoding) -> Result<()> {
            self.writes
                .borrow_mut()
                .push((path.to_path_buf(), buffer.sample_rate, buffer.samples[0]));
            Ok(())
        }

        fn extension(&self) -> &'static str {
            "wav"
        }
    }

    fn source_file(stem: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from(format!("/in/{stem}.mp3")),
            stem: stem.to_string(),
            format: AudioFormat::Mp3,
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("C4", SemitoneOffset::new(12.0), "wav"), "C4_p12.wav");
        assert_eq!(output_file_name("C4", SemitoneOffset::new(-12.0), "wav"), "C4_m12.wav");
        assert_eq!(output_file_name("A#3", SemitoneOffset::new(0.5), "wav"), "A#3_p0.5.wav");
        assert_eq!(output_file_name("A#3", SemitoneOffset::new(-0.5), "wav"), "A#3_m0.5.wav");
    }

    #[test]
    fn test_execute_writes_shifted_buffer() {
        let sink = RecordingSink::default();
        let executor = ShiftExecutor::new(
            &ConstantSource,
            &Negate,
            &sink,
            "/out",
            Some(48000),
            OutputEncoding::Float32,
        );

        let path = executor
            .execute(&source_file("C4"), SemitoneOffset::new(-12.0))
            .unwrap();

        assert_eq!(path, PathBuf::from("/out/C4_m12.wav"));
        let writes = sink.writes.borrow();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0], (PathBuf::from("/out/C4_m12.wav"), 48000, -0.5));
    }

    #[test]
    fn test_output_extension_ignores_source_container() {
        let sink = RecordingSink::default();
        let executor =
            ShiftExecutor::new(&ConstantSource, &Negate, &sink, "/out", None, OutputEncoding::Pcm16);
        let path = executor.output_path(&source_file("D4"), SemitoneOffset::new(7.0));
        assert_eq!(path, PathBuf::from("/out/D4_p7.wav"));
    }

    #[test]
    fn test_shift_failure_names_source() {
        let sink = RecordingSink::default();
        let executor = ShiftExecutor::new(
            &ConstantSource,
            &FailingShifter,
            &sink,
            "/out",
            None,
            OutputEncoding::Float32,
        );

        let err = executor
            .execute(&source_file("C4"), SemitoneOffset::new(12.0))
            .unwrap_err();
        match err {
            ShiftError::ShiftFailed { path, reason } => {
                assert_eq!(path, PathBuf::from("/in/C4.mp3"));
                assert!(reason.contains("ratio out of range"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(sink.writes.borrow().is_empty());
    }
}
