//! Pipeline orchestration
//!
//! Coordinates discovery, shift planning and the per-file shift loop.
//! Strictly sequential: files outer, offsets inner, first error aborts.

use super::executor::ShiftExecutor;
use super::plan::ShiftPlan;
use super::report::RunReport;
use crate::audio::traits::{AudioSink, AudioSource, PitchShifter};
use crate::audio::{SymphoniaSource, WavSink};
use crate::config::Settings;
use crate::discovery::{self, SourceFile};
use crate::dsp::PhaseVocoderShifter;
use crate::error::{Result, ShiftError};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Run the full pipeline with the default audio backends
pub fn run(settings: &Settings) -> Result<RunReport> {
    run_with(settings, &SymphoniaSource, &PhaseVocoderShifter, &WavSink)
}

/// Run the full pipeline with caller-supplied backends
pub fn run_with(
    settings: &Settings,
    source: &dyn AudioSource,
    shifter: &dyn PitchShifter,
    sink: &dyn AudioSink,
) -> Result<RunReport> {
    let pipeline_start = Instant::now();

    let input_dir = resolve(&settings.input_dir)?;
    let output_dir = resolve(&settings.output_dir)?;

    // Phase 1: Discovery
    info!("Scanning {} for source samples...", input_dir.display());
    let files = discovery::scan(&input_dir);
    if files.is_empty() {
        return Err(ShiftError::NoInputFiles { dir: input_dir });
    }

    // Phase 2: Plan
    let plan = ShiftPlan::new(&settings.steps);
    if plan.is_empty() {
        return Err(ShiftError::ConfigError(
            "at least one semitone offset is required".to_string(),
        ));
    }
    info!(
        "Shifting {} files by {} offsets ({} outputs)",
        files.len(),
        plan.len(),
        files.len() * plan.len()
    );

    let mut report = RunReport {
        source_count: files.len(),
        offset_count: plan.len(),
        dry_run: settings.dry_run,
        ..Default::default()
    };

    if settings.dry_run {
        let executor = ShiftExecutor::new(
            source,
            shifter,
            sink,
            &output_dir,
            settings.sample_rate,
            settings.encoding,
        );
        report.planned = run_dry_run(&files, &plan, &executor);
        return Ok(report);
    }

    // Phase 3: Shift
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| ShiftError::output_error(&output_dir, e))?;
    let output_dir = output_dir.canonicalize().unwrap_or(output_dir);
    let display_root = output_dir.parent().unwrap_or(output_dir.as_path()).to_path_buf();

    let executor = ShiftExecutor::new(
        source,
        shifter,
        sink,
        &output_dir,
        settings.sample_rate,
        settings.encoding,
    );

    let progress_bar = if settings.show_progress {
        let pb = ProgressBar::new(report.expected() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let outcome = shift_all(
        &files,
        &plan,
        &executor,
        progress_bar.as_ref(),
        &display_root,
        &mut report,
    );

    if let Some(pb) = progress_bar {
        if outcome.is_ok() {
            pb.finish_and_clear();
        } else {
            pb.abandon();
        }
    }
    outcome?;

    info!(
        "Total pipeline time: {:.2}s",
        pipeline_start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Shift every file by every planned offset, stopping at the first error
fn shift_all(
    files: &[SourceFile],
    plan: &ShiftPlan,
    executor: &ShiftExecutor,
    progress_bar: Option<&ProgressBar>,
    display_root: &Path,
    report: &mut RunReport,
) -> Result<()> {
    for file in files {
        debug!("Processing {}", file.path.display());
        if let Some(pb) = progress_bar {
            pb.set_message(file.stem.clone());
        }

        let buffer = executor.load(file)?;

        for offset in plan.iter() {
            let out_path = executor.render(file, &buffer, offset)?;

            let line = format!("Wrote {}", display_path(&out_path, display_root).display());
            match progress_bar {
                Some(pb) => {
                    pb.suspend(|| println!("{}", line));
                    pb.inc(1);
                }
                None => println!("{}", line),
            }
            report.generated.push(out_path);
        }
    }
    Ok(())
}

/// Dry run mode - list the files that would be written without processing
fn run_dry_run(files: &[SourceFile], plan: &ShiftPlan, executor: &ShiftExecutor) -> Vec<PathBuf> {
    println!();
    println!("=== DRY RUN MODE ===");
    println!();

    let mut planned = Vec::with_capacity(files.len() * plan.len());
    for file in files {
        println!("{}", file.path.display());
        for offset in plan.iter() {
            let out_path = executor.output_path(file, offset);
            println!("  -> {}", out_path.display());
            planned.push(out_path);
        }
    }
    println!();

    planned
}

/// Absolute form of a user-supplied directory
fn resolve(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(_) => Ok(std::path::absolute(path)?),
    }
}

/// `path` relative to `root` when possible, for console output
fn display_path<'p>(path: &'p Path, root: &Path) -> &'p Path {
    path.strip_prefix(root).unwrap_or(path)
}
