mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::thread;

use cli::Cli;
use quarkscope::config::{self, VisualizerSettings};
use quarkscope::{Pipeline, SampleProvider, SettingsHandle, TickOutcome, ViewSet};

#[derive(Default, Serialize)]
struct TickCounts {
    updated: u64,
    no_data: u64,
    skipped: u64,
    failed: u64,
}

impl TickCounts {
    fn record(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Updated => self.updated += 1,
            TickOutcome::NoData => self.no_data += 1,
            TickOutcome::Skipped => self.skipped += 1,
            TickOutcome::Failed => self.failed += 1,
        }
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    input: String,
    sample_rate: u32,
    duration: f32,
    settings: VisualizerSettings,
    ticks: &'a TickCounts,
    views: &'a ViewSet,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    // Explicit --config, or auto-detect quarkscope.toml / user config
    let mut settings = match cli.config.clone().or_else(config::discover_config) {
        Some(path) => match config::load_config(&path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg.visualizer
            }
            Err(err) => {
                log::warn!("{}; using defaults", err);
                VisualizerSettings::default()
            }
        },
        None => VisualizerSettings::default(),
    };

    // Command-line values win over the config file
    if let Some(fps) = cli.fps {
        settings.fps = fps;
    }
    if let Some(bars) = cli.bars {
        settings.bar_count = bars;
    }
    if let Some(columns) = cli.spectrogram_columns {
        settings.spectrogram_columns = columns;
    }
    if let Some(points) = cli.flux_points {
        settings.flux_points = points;
    }
    settings.validate()?;

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    log::info!("quarkscope - audio analysis");
    log::info!("Input: {}", cli.input.display());
    log::info!(
        "{} fps, {} bars, {} spectrogram columns, {} flux points",
        settings.fps,
        settings.bar_count,
        settings.spectrogram_columns,
        settings.flux_points
    );

    // 1. Decode in the background; ticks no-op until the buffer is published
    let provider = SampleProvider::new();
    provider.load(&cli.input);

    let mut pipeline = Pipeline::new(SettingsHandle::new(settings));
    let interval = pipeline.tick_interval();
    let mut counts = TickCounts::default();

    while provider.is_loading() {
        counts.record(pipeline.tick(provider.current().as_deref(), 0.0));
        thread::sleep(interval);
    }

    let buffer = provider
        .current()
        .context("Decoding failed, see log for details")?;
    let duration = buffer.duration_secs();
    if duration <= 0.0 {
        anyhow::bail!("Decoded audio is empty");
    }

    // 2. Simulated playback: one tick per frame interval across the track
    let total_ticks = (duration * settings.fps as f32).ceil() as u64;
    log::info!("Analyzing {} ticks over {:.1}s", total_ticks, duration);

    let pb = ProgressBar::new(total_ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ticks ({eta} remaining)")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );

    for tick in 0..total_ticks {
        let seconds = tick as f64 / settings.fps as f64;
        let position = (seconds / duration as f64).min(1.0);
        counts.record(pipeline.tick(Some(&buffer), position));

        if cli.realtime {
            thread::sleep(interval);
        }
        pb.set_position(tick + 1);
    }

    pb.finish_with_message("Analysis complete");

    let views = pipeline.views();
    let peak_flux = views.flux.history().iter().copied().fold(0.0f32, f32::max);
    log::info!(
        "Ticks: {} updated, {} without data, {} skipped, {} failed",
        counts.updated,
        counts.no_data,
        counts.skipped,
        counts.failed
    );
    log::info!(
        "Peak flux {:.3}, final levels L {:.3} / R {:.3}",
        peak_flux,
        views.levels.left,
        views.levels.right
    );

    // 3. Optional snapshot of the final view states
    if let Some(ref output) = cli.output {
        let snapshot = Snapshot {
            input: cli.input.display().to_string(),
            sample_rate: buffer.sample_rate(),
            duration,
            settings,
            ticks: &counts,
            views,
        };
        let file = std::fs::File::create(output)
            .with_context(|| format!("Failed to create snapshot: {}", output.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &snapshot)
            .context("Failed to write snapshot")?;
        log::info!("Snapshot written to {}", output.display());
    }

    Ok(())
}
