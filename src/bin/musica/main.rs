//! musica - terminal demo board for basic music concepts
//!
//! Run with: cargo run -- [--bpm 96] [--play rhythm simple]

mod audio;
mod ui;

use std::{fs::File, path::PathBuf, sync::Mutex, thread, time::Duration};

use clap::Parser;
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use musica_dsp::{DemoConfig, EngineConfig, Scheduler};
use tracing::info;
use tracing_subscriber::EnvFilter;

use audio::CpalDriver;
use ui::UiApp;

/// Samples buffered between the audio callback and the visualizers
const TAP_CAPACITY: usize = 16_384;

#[derive(Parser, Debug)]
#[command(name = "musica")]
#[command(about = "Play short demos of rhythm, melody, harmony, timbre and texture", long_about = None)]
#[command(version)]
struct Cli {
    /// Tempo used by the rhythm demos
    #[arg(long, default_value = "96")]
    bpm: f64,

    /// Voices the mixer can sound at once
    #[arg(long, default_value = "64")]
    max_voices: usize,

    /// Seed for the noise generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Play one demo without the interface, e.g. `--play melody asc`
    #[arg(long, num_args = 2, value_names = ["CATEGORY", "VARIANT"])]
    play: Option<Vec<String>>,

    /// Where the interface writes its log
    #[arg(long, default_value = "musica.log")]
    log_file: PathBuf,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if !(cli.bpm > 0.0) || !cli.bpm.is_finite() {
        return Err(eyre!("--bpm must be a positive number, got {}", cli.bpm));
    }

    let demos = DemoConfig {
        bpm: cli.bpm,
        ..Default::default()
    };
    let engine = EngineConfig {
        max_voices: cli.max_voices,
        noise_seed: cli.seed,
        ..Default::default()
    };

    match &cli.play {
        Some(demo) => {
            init_logging(None)?;
            play_once(demo, engine, demos)
        }
        None => {
            // The terminal belongs to the interface, so logs go to a file
            init_logging(Some(&cli.log_file))?;
            run_ui(engine, demos)
        }
    }
}

fn init_logging(file: Option<&PathBuf>) -> EyreResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match file {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Dispatch a single demo and wait for it to finish sounding.
fn play_once(demo: &[String], engine: EngineConfig, demos: DemoConfig) -> EyreResult<()> {
    let [category, variant] = demo else {
        return Err(eyre!("--play takes a category and a variant"));
    };

    let (driver, _tap) = CpalDriver::open(TAP_CAPACITY)?;
    let mut scheduler = Scheduler::new(driver, engine, demos);

    let report = scheduler.dispatch_demo(category, variant)?;
    info!(
        %category,
        %variant,
        scheduled = report.scheduled,
        skipped = report.skipped,
        anchor = report.anchor,
        "demo dispatched"
    );

    thread::sleep(Duration::from_secs_f64(report.span + 0.3));
    Ok(())
}

fn run_ui(engine: EngineConfig, demos: DemoConfig) -> EyreResult<()> {
    let (driver, tap) = CpalDriver::open(TAP_CAPACITY)?;
    let scheduler = Scheduler::new(driver, engine, demos);
    let mut app = UiApp::new(scheduler, tap);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
