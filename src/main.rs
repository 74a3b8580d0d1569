// src/main.rs
mod config;
mod drivers;
mod recorder;
mod types;
mod visualizer;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use anyhow::{Context, Result};
use clap::Parser;
use config::ProbeConfig;
use drivers::{write_fit_png, Acquisition, Analysis, MonotonicClock, PlotStyle, SerialLineSource};
use recorder::DataRecorder;
/// Log a serial temperature probe to a file, then fit and plot the run.
///
/// Logging continues until Ctrl+C.
#[derive(Parser, Debug)]
#[command(name = "probe-logger", version, about)]
struct Cli {
    /// File that receives one `elapsed  temperature` line per sample
    output: PathBuf,
    /// Serial device the probe is attached to
    #[arg(short, long)]
    device: Option<String>,
    /// Serial bit rate
    #[arg(short, long)]
    baud: Option<u32>,
    /// Degree of the fitted polynomial
    #[arg(long)]
    degree: Option<usize>,
    /// Read timeout used to poll for Ctrl+C
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// JSON file with probe settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Also save the chart as a PNG
    #[arg(long)]
    png: Option<PathBuf>,
    /// Skip the interactive chart window
    #[arg(long)]
    no_plot: bool,
}
impl Cli {
    fn resolve_config(&self) -> Result<ProbeConfig> {
        let mut config = match &self.config {
            Some(path) => ProbeConfig::load(path)?,
            None => ProbeConfig::default(),
        };
        if let Some(device) = &self.device {
            config.device_path = device.clone();
        }
        if let Some(baud) = self.baud {
            config.baud_rate = baud;
        }
        if let Some(degree) = self.degree {
            config.fit_degree = degree;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.read_timeout_ms = timeout_ms;
        }
        config.validate()?;
        Ok(config)
    }
}
// Ctrl+C stops acquisition; once it has stopped, Ctrl+C exits the process.
// Returns true when the process should exit.
fn request_stop(running: &AtomicBool) -> bool {
    !running.swap(false, Ordering::SeqCst)
}
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let source = SerialLineSource::open(&config)
        .with_context(|| format!("cannot read probe on {}", config.device_path))?;
    let recorder = DataRecorder::create(&cli.output)?;
    let acquisition = Acquisition::new(source, MonotonicClock::default(), recorder);
    let running = acquisition.running_flag();
    let handler_flag = running.clone();
    ctrlc::set_handler(move || {
        if request_stop(&handler_flag) {
            std::process::exit(130);
        }
    })
    .context("failed to install Ctrl+C handler")?;
    println!("Press Ctrl+C to stop logging");
    let outcome = acquisition.run()?;
    running.store(false, Ordering::SeqCst);
    println!("\nLogging completed\n");
    log::info!(
        "stopped on {:?}; {} samples recorded, {} lines discarded",
        outcome.stop_reason,
        outcome.series.len(),
        outcome.discarded
    );
    let analysis = Analysis::run(outcome.series, config.fit_degree)
        .with_context(|| format!("no usable fit; raw data kept in {}", cli.output.display()))?;
    if let Some(png) = &cli.png {
        write_fit_png(&analysis, &config.plot_title, &PlotStyle::default(), png)?;
    }
    if !cli.no_plot {
        visualizer::show_fit_window(&analysis, &config.plot_title)?;
    }
    Ok(())
}
