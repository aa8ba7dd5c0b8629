//! Orientation daemon
//!
//! Samples the accelerometer at a fixed interval and rotates the screen when
//! the device is turned.
//!
//! Usage:
//!   accel-rotate --device /dev/input/event3 --interval-ms 500 -- xrandr -o

use accel_rotate::{CommandRotation, Config, PollingDriver, Thresholds};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "accel-rotate")]
#[command(about = "Rotate the screen to follow the accelerometer", long_about = None)]
struct Args {
    /// Accelerometer input event device
    #[arg(short, long, default_value = accel_rotate::config::DEFAULT_DEVICE_PATH)]
    device: PathBuf,

    /// Sampling interval in milliseconds
    #[arg(short, long, default_value_t = accel_rotate::config::DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    /// Rotation the display has when the daemon starts (degrees)
    #[arg(long, default_value_t = 0)]
    initial_rotation: u32,

    /// Accept frames where an axis reads exactly zero
    #[arg(long)]
    no_skip_zero: bool,

    /// Consecutive noisy frames tolerated per sample (0 = unlimited)
    #[arg(long, default_value_t = accel_rotate::config::DEFAULT_MAX_NOISY_FRAMES)]
    max_noisy_frames: u32,

    /// Restore the initial rotation on exit
    #[arg(short, long)]
    restore_on_exit: bool,

    /// Log every classification pass
    #[arg(short, long)]
    verbose: bool,

    /// Command run for each rotation; the angle is appended as its last argument
    #[arg(last = true)]
    command: Vec<String>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            device_path: self.device.clone(),
            interval: Duration::from_millis(self.interval_ms),
            skip_zero: !self.no_skip_zero,
            max_noisy_frames: (self.max_noisy_frames > 0).then_some(self.max_noisy_frames),
            thresholds: Thresholds::default(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = args.config();
    let service = CommandRotation::with_command(args.initial_rotation, &args.command);
    let mut driver = PollingDriver::from_config(&config, service)?;
    driver.on_rotated(|landscape| {
        log::info!(
            "Rotated to {}",
            if landscape { "landscape" } else { "portrait" }
        )
    });

    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    driver.start(config.interval);
    let ticks = driver.run(&running);
    driver.stop();
    log::info!("Took {} samples", ticks);

    if args.restore_on_exit {
        driver.restore();
    }

    match driver.last_error() {
        Some(e) => {
            log::error!("Sampling ended: {}", e);
            std::process::exit(1);
        }
        None => Ok(()),
    }
}
