//! Orientation monitor - live view of accelerometer samples
//!
//! Continuously reads frames from the accelerometer device and shows the raw
//! axis values, the derived position facts and the resolved orientation.

use accel_rotate::{create_bar, Classifier, Config, RotateError, SampleReader, TimeKeeper};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Raw count shown at either end of the bar graphs
const BAR_SCALE: i32 = 1500;

#[derive(Parser, Debug)]
#[command(name = "orientation-monitor")]
#[command(about = "Show live accelerometer orientation data", long_about = None)]
struct Args {
    /// Accelerometer input event device
    #[arg(short, long, default_value = accel_rotate::config::DEFAULT_DEVICE_PATH)]
    device: PathBuf,

    /// Accept frames where an axis reads exactly zero
    #[arg(long)]
    no_skip_zero: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = Config {
        device_path: args.device,
        skip_zero: !args.no_skip_zero,
        ..Config::default()
    };

    println!("Orientation Monitor");
    println!("===================");
    println!("Opening {}...", config.device_path.display());

    let mut reader = SampleReader::from_config(&config);
    match reader.open() {
        Ok(()) => println!("Device opened. Press Ctrl+C to exit\n"),
        Err(e @ RotateError::DeviceUnavailable { .. }) => {
            eprintln!("Error: {}", e);
            eprintln!("Please check:");
            eprintln!("  1. The path names the accelerometer's event device");
            eprintln!("  2. You have read permission (input group or root)");
            return Err(Box::new(e));
        }
        Err(e) => return Err(Box::new(e)),
    }

    let mut classifier = Classifier::new(config.thresholds);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let mut timer = TimeKeeper::new();

    // Clear screen once at start
    print!("\x1B[2J\x1B[H");
    io::stdout().flush()?;

    while running.load(Ordering::SeqCst) {
        let sample = match reader.read_one() {
            Ok(sample) => sample,
            Err(e) => {
                eprintln!("\nError reading device: {}", e);
                return Err(Box::new(e));
            }
        };
        timer.tick();

        let orientation = classifier.classify(&sample);
        let facts = classifier.facts();
        let stamp = reader
            .last_frame()
            .and_then(|frame| frame.sync.timestamp())
            .map(|ts| ts.format("%H:%M:%S%.3f").to_string())
            .unwrap_or_else(|| "-".to_string());

        // Move cursor to top without clearing (reduces flicker)
        print!("\x1B[H");

        println!("Orientation Monitor - Live Data                                ");
        println!("===============================                                ");
        println!(
            "Time: {:.2}s | Samples: {} | Rate: {:.1} Hz | Frame: {}          ",
            timer.elapsed_secs(),
            timer.samples(),
            timer.rate_hz(),
            stamp
        );
        println!();

        println!("ACCELEROMETER (raw)             -{0} ◄─────────┼─────────► +{0}", BAR_SCALE);
        println!("  X: {:6}  [{}]", sample.x, create_bar(sample.x, BAR_SCALE, 40));
        println!("  Y: {:6}  [{}]", sample.y, create_bar(sample.y, BAR_SCALE, 40));
        println!("  Z: {:6}  [{}]", sample.z, create_bar(sample.z, BAR_SCALE, 40));
        println!();

        println!("POSITION                                                       ");
        println!("  {:<60}", facts.to_string());
        println!(
            "  Orientation: {:<45}",
            orientation.map_or_else(|| "unknown".to_string(), |o| o.to_string())
        );
        println!();
        println!("Press Ctrl+C to exit                                           ");

        io::stdout().flush()?;
    }

    reader.close();
    println!("\nStopped after {} samples", timer.samples());
    Ok(())
}
