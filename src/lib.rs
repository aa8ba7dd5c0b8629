//! Accelerometer-driven screen orientation detection
//!
//! This library reads raw accelerometer frames from a Linux input event
//! device, classifies the device attitude into one of four orientations and
//! asks an external rotation service to rotate the screen when the
//! orientation changes.
//!
//! # Quick Start
//!
//! ## Polling Session
//! ```no_run
//! use accel_rotate::{CommandRotation, Config, PollingDriver};
//! use std::sync::atomic::AtomicBool;
//!
//! let config = Config::default();
//! let mut driver = PollingDriver::from_config(&config, CommandRotation::new(0))?;
//! driver.on_rotated(|landscape| println!("rotated, landscape: {}", landscape));
//!
//! driver.start(config.interval);
//! driver.run(&AtomicBool::new(true));
//!
//! if let Some(e) = driver.last_error() {
//!     eprintln!("session ended: {}", e);
//! }
//! driver.restore();
//! # Ok::<(), accel_rotate::RotateError>(())
//! ```
//!
//! ## Reading and Classifying Samples Directly
//! ```no_run
//! use accel_rotate::{Classifier, Config, SampleReader};
//!
//! let config = Config::default();
//! let mut reader = SampleReader::from_config(&config);
//! let mut classifier = Classifier::new(config.thresholds);
//!
//! let sample = reader.read_one()?;
//! if let Some(orientation) = classifier.classify(&sample) {
//!     println!("{} -> {}", classifier.facts(), orientation);
//! }
//! # Ok::<(), accel_rotate::RotateError>(())
//! ```

pub mod common;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod event;
pub mod orientation;
pub mod reader;
pub mod rotation;

// Re-export public API
pub use common::{create_bar, TimeKeeper};
pub use config::{Config, Thresholds};
pub use dispatch::{Dispatch, Dispatcher};
pub use driver::PollingDriver;
pub use error::{Result, RotateError};
pub use event::{Frame, InputEvent};
pub use orientation::{neighbour, AxisSample, Classifier, Orientation, PositionFacts};
pub use reader::{DeviceOpener, PathOpener, SampleReader};
pub use rotation::{CommandRotation, RotationService};
