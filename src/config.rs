//! Runtime configuration for the orientation sampler

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, RotateError};

/// Default accelerometer input device
pub const DEFAULT_DEVICE_PATH: &str = "/dev/input/event3";

/// Default polling interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Default number of consecutive noisy frames tolerated by one read
pub const DEFAULT_MAX_NOISY_FRAMES: u32 = 1000;

/// Tolerance windows used to derive position facts from raw axis counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Window around z = 0 in which the device counts as vertical
    pub vertical_tolerance: i32,
    /// Reading an axis shows when it points straight down
    pub axis_target: i32,
    /// Window around +/- `axis_target` for the left/right/up/down facts
    pub axis_tolerance: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            vertical_tolerance: 500,
            axis_target: 1000,
            axis_tolerance: 300,
        }
    }
}

/// Sampler configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the accelerometer event device
    pub device_path: PathBuf,
    /// Time between samples
    pub interval: Duration,
    /// Discard frames where any axis reads exactly zero
    pub skip_zero: bool,
    /// Give up a read after this many consecutive discarded frames (`None` = never)
    pub max_noisy_frames: Option<u32>,
    /// Classification tolerances
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from(DEFAULT_DEVICE_PATH),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            skip_zero: true,
            max_noisy_frames: Some(DEFAULT_MAX_NOISY_FRAMES),
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// Check that all values are usable
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(RotateError::InvalidParameter(
                "Polling interval must be greater than zero".to_string(),
            ));
        }

        if self.max_noisy_frames == Some(0) {
            return Err(RotateError::InvalidParameter(
                "Noisy frame limit must be at least 1".to_string(),
            ));
        }

        let t = &self.thresholds;
        if t.vertical_tolerance <= 0 || t.axis_target <= 0 || t.axis_tolerance <= 0 {
            return Err(RotateError::InvalidParameter(format!(
                "Thresholds must be positive, got {:?}",
                t
            )));
        }

        Ok(())
    }
}
