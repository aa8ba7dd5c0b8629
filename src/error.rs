//! Error types for the orientation sampler

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for sampling and rotation operations
#[derive(Error, Debug)]
pub enum RotateError {
    /// The motion-sensor device could not be opened
    #[error("Can't open '{}': {source}", path.display())]
    DeviceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The device returned less than a full frame
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// Reading from the device failed
    #[error("Device read failed: {0}")]
    ReadFailed(#[source] io::Error),

    /// Too many consecutive frames were discarded as noise
    #[error("Device produced {discarded} consecutive noisy frames")]
    NoisyDevice { discarded: u32 },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for orientation sampling operations
pub type Result<T> = std::result::Result<T, RotateError>;
