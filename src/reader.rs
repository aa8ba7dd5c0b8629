//! Accelerometer device reader
//!
//! Pulls whole frames from the event device, dropping noisy ones, until a
//! usable x/y/z sample arrives. The device is opened lazily on the first read
//! and closed by [`SampleReader::close`] or on drop.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, RotateError};
use crate::event::{decode_frame, Frame, FRAME_SIZE};
use crate::orientation::AxisSample;

/// Source of readable device handles
pub trait DeviceOpener {
    type Device: Read;

    /// Path reported in errors and logs
    fn path(&self) -> &Path;

    /// Open the device for reading
    fn open(&self) -> io::Result<Self::Device>;
}

/// Opens an input device node read-only
#[derive(Debug, Clone)]
pub struct PathOpener {
    path: PathBuf,
}

impl PathOpener {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DeviceOpener for PathOpener {
    type Device = File;

    fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> io::Result<File> {
        OpenOptions::new().read(true).open(&self.path)
    }
}

/// Frame reader with zero-guard and sync filtering
pub struct SampleReader<O: DeviceOpener> {
    opener: O,
    device: Option<O::Device>,
    sample: AxisSample,
    last_frame: Option<Frame>,
    skip_zero: bool,
    max_noisy_frames: Option<u32>,
}

impl SampleReader<PathOpener> {
    /// Reader for the device configured in `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(PathOpener::new(&config.device_path), config)
    }
}

impl<O: DeviceOpener> SampleReader<O> {
    pub fn new(opener: O, config: &Config) -> Self {
        Self {
            opener,
            device: None,
            sample: AxisSample::default(),
            last_frame: None,
            skip_zero: config.skip_zero,
            max_noisy_frames: config.max_noisy_frames,
        }
    }

    /// Open the device if it is not open yet
    pub fn open(&mut self) -> Result<()> {
        if self.device.is_some() {
            return Ok(());
        }

        let device = self
            .opener
            .open()
            .map_err(|source| RotateError::DeviceUnavailable {
                path: self.opener.path().to_path_buf(),
                source,
            })?;
        log::debug!("Opened: {}", self.opener.path().display());
        self.device = Some(device);
        Ok(())
    }

    /// Release the device handle
    pub fn close(&mut self) {
        if self.device.take().is_some() {
            log::debug!("Closed: {}", self.opener.path().display());
        }
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    /// Read frames until one is accepted and return the updated sample
    ///
    /// Frames with a zero axis value (when the zero guard is on) or without a
    /// trailing sync marker are discarded and another frame is read. A short
    /// read or I/O error ends the attempt immediately.
    pub fn read_one(&mut self) -> Result<AxisSample> {
        self.open()?;

        let mut discarded = 0u32;
        loop {
            let frame = self.read_frame()?;

            if self.accepts(&frame) {
                self.sample = AxisSample {
                    x: frame.x.value,
                    y: frame.y.value,
                    z: frame.z.value,
                };
                self.last_frame = Some(frame);
                return Ok(self.sample);
            }

            discarded += 1;
            log::trace!(
                "Discarded frame ({}, {}, {}) sync type {}",
                frame.x.value,
                frame.y.value,
                frame.z.value,
                frame.sync.event_type
            );

            if let Some(limit) = self.max_noisy_frames {
                if discarded >= limit {
                    return Err(RotateError::NoisyDevice { discarded });
                }
            }
        }
    }

    fn accepts(&self, frame: &Frame) -> bool {
        if self.skip_zero && frame.has_zero_axis() {
            return false;
        }
        frame.is_synced()
    }

    fn read_frame(&mut self) -> Result<Frame> {
        let device = match self.device.as_mut() {
            Some(device) => device,
            None => {
                return Err(RotateError::ReadFailed(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "device is not open",
                )))
            }
        };

        let mut buffer = [0u8; FRAME_SIZE];
        let actual = device.read(&mut buffer).map_err(RotateError::ReadFailed)?;
        if actual < FRAME_SIZE {
            return Err(RotateError::ShortRead {
                expected: FRAME_SIZE,
                actual,
            });
        }

        Ok(decode_frame(&buffer))
    }

    /// Most recently accepted sample
    pub fn sample(&self) -> AxisSample {
        self.sample
    }

    /// Most recently accepted frame, with its timestamps
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn device_path(&self) -> &Path {
        self.opener.path()
    }
}
