//! Periodic sampling driver
//!
//! Ties reader, classifier and dispatcher together. A session runs from
//! [`PollingDriver::start`] to [`PollingDriver::stop`]; every tick reads one
//! sample, classifies it and dispatches the result. A fatal read error ends
//! the session and is logged, never returned to the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::dispatch::{Dispatch, Dispatcher};
use crate::error::{Result, RotateError};
use crate::orientation::{is_landscape_angle, Classifier, Orientation};
use crate::reader::{DeviceOpener, PathOpener, SampleReader};
use crate::rotation::RotationService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Stopped,
    Running { interval: Duration },
}

/// Orientation polling session
pub struct PollingDriver<O: DeviceOpener, S: RotationService> {
    reader: SampleReader<O>,
    classifier: Classifier,
    dispatcher: Dispatcher,
    service: S,
    state: State,
    initial_rotation: Option<u32>,
    last_error: Option<RotateError>,
}

impl<S: RotationService> PollingDriver<PathOpener, S> {
    /// Driver reading the device named in `config`
    pub fn from_config(config: &Config, service: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(PathOpener::new(&config.device_path), service, config))
    }
}

impl<O: DeviceOpener, S: RotationService> PollingDriver<O, S> {
    pub fn new(opener: O, service: S, config: &Config) -> Self {
        Self {
            reader: SampleReader::new(opener, config),
            classifier: Classifier::new(config.thresholds),
            dispatcher: Dispatcher::new(),
            service,
            state: State::Stopped,
            initial_rotation: None,
            last_error: None,
        }
    }

    /// Register a listener for `rotated(is_landscape)` notifications
    pub fn on_rotated<F>(&mut self, listener: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.dispatcher.on_rotated(listener);
    }

    /// Begin a polling session, ending any running one first
    ///
    /// The current system rotation is remembered for [`restore`](Self::restore).
    pub fn start(&mut self, interval: Duration) {
        if self.is_running() {
            self.stop();
        }

        let initial = self.service.current_rotation();
        self.initial_rotation = Some(initial);
        self.last_error = None;
        self.state = State::Running { interval };
        log::info!(
            "Sampling {} every {} ms (initial rotation {}°)",
            self.reader.device_path().display(),
            interval.as_millis(),
            initial
        );
    }

    /// End the session and release the device. No-op when stopped.
    pub fn stop(&mut self) {
        if let State::Running { .. } = self.state {
            log::info!("Sampling stopped");
        }
        self.state = State::Stopped;
        self.reader.close();
    }

    /// Re-apply the rotation captured by the last `start`
    pub fn restore(&mut self) {
        if let Some(angle) = self.initial_rotation {
            log::info!("Restoring rotation to {}°", angle);
            self.dispatcher.request(angle, &self.service);
        }
    }

    /// Forget the rotation captured by `start`
    pub fn clear_initial_rotation(&mut self) {
        self.initial_rotation = None;
    }

    /// One tick: read, classify, dispatch
    ///
    /// Returns false if the driver is stopped, including when this tick's
    /// read failed and ended the session.
    pub fn sample(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        match self.reader.read_one() {
            Ok(sample) => {
                if let Some(candidate) = self.classifier.classify(&sample) {
                    if let Dispatch::Rotated(orientation) =
                        self.dispatcher.on_new_orientation(candidate, &self.service)
                    {
                        log::debug!("Orientation changed to {}", orientation);
                    }
                }
                true
            }
            Err(e) => {
                log::warn!("Packet reader failed: {}", e);
                self.last_error = Some(e);
                self.stop();
                false
            }
        }
    }

    /// Drive the session on the current thread until it stops or `running`
    /// is cleared. Returns the number of ticks that read a sample.
    pub fn run(&mut self, running: &AtomicBool) -> u64 {
        let Some(interval) = self.interval() else {
            return 0;
        };

        let mut ticks = 0u64;
        let mut next_tick = Instant::now() + interval;

        while running.load(Ordering::SeqCst) && self.is_running() {
            let now = Instant::now();
            if next_tick > now {
                thread::sleep(next_tick - now);
            }
            // Running behind: tick immediately
            next_tick += interval;

            if !running.load(Ordering::SeqCst) {
                break;
            }
            if self.sample() {
                ticks += 1;
            }
        }

        ticks
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Tick interval of the running session
    pub fn interval(&self) -> Option<Duration> {
        match self.state {
            State::Running { interval } => Some(interval),
            State::Stopped => None,
        }
    }

    /// True if the system currently reports a landscape rotation
    pub fn is_landscape(&self) -> bool {
        is_landscape_angle(self.service.current_rotation())
    }

    pub fn initial_rotation(&self) -> Option<u32> {
        self.initial_rotation
    }

    /// Error that ended the most recent session, if any
    pub fn last_error(&self) -> Option<&RotateError> {
        self.last_error.as_ref()
    }

    /// Last orientation handed to the dispatcher
    pub fn last_orientation(&self) -> Option<Orientation> {
        self.dispatcher.last()
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn reader(&self) -> &SampleReader<O> {
        &self.reader
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}

impl<O: DeviceOpener, S: RotationService> Drop for PollingDriver<O, S> {
    fn drop(&mut self) {
        self.stop();
    }
}
