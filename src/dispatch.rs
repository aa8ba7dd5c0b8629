//! Debounce of classified orientations and rotation dispatch

use crate::orientation::{is_landscape_angle, Orientation};
use crate::rotation::RotationService;

/// Listener for the `rotated(is_landscape)` notification
pub type RotatedListener = Box<dyn FnMut(bool)>;

/// Result of offering a candidate orientation to the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Same as the previously dispatched orientation
    Unchanged,
    /// Changed, but the system already reports this rotation
    AlreadyApplied,
    /// A rotation request was issued
    Rotated(Orientation),
}

/// Remembers the last dispatched orientation and notifies listeners
#[derive(Default)]
pub struct Dispatcher {
    last: Option<Orientation>,
    listeners: Vec<RotatedListener>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a `rotated` listener
    pub fn on_rotated<F>(&mut self, listener: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Offer a newly classified orientation
    ///
    /// A change is only requested when the external service disagrees with
    /// the candidate. The candidate always becomes the new reference.
    pub fn on_new_orientation<S>(&mut self, candidate: Orientation, service: &S) -> Dispatch
    where
        S: RotationService + ?Sized,
    {
        if self.last == Some(candidate) {
            return Dispatch::Unchanged;
        }

        let outcome = if service.current_rotation() != candidate.angle() {
            self.request(candidate.angle(), service);
            Dispatch::Rotated(candidate)
        } else {
            Dispatch::AlreadyApplied
        };

        self.last = Some(candidate);
        outcome
    }

    /// Issue a rotation request and notify listeners, unconditionally
    pub fn request<S>(&mut self, angle: u32, service: &S)
    where
        S: RotationService + ?Sized,
    {
        log::info!("Rotating to {}°", angle);
        service.apply_rotation(angle);
        self.notify(is_landscape_angle(angle));
    }

    fn notify(&mut self, landscape: bool) {
        for listener in self.listeners.iter_mut() {
            listener(landscape);
        }
    }

    /// Last dispatched orientation
    pub fn last(&self) -> Option<Orientation> {
        self.last
    }

    /// Forget the debounce reference
    pub fn reset(&mut self) {
        self.last = None;
    }
}
