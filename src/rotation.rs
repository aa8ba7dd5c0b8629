//! Access to the system's screen rotation
//!
//! The sampler never rotates the screen itself. It asks a [`RotationService`]
//! what the active rotation is and hands it new angles to apply.

use std::cell::Cell;
use std::process::Command;
use std::thread;

/// External rotation state and actuator
pub trait RotationService {
    /// Currently active rotation angle in degrees
    fn current_rotation(&self) -> u32;

    /// Request a rotation change. Fire-and-forget: no confirmation is awaited.
    fn apply_rotation(&self, angle: u32);
}

impl<S: RotationService + ?Sized> RotationService for &S {
    fn current_rotation(&self) -> u32 {
        (**self).current_rotation()
    }

    fn apply_rotation(&self, angle: u32) {
        (**self).apply_rotation(angle)
    }
}

/// Rotation service backed by an optional external command
///
/// The current angle is tracked in memory, seeded with the rotation the
/// display had at startup. When a command is configured, each request
/// spawns it with the angle appended as its last argument.
#[derive(Debug)]
pub struct CommandRotation {
    command: Option<(String, Vec<String>)>,
    current: Cell<u32>,
}

impl CommandRotation {
    /// Service that only tracks the angle
    pub fn new(initial_rotation: u32) -> Self {
        Self {
            command: None,
            current: Cell::new(initial_rotation),
        }
    }

    /// Service that runs `argv` (program first) for each request
    pub fn with_command(initial_rotation: u32, argv: &[String]) -> Self {
        let command = argv
            .split_first()
            .map(|(program, args)| (program.clone(), args.to_vec()));
        Self {
            command,
            current: Cell::new(initial_rotation),
        }
    }

    fn spawn(&self, angle: u32) {
        let Some((program, args)) = &self.command else {
            return;
        };

        match Command::new(program).args(args).arg(angle.to_string()).spawn() {
            Ok(mut child) => {
                // Reap in the background so requests never block sampling
                thread::spawn(move || match child.wait() {
                    Ok(status) if !status.success() => {
                        log::warn!("Rotate command exited with {}", status)
                    }
                    Err(e) => log::warn!("Failed to wait for rotate command: {}", e),
                    _ => {}
                });
            }
            Err(e) => log::warn!("Failed to run rotate command '{}': {}", program, e),
        }
    }
}

impl RotationService for CommandRotation {
    fn current_rotation(&self) -> u32 {
        self.current.get()
    }

    fn apply_rotation(&self, angle: u32) {
        self.current.set(angle);
        self.spawn(angle);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every requested angle
    #[derive(Debug, Default)]
    pub(crate) struct RecordingService {
        pub current: Cell<u32>,
        pub requests: RefCell<Vec<u32>>,
    }

    impl RecordingService {
        pub fn at(angle: u32) -> Self {
            Self {
                current: Cell::new(angle),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<u32> {
            self.requests.borrow().clone()
        }
    }

    impl RotationService for RecordingService {
        fn current_rotation(&self) -> u32 {
            self.current.get()
        }

        fn apply_rotation(&self, angle: u32) {
            self.current.set(angle);
            self.requests.borrow_mut().push(angle);
        }
    }

    #[test]
    fn test_command_rotation_tracks_angle() {
        let service = CommandRotation::new(90);
        assert_eq!(service.current_rotation(), 90);
        service.apply_rotation(180);
        assert_eq!(service.current_rotation(), 180);
    }

    #[test]
    fn test_command_rotation_empty_argv() {
        let service = CommandRotation::with_command(0, &[]);
        service.apply_rotation(270);
        assert_eq!(service.current_rotation(), 270);
    }

    #[test]
    fn test_command_rotation_missing_program_is_not_fatal() {
        let argv = vec!["/nonexistent/accel-rotate-hook".to_string()];
        let service = CommandRotation::with_command(0, &argv);
        service.apply_rotation(90);
        assert_eq!(service.current_rotation(), 90);
    }

    #[test]
    fn test_service_through_reference() {
        let service = RecordingService::at(0);
        let by_ref = &service;
        by_ref.apply_rotation(90);
        assert_eq!(by_ref.current_rotation(), 90);
        assert_eq!(service.requests(), vec![90]);
    }
}
