//! Orientation classification from raw accelerometer counts

use std::fmt;

use crate::config::Thresholds;

/// Latest raw accelerometer reading, one value per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Discrete screen orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    /// All orientations in angle order
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    /// Rotation angle in degrees
    pub fn angle(self) -> u32 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 90,
            Orientation::Down => 180,
            Orientation::Left => 270,
        }
    }

    /// True for the landscape orientations (90 and 270 degrees)
    pub fn is_landscape(self) -> bool {
        is_landscape_angle(self.angle())
    }

    /// Orientation for an exact rotation angle
    pub fn from_angle(angle: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.angle() == angle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Up => "up",
            Orientation::Right => "right",
            Orientation::Down => "down",
            Orientation::Left => "left",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}°)", self.as_str(), self.angle())
    }
}

/// True if a rotation angle is 90 or 270 degrees
pub fn is_landscape_angle(angle: u32) -> bool {
    angle == 90 || angle == 270
}

/// Half-open tolerance window: `target - |tolerance| < value <= target + |tolerance|`
pub fn neighbour(value: i32, target: i32, tolerance: i32) -> bool {
    let tolerance = tolerance.saturating_abs();
    target.saturating_sub(tolerance) < value && value <= target.saturating_add(tolerance)
}

/// Facts about the device position derived from one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionFacts {
    pub face_up: bool,
    pub vertical: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl PositionFacts {
    /// Compute all facts for a sample
    pub fn from_sample(sample: &AxisSample, thresholds: &Thresholds) -> Self {
        let target = thresholds.axis_target;
        let tolerance = thresholds.axis_tolerance;

        PositionFacts {
            vertical: neighbour(sample.z, 0, thresholds.vertical_tolerance),
            face_up: sample.z >= 0,
            left: neighbour(sample.x, -target, tolerance),
            right: neighbour(sample.x, target, tolerance),
            down: neighbour(sample.y, target, tolerance),
            up: neighbour(sample.y, -target, tolerance),
        }
    }

    /// Resolve a single orientation by priority: down, up, left, right
    pub fn resolve(&self) -> Option<Orientation> {
        if self.down {
            Some(Orientation::Down)
        } else if self.up {
            Some(Orientation::Up)
        } else if self.left {
            Some(Orientation::Left)
        } else if self.right {
            Some(Orientation::Right)
        } else {
            None
        }
    }
}

impl fmt::Display for PositionFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "face {}, {}-ish",
            if self.face_up { "up" } else { "down" },
            if self.vertical { "vertical" } else { "horizontal" }
        )?;
        for (set, name) in [
            (self.left, "left"),
            (self.right, "right"),
            (self.up, "up"),
            (self.down, "down"),
        ] {
            if set {
                write!(f, ", {}", name)?;
            }
        }
        Ok(())
    }
}

/// Turns samples into orientations, keeping the last resolved one
/// when a sample matches no direction.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    thresholds: Thresholds,
    current: Option<Orientation>,
    facts: PositionFacts,
}

impl Classifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            current: None,
            facts: PositionFacts::default(),
        }
    }

    /// Classify a sample
    ///
    /// Returns `None` only while no sample has ever resolved to a direction.
    pub fn classify(&mut self, sample: &AxisSample) -> Option<Orientation> {
        self.facts = PositionFacts::from_sample(sample, &self.thresholds);
        if let Some(orientation) = self.facts.resolve() {
            self.current = Some(orientation);
        }

        log::debug!(
            "v(x,y,z)=({:5},{:5},{:5}) == {}",
            sample.x,
            sample.y,
            sample.z,
            self.facts
        );

        self.current
    }

    /// Facts from the most recent classification pass
    pub fn facts(&self) -> PositionFacts {
        self.facts
    }

    pub fn current(&self) -> Option<Orientation> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: i32, y: i32, z: i32) -> AxisSample {
        AxisSample { x, y, z }
    }

    #[test]
    fn test_neighbour_boundaries() {
        // Lower bound is exclusive, upper bound inclusive
        assert!(!neighbour(700, 1000, 300));
        assert!(neighbour(701, 1000, 300));
        assert!(neighbour(1300, 1000, 300));
        assert!(!neighbour(1301, 1000, 300));
        assert!(!neighbour(-1300, -1000, 300));
        assert!(neighbour(-700, -1000, 300));
    }

    #[test]
    fn test_neighbour_negative_tolerance() {
        assert_eq!(neighbour(1200, 1000, -300), neighbour(1200, 1000, 300));
        assert!(!neighbour(700, 1000, -300));
        assert!(neighbour(1300, 1000, -300));
    }

    #[test]
    fn test_face_up_depends_only_on_z() {
        let t = Thresholds::default();
        for (x, y) in [(0, 0), (-1000, 1000), (1000, -1000), (42, 7)] {
            assert!(PositionFacts::from_sample(&sample(x, y, 0), &t).face_up);
            assert!(PositionFacts::from_sample(&sample(x, y, 800), &t).face_up);
            assert!(!PositionFacts::from_sample(&sample(x, y, -1), &t).face_up);
        }
    }

    #[test]
    fn test_vertical_window() {
        let t = Thresholds::default();
        assert!(PositionFacts::from_sample(&sample(1, 1, 500), &t).vertical);
        assert!(!PositionFacts::from_sample(&sample(1, 1, -500), &t).vertical);
        assert!(!PositionFacts::from_sample(&sample(1, 1, 1000), &t).vertical);
    }

    #[test]
    fn test_direction_facts() {
        let t = Thresholds::default();
        let facts = PositionFacts::from_sample(&sample(-1000, 1000, 10), &t);
        assert!(facts.left);
        assert!(!facts.right);
        assert!(facts.down);
        assert!(!facts.up);

        let facts = PositionFacts::from_sample(&sample(1000, -1000, 10), &t);
        assert!(facts.right);
        assert!(facts.up);
    }

    #[test]
    fn test_priority_all_true_resolves_down() {
        let facts = PositionFacts {
            face_up: true,
            vertical: true,
            left: true,
            right: true,
            up: true,
            down: true,
        };
        assert_eq!(facts.resolve(), Some(Orientation::Down));
    }

    #[test]
    fn test_priority_up_over_left() {
        let facts = PositionFacts {
            up: true,
            left: true,
            ..PositionFacts::default()
        };
        assert_eq!(facts.resolve(), Some(Orientation::Up));

        let facts = PositionFacts {
            left: true,
            right: true,
            ..PositionFacts::default()
        };
        assert_eq!(facts.resolve(), Some(Orientation::Left));
    }

    #[test]
    fn test_classify_retains_previous_when_no_fact() {
        let mut classifier = Classifier::default();
        assert_eq!(classifier.classify(&sample(5, 5, 1000)), None);

        assert_eq!(
            classifier.classify(&sample(1000, 5, 10)),
            Some(Orientation::Right)
        );
        assert_eq!(
            classifier.classify(&sample(5, 5, 1000)),
            Some(Orientation::Right)
        );
        assert_eq!(classifier.current(), Some(Orientation::Right));
        assert!(!classifier.facts().right);
    }

    #[test]
    fn test_classify_y_down() {
        let mut classifier = Classifier::default();
        assert_eq!(
            classifier.classify(&sample(5, 1000, 5)),
            Some(Orientation::Down)
        );
    }

    #[test]
    fn test_orientation_angles() {
        assert_eq!(Orientation::Up.angle(), 0);
        assert_eq!(Orientation::Right.angle(), 90);
        assert_eq!(Orientation::Down.angle(), 180);
        assert_eq!(Orientation::Left.angle(), 270);
        assert!(Orientation::Right.is_landscape());
        assert!(Orientation::Left.is_landscape());
        assert!(!Orientation::Down.is_landscape());
        assert_eq!(Orientation::from_angle(270), Some(Orientation::Left));
        assert_eq!(Orientation::from_angle(45), None);
    }
}
