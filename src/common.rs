//! Console helpers shared by the binaries

use std::time::Instant;

/// Tracks elapsed time and sample rate since creation
pub struct TimeKeeper {
    start: Instant,
    samples: u64,
}

impl TimeKeeper {
    /// Create a new TimeKeeper starting now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            samples: 0,
        }
    }

    /// Count one sample
    pub fn tick(&mut self) {
        self.samples += 1;
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Get elapsed time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Average samples per second so far
    pub fn rate_hz(&self) -> f64 {
        let elapsed = self.elapsed_secs();
        if elapsed > 0.0 {
            self.samples as f64 / elapsed
        } else {
            0.0
        }
    }
}

impl Default for TimeKeeper {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a horizontal bar graph for a raw axis reading
///
/// # Arguments
/// * `value` - Raw axis count
/// * `max_value` - Count at either end of the scale
/// * `width` - Total width of the bar in characters, excluding the center marker
///
/// # Example
/// ```
/// use accel_rotate::create_bar;
///
/// // -1000 counts on a +/-1500 scale, 40 characters wide
/// let bar = create_bar(-1000, 1500, 40);
/// println!("[{}]", bar);
/// ```
pub fn create_bar(value: i32, max_value: i32, width: usize) -> String {
    let max_value = max_value.max(1) as f32;
    let normalized = (value as f32 / max_value).clamp(-1.0, 1.0);
    let center = width / 2;
    let bar_length = ((normalized.abs() * center as f32) as usize).min(center);

    let mut bar = String::new();

    if normalized < 0.0 {
        bar.push_str(&" ".repeat(center - bar_length));
        bar.push_str(&"█".repeat(bar_length));
        bar.push('|');
        bar.push_str(&" ".repeat(center));
    } else {
        bar.push_str(&" ".repeat(center));
        bar.push('|');
        bar.push_str(&"█".repeat(bar_length));
        bar.push_str(&" ".repeat(center - bar_length));
    }

    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_bar_zero() {
        let bar = create_bar(0, 1500, 40);
        assert_eq!(bar.chars().count(), 41); // 40 chars + 1 center marker
        assert!(!bar.contains('█'));
    }

    #[test]
    fn test_create_bar_full_scale() {
        let bar = create_bar(3000, 1500, 40);
        assert_eq!(bar.chars().count(), 41);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 20);
        assert!(bar.starts_with(' '));
    }

    #[test]
    fn test_create_bar_negative() {
        let bar = create_bar(-750, 1500, 40);
        assert_eq!(bar.chars().count(), 41);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 10);
        assert!(bar.ends_with(' '));
    }

    #[test]
    fn test_create_bar_degenerate_scale() {
        assert_eq!(create_bar(5, 0, 10).chars().count(), 11);
    }

    #[test]
    fn test_timekeeper_rate() {
        let mut keeper = TimeKeeper::new();
        assert_eq!(keeper.samples(), 0);
        std::thread::sleep(std::time::Duration::from_millis(10));
        keeper.tick();
        keeper.tick();
        assert_eq!(keeper.samples(), 2);
        assert!(keeper.elapsed_secs() >= 0.01);
        assert!(keeper.rate_hz() > 0.0);
        assert!(keeper.rate_hz() <= 200.0);
    }
}
