//! Decoding of Linux input-event records
//!
//! A frame from the accelerometer device is four consecutive `input_event`
//! records in native layout: the x, y and z axis events followed by a
//! synchronization marker.

use std::mem::size_of;
use std::os::raw::c_long;

use chrono::{DateTime, Utc};

/// Synchronization event type
pub const EV_SYN: u16 = 0x00;
/// Absolute axis event type
pub const EV_ABS: u16 = 0x03;

const LONG_SIZE: usize = size_of::<c_long>();

/// Size of one `input_event` record (timeval + type + code + value)
pub const RECORD_SIZE: usize = 2 * LONG_SIZE + 2 + 2 + 4;

/// Records per frame: x, y, z, sync
pub const RECORDS_PER_FRAME: usize = 4;

/// Size of one complete frame in bytes
pub const FRAME_SIZE: usize = RECORDS_PER_FRAME * RECORD_SIZE;

/// One decoded input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputEvent {
    /// Timestamp seconds
    pub seconds: i64,
    /// Timestamp microseconds
    pub micros: i64,
    /// Event type discriminator (`EV_SYN`, `EV_ABS`, ...)
    pub event_type: u16,
    /// Event code (axis number for axis events)
    pub code: u16,
    /// Event value (raw axis reading for axis events)
    pub value: i32,
}

/// A decoded frame: three axis events and the sync marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: InputEvent,
    pub y: InputEvent,
    pub z: InputEvent,
    pub sync: InputEvent,
}

impl Frame {
    /// True if the fourth record is a synchronization marker
    pub fn is_synced(&self) -> bool {
        self.sync.event_type == EV_SYN
    }

    /// True if any of the three axis values is exactly zero
    pub fn has_zero_axis(&self) -> bool {
        self.x.value == 0 || self.y.value == 0 || self.z.value == 0
    }
}

fn field<const N: usize>(bytes: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[at..at + N]);
    out
}

impl InputEvent {
    /// Decode a single record
    pub fn decode(record: &[u8; RECORD_SIZE]) -> Self {
        let seconds = c_long::from_ne_bytes(field(record, 0));
        let micros = c_long::from_ne_bytes(field(record, LONG_SIZE));
        let base = 2 * LONG_SIZE;

        InputEvent {
            seconds: i64::from(seconds),
            micros: i64::from(micros),
            event_type: u16::from_ne_bytes(field(record, base)),
            code: u16::from_ne_bytes(field(record, base + 2)),
            value: i32::from_ne_bytes(field(record, base + 4)),
        }
    }

    /// Encode this event in the native record layout
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        let base = 2 * LONG_SIZE;
        out[..LONG_SIZE].copy_from_slice(&(self.seconds as c_long).to_ne_bytes());
        out[LONG_SIZE..base].copy_from_slice(&(self.micros as c_long).to_ne_bytes());
        out[base..base + 2].copy_from_slice(&self.event_type.to_ne_bytes());
        out[base + 2..base + 4].copy_from_slice(&self.code.to_ne_bytes());
        out[base + 4..].copy_from_slice(&self.value.to_ne_bytes());
        out
    }

    /// Kernel timestamp of this event, if representable
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.micros.checked_mul(1_000)?).ok()?;
        DateTime::from_timestamp(self.seconds, nanos)
    }
}

/// Decode a full frame buffer into its four records
pub fn decode_frame(buffer: &[u8; FRAME_SIZE]) -> Frame {
    let record = |index: usize| {
        let bytes: [u8; RECORD_SIZE] = field(buffer, index * RECORD_SIZE);
        InputEvent::decode(&bytes)
    };

    Frame {
        x: record(0),
        y: record(1),
        z: record(2),
        sync: record(3),
    }
}

/// Encode a frame of three absolute axis values followed by a sync marker
pub fn encode_frame(x: i32, y: i32, z: i32) -> [u8; FRAME_SIZE] {
    let axis = |code: u16, value: i32| InputEvent {
        event_type: EV_ABS,
        code,
        value,
        ..InputEvent::default()
    };
    let events = [
        axis(0, x),
        axis(1, y),
        axis(2, z),
        InputEvent {
            event_type: EV_SYN,
            ..InputEvent::default()
        },
    ];

    let mut out = [0u8; FRAME_SIZE];
    for (i, event) in events.iter().enumerate() {
        out[i * RECORD_SIZE..(i + 1) * RECORD_SIZE].copy_from_slice(&event.to_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_size_matches_platform() {
        // 16-byte timeval on 64-bit targets
        if LONG_SIZE == 8 {
            assert_eq!(RECORD_SIZE, 24);
        }
        assert_eq!(FRAME_SIZE, 4 * RECORD_SIZE);
    }

    #[test]
    fn test_decode_record_fields() {
        let event = InputEvent {
            seconds: 1_700_000_000,
            micros: 250_000,
            event_type: EV_ABS,
            code: 2,
            value: -987,
        };
        let decoded = InputEvent::decode(&event.to_bytes());
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_decode_frame_order() {
        let frame = decode_frame(&encode_frame(-12, 1000, 45));
        assert_eq!(frame.x.value, -12);
        assert_eq!(frame.y.value, 1000);
        assert_eq!(frame.z.value, 45);
        assert_eq!(frame.y.code, 1);
        assert!(frame.is_synced());
        assert!(!frame.has_zero_axis());
    }

    #[test]
    fn test_zero_axis_detection() {
        assert!(decode_frame(&encode_frame(0, 5, 5)).has_zero_axis());
        assert!(decode_frame(&encode_frame(5, 0, 5)).has_zero_axis());
        assert!(decode_frame(&encode_frame(5, 5, 0)).has_zero_axis());
    }

    #[test]
    fn test_timestamp_conversion() {
        let event = InputEvent {
            seconds: 10,
            micros: 500,
            ..InputEvent::default()
        };
        let ts = event.timestamp().expect("valid timestamp");
        assert_eq!(ts.timestamp(), 10);
        assert_eq!(ts.timestamp_subsec_micros(), 500);

        let bad = InputEvent {
            micros: -1,
            ..InputEvent::default()
        };
        assert!(bad.timestamp().is_none());
    }
}
