//! States processing body records.

use core::fmt;

use zerocopy::{
    FromBytes,
    byteorder::little_endian::{F32, I32, U16, U32},
};

/// Timestamp of a position record taken without a GPS fix.
pub const NO_FIX: u32 = 0xFFFF_FFFF;

/// Tags seen in recordings whose payload is not understood. Like the
/// [`ReservedTag`]s, these are skipped by their dictionary length.
pub const UNIDENTIFIED_TAGS: [u8; 15] = [
    0x23, 0x2a, 0x2b, 0x2d, 0x30, 0x31, 0x35, 0x37, 0x39, 0x3a, 0x3b, 0x3c, 0x3d, 0x3e, 0x3f,
];

/// State token to decode a record tag.
#[derive(Debug)]
pub struct RecordTag(pub(super) ());

impl RecordTag {
    /// Transition to another state by decoding a record tag.
    ///
    /// Returns a successor state token for the record's payload.
    pub fn advance(self, r: [u8; 1]) -> AnyRecord {
        match r[0] {
            0x21 => AnyRecord::Segment(SegmentRecord(())),
            0x22 => AnyRecord::Position(PositionRecord(())),
            0x25 => AnyRecord::HeartRate(HeartRateRecord(())),
            0x2f => AnyRecord::Lap(LapRecord(())),
            tag => match ReservedTag::from_tag(tag) {
                Some(reserved) => AnyRecord::Reserved(reserved, Opaque { tag }),
                None => AnyRecord::Unknown(Opaque { tag }),
            },
        }
    }
}

/// A state token for the payload of a record.
#[derive(Debug)]
pub enum AnyRecord {
    /// Tag `0x21`.
    Segment(SegmentRecord),
    /// Tag `0x22`.
    Position(PositionRecord),
    /// Tag `0x25`.
    HeartRate(HeartRateRecord),
    /// Tag `0x2f`.
    Lap(LapRecord),
    /// A known record type that is not decoded.
    Reserved(ReservedTag, Opaque),
    /// Any other record type.
    Unknown(Opaque),
}

/// Record types known by name, but not decoded.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedTag {
    Summary = 0x27,
    Treadmill = 0x32,
    Swim = 0x34,
}

impl ReservedTag {
    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x27 => Some(Self::Summary),
            0x32 => Some(Self::Treadmill),
            0x34 => Some(Self::Swim),
            _ => None,
        }
    }
}

/// State token for the payload of a record that is not decoded.
#[derive(Debug)]
pub struct Opaque {
    tag: u8,
}

impl Opaque {
    /// The record's tag, used to find its payload length.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Transition to another state once the payload has been skipped.
    ///
    /// **This method does not consume bytes.** The caller must first skip the
    /// number of bytes declared for [`Opaque::tag`] in the length dictionary.
    pub fn advance(self) -> RecordTag {
        RecordTag(())
    }
}

/// Kind of activity recorded in a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Running,
    Cycling,
    Other(u8),
}

impl From<u8> for Activity {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Running,
            1 => Self::Cycling,
            code => Self::Other(code),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("Running"),
            Self::Cycling => f.write_str("Cycling"),
            Self::Other(code) => write!(f, "Activity {code}"),
        }
    }
}

/// Meaning of a segment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    WorkoutStart,
    SegmentStart,
    SegmentEnd,
    WorkoutEnd,
    Unrecognised(u8),
}

impl From<u8> for Indicator {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::WorkoutStart,
            1 => Self::SegmentStart,
            2 => Self::SegmentEnd,
            3 => Self::WorkoutEnd,
            code => Self::Unrecognised(code),
        }
    }
}

/// A segment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentMarker {
    pub indicator: Indicator,
    pub activity: Activity,
    pub timestamp: u32,
}

/// State token to decode the payload of a segment record.
#[derive(Debug)]
pub struct SegmentRecord(pub(super) ());

impl SegmentRecord {
    /// Transition to another state by decoding a segment record.
    ///
    /// Returns the record, and a successor state token.
    pub fn advance(self, r: [u8; 6]) -> (SegmentMarker, RecordTag) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawSegment {
            indicator: u8,
            activity: u8,
            timestamp: U32,
        }

        let RawSegment {
            indicator,
            activity,
            timestamp,
        } = zerocopy::transmute!(r);

        let marker = SegmentMarker {
            indicator: indicator.into(),
            activity: activity.into(),
            timestamp: timestamp.get(),
        };

        (marker, RecordTag(()))
    }
}

/// A position record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in 1e-7 degrees.
    pub latitude: i32,
    /// Longitude in 1e-7 degrees.
    pub longitude: i32,
    /// Speed in 0.01 m/s.
    pub speed: u16,
    /// Seconds since the Unix epoch, or [`NO_FIX`].
    pub timestamp: u32,
    pub calories: u16,
    /// Distance since the previous position, in metres.
    pub distance_increment: f32,
    /// Distance since the start of the workout, in metres.
    pub distance: f32,
    /// Cycles (likely steps) since the previous position.
    pub cycles: u8,
}

impl Position {
    /// Whether the watch had a GPS fix when recording.
    pub fn has_fix(&self) -> bool {
        self.timestamp != NO_FIX
    }
}

/// State token to decode the payload of a position record.
#[derive(Debug)]
pub struct PositionRecord(pub(super) ());

impl PositionRecord {
    /// Transition to another state by decoding a position record.
    ///
    /// Returns the record, and a successor state token.
    pub fn advance(self, r: [u8; 27]) -> (Position, RecordTag) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawPosition {
            latitude: I32,
            longitude: I32,
            _unknown: [u8; 2],
            speed: U16,
            timestamp: U32,
            calories: U16,
            distance_increment: F32,
            distance: F32,
            cycles: u8,
        }

        let RawPosition {
            latitude,
            longitude,
            speed,
            timestamp,
            calories,
            distance_increment,
            distance,
            cycles,
            ..
        } = zerocopy::transmute!(r);

        let position = Position {
            latitude: latitude.get(),
            longitude: longitude.get(),
            speed: speed.get(),
            timestamp: timestamp.get(),
            calories: calories.get(),
            distance_increment: distance_increment.get(),
            distance: distance.get(),
            cycles,
        };

        (position, RecordTag(()))
    }
}

/// A heart rate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartRate {
    /// Beats per minute.
    pub heart_rate: u8,
    pub timestamp: u32,
}

/// State token to decode the payload of a heart rate record.
#[derive(Debug)]
pub struct HeartRateRecord(pub(super) ());

impl HeartRateRecord {
    /// Transition to another state by decoding a heart rate record.
    ///
    /// Returns the record, and a successor state token.
    pub fn advance(self, r: [u8; 6]) -> (HeartRate, RecordTag) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawHeartRate {
            heart_rate: u8,
            _unknown: u8,
            timestamp: U32,
        }

        let RawHeartRate {
            heart_rate,
            timestamp,
            ..
        } = zerocopy::transmute!(r);

        let heart_rate = HeartRate {
            heart_rate,
            timestamp: timestamp.get(),
        };

        (heart_rate, RecordTag(()))
    }
}

/// A lap record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lap {
    /// Seconds since the start of the lap.
    pub duration: u32,
    /// Distance since the start of the workout, in metres.
    pub distance: f32,
}

/// State token to decode the payload of a lap record.
#[derive(Debug)]
pub struct LapRecord(pub(super) ());

impl LapRecord {
    /// Transition to another state by decoding a lap record.
    ///
    /// Returns the record, and a successor state token.
    pub fn advance(self, r: [u8; 10]) -> (Lap, RecordTag) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawLap {
            duration: U32,
            distance: F32,
            _unknown: [u8; 2],
        }

        let RawLap {
            duration, distance, ..
        } = zerocopy::transmute!(r);

        let lap = Lap {
            duration: duration.get(),
            distance: distance.get(),
        };

        (lap, RecordTag(()))
    }
}
