#![allow(dead_code)]

/// First header timestamp used by [`Document::new`]. Its low byte is neither
/// filler value, so it can follow the filler run.
pub const TIMESTAMP: u32 = 0x5372_2801;

pub const NO_FIX: u32 = 0xFFFF_FFFF;

/// Writes documents byte by byte.
pub struct Document(Vec<u8>);

impl Document {
    /// A header with matching timestamps, a short filler run, and the given
    /// `(tag, payload length)` declarations.
    pub fn new(lengths: &[(u8, u16)]) -> Self {
        Self::with_header(7, TIMESTAMP, &[0x00, 0x00, 0x2d, 0x00], TIMESTAMP, lengths)
    }

    pub fn with_header(
        version: u8,
        timestamp: u32,
        filler: &[u8],
        timestamp_again: u32,
        lengths: &[(u8, u16)],
    ) -> Self {
        let mut d = vec![0x20, version, 1, 8, 2, 0, 0xeb, 0x03];
        d.extend_from_slice(&timestamp.to_le_bytes());
        d.extend_from_slice(filler);
        d.extend_from_slice(&timestamp_again.to_le_bytes());
        d.extend_from_slice(&[0xa0, 0x8c, 0x00, 0x00, 0x00]);
        d.push(lengths.len() as u8);

        for (tag, length) in lengths {
            // Declared lengths include the tag byte. A payload length of
            // `u16::MAX` declares 0.
            d.push(*tag);
            d.extend_from_slice(&length.wrapping_add(1).to_le_bytes());
        }

        Self(d)
    }

    pub fn segment(mut self, indicator: u8, activity: u8, timestamp: u32) -> Self {
        self.0.extend_from_slice(&[0x21, indicator, activity]);
        self.0.extend_from_slice(&timestamp.to_le_bytes());
        self
    }

    pub fn position(self, latitude: i32, longitude: i32, speed: u16, timestamp: u32) -> Self {
        self.position_with(latitude, longitude, speed, timestamp, 10, 1.0, 1.0, 5)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn position_with(
        mut self,
        latitude: i32,
        longitude: i32,
        speed: u16,
        timestamp: u32,
        calories: u16,
        distance_increment: f32,
        distance: f32,
        cycles: u8,
    ) -> Self {
        self.0.push(0x22);
        self.0.extend_from_slice(&latitude.to_le_bytes());
        self.0.extend_from_slice(&longitude.to_le_bytes());
        self.0.extend_from_slice(&[0x5a, 0xa5]);
        self.0.extend_from_slice(&speed.to_le_bytes());
        self.0.extend_from_slice(&timestamp.to_le_bytes());
        self.0.extend_from_slice(&calories.to_le_bytes());
        self.0.extend_from_slice(&distance_increment.to_le_bytes());
        self.0.extend_from_slice(&distance.to_le_bytes());
        self.0.push(cycles);
        self
    }

    pub fn heart_rate(mut self, heart_rate: u8, timestamp: u32) -> Self {
        self.0.extend_from_slice(&[0x25, heart_rate, 0x00]);
        self.0.extend_from_slice(&timestamp.to_le_bytes());
        self
    }

    pub fn lap(mut self, duration: u32, distance: f32) -> Self {
        self.0.push(0x2f);
        self.0.extend_from_slice(&duration.to_le_bytes());
        self.0.extend_from_slice(&distance.to_le_bytes());
        self.0.extend_from_slice(&[0x00, 0x00]);
        self
    }

    /// A record with an arbitrary payload.
    pub fn record(mut self, tag: u8, payload: &[u8]) -> Self {
        self.0.push(tag);
        self.0.extend_from_slice(payload);
        self
    }

    /// Bytes with no record structure, such as a truncated record.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.0
    }
}

/// An activity with two segments, exercising every record type. Its waypoints
/// are listed in `fixtures/two-segments.csv`.
pub fn two_segments() -> Vec<u8> {
    Document::new(&[(0x27, 20), (0x3b, 3), (0x2f, 9)])
        .segment(0, 1, 1000)
        .segment(1, 1, 1000)
        .position(515_000_000, -1_250_000, 512, 1001)
        .heart_rate(98, 1001)
        .position(0, 0, 0, NO_FIX)
        .heart_rate(99, 1002)
        .position(515_001_000, -1_249_000, 530, 1003)
        // Payload bytes resembling tags must not be read as records.
        .record(0x3b, &[0x22, 0x22, 0x22])
        .lap(600, 1000.0)
        .segment(2, 1, 1050)
        .heart_rate(100, 1051)
        .segment(1, 7, 1100)
        .position(-337_000_000, 1_512_000_000, 0, 1101)
        .heart_rate(140, 1101)
        .record(0x27, &[0x21; 20])
        .segment(2, 7, 1200)
        .segment(3, 7, 1200)
        .build()
}
