//! Parse state shared by the reader and slice decoders.

use thiserror::Error;
use tracing::{debug, error, trace, warn};

use crate::sans::{
    dictionary::LengthDictionary,
    header::{Header, Preamble},
    record::{
        HeartRate, Indicator, Lap, Opaque, Position, ReservedTag, SegmentMarker,
        UNIDENTIFIED_TAGS,
    },
};

use super::{TrackSink, Waypoint};

/// Errors in the order of records, common to all decoders.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Found a position record outside of a segment.")]
    PositionOutsideSegment,
    #[error("Found tag 0x{0:02x} with no declared length.")]
    UnknownRecordLength(u8),
}

/// State of a single decoding pass over a document.
///
/// Holds the length dictionary and the handles of the open segment and most
/// recent waypoint, publishing to the document receiver.
pub(super) struct Session<'o, O: TrackSink> {
    sink: &'o mut O,
    lengths: LengthDictionary,
    segment: Option<O::Segment>,
    point: Option<O::Point>,
}

impl<'o, O: TrackSink> Session<'o, O> {
    pub fn new(sink: &'o mut O) -> Self {
        Self {
            sink,
            lengths: LengthDictionary::new(),
            segment: None,
            point: None,
        }
    }

    pub fn header(&mut self, preamble: Preamble, timestamp_again: u32, record_types: u8) -> Header {
        let Preamble {
            format_version,
            watch_version,
            timestamp,
        } = preamble;

        if timestamp_again != timestamp {
            warn!(
                "Second header timestamp ({timestamp_again}) did not match first ({timestamp})."
            );
        }

        debug!(
            "Header: watch version {watch_version:?}, timestamp {timestamp}, {record_types} record types."
        );

        Header {
            format_version,
            watch_version,
            timestamp,
            timestamp_again,
            record_types,
        }
    }

    pub fn declare_length(&mut self, tag: u8, length: u16) {
        trace!("Tag 0x{tag:02x} has payload length {length}.");
        self.lengths.insert(tag, length);
    }

    pub fn segment(&mut self, marker: SegmentMarker) {
        match marker.indicator {
            Indicator::WorkoutStart | Indicator::WorkoutEnd => return,
            Indicator::SegmentStart => {
                debug!("Segment start ({}) at {}.", marker.activity, marker.timestamp);
                self.segment = Some(self.sink.begin_segment(marker.activity));
            }
            Indicator::SegmentEnd => {
                debug!("Segment end at {}.", marker.timestamp);
                self.segment = None;
            }
            Indicator::Unrecognised(code) => {
                warn!("Ignoring unrecognised segment indicator 0x{code:02x}.");
                return;
            }
        }

        self.point = None;
    }

    pub fn position(&mut self, position: Position) -> Result<(), SessionError> {
        let segment = self.segment.ok_or(SessionError::PositionOutsideSegment)?;

        if let Some(waypoint) = Waypoint::from_position(&position) {
            self.point = Some(self.sink.append_point(segment, waypoint));
        } else {
            trace!("Skipping position without GPS fix.");
        }

        Ok(())
    }

    pub fn heart_rate(&mut self, heart_rate: HeartRate) {
        match self.point {
            Some(point) => self.sink.set_heart_rate(point, heart_rate.heart_rate),
            None => warn!("Ignoring heart rate before GPS record."),
        }
    }

    pub fn lap(&mut self, lap: Lap) {
        debug!("Lap of {} s, ending at {} m.", lap.duration, lap.distance);
    }

    /// Find the number of payload bytes to skip for a record that is not
    /// decoded.
    pub fn skip_length(
        &self,
        reserved: Option<ReservedTag>,
        state: &Opaque,
    ) -> Result<u16, SessionError> {
        let tag = state.tag();

        let Some(length) = self.lengths.get(tag) else {
            // Without a length, the next tag can't be found.
            error!("Tag 0x{tag:02x} with unknown length; unable to continue.");
            return Err(SessionError::UnknownRecordLength(tag));
        };

        match reserved {
            Some(reserved) => trace!("Skipping {reserved:?} record ({length} bytes)."),
            None if UNIDENTIFIED_TAGS.contains(&tag) => {
                trace!("Skipping tag 0x{tag:02x} ({length} bytes).")
            }
            None => debug!("Skipping unrecognised tag 0x{tag:02x} ({length} bytes)."),
        }

        Ok(length)
    }
}
