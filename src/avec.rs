//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode documents from readers and data
//! slices, publishing segments and waypoints to the [`TrackSink`] trait. A
//! sink that collects everything into memory is provided as [`Tracks`].

#[cfg(feature = "std")]
pub mod reader;
mod session;
pub mod slice;
#[cfg(feature = "std")]
mod tracks;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;
#[cfg(feature = "std")]
pub use tracks::{Track, Tracks};

pub use crate::sans::header::Header;
pub use crate::sans::record::Activity;

use crate::sans::record::Position;

/// A point on a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Speed in metres per second.
    pub speed: Option<f32>,
    /// Seconds since the Unix epoch.
    pub time: u32,
    /// Beats per minute, attached by a later heart rate record.
    pub heart_rate: Option<u8>,
}

impl Waypoint {
    /// Convert a position record to a waypoint, if it was taken with a GPS
    /// fix.
    pub fn from_position(position: &Position) -> Option<Self> {
        if !position.has_fix() {
            return None;
        }

        Some(Self {
            latitude: f64::from(position.latitude) / 1e7,
            longitude: f64::from(position.longitude) / 1e7,
            speed: Some(f32::from(position.speed) / 100.0),
            time: position.timestamp,
            heart_rate: None,
        })
    }
}

/// Receive segments and waypoints for a document.
///
/// Segments and waypoints are owned by the sink. The decoder refers back to
/// them only through the handles returned when they were created: the open
/// segment receives new waypoints, and the most recent waypoint receives heart
/// rate values.
///
/// See [`Tracks`] for an implementation collecting into memory.
pub trait TrackSink {
    /// Handle to a segment held by the sink.
    type Segment: Copy;
    /// Handle to a waypoint held by the sink.
    type Point: Copy;

    /// Begin a new segment.
    ///
    /// The segment's label is the [`Display`](core::fmt::Display) form of its
    /// activity: `Running`, `Cycling`, or `Activity N`.
    fn begin_segment(&mut self, activity: Activity) -> Self::Segment;

    /// Append a waypoint to a segment.
    fn append_point(&mut self, segment: Self::Segment, waypoint: Waypoint) -> Self::Point;

    /// Set the heart rate of a previously appended waypoint.
    fn set_heart_rate(&mut self, point: Self::Point, heart_rate: u8);
}
