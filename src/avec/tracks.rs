//! Sink collecting segments into memory.
//!
//! _Requires Cargo feature `std`._

use std::{string::String, string::ToString, vec::Vec};

use super::{Activity, TrackSink, Waypoint};

extern crate std;

/// A segment of an activity, as a named sequence of waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// `Running`, `Cycling`, or `Activity N`.
    pub name: String,
    pub activity: Activity,
    pub points: Vec<Waypoint>,
}

/// Every segment of a document, in order.
///
/// ```
/// let mut tracks = Tracks::default();
/// ttbin::avec::decode_slice(&data, &mut tracks)?;
///
/// for track in &tracks.tracks {
///     println!("{}: {} points", track.name, track.points.len());
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracks {
    pub tracks: Vec<Track>,
}

impl Tracks {
    /// Iterate over the waypoints of every segment.
    pub fn points(&self) -> impl Iterator<Item = &Waypoint> {
        self.tracks.iter().flat_map(|t| t.points.iter())
    }
}

impl TrackSink for Tracks {
    /// Index into `tracks`.
    type Segment = usize;
    /// Indices into `tracks` and that track's `points`.
    type Point = (usize, usize);

    fn begin_segment(&mut self, activity: Activity) -> Self::Segment {
        self.tracks.push(Track {
            name: activity.to_string(),
            activity,
            points: Vec::new(),
        });

        self.tracks.len() - 1
    }

    fn append_point(&mut self, segment: Self::Segment, waypoint: Waypoint) -> Self::Point {
        let points = &mut self.tracks[segment].points;
        points.push(waypoint);

        (segment, points.len() - 1)
    }

    fn set_heart_rate(&mut self, (segment, point): Self::Point, heart_rate: u8) {
        if let Some(waypoint) = self
            .tracks
            .get_mut(segment)
            .and_then(|t| t.points.get_mut(point))
        {
            waypoint.heart_rate = Some(heart_rate);
        }
    }
}
