#![no_std]

//! A reader for the activity recordings (`.ttbin` files) of TomTom GPS
//! watches.
//!
//! The format is undocumented and has been reverse-engineered. A file is a
//! header followed by tag-prefixed records; the header carries a dictionary of
//! record lengths, which is used to skip over records whose meaning is not
//! known. Position records become waypoints, grouped into segments, and heart
//! rate records are attached to the most recent waypoint.
//!
//! Most users should begin with the functions and the [`TrackSink`] trait in
//! the [`avec`] module. Applications needing finer control (such as those
//! running on embedded systems) can drive the finite-state machine described
//! in the [`sans`] module directly.
//!
//! [`TrackSink`]: avec::TrackSink
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the reader-based decoder and the [`avec::Tracks`] sink
//!   (default).

pub mod avec;
pub mod sans;
