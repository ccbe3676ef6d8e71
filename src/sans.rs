//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for advanced applications that need fine control
//! over decoder internals. See [`crate::avec`] for implementations covering
//! common decoding patterns.
//!
//! # Architecture
//!
//! All states are represented by a non-copy token. Once enough bytes are
//! ready, transition to another state by calling the token's `advance` method.
//! This will return a successor state token, along with any extracted data.
//!
//! The header is decoded by [`header::DocumentTag`],
//! [`header::DocumentHeader`], a run of [`header::Filler`] tokens,
//! [`header::HeaderTail`] and one [`header::LengthEntry`] per record type
//! declared by the file. Each entry should be stored in a
//! [`dictionary::LengthDictionary`]. The body is a sequence of records, each
//! starting at a [`record::RecordTag`].
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed.
//!
//! Some areas of the decoding process are not represented in the finite-state
//! machine and must be carefully written:
//!
//! - Reading bytes from the correct place in the document, including skipping
//! the payload of [`record::Opaque`] records by the length found in the
//! dictionary.
//!
//! - Ending decoding once the end of the document has been reached at a
//! record boundary.
//!
//! - Tracking the open segment and the most recent waypoint, which give
//! position and heart rate records their meaning.
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

pub mod dictionary;
pub mod header;
pub mod record;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::DocumentTag;
