//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{Read, Seek, SeekFrom};

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    header::{Header, HeaderError},
    record::{AnyRecord, RecordTag},
};

use super::{
    TrackSink,
    session::{Session, SessionError},
};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader, including unexpectedly reaching
    /// the end of the document within a record.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Incorrect file header.
    #[error("Incorrect file header: {0}")]
    Header(#[from] HeaderError),
    /// Found a position record while no segment was open.
    #[error("Found a position record outside of a segment.")]
    PositionOutsideSegment,
    /// Found a record that is not decoded, and has no declared length.
    #[error("Found tag 0x{tag:02x} with no declared length; unable to continue.")]
    UnknownRecordLength { tag: u8 },
    /// The declared length of a skipped record runs past the end of the
    /// document.
    #[error("Unexpectedly reached the end of the file while skipping tag 0x{tag:02x} ({length} bytes).")]
    SkipPastEnd { tag: u8, length: u16 },
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::PositionOutsideSegment => Self::PositionOutsideSegment,
            SessionError::UnknownRecordLength(tag) => Self::UnknownRecordLength { tag },
        }
    }
}

/// Decode a document from a reader, publishing to a receiver.
///
/// The reader must be positioned at the start of the document, which extends
/// to the end of the stream. Returns the document header.
///
/// This method is also re-exported as `ttbin::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut (impl Read + Seek), o: &mut impl TrackSink) -> Result<Header, Error> {
    // Offset to the end of the document, used to end decoding.
    let start = r.stream_position()?;
    let end = r.seek(SeekFrom::End(0))?;
    r.seek(SeekFrom::Start(start))?;

    let mut offset = start;
    let i = &mut offset; // Offset of the next byte to read.

    let mut session = Session::new(o);

    let (header, mut record_tag) = decode_header(r, i, &mut session)?;

    while *i < end {
        record_tag = match record_tag.advance(take(r, i)?) {
            AnyRecord::Segment(state) => {
                let (marker, successor) = state.advance(take(r, i)?);
                session.segment(marker);
                successor
            }
            AnyRecord::Position(state) => {
                let (position, successor) = state.advance(take(r, i)?);
                session.position(position)?;
                successor
            }
            AnyRecord::HeartRate(state) => {
                let (heart_rate, successor) = state.advance(take(r, i)?);
                session.heart_rate(heart_rate);
                successor
            }
            AnyRecord::Lap(state) => {
                let (lap, successor) = state.advance(take(r, i)?);
                session.lap(lap);
                successor
            }
            AnyRecord::Reserved(reserved, state) => {
                let length = session.skip_length(Some(reserved), &state)?;
                skip(r, i, end, state.tag(), length)?;
                state.advance()
            }
            AnyRecord::Unknown(state) => {
                let length = session.skip_length(None, &state)?;
                skip(r, i, end, state.tag(), length)?;
                state.advance()
            }
        };
    }

    Ok(header)
}

fn decode_header<O: TrackSink>(
    r: &mut impl Read,
    i: &mut u64,
    session: &mut Session<'_, O>,
) -> Result<(Header, RecordTag), Error> {
    let state = Decoder::advance(take(r, i)?)?;
    let (preamble, mut filler) = state.advance(take(r, i)?)?;

    let tail = loop {
        filler = match filler.advance(take(r, i)?) {
            Left(state) => state,
            Right(state) => break state,
        };
    };

    let (timestamp_again, record_types, successor) = tail.advance(take(r, i)?);
    let header = session.header(preamble, timestamp_again, record_types);

    let record_tag = match successor {
        Left(mut state) => loop {
            let (tag, length, successor) = state.advance(take(r, i)?);
            session.declare_length(tag, length);

            state = match successor {
                Left(state) => state,
                Right(state) => break state,
            };
        },
        Right(state) => state,
    };

    Ok((header, record_tag))
}

/// Take an exact number of bytes from a reader, advancing the offset.
fn take<const N: usize>(r: &mut impl Read, i: &mut u64) -> Result<[u8; N], Error> {
    let mut buf = [0; N];
    r.read_exact(&mut buf)?;
    *i += N as u64;

    Ok(buf)
}

/// Seek over the payload of a record, advancing the offset.
fn skip(r: &mut impl Seek, i: &mut u64, end: u64, tag: u8, length: u16) -> Result<(), Error> {
    if *i + u64::from(length) > end {
        Err(Error::SkipPastEnd { tag, length })?;
    }

    r.seek(SeekFrom::Current(i64::from(length)))?;
    *i += u64::from(length);

    Ok(())
}
