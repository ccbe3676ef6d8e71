//! Slice-based decoder implementation.

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

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// Unexpectedly reached the end of the slice within a record.
    #[error("Unexpectedly reached the end of the slice.")]
    EndOfSlice,
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
    /// slice.
    #[error("Unexpectedly reached the end of the slice while skipping tag 0x{tag:02x} ({length} bytes).")]
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

/// Decode a document from a slice, publishing to a receiver.
///
/// Returns the document header.
///
/// This method is also re-exported as `ttbin::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl TrackSink) -> Result<Header, Error> {
    let i = &mut 0; // Counter of bytes read, used to read bytes from the tip.

    let mut session = Session::new(o);

    let (header, mut record_tag) = decode_header(r, i, &mut session)?;

    while *i < r.len() {
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
                skip(r, i, state.tag(), length)?;
                state.advance()
            }
            AnyRecord::Unknown(state) => {
                let length = session.skip_length(None, &state)?;
                skip(r, i, state.tag(), length)?;
                state.advance()
            }
        };
    }

    Ok(header)
}

fn decode_header<O: TrackSink>(
    r: &[u8],
    i: &mut usize,
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

    Ok(match successor {
        Left(mut state) => loop {
            let (tag, length, successor) = state.advance(take(r, i)?);
            session.declare_length(tag, length);

            state = match successor {
                Left(state) => state,
                Right(state) => break (header, state),
            };
        },
        Right(state) => (header, state),
    })
}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], Error> {
    let s = *i;
    let bytes = r.get(s..s + N).ok_or(Error::EndOfSlice)?;
    *i += N;

    bytes.try_into().map_err(|_| Error::EndOfSlice)
}

/// Skip over the payload of a record, advancing the offset.
fn skip(r: &[u8], i: &mut usize, tag: u8, length: u16) -> Result<(), Error> {
    let length_usize = usize::from(length);

    if *i + length_usize > r.len() {
        Err(Error::SkipPastEnd { tag, length })?;
    }

    *i += length_usize;

    Ok(())
}
