//! States processing the document header.

use either::Either::{self, Left, Right};
use thiserror::Error;
use zerocopy::{FromBytes, byteorder::little_endian::U32};

use super::record::RecordTag;

/// Tag of the document header, the first byte of every document.
pub const HEADER_TAG: u8 = 0x20;

/// The only supported format version.
pub const FORMAT_VERSION: u8 = 7;

/// An error advancing over a document header.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Incorrect header tag.
    #[error("Expected header tag 0x20, found 0x{0:02x}.")]
    NotTtbinData(u8),
    /// Unsupported format version.
    #[error("Unrecognised format version {0} (expected 7).")]
    UnsupportedVersion(u8),
}

/// Fields of a document header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub format_version: u8,
    /// Firmware version of the recording watch, uninterpreted.
    pub watch_version: [u8; 4],
    /// Seconds since the Unix epoch.
    pub timestamp: u32,
    /// Repetition of `timestamp`. Expected to match, but not required to.
    pub timestamp_again: u32,
    /// Number of record types declared in the length dictionary.
    pub record_types: u8,
}

/// State token to decode the document tag.
#[derive(Debug)]
pub struct DocumentTag;

impl DocumentTag {
    /// Transition to another state by decoding the document tag.
    ///
    /// Returns a successor state token.
    pub fn advance(r: [u8; 1]) -> Result<DocumentHeader, HeaderError> {
        match r[0] {
            HEADER_TAG => Ok(DocumentHeader(())),
            tag => Err(HeaderError::NotTtbinData(tag)),
        }
    }
}

/// Leading fields of a document header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preamble {
    pub format_version: u8,
    pub watch_version: [u8; 4],
    pub timestamp: u32,
}

/// State token to decode the leading fields of a document header.
#[derive(Debug)]
pub struct DocumentHeader(pub(super) ());

impl DocumentHeader {
    /// Transition to another state by decoding the leading fields of a
    /// document header.
    ///
    /// Returns the decoded fields, and a successor state token.
    pub fn advance(self, r: [u8; 11]) -> Result<(Preamble, Filler), HeaderError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawPreamble {
            format_version: u8,
            watch_version: [u8; 4],
            _unknown: [u8; 2],
            timestamp: U32,
        }

        let RawPreamble {
            format_version,
            watch_version,
            timestamp,
            ..
        } = zerocopy::transmute!(r);

        if format_version != FORMAT_VERSION {
            Err(HeaderError::UnsupportedVersion(format_version))?;
        }

        let preamble = Preamble {
            format_version,
            watch_version,
            timestamp: timestamp.get(),
        };

        Ok((preamble, Filler(())))
    }
}

/// State token to decode a byte of the filler run between the two header
/// timestamps.
#[derive(Debug)]
pub struct Filler(pub(super) ());

impl Filler {
    /// Transition to another state by decoding a single byte.
    ///
    /// Filler bytes are `0x00` and `0x2d`. The first other byte begins the
    /// second timestamp, and is carried into the successor state.
    ///
    /// Returns a successor state token.
    pub fn advance(self, r: [u8; 1]) -> Either<Filler, HeaderTail> {
        match r[0] {
            0x00 | 0x2d => Left(Filler(())),
            first => Right(HeaderTail { first }),
        }
    }
}

/// State token to decode the remainder of a document header, up to the
/// length dictionary.
#[derive(Debug)]
pub struct HeaderTail {
    first: u8,
}

impl HeaderTail {
    /// Transition to another state by decoding the remainder of a document
    /// header.
    ///
    /// Returns the second timestamp, the number of record types declared, and
    /// a successor state token.
    pub fn advance(self, r: [u8; 9]) -> (u32, u8, Either<LengthEntry, RecordTag>) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawTail {
            timestamp: [u8; 3],
            _unknown: [u8; 5],
            record_types: u8,
        }

        let RawTail {
            timestamp,
            record_types,
            ..
        } = zerocopy::transmute!(r);

        let [a, b, c] = timestamp;
        let timestamp = u32::from_le_bytes([self.first, a, b, c]);

        let successor = if record_types != 0 {
            Left(LengthEntry {
                entries_remaining: record_types,
            })
        } else {
            Right(RecordTag(()))
        };

        (timestamp, record_types, successor)
    }
}

/// State token to decode an entry of the length dictionary.
#[derive(Debug)]
pub struct LengthEntry {
    entries_remaining: u8,
}

impl LengthEntry {
    /// Transition to another state by decoding an entry of the length
    /// dictionary.
    ///
    /// The declared length includes the tag byte. Returns the tag, the length
    /// of its payload (excluding the tag byte), and a successor state token.
    ///
    /// A declared length of 0 cannot include the tag byte, and wraps to
    /// `u16::MAX` so that skipping the record fails rather than misaligns.
    pub fn advance(self, r: [u8; 3]) -> (u8, u16, Either<LengthEntry, RecordTag>) {
        let [tag, length @ ..] = r;
        let length = u16::from_le_bytes(length).wrapping_sub(1);

        let entries_remaining = self.entries_remaining - 1;

        let successor = if entries_remaining != 0 {
            Left(LengthEntry { entries_remaining })
        } else {
            Right(RecordTag(()))
        };

        (tag, length, successor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_other_documents() {
        assert!(matches!(
            DocumentTag::advance([0x0e]),
            Err(HeaderError::NotTtbinData(0x0e))
        ));
    }

    #[test]
    fn rejects_other_versions() {
        let state = DocumentTag::advance([0x20]).unwrap();
        let r = [8, 1, 2, 3, 4, 0xeb, 0x03, 0, 0, 0, 0];

        assert!(matches!(
            state.advance(r),
            Err(HeaderError::UnsupportedVersion(8))
        ));
    }

    #[test]
    fn decodes_preamble() {
        let state = DocumentTag::advance([0x20]).unwrap();
        let r = [7, 1, 2, 3, 4, 0xeb, 0x03, 0x78, 0x56, 0x34, 0x12];

        let (preamble, _) = state.advance(r).unwrap();

        assert_eq!(preamble.format_version, 7);
        assert_eq!(preamble.watch_version, [1, 2, 3, 4]);
        assert_eq!(preamble.timestamp, 0x1234_5678);
    }

    #[test]
    fn filler_ends_at_first_other_byte() {
        let state = Filler(());
        let Left(state) = state.advance([0x00]) else {
            panic!()
        };
        let Left(state) = state.advance([0x2d]) else {
            panic!()
        };
        let Right(tail) = state.advance([0x78]) else {
            panic!()
        };

        let (timestamp, record_types, successor) =
            tail.advance([0x56, 0x34, 0x12, 0xa0, 0x8c, 0, 0, 0, 0]);

        assert_eq!(timestamp, 0x1234_5678);
        assert_eq!(record_types, 0);
        assert!(successor.is_right());
    }

    #[test]
    fn length_entries_exclude_tag_byte() {
        let tail = HeaderTail { first: 0x01 };
        let (_, record_types, successor) = tail.advance([0, 0, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(record_types, 2);

        let Left(entry) = successor else { panic!() };
        let (tag, length, successor) = entry.advance([0x2f, 10, 0]);
        assert_eq!((tag, length), (0x2f, 9));

        let Left(entry) = successor else { panic!() };
        let (tag, length, successor) = entry.advance([0x27, 0x01, 0x01]);
        assert_eq!((tag, length), (0x27, 0x100));
        assert!(successor.is_right());
    }

    #[test]
    fn zero_declared_length_wraps() {
        let entry = LengthEntry {
            entries_remaining: 1,
        };
        let (_, length, _) = entry.advance([0x99, 0, 0]);
        assert_eq!(length, u16::MAX);
    }
}
