//! Table of record payload lengths declared by a document header.

/// Payload lengths of record types, keyed by tag.
///
/// Populated from the [`LengthEntry`](super::header::LengthEntry) states of a
/// document header and consulted only for records without a dedicated
/// decoder.
#[derive(Debug, Clone)]
pub struct LengthDictionary([Option<u16>; 256]);

impl LengthDictionary {
    /// Create an empty dictionary.
    pub const fn new() -> Self {
        Self([None; 256])
    }

    /// Store the payload length of a tag, replacing any earlier declaration.
    pub fn insert(&mut self, tag: u8, length: u16) {
        self.0[tag as usize] = Some(length);
    }

    /// Retrieve the payload length of a tag, if one was declared.
    pub fn get(&self, tag: u8) -> Option<u16> {
        self.0[tag as usize]
    }

    /// Number of tags with a declared length.
    pub fn len(&self) -> usize {
        self.0.iter().filter(|l| l.is_some()).count()
    }

    /// Whether no tag has a declared length.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

impl Default for LengthDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_declarations_replace_earlier_ones() {
        let mut d = LengthDictionary::new();
        assert!(d.is_empty());

        d.insert(0x2f, 9);
        d.insert(0x2f, 12);
        d.insert(0xff, 1);

        assert_eq!(d.get(0x2f), Some(12));
        assert_eq!(d.get(0xff), Some(1));
        assert_eq!(d.get(0x00), None);
        assert_eq!(d.len(), 2);
    }
}
