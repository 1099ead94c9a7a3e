//! File total (type 7) record, the last line of every file.

use crate::error::Result;
use crate::format::{expect_tag, expect_width, field, number_field, pad_right, spaces, zero_fill, LINE_WIDTH};

/// Record-type tag of the trailer line.
pub const TRAILER_TAG: u8 = b'7';

/// BSB filler that always occupies positions 2-8 of the trailer.
pub const TRAILER_BSB: &str = "999-999";

/// The file total record.
///
/// Built by the [`Writer`](crate::Writer) from the detail records it emits,
/// never supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    /// Always [`TRAILER_BSB`] when written.
    pub bsb: String,

    /// Credit total minus debit total, in cents.
    pub net_total: u64,

    /// Sum of all credit items, in cents.
    pub credit_total: u64,

    /// Sum of all debit items, in cents.
    pub debit_total: u64,

    /// Number of detail records in the file.
    pub record_count: u32,
}

impl Trailer {
    /// Creates a trailer with zero totals.
    pub fn new() -> Self {
        Trailer {
            bsb: TRAILER_BSB.to_string(),
            net_total: 0,
            credit_total: 0,
            debit_total: 0,
            record_count: 0,
        }
    }

    /// Encodes the trailer as a 120-character line without terminator.
    pub fn encode(&self) -> String {
        let mut line = String::with_capacity(LINE_WIDTH);
        line.push(char::from(TRAILER_TAG));
        line.push_str(&pad_right(&self.bsb, 7, ' '));
        line.push_str(&spaces(12));
        line.push_str(&zero_fill(self.net_total, 10));
        line.push_str(&zero_fill(self.credit_total, 10));
        line.push_str(&zero_fill(self.debit_total, 10));
        line.push_str(&spaces(24));
        line.push_str(&zero_fill(u64::from(self.record_count), 6));
        pad_right(&line, LINE_WIDTH, ' ')
    }

    /// Decodes a trailer line.
    ///
    /// Unlike the other records the line must be exactly 120 characters,
    /// terminator already removed.
    pub fn decode(line: &str) -> Result<Self> {
        expect_width(line)?;
        expect_tag(line, TRAILER_TAG)?;

        Ok(Trailer {
            bsb: field(line, 1, 8),
            net_total: number_field(line, 20, 30),
            credit_total: number_field(line, 30, 40),
            debit_total: number_field(line, 40, 50),
            record_count: u32::try_from(number_field(line, 74, 80)).unwrap_or_default(),
        })
    }
}

impl Default for Trailer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AbaError;

    fn sample() -> Trailer {
        Trailer {
            bsb: TRAILER_BSB.to_string(),
            net_total: 1000,
            credit_total: 3000,
            debit_total: 2000,
            record_count: 3,
        }
    }

    #[test]
    fn test_encode_layout() {
        let line = sample().encode();
        assert_eq!(line.len(), 120);
        assert_eq!(&line[0..8], "7999-999");
        assert_eq!(&line[8..20], " ".repeat(12));
        assert_eq!(&line[20..30], "0000001000");
        assert_eq!(&line[30..40], "0000003000");
        assert_eq!(&line[40..50], "0000002000");
        assert_eq!(&line[50..74], " ".repeat(24));
        assert_eq!(&line[74..80], "000003");
        assert_eq!(&line[80..120], " ".repeat(40));
    }

    #[test]
    fn test_roundtrip() {
        let trailer = sample();
        assert_eq!(Trailer::decode(&trailer.encode()).unwrap(), trailer);
    }

    #[test]
    fn test_decode_requires_exact_width() {
        let line = sample().encode();
        assert!(matches!(
            Trailer::decode(&line[..119]),
            Err(AbaError::MalformedLine { actual: 119, .. })
        ));
        assert!(matches!(
            Trailer::decode(&format!("{}\n", line)),
            Err(AbaError::MalformedLine { actual: 121, .. })
        ));
    }
}
