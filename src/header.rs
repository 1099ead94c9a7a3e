//! Descriptive (type 0) record, the first line of every file.

use crate::error::Result;
use crate::format::{
    expect_tag, expect_width, field, number_field, pad_right, sanitize, spaces, strip_terminator,
    zero_fill, LINE_WIDTH,
};
use chrono::NaiveDate;

/// Record-type tag of the header line.
pub const HEADER_TAG: u8 = b'0';

const DATE_FORMAT: &str = "%d%m%y";

/// The descriptive record identifying the submitter and processing date.
///
/// Layout (1-indexed): tag at 1, sequence number at 19-20, bank mnemonic at
/// 21-23, submitter name at 31-56, APCA ID at 57-62, description at 63-74 and
/// processing date (`DDMMYY`) at 75-80. Everything else is blank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    /// Reel sequence number, 1-99.
    pub sequence_number: u8,

    /// Three letter mnemonic of the submitter's bank, e.g. `MBL`.
    pub bank: String,

    /// Name of the submitting user, as preferred by the bank.
    pub submitter_name: String,

    /// User identification number allocated by APCA.
    pub apca_id: u32,

    /// Description of the entries, e.g. `PAYROLL`.
    pub description: String,

    /// Date the entries are to be processed.
    pub processing_date: NaiveDate,
}

impl Header {
    /// Encodes the header as a 120-character line without terminator.
    pub fn encode(&self) -> String {
        let mut line = String::with_capacity(LINE_WIDTH);
        line.push(char::from(HEADER_TAG));
        line.push_str(&spaces(17));
        line.push_str(&zero_fill(u64::from(self.sequence_number), 2));
        line.push_str(&pad_right(&sanitize(&self.bank), 3, ' '));
        line.push_str(&spaces(7));
        line.push_str(&pad_right(&sanitize(&self.submitter_name), 26, ' '));
        line.push_str(&zero_fill(u64::from(self.apca_id), 6));
        line.push_str(&pad_right(&sanitize(&self.description), 12, ' '));
        line.push_str(&self.processing_date.format(DATE_FORMAT).to_string());
        pad_right(&line, LINE_WIDTH, ' ')
    }

    /// Decodes a header line, with or without its terminator.
    ///
    /// Sub-fields that don't parse are left at their zero value.
    pub fn decode(line: &str) -> Result<Self> {
        let line = strip_terminator(line);
        expect_width(line)?;
        expect_tag(line, HEADER_TAG)?;

        Ok(Header {
            sequence_number: field(line, 18, 20).parse().unwrap_or_default(),
            bank: field(line, 20, 23),
            submitter_name: field(line, 30, 56),
            apca_id: u32::try_from(number_field(line, 56, 62)).unwrap_or_default(),
            description: field(line, 62, 74),
            processing_date: NaiveDate::parse_from_str(&field(line, 74, 80), DATE_FORMAT)
                .unwrap_or_default(),
        })
    }
}
