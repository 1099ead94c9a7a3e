//! Line-at-a-time ABA file reader.

use crate::error::{AbaError, Result};
use crate::format::strip_terminator;
use crate::header::{Header, HEADER_TAG};
use crate::record::{DetailRecord, DETAIL_TAG};
use crate::trailer::{Trailer, TRAILER_TAG};
use log::{debug, warn};
use std::io::{BufRead, BufReader, Read};

/// One decoded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A header line, now available from [`Reader::header`].
    Header,
    /// A valid detail record.
    Detail(DetailRecord),
    /// A trailer line, now available from [`Reader::trailer`].
    Trailer,
}

/// Reads ABA files from any [`Read`] source.
///
/// Header and trailer lines populate [`Reader::header`] and
/// [`Reader::trailer`]; detail lines are handed back to the caller. Detail
/// lines that decode but fail validation are skipped by
/// [`Reader::read_all`] and counted in [`Reader::dropped`].
pub struct Reader<R: Read> {
    header: Option<Header>,
    trailer: Option<Trailer>,
    dropped: usize,
    line_number: usize,
    r: BufReader<R>,
}

impl<R: Read> Reader<R> {
    /// Creates a reader around `source`.
    pub fn new(source: R) -> Self {
        Reader {
            header: None,
            trailer: None,
            dropped: 0,
            line_number: 0,
            r: BufReader::new(source),
        }
    }

    /// The header, once its line has been read.
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// The trailer, once its line has been read.
    pub fn trailer(&self) -> Option<&Trailer> {
        self.trailer.as_ref()
    }

    /// Number of detail lines skipped by [`Reader::read_all`] for failing validation.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Reads and decodes the next line.
    ///
    /// Returns `Ok(None)` at end of input. An invalid detail line is reported
    /// as [`AbaError::InvalidDetail`] without ending the stream.
    pub fn read(&mut self) -> Result<Option<Line>> {
        let tag = match self.r.fill_buf()?.first() {
            Some(&byte) => byte,
            None => return Ok(None),
        };

        let mut raw = Vec::new();
        self.r.read_until(b'\n', &mut raw)?;
        self.line_number += 1;
        let text = String::from_utf8_lossy(&raw);
        let line = strip_terminator(&text);

        match tag {
            HEADER_TAG => {
                self.header = Some(Header::decode(line)?);
                Ok(Some(Line::Header))
            }
            DETAIL_TAG => DetailRecord::decode(line).map(|r| Some(Line::Detail(r))),
            TRAILER_TAG => {
                self.trailer = Some(Trailer::decode(line)?);
                Ok(Some(Line::Trailer))
            }
            byte => Err(AbaError::UnexpectedRecordType { byte }),
        }
    }

    /// Reads every remaining line and returns the valid detail records in order.
    pub fn read_all(&mut self) -> Result<Vec<DetailRecord>> {
        let mut records = Vec::new();
        loop {
            match self.read() {
                Ok(Some(Line::Detail(record))) => records.push(record),
                Ok(Some(_)) => {}
                Ok(None) => break,
                Err(AbaError::InvalidDetail) => {
                    warn!("Line {}: Invalid detail record, skipping", self.line_number);
                    self.dropped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        debug!(
            "Read {} detail records, dropped {}",
            records.len(),
            self.dropped
        );
        Ok(records)
    }
}
