//! Buffered ABA file writer.
//!
//! A [`Writer`] validates its configuration and every detail record before
//! anything reaches the sink, so a failing [`Writer::write`] never leaves a
//! partial file behind.

use crate::error::{AbaError, Result};
use crate::format::LINE_WIDTH;
use crate::header::Header;
use crate::record::{DetailRecord, TransactionCode};
use crate::trailer::Trailer;
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use std::io::{self, BufWriter, Write};

/// Smallest number of detail records a file may carry.
pub const MIN_RECORDS: usize = 2;

/// Submitter details and output options for a [`Writer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Three letter mnemonic of the submitter's bank.
    pub bank: String,

    /// Name of the submitting user.
    pub submitter_name: String,

    /// APCA user identification number; zero means unset.
    pub apca_id: u32,

    /// Description printed on the header, e.g. `PAYROLL`.
    pub description: String,

    /// Date the entries are to be processed.
    pub processing_date: NaiveDate,

    /// Reel sequence number.
    pub sequence_number: u8,

    /// Leave credit/debit/net totals at zero, for banks that don't want them.
    pub omit_batch_totals: bool,

    /// Terminate lines with `\r\n` instead of `\n`.
    pub crlf_line_endings: bool,
}

impl WriterConfig {
    /// Creates a configuration for the given submitter with default options.
    pub fn new(bank: impl Into<String>, submitter_name: impl Into<String>, apca_id: u32) -> Self {
        WriterConfig {
            bank: bank.into(),
            submitter_name: submitter_name.into(),
            apca_id,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_processing_date(mut self, date: NaiveDate) -> Self {
        self.processing_date = date;
        self
    }

    pub fn with_sequence_number(mut self, sequence_number: u8) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    pub fn with_omit_batch_totals(mut self, omit: bool) -> Self {
        self.omit_batch_totals = omit;
        self
    }

    pub fn with_crlf_line_endings(mut self, crlf: bool) -> Self {
        self.crlf_line_endings = crlf;
        self
    }

    /// Checks the submitter fields, in the order the bank reports them.
    fn validate(&self) -> Result<()> {
        if self.bank.trim().is_empty() {
            return Err(AbaError::MissingSubmitterBank);
        }
        if self.submitter_name.trim().is_empty() {
            return Err(AbaError::MissingSubmitterId);
        }
        if self.apca_id == 0 {
            return Err(AbaError::MissingApcaId);
        }
        Ok(())
    }

    fn line_ending(&self) -> &'static str {
        if self.crlf_line_endings {
            "\r\n"
        } else {
            "\n"
        }
    }

    fn header(&self) -> Header {
        Header {
            sequence_number: self.sequence_number,
            bank: self.bank.clone(),
            submitter_name: self.submitter_name.clone(),
            apca_id: self.apca_id,
            description: self.description.clone(),
            processing_date: self.processing_date,
        }
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            bank: String::new(),
            submitter_name: String::new(),
            apca_id: 0,
            description: "Creditors".to_string(),
            processing_date: Local::now().date_naive(),
            sequence_number: 1,
            omit_batch_totals: false,
            crlf_line_endings: false,
        }
    }
}

/// Writes ABA files to any [`Write`] sink.
///
/// Output is buffered: call [`Writer::flush`] (or [`Writer::into_inner`]) to
/// make sure every byte reaches the underlying sink.
///
/// # Example
///
/// ```
/// use aba::{DetailRecord, TransactionCode, Writer, WriterConfig};
///
/// let record = DetailRecord {
///     bsb: "062-000".to_string(),
///     account_number: "12345678".to_string(),
///     transaction_code: TransactionCode::Credit,
///     amount: 10_000,
///     title: "J SMITH".to_string(),
///     trace_bsb: "062-001".to_string(),
///     trace_account: "87654321".to_string(),
///     ..Default::default()
/// };
///
/// let config = WriterConfig::new("CBA", "ACME PTY LTD", 301500);
/// let mut writer = Writer::new(Vec::new(), config);
/// writer.write(&[record.clone(), record]).unwrap();
/// let bytes = writer.into_inner().unwrap();
/// assert_eq!(bytes.len(), 4 * 121);
/// ```
pub struct Writer<W: Write> {
    config: WriterConfig,
    header: Header,
    trailer: Trailer,
    wr: BufWriter<W>,
    error: Option<io::Error>,
}

impl<W: Write> Writer<W> {
    /// Creates a writer around `sink`.
    pub fn new(sink: W, config: WriterConfig) -> Self {
        Writer {
            header: config.header(),
            config,
            trailer: Trailer::new(),
            wr: BufWriter::new(sink),
            error: None,
        }
    }

    /// The writer's configuration.
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Mutable access to the configuration, for setting fields before a write.
    pub fn config_mut(&mut self) -> &mut WriterConfig {
        &mut self.config
    }

    /// The header emitted by the last successful [`Writer::write`].
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The trailer emitted by the last successful [`Writer::write`].
    pub fn trailer(&self) -> &Trailer {
        &self.trailer
    }

    /// Writes a complete file: header, every record, trailer.
    ///
    /// Fails without writing anything if there are fewer than
    /// [`MIN_RECORDS`] records, the submitter configuration is incomplete or
    /// any record fails [`DetailRecord::is_valid`].
    pub fn write(&mut self, records: &[DetailRecord]) -> Result<()> {
        if records.len() < MIN_RECORDS {
            return Err(AbaError::InsufficientRecords);
        }
        self.config.validate()?;

        if let Some(index) = records.iter().position(|r| !r.is_valid()) {
            return Err(AbaError::InvalidRecord { index });
        }

        let header = self.config.header();
        let trailer = self.totals(records);
        let eol = self.config.line_ending();

        let mut file = String::with_capacity((records.len() + 2) * (LINE_WIDTH + 2));
        file.push_str(&header.encode());
        file.push_str(eol);
        for record in records {
            file.push_str(&record.encode());
            file.push_str(eol);
        }
        file.push_str(&trailer.encode());
        file.push_str(eol);

        if let Err(e) = self.wr.write_all(file.as_bytes()) {
            return Err(self.latch(e));
        }

        debug!(
            "Wrote {} records: credit {} debit {} net {}",
            trailer.record_count, trailer.credit_total, trailer.debit_total, trailer.net_total
        );
        self.header = header;
        self.trailer = trailer;
        Ok(())
    }

    /// Builds the trailer for `records`.
    ///
    /// The net total saturates at zero when debits exceed credits, the field
    /// being unsigned.
    fn totals(&self, records: &[DetailRecord]) -> Trailer {
        let mut trailer = Trailer::new();
        trailer.record_count = u32::try_from(records.len()).unwrap_or(u32::MAX);

        if self.config.omit_batch_totals {
            return trailer;
        }

        for (index, record) in records.iter().enumerate() {
            match &record.transaction_code {
                TransactionCode::Debit => trailer.debit_total += record.amount,
                code if code.is_credit() => trailer.credit_total += record.amount,
                code => warn!("Unknown transaction type {} in record {}", code, index),
            }
        }
        trailer.net_total = trailer.credit_total.saturating_sub(trailer.debit_total);
        trailer
    }

    /// Flushes buffered output to the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        match self.wr.flush() {
            Ok(()) => Ok(()),
            Err(e) => Err(self.latch(e)),
        }
    }

    /// Reports the I/O error, if any, hit by a previous write or flush.
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        self.wr
            .into_inner()
            .map_err(|e| AbaError::Io(e.into_error()))
    }

    /// Remembers `e` for [`Writer::error`] and hands it back as an [`AbaError`].
    fn latch(&mut self, e: io::Error) -> AbaError {
        self.error = Some(io::Error::new(e.kind(), e.to_string()));
        AbaError::Io(e)
    }
}
