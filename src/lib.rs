//! # ABA
//!
//! Reader and writer for ABA (Cemtex) direct entry files, the fixed-width
//! format Australian banks accept for bulk credits and debits.
//!
//! A file is one header line, at least one detail line and one trailer line,
//! each exactly 120 characters.
//!
//! ## Design Principles
//!
//! - **All-or-nothing writes**: configuration and every record are validated
//!   before the first byte reaches the sink
//! - **Lossy fixed columns**: oversized text is truncated, free text is
//!   reduced to printable ASCII so columns never shift
//! - **Lenient reads**: unparseable numbers decode as zero and invalid detail
//!   lines are dropped instead of failing the whole file
//!
//! ## Example
//!
//! ```
//! use aba::{DetailRecord, Reader, TransactionCode, Writer, WriterConfig};
//! use std::io::Cursor;
//!
//! let record = DetailRecord {
//!     bsb: "888-123".to_string(),
//!     account_number: "3424".to_string(),
//!     transaction_code: TransactionCode::Credit,
//!     amount: 1000,
//!     title: "DEMO DEMO".to_string(),
//!     trace_bsb: "111-111".to_string(),
//!     trace_account: "999999999".to_string(),
//!     ..Default::default()
//! };
//!
//! let config = WriterConfig::new("MBL", "Macquarie Bank LTD", 181).with_description("WeeklyDebit");
//! let mut writer = Writer::new(Vec::new(), config);
//! writer.write(&[record.clone(), record]).unwrap();
//! let bytes = writer.into_inner().unwrap();
//!
//! let mut reader = Reader::new(Cursor::new(bytes));
//! let records = reader.read_all().unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(reader.trailer().unwrap().credit_total, 2000);
//! ```

pub mod csv_io;
pub mod error;
pub mod format;
pub mod header;
pub mod reader;
pub mod record;
pub mod trailer;
pub mod writer;

pub use error::{AbaError, Result};
pub use format::LINE_WIDTH;
pub use header::Header;
pub use reader::{Line, Reader};
pub use record::{is_valid_bsb, DetailRecord, Indicator, TransactionCode};
pub use trailer::Trailer;
pub use writer::{Writer, WriterConfig, MIN_RECORDS};
