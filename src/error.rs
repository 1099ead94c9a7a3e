//! Error types for the ABA codec.

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, AbaError>;

/// Errors that can occur while writing or reading an ABA file.
#[derive(Error, Debug)]
pub enum AbaError {
    /// A file needs at least two detail records
    #[error("not enough records (minimum 2 required)")]
    InsufficientRecords,

    /// Submitter bank mnemonic was left blank
    #[error("submitter bank mnemonic not specified")]
    MissingSubmitterBank,

    /// Submitter (user) name was left blank
    #[error("submitter name not specified")]
    MissingSubmitterId,

    /// Numeric APCA user ID was left at zero
    #[error("APCA user ID not specified")]
    MissingApcaId,

    /// A detail record failed validation before writing
    #[error("invalid record can't be written (record {index})")]
    InvalidRecord { index: usize },

    /// A decoded detail line failed validation
    #[error("decoded detail record failed validation")]
    InvalidDetail,

    /// A line did not have the fixed record width
    #[error("malformed line: expected {expected} characters, got {actual}")]
    MalformedLine { expected: usize, actual: usize },

    /// A line started with something other than 0, 1 or 7
    #[error("unexpected record type byte {byte:#04x}, can decode 0, 1 and 7 only")]
    UnexpectedRecordType { byte: u8 },

    /// Failed to read from the source or write to the sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Amount column that can't be expressed in whole cents
    #[error("invalid amount at row {row}: {value}")]
    InvalidAmount { row: usize, value: String },

    /// Missing command line argument
    #[error("Missing argument. Usage: aba decode <file.aba> | aba encode <records.csv> <bank> <submitter-name> <apca-id> [description]")]
    MissingArgument,
}
