//! Detail (type 1) records: one line per credit or debit item.

use crate::error::{AbaError, Result};
use crate::format::{
    expect_tag, expect_width, field, number_field, pad_left, pad_right, sanitize, strip_terminator,
    zero_fill, LINE_WIDTH,
};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Record-type tag of a detail line.
pub const DETAIL_TAG: u8 = b'1';

static BSB_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d{3}$").expect("BSB pattern is valid"));

/// Returns `true` if `bsb` is in the canonical `NNN-NNN` form.
///
/// ```
/// assert!(aba::is_valid_bsb("062-000"));
/// assert!(!aba::is_valid_bsb("062000"));
/// ```
pub fn is_valid_bsb(bsb: &str) -> bool {
    BSB_PATTERN.is_match(bsb)
}

/// Two-digit transaction code at positions 19-20.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TransactionCode {
    /// `13` externally initiated debit item
    Debit,
    /// `50` externally initiated credit item
    #[default]
    Credit,
    /// `51` Australian Government Security Interest
    GovernmentSecurityInterest,
    /// `52` family allowance
    FamilyAllowance,
    /// `53` pay
    Pay,
    /// `54` pension
    Pension,
    /// `55` allotment
    Allotment,
    /// `56` dividend
    Dividend,
    /// `57` debenture/note interest
    NoteInterest,
    /// Anything else, kept verbatim so it can be reported
    Other(String),
}

impl TransactionCode {
    /// The code as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Debit => "13",
            Self::Credit => "50",
            Self::GovernmentSecurityInterest => "51",
            Self::FamilyAllowance => "52",
            Self::Pay => "53",
            Self::Pension => "54",
            Self::Allotment => "55",
            Self::Dividend => "56",
            Self::NoteInterest => "57",
            Self::Other(code) => code,
        }
    }

    /// Returns `true` for every code except [`TransactionCode::Other`].
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Returns `true` for the credit family, i.e. codes starting with `5`.
    pub fn is_credit(&self) -> bool {
        self.as_str().starts_with('5')
    }
}

impl From<&str> for TransactionCode {
    fn from(s: &str) -> Self {
        match s.trim() {
            "13" => Self::Debit,
            "50" => Self::Credit,
            "51" => Self::GovernmentSecurityInterest,
            "52" => Self::FamilyAllowance,
            "53" => Self::Pay,
            "54" => Self::Pension,
            "55" => Self::Allotment,
            "56" => Self::Dividend,
            "57" => Self::NoteInterest,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for TransactionCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional indicator at position 18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// `N` new or varied BSB/account number or name
    NewOrVaried,
    /// `W` dividend paid to a resident of a country with a double tax agreement
    DividendTreaty,
    /// `X` dividend paid to a resident of any other country
    DividendOther,
    /// `Y` interest paid to a non-resident, withholding tax at 113-120
    InterestNonResident,
}

impl Indicator {
    /// The indicator character.
    pub fn as_char(self) -> char {
        match self {
            Self::NewOrVaried => 'N',
            Self::DividendTreaty => 'W',
            Self::DividendOther => 'X',
            Self::InterestNonResident => 'Y',
        }
    }

    /// Maps an indicator character back, `None` for anything unknown.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Self::NewOrVaried),
            'W' => Some(Self::DividendTreaty),
            'X' => Some(Self::DividendOther),
            'Y' => Some(Self::InterestNonResident),
            _ => None,
        }
    }
}

/// A single credit or debit item.
///
/// Records are built by the caller and never mutated by the codec. Text
/// fields longer than their column are truncated on encode; call
/// [`DetailRecord::is_valid`] to reject records the bank won't accept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailRecord {
    /// Receiving BSB in `NNN-NNN` form (2-8)
    pub bsb: String,
    /// Receiving account number, up to 9 characters (9-17)
    pub account_number: String,
    /// Optional indicator (18)
    pub indicator: Option<Indicator>,
    /// Transaction code (19-20)
    pub transaction_code: TransactionCode,
    /// Amount in cents (21-30)
    pub amount: u64,
    /// Title of the receiving account, must not be blank (31-62)
    pub title: String,
    /// Lodgement reference shown on the receiver's statement (63-80)
    pub lodgement_reference: String,
    /// Submitter's BSB for returns, `NNN-NNN` (81-87)
    pub trace_bsb: String,
    /// Submitter's account number for returns (88-96)
    pub trace_account: String,
    /// Name of the remitter (97-112)
    pub remitter_name: String,
    /// Withholding tax in cents (113-120)
    pub withholding_tax: u64,
}

impl DetailRecord {
    /// Checks the record against the rules the bank enforces.
    ///
    /// A record is valid when its transaction code is recognised, its title
    /// isn't blank and both BSBs are in `NNN-NNN` form.
    pub fn is_valid(&self) -> bool {
        if !self.transaction_code.is_recognized() {
            debug!("Unrecognised transaction code {}", self.transaction_code);
            return false;
        }

        if self.title.trim().is_empty() {
            debug!("Blank title");
            return false;
        }

        if !is_valid_bsb(&self.trace_bsb) {
            debug!("Bad trace BSB {:?}", self.trace_bsb);
            return false;
        }

        if !is_valid_bsb(&self.bsb) {
            debug!("Bad BSB {:?}", self.bsb);
            return false;
        }

        true
    }

    /// Encodes the record as a 120-character line without terminator.
    pub fn encode(&self) -> String {
        let indicator = self.indicator.map(Indicator::as_char).unwrap_or(' ');

        let mut line = String::with_capacity(LINE_WIDTH);
        line.push(char::from(DETAIL_TAG));
        line.push_str(&pad_left(&sanitize(&self.bsb), 7, ' '));
        line.push_str(&pad_left(&sanitize(&self.account_number), 9, ' '));
        line.push(indicator);
        line.push_str(&pad_left(&sanitize(self.transaction_code.as_str()), 2, ' '));
        line.push_str(&zero_fill(self.amount, 10));
        line.push_str(&pad_right(&sanitize(&self.title), 32, ' '));
        line.push_str(&pad_right(&sanitize(&self.lodgement_reference), 18, ' '));
        line.push_str(&pad_left(&sanitize(&self.trace_bsb), 7, ' '));
        line.push_str(&pad_left(&sanitize(&self.trace_account), 9, ' '));
        line.push_str(&pad_right(&sanitize(&self.remitter_name), 16, ' '));
        line.push_str(&zero_fill(self.withholding_tax, 8));
        pad_right(&line, LINE_WIDTH, '#')
    }

    /// Decodes a detail line, with or without its terminator.
    ///
    /// Numbers that don't parse become zero. A record that decodes but fails
    /// [`DetailRecord::is_valid`] is reported as [`AbaError::InvalidDetail`].
    pub fn decode(line: &str) -> Result<Self> {
        let line = strip_terminator(line);
        expect_width(line)?;
        expect_tag(line, DETAIL_TAG)?;

        let record = DetailRecord {
            bsb: field(line, 1, 8),
            account_number: field(line, 8, 17),
            indicator: field(line, 17, 18).chars().next().and_then(Indicator::from_char),
            transaction_code: TransactionCode::from(field(line, 18, 20).as_str()),
            amount: number_field(line, 20, 30),
            title: field(line, 30, 62),
            lodgement_reference: field(line, 62, 80),
            trace_bsb: field(line, 80, 87),
            trace_account: field(line, 87, 96),
            remitter_name: field(line, 96, 112),
            withholding_tax: number_field(line, 112, 120),
        };

        if !record.is_valid() {
            return Err(AbaError::InvalidDetail);
        }
        Ok(record)
    }
}
