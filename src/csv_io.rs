//! CSV import/export of detail records.
//!
//! Amounts are written in dollars with two decimal places, e.g. `10.50`, and
//! converted to whole cents on the way in.

use crate::error::{AbaError, Result};
use crate::record::{DetailRecord, Indicator, TransactionCode};
use csv::{ReaderBuilder, Trim};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::str::FromStr;

/// A detail record as it appears in a CSV row.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    bsb: String,
    account_number: String,
    #[serde(default)]
    indicator: String,
    transaction_code: String,
    amount: String,
    title: String,
    #[serde(default)]
    lodgement_reference: String,
    trace_bsb: String,
    trace_account: String,
    #[serde(default)]
    remitter_name: String,
    #[serde(default)]
    withholding_tax: Option<String>,
}

impl CsvRecord {
    fn from_record(record: &DetailRecord) -> Self {
        CsvRecord {
            bsb: record.bsb.clone(),
            account_number: record.account_number.clone(),
            indicator: record
                .indicator
                .map(|i| i.as_char().to_string())
                .unwrap_or_default(),
            transaction_code: record.transaction_code.to_string(),
            amount: to_dollars(record.amount).to_string(),
            title: record.title.clone(),
            lodgement_reference: record.lodgement_reference.clone(),
            trace_bsb: record.trace_bsb.clone(),
            trace_account: record.trace_account.clone(),
            remitter_name: record.remitter_name.clone(),
            withholding_tax: Some(to_dollars(record.withholding_tax).to_string()),
        }
    }

    fn into_record(self, row: usize) -> Result<DetailRecord> {
        Ok(DetailRecord {
            indicator: self.indicator.chars().next().and_then(Indicator::from_char),
            transaction_code: TransactionCode::from(self.transaction_code.as_str()),
            amount: to_cents(&self.amount, row)?,
            withholding_tax: match self.withholding_tax {
                Some(tax) if !tax.is_empty() => to_cents(&tax, row)?,
                _ => 0,
            },
            bsb: self.bsb,
            account_number: self.account_number,
            title: self.title,
            lodgement_reference: self.lodgement_reference,
            trace_bsb: self.trace_bsb,
            trace_account: self.trace_account,
            remitter_name: self.remitter_name,
        })
    }
}

fn to_dollars(cents: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(cents), 2)
}

/// Converts a dollar amount to cents, rejecting negatives and fractions of a cent.
fn to_cents(dollars: &str, row: usize) -> Result<u64> {
    let invalid = || AbaError::InvalidAmount {
        row,
        value: dollars.to_string(),
    };

    let amount = Decimal::from_str(dollars).map_err(|_| invalid())?;
    let cents = amount * Decimal::ONE_HUNDRED;
    if amount.is_sign_negative() || !cents.fract().is_zero() {
        return Err(invalid());
    }
    cents.to_u64().ok_or_else(invalid)
}

/// Reads detail records from CSV with a header row.
///
/// Records are returned as found; validation is left to the [`Writer`](crate::Writer).
pub fn read_records<R: Read>(reader: R) -> Result<Vec<DetailRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<CsvRecord>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row
        records.push(result?.into_record(row_num)?);
    }
    Ok(records)
}

/// Writes detail records as CSV with a header row.
pub fn write_records<W: Write>(writer: W, records: &[DetailRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(CsvRecord::from_record(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "bsb,account_number,indicator,transaction_code,amount,title,lodgement_reference,trace_bsb,trace_account,remitter_name,withholding_tax";

    #[test]
    fn test_read_records() {
        let csv = format!(
            "{}\n888-123,3424,,50,10.00,DEMO DEMO,,111-111,999999999,SpaceshipAU,\n182-222, 260070750 ,N,13,20.5,Macquarie Account,ABLE,999-999,999999999,ddu,1.25\n",
            HEADER
        );
        let records = read_records(Cursor::new(csv)).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].amount, 1000);
        assert_eq!(records[0].transaction_code, TransactionCode::Credit);
        assert_eq!(records[0].indicator, None);
        assert_eq!(records[0].withholding_tax, 0);

        assert_eq!(records[1].account_number, "260070750");
        assert_eq!(records[1].amount, 2050);
        assert_eq!(records[1].indicator, Some(Indicator::NewOrVaried));
        assert_eq!(records[1].transaction_code, TransactionCode::Debit);
        assert_eq!(records[1].withholding_tax, 125);
    }

    #[test]
    fn test_rejects_fractional_cents() {
        let csv = format!(
            "{}\n888-123,3424,,50,10.001,DEMO DEMO,,111-111,999999999,,\n",
            HEADER
        );
        assert!(matches!(
            read_records(Cursor::new(csv)),
            Err(AbaError::InvalidAmount { row: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_negative_amount() {
        let csv = format!(
            "{}\n888-123,3424,,50,-1.00,DEMO DEMO,,111-111,999999999,,\n",
            HEADER
        );
        assert!(matches!(
            read_records(Cursor::new(csv)),
            Err(AbaError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_write_records() {
        let record = DetailRecord {
            bsb: "888-123".to_string(),
            account_number: "3424".to_string(),
            transaction_code: TransactionCode::Credit,
            amount: 1050,
            title: "DEMO DEMO".to_string(),
            trace_bsb: "111-111".to_string(),
            trace_account: "999999999".to_string(),
            ..Default::default()
        };
        let mut out = Vec::new();
        write_records(&mut out, &[record]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), HEADER);
        assert_eq!(
            lines.next().unwrap(),
            "888-123,3424,,50,10.50,DEMO DEMO,,111-111,999999999,,0.00"
        );
    }
}
