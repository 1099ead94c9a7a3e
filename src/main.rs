//! ABA CLI
//!
//! Converts between CSV detail records and ABA direct entry files.
//!
//! # Usage
//!
//! ```bash
//! aba decode payments.aba > payments.csv
//! aba encode payments.csv MBL "Macquarie Bank LTD" 181 WeeklyDebit > payments.aba
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use aba::{csv_io, AbaError, Reader, Result, Writer, WriterConfig};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("decode") => decode(&args[2..]),
        Some("encode") => encode(&args[2..]),
        _ => Err(AbaError::MissingArgument),
    }
}

fn decode(args: &[String]) -> Result<()> {
    let input_path = args.first().ok_or(AbaError::MissingArgument)?;
    let file = File::open(input_path)?;

    let mut reader = Reader::new(file);
    let records = reader.read_all()?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    csv_io::write_records(handle, &records)
}

fn encode(args: &[String]) -> Result<()> {
    let [input_path, bank, submitter_name, apca_id, rest @ ..] = args else {
        return Err(AbaError::MissingArgument);
    };
    let apca_id = apca_id.parse().map_err(|_| AbaError::MissingApcaId)?;

    let mut config = WriterConfig::new(bank.as_str(), submitter_name.as_str(), apca_id);
    if let Some(description) = rest.first() {
        config = config.with_description(description.as_str());
    }

    let file = File::open(input_path)?;
    let records = csv_io::read_records(BufReader::new(file))?;

    let stdout = io::stdout();
    let mut writer = Writer::new(stdout.lock(), config);
    writer.write(&records)?;
    writer.flush()
}
