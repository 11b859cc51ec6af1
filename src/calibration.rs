use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Calibration constants for one tag, kept as the verbatim CSV strings.
/// The float helper does the IEEE-754 encoding, so the strings are handed
/// to it unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calibration {
    pub slope: String,
    pub offset: String,
}

/// Lookup table from the operator-maintained `id,slope,offset` CSV.
///
/// Keys are the decimal string form of the tag id. A row with an empty
/// slope records "no calibration" for that id; later rows override earlier
/// ones for the same id.
#[derive(Debug)]
pub struct CalibrationTable {
    rows: HashMap<String, Option<Calibration>>,
}

impl CalibrationTable {
    pub fn load(path: &Path) -> Result<Self, CalibrationError> {
        let f = File::open(path).map_err(CalibrationError::Io)?;
        Self::parse(BufReader::new(f))
    }

    pub fn parse(reader: impl BufRead) -> Result<Self, CalibrationError> {
        let mut rows: HashMap<String, Option<Calibration>> = HashMap::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line_no = line_no + 1;
            let line = line.map_err(CalibrationError::Io)?;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split(',');
            let id = fields.next().unwrap_or("").trim().to_string();
            let slope = fields.next().map(str::trim).unwrap_or("");
            let offset = fields.next().map(str::trim).unwrap_or("");

            if slope.is_empty() {
                rows.insert(id, None);
                continue;
            }
            if offset.is_empty() {
                return Err(CalibrationError::MissingOffset { line_no });
            }

            check_number(slope, "slope", line_no)?;
            check_number(offset, "offset", line_no)?;

            rows.insert(
                id,
                Some(Calibration {
                    slope: slope.to_string(),
                    offset: offset.to_string(),
                }),
            );
        }

        Ok(Self { rows })
    }

    /// Calibration for a tag id, if the table has a complete row for it.
    pub fn lookup(&self, index: u32) -> Option<&Calibration> {
        self.rows.get(&index.to_string()).and_then(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn check_number(value: &str, field: &'static str, line_no: usize) -> Result<(), CalibrationError> {
    if value.parse::<f64>().is_ok() {
        Ok(())
    } else {
        Err(CalibrationError::BadNumber {
            line_no,
            field,
            value: value.to_string(),
        })
    }
}

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("io: {0}")]
    Io(io::Error),

    #[error("line {line_no}: row has a slope but no offset")]
    MissingOffset { line_no: usize },

    #[error("line {line_no}: {field} {value:?} is not a number")]
    BadNumber {
        line_no: usize,
        field: &'static str,
        value: String,
    },
}
